use super::{
    specs::assert_not_at_end, CellMap, CloneableGenerator, InstChecker, InstGenerator, Pattern,
    VarCell,
};
use crate::{
    structure::{DomainElement, SortTable},
    utils::CompType,
};
use anyhow::{anyhow, Context, Result};
use log::debug;
use std::{cmp::Ordering, fmt::Display, rc::Rc};

// Enumerates the elements o of a table such that `o op bound` holds.
//
// Ascending enumerations stop as soon as the relation is violated for `<` and `=<`;
// tables without least element are enumerated downward from the bound for these operators.
#[derive(Clone)]
struct BoundedCursor {
    op: CompType,
    bound: DomainElement,
    current: Option<DomainElement>,
    started: bool,
    descending: bool,
    produced_any: bool,
}

impl BoundedCursor {
    fn new(op: CompType, bound: DomainElement) -> Self {
        Self {
            op,
            bound,
            current: None,
            started: false,
            descending: false,
            produced_any: false,
        }
    }

    fn first_candidate(&mut self, table: &dyn SortTable) -> Option<DomainElement> {
        match self.op {
            CompType::Eq => {
                if table.contains(&self.bound) {
                    Some(self.bound.clone())
                } else {
                    None
                }
            }
            CompType::Neq => table.first(),
            CompType::Lt => table.first().or_else(|| {
                self.descending = true;
                table.prev_before(&self.bound)
            }),
            CompType::Leq => table.first().or_else(|| {
                self.descending = true;
                table.last_upto(&self.bound)
            }),
            CompType::Gt => table.next_after(&self.bound),
            CompType::Geq => table.first_from(&self.bound),
        }
    }

    fn advance(&mut self, table: &dyn SortTable) -> Option<DomainElement> {
        loop {
            let candidate = if self.started {
                match (&self.current, self.op) {
                    (None, _) | (_, CompType::Eq) => None,
                    (Some(c), _) if self.descending => table.prev_before(c),
                    (Some(c), _) => table.next_after(c),
                }
            } else {
                self.started = true;
                self.first_candidate(table)
            };
            self.current = candidate;
            let c = self.current.as_ref()?;
            let accepted = match self.op {
                CompType::Neq => {
                    if *c == self.bound {
                        continue;
                    }
                    true
                }
                CompType::Lt | CompType::Leq if !self.descending => {
                    self.op.holds(c.cmp(&self.bound))
                }
                _ => true,
            };
            if accepted {
                self.produced_any = true;
                return self.current.clone();
            }
            self.current = None;
            return None;
        }
    }
}

fn check_follower(op: CompType, table: &dyn SortTable) -> Result<()> {
    let ok = match op {
        CompType::Eq => true,
        CompType::Neq => table.is_enumerable(),
        _ => table.is_discrete(),
    };
    if ok {
        Ok(())
    } else {
        Err(anyhow!(
            "cannot enumerate the elements of {:?} which are {} a given value",
            table,
            op
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Check,
    LeftBound,
    RightBound,
    Joint(Side),
    SameVariable(Side),
}

/// A generator for comparisons `x op y` between the elements of two sort tables.
///
/// Depending on the pattern, the generator checks the comparison (both sides are inputs),
/// enumerates one side given the other one, or enumerates both sides.
/// When both sides are outputs, the enumeration is driven by a finite side;
/// when a single side is an output, it is enumerated in increasing order and the enumeration stops as soon as the comparison cannot hold anymore.
pub struct ComparisonGenerator {
    left: VarCell,
    right: VarCell,
    left_table: Rc<dyn SortTable>,
    right_table: Rc<dyn SortTable>,
    comp: CompType,
    mode: Mode,
    driver_current: Option<DomainElement>,
    driver_started: bool,
    cursor: Option<BoundedCursor>,
    check_done: bool,
    at_end: bool,
}

impl ComparisonGenerator {
    /// Builds a generator for `left comp right`.
    ///
    /// Each side is given as a binding cell and the sort table its values must belong to.
    /// The pattern gives the role of the left and right side.
    ///
    /// An error is returned if the output side(s) cannot be enumerated as required,
    /// in particular if both sides are outputs and both tables are infinite.
    ///
    /// # Example
    ///
    /// ```
    /// # use fogrounder::generators::{collect_instances, ComparisonGenerator, Pattern, VarCell};
    /// # use fogrounder::structure::{ElementFactory, EnumeratedSortTable, NaturalSortTable, SortTable};
    /// # use fogrounder::utils::CompType;
    /// # use std::rc::Rc;
    /// let factory = Rc::new(ElementFactory::default());
    /// let nat: Rc<dyn SortTable> = Rc::new(NaturalSortTable::new(Rc::clone(&factory)));
    /// let s: Rc<dyn SortTable> = Rc::new(EnumeratedSortTable::new(vec![factory.int(5), factory.int(6)]));
    /// let (x, y) = (VarCell::new("x"), VarCell::new("y"));
    /// let mut generator = ComparisonGenerator::new(
    ///     (x.clone(), nat),
    ///     (y.clone(), s),
    ///     CompType::Lt,
    ///     [Pattern::Output, Pattern::Input],
    /// )
    /// .unwrap();
    /// y.set(factory.int(6));
    /// assert_eq!(6, collect_instances(&mut generator, &[x], None).len());
    /// ```
    pub fn new(
        left: (VarCell, Rc<dyn SortTable>),
        right: (VarCell, Rc<dyn SortTable>),
        comp: CompType,
        pattern: [Pattern; 2],
    ) -> Result<Self> {
        let (left, left_table) = left;
        let (right, right_table) = right;
        let context = || format!("while building a generator for {} {} {}", left, comp, right);
        let mode = match (pattern[0], pattern[1]) {
            (Pattern::Input, Pattern::Input) => Mode::Check,
            _ if left.same_cell(&right) && (pattern[0].is_input() || pattern[1].is_input()) => {
                Mode::Check
            }
            _ if left.same_cell(&right) => Mode::SameVariable(
                Self::choose_driver(&left_table, &right_table).with_context(context)?,
            ),
            (Pattern::Input, Pattern::Output) => {
                check_follower(comp.invert(), right_table.as_ref()).with_context(context)?;
                Mode::LeftBound
            }
            (Pattern::Output, Pattern::Input) => {
                check_follower(comp, left_table.as_ref()).with_context(context)?;
                Mode::RightBound
            }
            (Pattern::Output, Pattern::Output) => {
                if !left_table.is_finite() && !right_table.is_finite() {
                    return Err(anyhow!(
                        "cannot enumerate a comparison between two infinite sorts"
                    ))
                    .with_context(context);
                }
                let driver =
                    Self::choose_driver(&left_table, &right_table).with_context(context)?;
                let follower_check = match driver {
                    Side::Left => check_follower(comp.invert(), right_table.as_ref()),
                    Side::Right => check_follower(comp, left_table.as_ref()),
                };
                follower_check.with_context(context)?;
                Mode::Joint(driver)
            }
        };
        debug!("comparison generator for {} {} {} in mode {:?}", left, comp, right, mode);
        Ok(Self {
            left,
            right,
            left_table,
            right_table,
            comp,
            mode,
            driver_current: None,
            driver_started: false,
            cursor: None,
            check_done: false,
            at_end: true,
        })
    }

    // infinite drivers are only chosen for same-variable comparisons, where the other table is a filter
    fn choose_driver(
        left_table: &Rc<dyn SortTable>,
        right_table: &Rc<dyn SortTable>,
    ) -> Result<Side> {
        match (left_table.is_finite(), right_table.is_finite()) {
            (true, true) => {
                if left_table.size() <= right_table.size() {
                    Ok(Side::Left)
                } else {
                    Ok(Side::Right)
                }
            }
            (true, false) => Ok(Side::Left),
            (false, true) => Ok(Side::Right),
            (false, false) if left_table.is_enumerable() => Ok(Side::Left),
            (false, false) if right_table.is_enumerable() => Ok(Side::Right),
            (false, false) => Err(anyhow!(
                "cannot enumerate a comparison between two sorts without least element"
            )),
        }
    }

    fn side(&self, side: Side) -> (&VarCell, &Rc<dyn SortTable>) {
        match side {
            Side::Left => (&self.left, &self.left_table),
            Side::Right => (&self.right, &self.right_table),
        }
    }

    fn other(side: Side) -> Side {
        match side {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    // the operator o must satisfy w.r.t. the value of the other side when o is on the given side
    fn op_for_side(&self, side: Side) -> CompType {
        match side {
            Side::Left => self.comp,
            Side::Right => self.comp.invert(),
        }
    }

    fn holds(&self, left: &DomainElement, right: &DomainElement) -> bool {
        self.left_table.contains(left)
            && self.right_table.contains(right)
            && self.comp.holds(left.cmp(right))
    }

    fn next_bound(&mut self, output: Side) {
        let table = Rc::clone(self.side(output).1);
        match self.cursor.as_mut().and_then(|c| c.advance(table.as_ref())) {
            Some(v) => self.side(output).0.set(v),
            None => self.at_end = true,
        }
    }

    fn next_driver(&mut self, driver: Side) -> Option<DomainElement> {
        let table = Rc::clone(self.side(driver).1);
        let candidate = if self.driver_started {
            self.driver_current.as_ref().and_then(|d| table.next_after(d))
        } else {
            self.driver_started = true;
            table.first()
        };
        self.driver_current = candidate.clone();
        candidate
    }

    fn next_joint(&mut self, driver: Side) {
        let follower = Self::other(driver);
        let follower_op = self.op_for_side(follower);
        let follower_table = Rc::clone(self.side(follower).1);
        loop {
            let step = self
                .cursor
                .as_mut()
                .map(|c| (c.advance(follower_table.as_ref()), c.produced_any));
            match step {
                Some((Some(v), _)) => {
                    self.side(follower).0.set(v);
                    return;
                }
                // larger driver values cannot satisfy the comparison either
                Some((None, false)) if matches!(follower_op, CompType::Gt | CompType::Geq) => {
                    self.at_end = true;
                    return;
                }
                _ => {}
            }
            match self.next_driver(driver) {
                Some(d) => {
                    self.side(driver).0.set(d.clone());
                    self.cursor = Some(BoundedCursor::new(follower_op, d));
                }
                None => {
                    self.at_end = true;
                    return;
                }
            }
        }
    }

    fn next_same_variable(&mut self, driver: Side) {
        let other_table = Rc::clone(self.side(Self::other(driver)).1);
        while let Some(d) = self.next_driver(driver) {
            if other_table.contains(&d) {
                self.left.set(d);
                return;
            }
        }
        self.at_end = true;
    }
}

impl InstChecker for ComparisonGenerator {
    fn check(&mut self) -> bool {
        self.holds(&self.left.value(), &self.right.value())
    }
}

impl InstGenerator for ComparisonGenerator {
    fn reset(&mut self) {
        self.at_end = false;
        self.check_done = false;
        self.driver_current = None;
        self.driver_started = false;
        self.cursor = None;
        match self.mode {
            Mode::Check => self.at_end = !self.check(),
            Mode::LeftBound => {
                let x = self.left.value();
                if self.left_table.contains(&x) {
                    self.cursor = Some(BoundedCursor::new(self.op_for_side(Side::Right), x));
                } else {
                    self.at_end = true;
                }
            }
            Mode::RightBound => {
                let y = self.right.value();
                if self.right_table.contains(&y) {
                    self.cursor = Some(BoundedCursor::new(self.op_for_side(Side::Left), y));
                } else {
                    self.at_end = true;
                }
            }
            Mode::Joint(_) => {}
            Mode::SameVariable(_) => self.at_end = !self.comp.holds(Ordering::Equal),
        }
    }

    fn next(&mut self) {
        assert_not_at_end(self.at_end, &*self);
        match self.mode {
            Mode::Check => {
                if self.check_done {
                    self.at_end = true;
                } else {
                    self.check_done = true;
                }
            }
            Mode::LeftBound => self.next_bound(Side::Right),
            Mode::RightBound => self.next_bound(Side::Left),
            Mode::Joint(driver) => self.next_joint(driver),
            Mode::SameVariable(driver) => self.next_same_variable(driver),
        }
    }

    fn is_at_end(&self) -> bool {
        self.at_end
    }

    fn set_vars_again(&mut self) {
        let follower_value = self.cursor.as_ref().and_then(|c| c.current.clone());
        match self.mode {
            Mode::Check => {}
            Mode::LeftBound => {
                if let Some(v) = follower_value {
                    self.right.set(v)
                }
            }
            Mode::RightBound => {
                if let Some(v) = follower_value {
                    self.left.set(v)
                }
            }
            Mode::Joint(driver) => {
                if let Some(d) = &self.driver_current {
                    self.side(driver).0.set(d.clone());
                }
                if let Some(v) = follower_value {
                    self.side(Self::other(driver)).0.set(v)
                }
            }
            Mode::SameVariable(_) => {
                if let Some(d) = &self.driver_current {
                    self.left.set(d.clone());
                }
            }
        }
    }
}

impl CloneableGenerator for ComparisonGenerator {
    fn clone_with_map(&self, cells: &mut CellMap) -> Box<dyn CloneableGenerator> {
        Box::new(Self {
            left: cells.map(&self.left),
            right: cells.map(&self.right),
            left_table: Rc::clone(&self.left_table),
            right_table: Rc::clone(&self.right_table),
            comp: self.comp,
            mode: self.mode,
            driver_current: None,
            driver_started: false,
            cursor: None,
            check_done: false,
            at_end: true,
        })
    }
}

impl Display for ComparisonGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.comp, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::collect_instances,
        structure::{
            ElementFactory, EnumeratedSortTable, IntSortTable, NaturalSortTable, NumberSortTable,
        },
    };
    use strum::IntoEnumIterator;

    struct Fixture {
        factory: Rc<ElementFactory>,
        nat: Rc<dyn SortTable>,
        s: Rc<dyn SortTable>,
    }

    impl Fixture {
        fn new() -> Self {
            let factory = Rc::new(ElementFactory::default());
            let nat: Rc<dyn SortTable> = Rc::new(NaturalSortTable::new(Rc::clone(&factory)));
            let s: Rc<dyn SortTable> = Rc::new(EnumeratedSortTable::new(
                (5..=7).map(|n| factory.int(n)).collect(),
            ));
            Self { factory, nat, s }
        }

        fn ints(&self, values: impl Iterator<Item = i64>) -> Vec<Vec<DomainElement>> {
            values.map(|n| vec![self.factory.int(n)]).collect()
        }
    }

    #[test]
    fn test_bound_finite_left_infinite_output() {
        let f = Fixture::new();
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g = ComparisonGenerator::new(
            (x.clone(), Rc::clone(&f.s)),
            (y.clone(), Rc::clone(&f.nat)),
            CompType::Lt,
            [Pattern::Input, Pattern::Output],
        )
        .unwrap();
        x.set(f.factory.int(6));
        assert_eq!(f.ints(7..12), collect_instances(&mut g, &[y], Some(5)));
    }

    #[test]
    fn test_infinite_output_bounded_by_finite_input() {
        let f = Fixture::new();
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g = ComparisonGenerator::new(
            (x.clone(), Rc::clone(&f.nat)),
            (y.clone(), Rc::clone(&f.s)),
            CompType::Lt,
            [Pattern::Output, Pattern::Input],
        )
        .unwrap();
        y.set(f.factory.int(6));
        assert_eq!(f.ints(0..6), collect_instances(&mut g, &[x], None));
        assert!(g.is_at_end());
    }

    #[test]
    fn test_termination_with_infinite_input() {
        let f = Fixture::new();
        for comp in CompType::iter() {
            let (x, y) = (VarCell::new("x"), VarCell::new("y"));
            let mut g = ComparisonGenerator::new(
                (x.clone(), Rc::clone(&f.nat)),
                (y.clone(), Rc::clone(&f.s)),
                comp,
                [Pattern::Input, Pattern::Output],
            )
            .unwrap();
            x.set(f.factory.int(6));
            let values = collect_instances(&mut g, &[y.clone()], None);
            let expected = (5..=7)
                .filter(|n| comp.holds(6.cmp(n)))
                .map(|n| vec![f.factory.int(n)])
                .collect::<Vec<_>>();
            assert_eq!(expected, values, "for operator {}", comp);
        }
    }

    #[test]
    fn test_check_mode() {
        let f = Fixture::new();
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g = ComparisonGenerator::new(
            (x.clone(), Rc::clone(&f.nat)),
            (y.clone(), Rc::clone(&f.s)),
            CompType::Geq,
            [Pattern::Input, Pattern::Input],
        )
        .unwrap();
        x.set(f.factory.int(6));
        y.set(f.factory.int(6));
        assert_eq!(1, collect_instances(&mut g, &[], None).len());
        y.set(f.factory.int(7));
        assert!(collect_instances(&mut g, &[], None).is_empty());
        y.set(f.factory.int(4));
        assert!(!g.check());
    }

    #[test]
    fn test_joint_driven_by_finite_side() {
        let f = Fixture::new();
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g = ComparisonGenerator::new(
            (x.clone(), Rc::clone(&f.nat)),
            (y.clone(), Rc::clone(&f.s)),
            CompType::Lt,
            [Pattern::Output, Pattern::Output],
        )
        .unwrap();
        let values = collect_instances(&mut g, &[x, y], None);
        let mut expected = Vec::new();
        for j in 5..=7 {
            for i in 0..j {
                expected.push(vec![f.factory.int(i), f.factory.int(j)]);
            }
        }
        assert_eq!(expected, values);
    }

    #[test]
    fn test_joint_equality() {
        let f = Fixture::new();
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let t: Rc<dyn SortTable> = Rc::new(EnumeratedSortTable::new(
            (6..=9).map(|n| f.factory.int(n)).collect(),
        ));
        let mut g = ComparisonGenerator::new(
            (x.clone(), t),
            (y.clone(), Rc::clone(&f.s)),
            CompType::Eq,
            [Pattern::Output, Pattern::Output],
        )
        .unwrap();
        let values = collect_instances(&mut g, &[x, y], None);
        assert_eq!(
            vec![
                vec![f.factory.int(6), f.factory.int(6)],
                vec![f.factory.int(7), f.factory.int(7)]
            ],
            values
        );
    }

    #[test]
    fn test_joint_early_stop() {
        let f = Fixture::new();
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let small: Rc<dyn SortTable> = Rc::new(EnumeratedSortTable::new(
            (1..=3).map(|n| f.factory.int(n)).collect(),
        ));
        let large: Rc<dyn SortTable> = Rc::new(EnumeratedSortTable::new(
            (1..=5).map(|n| f.factory.int(n)).collect(),
        ));
        let mut g = ComparisonGenerator::new(
            (x.clone(), large),
            (y.clone(), small),
            CompType::Gt,
            [Pattern::Output, Pattern::Output],
        )
        .unwrap();
        let values = collect_instances(&mut g, &[x, y], None);
        assert_eq!(9, values.len());
        assert!(values
            .iter()
            .all(|v| v[0].as_int().unwrap() > v[1].as_int().unwrap()));
    }

    #[test]
    fn test_joint_two_infinite_sorts() {
        let f = Fixture::new();
        let int: Rc<dyn SortTable> = Rc::new(IntSortTable::new(Rc::clone(&f.factory)));
        assert!(ComparisonGenerator::new(
            (VarCell::new("x"), Rc::clone(&int)),
            (VarCell::new("y"), int),
            CompType::Eq,
            [Pattern::Output, Pattern::Output],
        )
        .is_err());
    }

    #[test]
    fn test_joint_two_naturals() {
        let f = Fixture::new();
        for comp in CompType::iter() {
            assert!(
                ComparisonGenerator::new(
                    (VarCell::new("x"), Rc::clone(&f.nat)),
                    (VarCell::new("y"), Rc::clone(&f.nat)),
                    comp,
                    [Pattern::Output, Pattern::Output],
                )
                .is_err(),
                "for operator {}",
                comp
            );
        }
    }

    #[test]
    fn test_same_variable_over_naturals() {
        let f = Fixture::new();
        let x = VarCell::new("x");
        let mut g = ComparisonGenerator::new(
            (x.clone(), Rc::clone(&f.nat)),
            (x.clone(), Rc::clone(&f.nat)),
            CompType::Geq,
            [Pattern::Output, Pattern::Output],
        )
        .unwrap();
        assert_eq!(f.ints(0..4), collect_instances(&mut g, &[x], Some(4)));
    }

    #[test]
    fn test_dense_output_only_for_equality() {
        let f = Fixture::new();
        let numbers: Rc<dyn SortTable> = Rc::new(NumberSortTable);
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        assert!(ComparisonGenerator::new(
            (x.clone(), Rc::clone(&f.s)),
            (y.clone(), Rc::clone(&numbers)),
            CompType::Lt,
            [Pattern::Input, Pattern::Output],
        )
        .is_err());
        let mut g = ComparisonGenerator::new(
            (x.clone(), Rc::clone(&f.s)),
            (y.clone(), numbers),
            CompType::Eq,
            [Pattern::Input, Pattern::Output],
        )
        .unwrap();
        x.set(f.factory.int(5));
        assert_eq!(f.ints(5..6), collect_instances(&mut g, &[y], None));
    }

    #[test]
    fn test_descending_over_integers() {
        let f = Fixture::new();
        let int: Rc<dyn SortTable> = Rc::new(IntSortTable::new(Rc::clone(&f.factory)));
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g = ComparisonGenerator::new(
            (x.clone(), int),
            (y.clone(), Rc::clone(&f.s)),
            CompType::Leq,
            [Pattern::Output, Pattern::Input],
        )
        .unwrap();
        y.set(f.factory.int(5));
        assert_eq!(
            f.ints([5, 4, 3].into_iter()),
            collect_instances(&mut g, &[x], Some(3))
        );
    }

    #[test]
    fn test_same_variable() {
        let f = Fixture::new();
        let x = VarCell::new("x");
        let mut g = ComparisonGenerator::new(
            (x.clone(), Rc::clone(&f.nat)),
            (x.clone(), Rc::clone(&f.s)),
            CompType::Leq,
            [Pattern::Output, Pattern::Output],
        )
        .unwrap();
        assert_eq!(f.ints(5..=7), collect_instances(&mut g, &[x.clone()], None));
        let mut g = ComparisonGenerator::new(
            (x.clone(), Rc::clone(&f.nat)),
            (x.clone(), Rc::clone(&f.s)),
            CompType::Neq,
            [Pattern::Output, Pattern::Output],
        )
        .unwrap();
        assert!(collect_instances(&mut g, &[x], None).is_empty());
    }

    #[test]
    fn test_set_vars_again_joint() {
        let f = Fixture::new();
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g = ComparisonGenerator::new(
            (x.clone(), Rc::clone(&f.nat)),
            (y.clone(), Rc::clone(&f.s)),
            CompType::Neq,
            [Pattern::Output, Pattern::Output],
        )
        .unwrap();
        g.begin();
        g.next();
        let expected = vec![x.value(), y.value()];
        x.set(f.factory.int(100));
        y.set(f.factory.int(100));
        g.set_vars_again();
        assert_eq!(expected, vec![x.value(), y.value()]);
    }

    #[test]
    fn test_input_outside_table() {
        let f = Fixture::new();
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g = ComparisonGenerator::new(
            (x.clone(), Rc::clone(&f.s)),
            (y.clone(), Rc::clone(&f.nat)),
            CompType::Lt,
            [Pattern::Input, Pattern::Output],
        )
        .unwrap();
        x.set(f.factory.int(1));
        g.begin();
        assert!(g.is_at_end());
    }
}
