use super::{
    assign, fmt_cells, specs::assert_not_at_end, values_of, CellMap, CloneableGenerator,
    InstChecker, InstGenerator, VarCell,
};
use crate::structure::ElementTuple;
use std::{collections::HashSet, fmt::Display};

/// A generator projecting the instantiations of an inner generator on a set of outer cells.
///
/// This generator is used for existentially quantified formulas: the inner generator produces values for the outer cells and for the quantified ones,
/// and only distinct values of the outer cells are kept for each round.
/// With no outer cell, the generator stops after the first success of the inner generator.
pub struct TrueQuantKernelGenerator {
    inner: Box<dyn CloneableGenerator>,
    outer: Vec<VarCell>,
    seen: HashSet<ElementTuple>,
    current: Option<ElementTuple>,
    at_end: bool,
}

impl TrueQuantKernelGenerator {
    /// Builds a generator projecting the instantiations of `inner` on the `outer` cells.
    pub fn new(inner: Box<dyn CloneableGenerator>, outer: Vec<VarCell>) -> Self {
        Self {
            inner,
            outer,
            seen: HashSet::new(),
            current: None,
            at_end: true,
        }
    }
}

impl InstChecker for TrueQuantKernelGenerator {
    fn check(&mut self) -> bool {
        let expected = values_of(&self.outer);
        let mut found = false;
        self.inner.begin();
        while !self.inner.is_at_end() {
            if values_of(&self.outer) == expected {
                found = true;
                break;
            }
            self.inner.next();
        }
        assign(&self.outer, &expected);
        found
    }
}

impl InstGenerator for TrueQuantKernelGenerator {
    fn reset(&mut self) {
        self.seen.clear();
        self.current = None;
        self.at_end = false;
        self.inner.reset();
        if self.inner.is_at_end() {
            self.at_end = true;
        }
    }

    fn next(&mut self) {
        assert_not_at_end(self.at_end, &*self);
        if self.outer.is_empty() && self.current.is_some() {
            self.at_end = true;
            return;
        }
        while !self.inner.is_at_end() {
            self.inner.next();
            if self.inner.is_at_end() {
                break;
            }
            let projection = values_of(&self.outer);
            if self.seen.insert(projection.clone()) {
                self.current = Some(projection);
                return;
            }
        }
        self.current = None;
        self.at_end = true;
    }

    fn is_at_end(&self) -> bool {
        self.at_end
    }

    fn set_vars_again(&mut self) {
        if let Some(values) = &self.current {
            assign(&self.outer, values)
        }
    }
}

impl CloneableGenerator for TrueQuantKernelGenerator {
    fn clone_with_map(&self, cells: &mut CellMap) -> Box<dyn CloneableGenerator> {
        Box::new(Self::new(
            self.inner.clone_with_map(cells),
            cells.map_all(&self.outer),
        ))
    }
}

impl Display for TrueQuantKernelGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "exists[{}]({})", fmt_cells(&self.outer), self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::{collect_instances, EmptyGenerator, Pattern, TableGenerator},
        structure::{
            ElementFactory, EnumeratedPredTable, IntRangeSortTable, PredTable, SortTable, Universe,
        },
    };
    use std::rc::Rc;

    fn table_generator(
        factory: &Rc<ElementFactory>,
        x: &VarCell,
        y: &VarCell,
    ) -> Box<dyn CloneableGenerator> {
        let tuples = [(1, 1), (1, 2), (2, 2), (3, 1), (3, 3)]
            .iter()
            .map(|(a, b)| vec![factory.int(*a), factory.int(*b)])
            .collect();
        let table: Rc<dyn PredTable> =
            Rc::new(EnumeratedPredTable::new_with_tuples(2, tuples).unwrap());
        let sort: Rc<dyn SortTable> = Rc::new(IntRangeSortTable::new(1, 3, Rc::clone(factory)));
        Box::new(
            TableGenerator::new(
                table,
                Universe::new(vec![Rc::clone(&sort), sort]),
                &[Pattern::Output, Pattern::Output],
                vec![x.clone(), y.clone()],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_projection_dedup() {
        let factory = Rc::new(ElementFactory::default());
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g =
            TrueQuantKernelGenerator::new(table_generator(&factory, &x, &y), vec![y.clone()]);
        let values = collect_instances(&mut g, &[y.clone()], None);
        assert_eq!(
            vec![vec![factory.int(1)], vec![factory.int(2)], vec![factory.int(3)]],
            values
        );
        assert_eq!(values.len(), collect_instances(&mut g, &[y], None).len());
    }

    #[test]
    fn test_no_outer_cell() {
        let factory = Rc::new(ElementFactory::default());
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g = TrueQuantKernelGenerator::new(table_generator(&factory, &x, &y), vec![]);
        assert_eq!(1, collect_instances(&mut g, &[], None).len());
        let mut g = TrueQuantKernelGenerator::new(Box::new(EmptyGenerator), vec![]);
        assert!(collect_instances(&mut g, &[], None).is_empty());
    }

    #[test]
    fn test_check_restores_outer_values() {
        let factory = Rc::new(ElementFactory::default());
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g =
            TrueQuantKernelGenerator::new(table_generator(&factory, &x, &y), vec![x.clone()]);
        x.set(factory.int(2));
        assert!(g.check());
        assert_eq!(factory.int(2), x.value());
        let mut g =
            TrueQuantKernelGenerator::new(table_generator(&factory, &x, &y), vec![y.clone()]);
        y.set(factory.int(4));
        assert!(!g.check());
        assert_eq!(factory.int(4), y.value());
    }

    #[test]
    fn test_set_vars_again() {
        let factory = Rc::new(ElementFactory::default());
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g =
            TrueQuantKernelGenerator::new(table_generator(&factory, &x, &y), vec![y.clone()]);
        g.begin();
        g.next();
        let produced = y.value();
        y.set(factory.int(100));
        g.set_vars_again();
        assert_eq!(produced, y.value());
    }
}
