use super::{
    specs::assert_not_at_end, CellMap, CloneableGenerator, InstChecker, InstGenerator, VarCell,
};
use crate::structure::{DomainElement, ElementFactory, ElementValue, SortTable};
use anyhow::{anyhow, Result};
use log::debug;
use std::{fmt::Display, rc::Rc};

/// A binary arithmetic operator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter,
)]
pub enum ArithOp {
    /// Addition
    #[strum(serialize = "+")]
    Plus,
    /// Subtraction
    #[strum(serialize = "-")]
    Minus,
    /// Multiplication
    #[strum(serialize = "*")]
    Times,
    /// Division
    #[strum(serialize = "/")]
    Div,
    /// Remainder of the truncated division
    #[strum(serialize = "%")]
    Mod,
}

impl ArithOp {
    /// Applies the operator.
    ///
    /// Integer operands are combined with checked 64-bit arithmetic; as soon as an operand is a float, the computation is made in double precision.
    /// A division of integers with a non-zero remainder gives a float; generators whose output sort only holds integers reject it.
    /// `None` is returned when the result is undefined: non-numeric operand, division or remainder by zero,
    /// integer overflow, or non-finite float.
    ///
    /// # Example
    ///
    /// ```
    /// # use fogrounder::generators::ArithOp;
    /// # use fogrounder::structure::ElementFactory;
    /// let factory = ElementFactory::default();
    /// let div = |l, r| ArithOp::Div.apply(&factory.int(l), &factory.int(r), &factory);
    /// assert_eq!(Some(factory.int(3)), div(6, 2));
    /// assert_eq!(Some(factory.double(3.5)), div(7, 2));
    /// assert_eq!(None, div(7, 0));
    /// let max = factory.int(i64::MAX);
    /// assert_eq!(None, ArithOp::Plus.apply(&max, &factory.int(1), &factory));
    /// ```
    pub fn apply(
        &self,
        left: &DomainElement,
        right: &DomainElement,
        factory: &ElementFactory,
    ) -> Option<DomainElement> {
        match (left.value(), right.value()) {
            (ElementValue::Int(l), ElementValue::Int(r)) => {
                let (l, r) = (*l, *r);
                let result = match self {
                    ArithOp::Plus => l.checked_add(r),
                    ArithOp::Minus => l.checked_sub(r),
                    ArithOp::Times => l.checked_mul(r),
                    ArithOp::Div => match l.checked_rem(r) {
                        Some(0) => l.checked_div(r),
                        Some(_) => return Some(factory.double(l as f64 / r as f64)),
                        None => None,
                    },
                    ArithOp::Mod => l.checked_rem(r),
                }?;
                Some(factory.int(result))
            }
            _ => {
                let (l, r) = (left.as_f64()?, right.as_f64()?);
                let result = match self {
                    ArithOp::Plus => l + r,
                    ArithOp::Minus => l - r,
                    ArithOp::Times => l * r,
                    ArithOp::Div | ArithOp::Mod if r == 0.0 => return None,
                    ArithOp::Div => l / r,
                    ArithOp::Mod => l % r,
                };
                if result.is_finite() {
                    Some(factory.double(result))
                } else {
                    None
                }
            }
        }
    }

    /// Returns the operator and the operand order computing the given operand from the result and the other operand.
    ///
    /// For `l + r = o`, `l = o - r` and `r = o - l`; for `l - r = o`, `l = o + r` and `r = l - o`.
    /// The returned boolean is `true` iff the result must be the left operand of the inverse operation.
    ///
    /// Other operators cannot be inverted this way since their inverse is not a function.
    fn inverse(&self, solved_left: bool) -> Result<(ArithOp, bool)> {
        match (self, solved_left) {
            (ArithOp::Plus, _) => Ok((ArithOp::Minus, true)),
            (ArithOp::Minus, true) => Ok((ArithOp::Plus, true)),
            (ArithOp::Minus, false) => Ok((ArithOp::Minus, false)),
            _ => Err(anyhow!("cannot solve an equation involving {} for an operand", self)),
        }
    }
}

impl TryFrom<&str> for ArithOp {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(ArithOp::Plus),
            "-" => Ok(ArithOp::Minus),
            "*" => Ok(ArithOp::Times),
            "/" => Ok(ArithOp::Div),
            "%" | "mod" => Ok(ArithOp::Mod),
            _ => Err(anyhow!(r#"undefined arithmetic operator "{}""#, value)),
        }
    }
}

/// A unary arithmetic operator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter,
)]
pub enum UnaryArithOp {
    /// Opposite
    #[strum(serialize = "-")]
    Minus,
    /// Absolute value
    #[strum(serialize = "abs")]
    Abs,
}

impl UnaryArithOp {
    /// Applies the operator, returning `None` on non-numeric operand or integer overflow.
    pub fn apply(
        &self,
        operand: &DomainElement,
        factory: &ElementFactory,
    ) -> Option<DomainElement> {
        match (self, operand.value()) {
            (UnaryArithOp::Minus, ElementValue::Int(n)) => {
                n.checked_neg().map(|n| factory.int(n))
            }
            (UnaryArithOp::Abs, ElementValue::Int(n)) => n.checked_abs().map(|n| factory.int(n)),
            (UnaryArithOp::Minus, ElementValue::Double(x)) => Some(factory.double(-x)),
            (UnaryArithOp::Abs, ElementValue::Double(x)) => Some(factory.double(x.abs())),
            _ => None,
        }
    }
}

// The state of generators producing at most one instantiation per round.
#[derive(Debug, Clone, Copy)]
struct SingleShot {
    done: bool,
    at_end: bool,
}

impl Default for SingleShot {
    fn default() -> Self {
        Self {
            done: false,
            at_end: true,
        }
    }
}

impl SingleShot {
    fn reset(&mut self, has_instance: bool) {
        self.done = false;
        self.at_end = !has_instance;
    }

    fn advance(&mut self) {
        if self.done {
            self.at_end = true;
        } else {
            self.done = true;
        }
    }
}

/// A generator computing the value of `out` such that `left op right = out`.
///
/// The operands are inputs.
/// When the result is undefined or does not belong to the output table, the round has no instantiation and the output cell is cleared.
pub struct ArithGenerator {
    left: VarCell,
    right: VarCell,
    out: VarCell,
    op: ArithOp,
    out_table: Rc<dyn SortTable>,
    factory: Rc<ElementFactory>,
    result: Option<DomainElement>,
    state: SingleShot,
}

impl ArithGenerator {
    /// Builds a generator for `left op right = out`, where `out` must belong to `out_table`.
    pub fn new(
        operands: (VarCell, VarCell),
        op: ArithOp,
        out: (VarCell, Rc<dyn SortTable>),
        factory: Rc<ElementFactory>,
    ) -> Self {
        Self {
            left: operands.0,
            right: operands.1,
            out: out.0,
            op,
            out_table: out.1,
            factory,
            result: None,
            state: SingleShot::default(),
        }
    }

    /// Builds a generator computing an operand of `left op right = out`, given the other operand and the result.
    ///
    /// The solved operand is the left one if `solve_left` is `true`, and the right one otherwise;
    /// `table` is the table the solved operand must belong to.
    /// Only additions and subtractions can be solved this way; an error is returned for the other operators.
    pub fn new_inverse(
        cells: [VarCell; 3],
        op: ArithOp,
        solve_left: bool,
        table: Rc<dyn SortTable>,
        factory: Rc<ElementFactory>,
    ) -> Result<Self> {
        let [left, right, out] = cells;
        let (inverse_op, out_first) = op.inverse(solve_left)?;
        let (solved, other) = if solve_left { (left, right) } else { (right, left) };
        let operands = if out_first {
            (out.clone(), other)
        } else {
            (other, out.clone())
        };
        debug!(
            "solving {} for {} through {} {} {}",
            op, solved, operands.0, inverse_op, operands.1
        );
        Ok(Self::new(operands, inverse_op, (solved, table), factory))
    }

    fn compute(&self) -> Option<DomainElement> {
        self.op
            .apply(&self.left.value(), &self.right.value(), &self.factory)
            .filter(|r| self.out_table.contains(r))
    }
}

impl InstChecker for ArithGenerator {
    fn check(&mut self) -> bool {
        self.compute().map(|r| r == self.out.value()).unwrap_or(false)
    }
}

impl InstGenerator for ArithGenerator {
    fn reset(&mut self) {
        self.result = self.compute();
        if self.result.is_none() {
            self.out.clear();
        }
        self.state.reset(self.result.is_some());
    }

    fn next(&mut self) {
        assert_not_at_end(self.state.at_end, &*self);
        self.state.advance();
        if !self.state.at_end {
            self.set_vars_again();
        }
    }

    fn is_at_end(&self) -> bool {
        self.state.at_end
    }

    fn set_vars_again(&mut self) {
        if let Some(r) = &self.result {
            self.out.set(r.clone())
        }
    }
}

impl CloneableGenerator for ArithGenerator {
    fn clone_with_map(&self, cells: &mut CellMap) -> Box<dyn CloneableGenerator> {
        Box::new(Self::new(
            (cells.map(&self.left), cells.map(&self.right)),
            self.op,
            (cells.map(&self.out), Rc::clone(&self.out_table)),
            Rc::clone(&self.factory),
        ))
    }
}

impl Display for ArithGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} = {}", self.left, self.op, self.right, self.out)
    }
}

/// A checker for `left op right = out`, all the cells being inputs.
///
/// The checker produces a single empty instantiation when the equation holds.
/// It cannot be cloned.
pub struct ArithChecker {
    left: VarCell,
    right: VarCell,
    out: VarCell,
    op: ArithOp,
    factory: Rc<ElementFactory>,
    state: SingleShot,
}

impl ArithChecker {
    /// Builds a checker for `left op right = out`.
    pub fn new(cells: [VarCell; 3], op: ArithOp, factory: Rc<ElementFactory>) -> Self {
        let [left, right, out] = cells;
        Self {
            left,
            right,
            out,
            op,
            factory,
            state: SingleShot::default(),
        }
    }
}

impl InstChecker for ArithChecker {
    fn check(&mut self) -> bool {
        self.op
            .apply(&self.left.value(), &self.right.value(), &self.factory)
            .map(|r| r == self.out.value())
            .unwrap_or(false)
    }
}

impl InstGenerator for ArithChecker {
    fn reset(&mut self) {
        let holds = self.check();
        self.state.reset(holds);
    }

    fn next(&mut self) {
        assert_not_at_end(self.state.at_end, &*self);
        self.state.advance();
    }

    fn is_at_end(&self) -> bool {
        self.state.at_end
    }

    fn set_vars_again(&mut self) {}
}

impl Display for ArithChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} == {}", self.left, self.op, self.right, self.out)
    }
}

/// A generator computing the value of `out` such that `op(operand) = out`.
pub struct UnaryArithGenerator {
    operand: VarCell,
    out: VarCell,
    op: UnaryArithOp,
    out_table: Rc<dyn SortTable>,
    factory: Rc<ElementFactory>,
    result: Option<DomainElement>,
    state: SingleShot,
}

impl UnaryArithGenerator {
    /// Builds a generator for `op(operand) = out`, where `out` must belong to `out_table`.
    pub fn new(
        operand: VarCell,
        op: UnaryArithOp,
        out: (VarCell, Rc<dyn SortTable>),
        factory: Rc<ElementFactory>,
    ) -> Self {
        Self {
            operand,
            out: out.0,
            op,
            out_table: out.1,
            factory,
            result: None,
            state: SingleShot::default(),
        }
    }

    fn compute(&self) -> Option<DomainElement> {
        self.op
            .apply(&self.operand.value(), &self.factory)
            .filter(|r| self.out_table.contains(r))
    }
}

impl InstChecker for UnaryArithGenerator {
    fn check(&mut self) -> bool {
        self.compute().map(|r| r == self.out.value()).unwrap_or(false)
    }
}

impl InstGenerator for UnaryArithGenerator {
    fn reset(&mut self) {
        self.result = self.compute();
        if self.result.is_none() {
            self.out.clear();
        }
        self.state.reset(self.result.is_some());
    }

    fn next(&mut self) {
        assert_not_at_end(self.state.at_end, &*self);
        self.state.advance();
        if !self.state.at_end {
            self.set_vars_again();
        }
    }

    fn is_at_end(&self) -> bool {
        self.state.at_end
    }

    fn set_vars_again(&mut self) {
        if let Some(r) = &self.result {
            self.out.set(r.clone())
        }
    }
}

impl CloneableGenerator for UnaryArithGenerator {
    fn clone_with_map(&self, cells: &mut CellMap) -> Box<dyn CloneableGenerator> {
        Box::new(Self::new(
            cells.map(&self.operand),
            self.op,
            (cells.map(&self.out), Rc::clone(&self.out_table)),
            Rc::clone(&self.factory),
        ))
    }
}

impl Display for UnaryArithGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}) = {}", self.op, self.operand, self.out)
    }
}

/// A checker for `op(operand) = out`, both cells being inputs. It cannot be cloned.
pub struct UnaryArithChecker {
    operand: VarCell,
    out: VarCell,
    op: UnaryArithOp,
    factory: Rc<ElementFactory>,
    state: SingleShot,
}

impl UnaryArithChecker {
    /// Builds a checker for `op(operand) = out`.
    pub fn new(
        operand: VarCell,
        op: UnaryArithOp,
        out: VarCell,
        factory: Rc<ElementFactory>,
    ) -> Self {
        Self {
            operand,
            out,
            op,
            factory,
            state: SingleShot::default(),
        }
    }
}

impl InstChecker for UnaryArithChecker {
    fn check(&mut self) -> bool {
        self.op
            .apply(&self.operand.value(), &self.factory)
            .map(|r| r == self.out.value())
            .unwrap_or(false)
    }
}

impl InstGenerator for UnaryArithChecker {
    fn reset(&mut self) {
        let holds = self.check();
        self.state.reset(holds);
    }

    fn next(&mut self) {
        assert_not_at_end(self.state.at_end, &*self);
        self.state.advance();
    }

    fn is_at_end(&self) -> bool {
        self.state.at_end
    }

    fn set_vars_again(&mut self) {}
}

impl Display for UnaryArithChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}) == {}", self.op, self.operand, self.out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AbsState {
    Reset,
    FirstDone,
    SecondDone,
}

/// A generator computing the values of `operand` such that `abs(operand) = out`, the value of `out` being given.
///
/// The candidates are `out` and then `-out`, each one being kept if it belongs to the table of the operand.
pub struct InverseAbsGenerator {
    out: VarCell,
    operand: VarCell,
    operand_table: Rc<dyn SortTable>,
    factory: Rc<ElementFactory>,
    value: Option<DomainElement>,
    state: AbsState,
    at_end: bool,
}

impl InverseAbsGenerator {
    /// Builds a generator for `abs(operand) = out`, where `operand` must belong to `operand_table`.
    pub fn new(
        out: VarCell,
        operand: (VarCell, Rc<dyn SortTable>),
        factory: Rc<ElementFactory>,
    ) -> Self {
        Self {
            out,
            operand: operand.0,
            operand_table: operand.1,
            factory,
            value: None,
            state: AbsState::Reset,
            at_end: true,
        }
    }

    fn candidate(&self, state: AbsState) -> Option<DomainElement> {
        let value = self.value.as_ref()?;
        match state {
            AbsState::Reset => Some(value.clone()),
            AbsState::FirstDone if value.as_f64() == Some(0.0) => None,
            AbsState::FirstDone => UnaryArithOp::Minus.apply(value, &self.factory),
            AbsState::SecondDone => None,
        }
    }
}

impl InstChecker for InverseAbsGenerator {
    fn check(&mut self) -> bool {
        UnaryArithOp::Abs
            .apply(&self.operand.value(), &self.factory)
            .map(|r| r == self.out.value())
            .unwrap_or(false)
            && self.operand_table.contains(&self.operand.value())
    }
}

impl InstGenerator for InverseAbsGenerator {
    fn reset(&mut self) {
        let value = self.out.value();
        self.value = match value.as_f64() {
            Some(v) if v >= 0.0 => Some(value),
            _ => None,
        };
        self.state = AbsState::Reset;
        self.at_end = self.value.is_none();
    }

    fn next(&mut self) {
        assert_not_at_end(self.at_end, &*self);
        loop {
            let candidate = self.candidate(self.state);
            self.state = match self.state {
                AbsState::Reset => AbsState::FirstDone,
                AbsState::FirstDone | AbsState::SecondDone => AbsState::SecondDone,
            };
            match candidate {
                Some(c) if self.operand_table.contains(&c) => {
                    self.operand.set(c);
                    return;
                }
                Some(_) => continue,
                None => {
                    self.at_end = true;
                    return;
                }
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.at_end
    }

    fn set_vars_again(&mut self) {
        let produced = match self.state {
            AbsState::Reset => None,
            AbsState::FirstDone => self.candidate(AbsState::Reset),
            AbsState::SecondDone => self.candidate(AbsState::FirstDone),
        };
        if let Some(c) = produced {
            self.operand.set(c)
        }
    }
}

impl CloneableGenerator for InverseAbsGenerator {
    fn clone_with_map(&self, cells: &mut CellMap) -> Box<dyn CloneableGenerator> {
        Box::new(Self::new(
            cells.map(&self.out),
            (cells.map(&self.operand), Rc::clone(&self.operand_table)),
            Rc::clone(&self.factory),
        ))
    }
}

impl Display for InverseAbsGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "abs({}) = {} (inverse)", self.operand, self.out)
    }
}
