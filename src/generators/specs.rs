use super::{values_of, CellMap, VarCell};
use crate::structure::ElementTuple;
use std::fmt::Display;

/// The trait for checkers.
///
/// A checker tells whether the current values of its binding cells satisfy a constraint.
pub trait InstChecker {
    /// Returns `true` iff the current values of the cells satisfy the constraint.
    ///
    /// # Panics
    ///
    /// Panics if one of the cells read by the checker is unbound.
    fn check(&mut self) -> bool;
}

/// The trait for instance generators.
///
/// Generators enumerate the values of their output cells that satisfy a constraint, given the values of their input cells.
/// They follow a replay protocol:
///
/// * [`reset`](InstGenerator::reset) prepares a new round;
/// * [`next`](InstGenerator::next) produces the next instantiation, or marks the generator at end;
/// * [`begin`](InstGenerator::begin) combines both to get the first instantiation;
/// * [`is_at_end`](InstGenerator::is_at_end) is sticky until the next reset.
///
/// Calling [`next`](InstGenerator::next) on a generator which is at end is a programming error and panics.
pub trait InstGenerator: InstChecker + Display {
    /// Prepares a new enumeration round.
    ///
    /// Input cells are read at this point by the generators that need them.
    fn reset(&mut self);

    /// Advances to the next instantiation of the output cells.
    ///
    /// # Panics
    ///
    /// Panics if the generator is at end.
    fn next(&mut self);

    /// Returns `true` iff the generator has no more instantiations for the current round.
    fn is_at_end(&self) -> bool;

    /// Binds the output cells again to the values produced by the last call to [`next`](InstGenerator::next).
    fn set_vars_again(&mut self);

    /// Resets the generator and produces the first instantiation, if any.
    fn begin(&mut self) {
        self.reset();
        if !self.is_at_end() {
            self.next();
        }
    }
}

/// The trait for generators that can be duplicated.
///
/// Single-use checkers (see [`ArithChecker`](super::ArithChecker)) do not implement this trait,
/// so generator trees that must be cloned cannot contain them.
pub trait CloneableGenerator: InstGenerator {
    /// Clones this generator, replacing the cells registered in the map by their images.
    ///
    /// Cells that are not registered in the map are shared between the original and the clone.
    /// The state of the clone is the state of a generator that has not been reset yet.
    fn clone_with_map(&self, cells: &mut CellMap) -> Box<dyn CloneableGenerator>;

    /// Clones this generator, sharing all the cells with the original.
    fn clone_generator(&self) -> Box<dyn CloneableGenerator> {
        self.clone_with_map(&mut CellMap::default())
    }
}

/// Runs a generation round and collects the produced values of the provided cells.
///
/// At most `limit` instantiations are collected if a limit is provided.
pub fn collect_instances(
    generator: &mut dyn InstGenerator,
    cells: &[VarCell],
    limit: Option<usize>,
) -> Vec<ElementTuple> {
    let mut instances = Vec::new();
    generator.begin();
    while !generator.is_at_end() {
        instances.push(values_of(cells));
        if limit.map(|l| instances.len() >= l).unwrap_or(false) {
            break;
        }
        generator.next();
    }
    instances
}

pub(crate) fn assert_not_at_end(at_end: bool, generator: &dyn Display) {
    if at_end {
        panic!("next() called on generator {} which is at end", generator)
    }
}
