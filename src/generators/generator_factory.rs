use super::{
    ArithChecker, ArithGenerator, ArithOp, CloneableGenerator, ComparisonGenerator,
    EnumLookupGenerator, InstGenerator, InverseAbsGenerator, Pattern, TableGenerator,
    UnaryArithChecker, UnaryArithGenerator, UnaryArithOp, VarCell,
};
use crate::{
    structure::{ElementFactory, PredTable, SortTable, Universe},
    utils::CompType,
};
use anyhow::{anyhow, Context, Result};
use log::debug;
use std::rc::Rc;

/// Builds a generator for the atom `table(cells)`, given the roles of the arguments.
///
/// When all the arguments are inputs, the returned generator is a checker without output.
/// Otherwise, finite tables are turned into lookup generators, and other tables into generate-and-test generators over the universe.
///
/// # Example
///
/// ```
/// # use fogrounder::generators::{collect_instances, lookup_generator, Pattern, VarCell};
/// # use fogrounder::structure::{ElementFactory, EnumeratedPredTable, EnumeratedSortTable, PredTable, SortTable, Universe};
/// # use std::rc::Rc;
/// let factory = ElementFactory::default();
/// let tuples = vec![vec![factory.int(1), factory.int(2)], vec![factory.int(1), factory.int(3)]];
/// let table: Rc<dyn PredTable> = Rc::new(EnumeratedPredTable::new_with_tuples(2, tuples).unwrap());
/// let sort: Rc<dyn SortTable> = Rc::new(EnumeratedSortTable::new((1..=3).map(|n| factory.int(n)).collect()));
/// let universe = Universe::new(vec![Rc::clone(&sort), sort]);
/// let (x, y) = (VarCell::new("x"), VarCell::new("y"));
/// let mut generator = lookup_generator(table, &universe, &[Pattern::Input, Pattern::Output], &[x.clone(), y.clone()]).unwrap();
/// x.set(factory.int(1));
/// assert_eq!(2, collect_instances(generator.as_mut(), &[y], None).len());
/// ```
pub fn lookup_generator(
    table: Rc<dyn PredTable>,
    universe: &Universe,
    pattern: &[Pattern],
    cells: &[VarCell],
) -> Result<Box<dyn CloneableGenerator>> {
    let context = || format!("while building a generator for {:?}", table);
    if pattern.iter().all(|p| p.is_input()) {
        debug!("checking membership in {:?}", table);
        let generator =
            TableGenerator::new(Rc::clone(&table), universe.clone(), pattern, cells.to_vec())
                .with_context(context)?;
        return Ok(Box::new(generator));
    }
    if table.is_finite() {
        debug!("looking {:?} up with pattern {:?}", table, pattern);
        let generator =
            EnumLookupGenerator::new_from_pred_table(table.as_ref(), universe, pattern, cells)
                .with_context(context)?;
        return Ok(Box::new(generator));
    }
    debug!("generating and testing {:?} with pattern {:?}", table, pattern);
    let generator =
        TableGenerator::new(Rc::clone(&table), universe.clone(), pattern, cells.to_vec())
            .with_context(context)?;
    Ok(Box::new(generator))
}

/// Builds a generator for the comparison `left comp right`.
///
/// See [`ComparisonGenerator::new`].
pub fn comparison_generator(
    left: (VarCell, Rc<dyn SortTable>),
    right: (VarCell, Rc<dyn SortTable>),
    comp: CompType,
    pattern: [Pattern; 2],
) -> Result<Box<dyn CloneableGenerator>> {
    Ok(Box::new(ComparisonGenerator::new(left, right, comp, pattern)?))
}

/// Builds a generator for `left op right = out`, the three cells being given in this order with their sort tables.
///
/// The output of the generator is either the result (forward computation) or one of the operands (inverse computation).
/// An error is returned when all the arguments are inputs (use [`arithmetic_checker`]), when more than one argument is an output,
/// and when the operator cannot be solved for the required operand.
pub fn arithmetic_generator(
    op: ArithOp,
    args: [(VarCell, Rc<dyn SortTable>); 3],
    pattern: [Pattern; 3],
    factory: Rc<ElementFactory>,
) -> Result<Box<dyn CloneableGenerator>> {
    let [(left, left_table), (right, right_table), (out, out_table)] = args;
    let context = || format!("while building a generator for {} {} {} = {}", left, op, right, out);
    match pattern {
        [Pattern::Input, Pattern::Input, Pattern::Output] => {
            debug!("computing {} {} {} = {}", left, op, right, out);
            Ok(Box::new(ArithGenerator::new(
                (left, right),
                op,
                (out, out_table),
                factory,
            )))
        }
        [Pattern::Output, Pattern::Input, Pattern::Input] => {
            let generator = ArithGenerator::new_inverse(
                [left.clone(), right.clone(), out.clone()],
                op,
                true,
                left_table,
                factory,
            )
            .with_context(context)?;
            Ok(Box::new(generator))
        }
        [Pattern::Input, Pattern::Output, Pattern::Input] => {
            let generator = ArithGenerator::new_inverse(
                [left.clone(), right.clone(), out.clone()],
                op,
                false,
                right_table,
                factory,
            )
            .with_context(context)?;
            Ok(Box::new(generator))
        }
        [Pattern::Input, Pattern::Input, Pattern::Input] => Err(anyhow!(
            "all the arguments are inputs; a checker is required"
        ))
        .with_context(context),
        _ => Err(anyhow!("cannot enumerate more than one argument of an arithmetic equation"))
            .with_context(context),
    }
}

/// Builds a checker for `left op right = out`.
///
/// The returned checker cannot be cloned, and thus cannot be part of a composite generator.
pub fn arithmetic_checker(
    op: ArithOp,
    cells: [VarCell; 3],
    factory: Rc<ElementFactory>,
) -> Box<dyn InstGenerator> {
    Box::new(ArithChecker::new(cells, op, factory))
}

/// Builds a generator for `op(operand) = out`, both cells being given with their sort tables.
///
/// When the result is given, the operand is computed by the opposite for the unary minus,
/// and by an [`InverseAbsGenerator`] for the absolute value.
pub fn unary_arithmetic_generator(
    op: UnaryArithOp,
    operand: (VarCell, Rc<dyn SortTable>),
    out: (VarCell, Rc<dyn SortTable>),
    pattern: [Pattern; 2],
    factory: Rc<ElementFactory>,
) -> Result<Box<dyn CloneableGenerator>> {
    match (pattern, op) {
        ([Pattern::Input, Pattern::Output], _) => {
            Ok(Box::new(UnaryArithGenerator::new(operand.0, op, out, factory)))
        }
        ([Pattern::Output, Pattern::Input], UnaryArithOp::Minus) => {
            debug!("computing {} as the opposite of {}", operand.0, out.0);
            Ok(Box::new(UnaryArithGenerator::new(out.0, op, operand, factory)))
        }
        ([Pattern::Output, Pattern::Input], UnaryArithOp::Abs) => {
            debug!("enumerating the values of {} with absolute value {}", operand.0, out.0);
            Ok(Box::new(InverseAbsGenerator::new(out.0, operand, factory)))
        }
        ([Pattern::Input, Pattern::Input], _) => Err(anyhow!(
            "all the arguments of {}({}) = {} are inputs; a checker is required",
            op,
            operand.0,
            out.0
        )),
        ([Pattern::Output, Pattern::Output], _) => Err(anyhow!(
            "cannot enumerate both arguments of {}({}) = {}",
            op,
            operand.0,
            out.0
        )),
    }
}

/// Builds a checker for `op(operand) = out`. The returned checker cannot be cloned.
pub fn unary_arithmetic_checker(
    op: UnaryArithOp,
    operand: VarCell,
    out: VarCell,
    factory: Rc<ElementFactory>,
) -> Box<dyn InstGenerator> {
    Box::new(UnaryArithChecker::new(operand, op, out, factory))
}
