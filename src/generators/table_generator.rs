use super::{
    assign, fmt_cells, specs::assert_not_at_end, values_of, CellMap, CloneableGenerator,
    InstChecker, InstGenerator, Pattern, VarCell,
};
use crate::structure::{DomainElement, ElementTuple, PredTable, Universe};
use anyhow::{anyhow, Result};
use log::debug;
use permutator::CartesianProduct;
use std::{fmt::Display, rc::Rc};

/// A generate-and-test generator over a predicate table.
///
/// All the combinations of values of the output cells are computed once from the universe;
/// each round substitutes them in the tuple and keeps those which belong to the predicate table.
/// A cell appearing at several output positions is produced at its first occurrence only.
pub struct TableGenerator {
    table: Rc<dyn PredTable>,
    universe: Universe,
    cells: Vec<VarCell>,
    inputs: Vec<usize>,
    outputs: Vec<VarCell>,
    candidates: Rc<Vec<ElementTuple>>,
    pos: usize,
    current: Option<usize>,
    at_end: bool,
}

impl TableGenerator {
    /// Builds a generator for the atom `table(cells)`.
    ///
    /// An error is returned if the arities mismatch, or if the universe table at a produced position is infinite.
    pub fn new(
        table: Rc<dyn PredTable>,
        universe: Universe,
        pattern: &[Pattern],
        cells: Vec<VarCell>,
    ) -> Result<Self> {
        if pattern.len() != cells.len()
            || table.arity() != cells.len()
            || universe.arity() != cells.len()
        {
            return Err(anyhow!(
                "arity mismatch while building a table generator \
                 (table: {}, universe: {}, pattern: {}, cells: {})",
                table.arity(),
                universe.arity(),
                pattern.len(),
                cells.len()
            ));
        }
        let is_input_cell = |c: &VarCell| {
            cells
                .iter()
                .zip(pattern.iter())
                .any(|(other, p)| p.is_input() && other.same_cell(c))
        };
        let inputs = (0..cells.len())
            .filter(|i| is_input_cell(&cells[*i]))
            .collect::<Vec<usize>>();
        let mut free_positions: Vec<usize> = Vec::new();
        for i in (0..cells.len()).filter(|i| !is_input_cell(&cells[*i])) {
            if !free_positions.iter().any(|j| cells[*j].same_cell(&cells[i])) {
                free_positions.push(i);
            }
        }
        let domains = free_positions
            .iter()
            .map(|i| {
                let sort = universe.table(*i);
                if sort.is_finite() && sort.is_enumerable() {
                    Ok(sort.iter().collect::<Vec<DomainElement>>())
                } else {
                    Err(anyhow!(
                        "cannot build a table generator producing {} over the infinite sort {:?}",
                        cells[*i],
                        sort
                    ))
                }
            })
            .collect::<Result<Vec<Vec<DomainElement>>>>()?;
        let candidates = Self::all_combinations(&domains);
        debug!(
            "table generator for {}: {} candidate(s) for {} produced cell(s)",
            fmt_cells(&cells),
            candidates.len(),
            free_positions.len()
        );
        let outputs = free_positions.iter().map(|i| cells[*i].clone()).collect();
        Ok(Self {
            table,
            universe,
            cells,
            inputs,
            outputs,
            candidates: Rc::new(candidates),
            pos: 0,
            current: None,
            at_end: true,
        })
    }

    fn all_combinations(domains: &[Vec<DomainElement>]) -> Vec<ElementTuple> {
        if domains.is_empty() {
            return vec![vec![]];
        }
        if domains.iter().any(|d| d.is_empty()) {
            return vec![];
        }
        let domain_refs = domains
            .iter()
            .map(|d| d.as_slice())
            .collect::<Vec<&[DomainElement]>>();
        let mut combinations = domain_refs
            .as_slice()
            .cart_prod()
            .map(|p| p.into_iter().cloned().collect())
            .collect::<Vec<ElementTuple>>();
        combinations.sort_unstable();
        combinations
    }

    fn holds(&self) -> bool {
        let tuple = values_of(&self.cells);
        self.universe.contains(&tuple) && self.table.contains(&tuple)
    }
}

impl InstChecker for TableGenerator {
    fn check(&mut self) -> bool {
        self.holds()
    }
}

impl InstGenerator for TableGenerator {
    fn reset(&mut self) {
        self.pos = 0;
        self.current = None;
        self.at_end = self
            .inputs
            .iter()
            .any(|i| !self.universe.table(*i).contains(&self.cells[*i].value()));
    }

    fn next(&mut self) {
        assert_not_at_end(self.at_end, &*self);
        while self.pos < self.candidates.len() {
            let pos = self.pos;
            self.pos += 1;
            assign(&self.outputs, &self.candidates[pos]);
            if self.holds() {
                self.current = Some(pos);
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
        if let Some(pos) = self.current {
            assign(&self.outputs, &self.candidates[pos]);
        }
    }
}

impl CloneableGenerator for TableGenerator {
    fn clone_with_map(&self, cells: &mut CellMap) -> Box<dyn CloneableGenerator> {
        Box::new(Self {
            table: Rc::clone(&self.table),
            universe: self.universe.clone(),
            cells: cells.map_all(&self.cells),
            inputs: self.inputs.clone(),
            outputs: cells.map_all(&self.outputs),
            candidates: Rc::clone(&self.candidates),
            pos: 0,
            current: None,
            at_end: true,
        })
    }
}

impl Display for TableGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "table({}) -> {}", fmt_cells(&self.cells), fmt_cells(&self.outputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::collect_instances,
        structure::{
            ElementFactory, EnumeratedPredTable, IntRangeSortTable, NaturalSortTable, SortTable,
        },
    };

    fn setup() -> (Rc<ElementFactory>, Rc<dyn PredTable>, Universe) {
        let factory = Rc::new(ElementFactory::default());
        let tuples = [(1, 1), (1, 2), (2, 3), (3, 3), (4, 1)]
            .iter()
            .map(|(a, b)| vec![factory.int(*a), factory.int(*b)])
            .collect();
        let table: Rc<dyn PredTable> =
            Rc::new(EnumeratedPredTable::new_with_tuples(2, tuples).unwrap());
        let sort: Rc<dyn SortTable> = Rc::new(IntRangeSortTable::new(1, 3, Rc::clone(&factory)));
        let universe = Universe::new(vec![Rc::clone(&sort), sort]);
        (factory, table, universe)
    }

    #[test]
    fn test_input_output() {
        let (factory, table, universe) = setup();
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g = TableGenerator::new(
            table,
            universe,
            &[Pattern::Input, Pattern::Output],
            vec![x.clone(), y.clone()],
        )
        .unwrap();
        x.set(factory.int(1));
        assert_eq!(
            vec![vec![factory.int(1)], vec![factory.int(2)]],
            collect_instances(&mut g, &[y.clone()], None)
        );
        x.set(factory.int(4));
        g.begin();
        assert!(g.is_at_end());
    }

    #[test]
    fn test_all_outputs_respect_universe() {
        let (factory, table, universe) = setup();
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g = TableGenerator::new(
            table,
            universe,
            &[Pattern::Output, Pattern::Output],
            vec![x.clone(), y.clone()],
        )
        .unwrap();
        let expected = [(1, 1), (1, 2), (2, 3), (3, 3)]
            .iter()
            .map(|(a, b)| vec![factory.int(*a), factory.int(*b)])
            .collect::<Vec<_>>();
        assert_eq!(expected, collect_instances(&mut g, &[x, y], None));
    }

    #[test]
    fn test_repeated_output_cell() {
        let (factory, table, universe) = setup();
        let x = VarCell::new("x");
        let mut g = TableGenerator::new(
            table,
            universe,
            &[Pattern::Output, Pattern::Output],
            vec![x.clone(), x.clone()],
        )
        .unwrap();
        assert_eq!(
            vec![vec![factory.int(1)], vec![factory.int(3)]],
            collect_instances(&mut g, &[x], None)
        );
    }

    #[test]
    fn test_checker_without_outputs() {
        let (factory, table, universe) = setup();
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let mut g = TableGenerator::new(
            table,
            universe,
            &[Pattern::Input, Pattern::Input],
            vec![x.clone(), y.clone()],
        )
        .unwrap();
        x.set(factory.int(2));
        y.set(factory.int(3));
        assert_eq!(1, collect_instances(&mut g, &[], None).len());
        y.set(factory.int(2));
        assert!(collect_instances(&mut g, &[], None).is_empty());
    }

    #[test]
    fn test_infinite_output_sort() {
        let (factory, table, _) = setup();
        let nat: Rc<dyn SortTable> = Rc::new(NaturalSortTable::new(factory));
        let universe = Universe::new(vec![Rc::clone(&nat), nat]);
        assert!(TableGenerator::new(
            table,
            universe,
            &[Pattern::Input, Pattern::Output],
            vec![VarCell::new("x"), VarCell::new("y")],
        )
        .is_err());
    }

    #[test]
    fn test_clone_with_fresh_cells() {
        let (factory, table, universe) = setup();
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let g = TableGenerator::new(
            table,
            universe,
            &[Pattern::Input, Pattern::Output],
            vec![x.clone(), y.clone()],
        )
        .unwrap();
        let mut map = CellMap::new_with_fresh_cells(&[y.clone()]);
        let mut clone = g.clone_with_map(&mut map);
        x.set(factory.int(3));
        y.set(factory.int(1));
        clone.begin();
        assert_eq!(factory.int(3), map.map(&y).value());
        assert_eq!(factory.int(1), y.value());
    }
}
