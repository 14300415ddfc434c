use super::{
    assign, fmt_cells, specs::assert_not_at_end, values_of, CellMap, CloneableGenerator,
    InstChecker, InstGenerator, Pattern, VarCell,
};
use crate::structure::{ElementTuple, PredTable, Universe};
use anyhow::{anyhow, Result};
use log::debug;
use std::{collections::HashMap, fmt::Display, rc::Rc};

/// A map from input tuples to the lists of matching output tuples.
pub type LookupTable = HashMap<ElementTuple, Vec<ElementTuple>>;

/// A generator looking the values of its input cells up in a precomputed table.
///
/// The table is shared between the clones of the generator.
pub struct EnumLookupGenerator {
    inputs: Vec<VarCell>,
    outputs: Vec<VarCell>,
    table: Rc<LookupTable>,
    key: Option<ElementTuple>,
    pos: usize,
    at_end: bool,
}

impl EnumLookupGenerator {
    /// Builds a generator given its input cells, its output cells, and the lookup table.
    ///
    /// # Example
    ///
    /// ```
    /// # use fogrounder::generators::{collect_instances, EnumLookupGenerator, LookupTable, VarCell};
    /// # use fogrounder::structure::ElementFactory;
    /// # use std::rc::Rc;
    /// let factory = ElementFactory::default();
    /// let (x, y) = (VarCell::new("x"), VarCell::new("y"));
    /// let mut table = LookupTable::new();
    /// table.insert(vec![factory.int(1)], vec![vec![factory.int(2)], vec![factory.int(3)]]);
    /// let mut generator = EnumLookupGenerator::new(vec![x.clone()], vec![y.clone()], Rc::new(table));
    /// x.set(factory.int(1));
    /// assert_eq!(2, collect_instances(&mut generator, &[y], None).len());
    /// ```
    pub fn new(inputs: Vec<VarCell>, outputs: Vec<VarCell>, table: Rc<LookupTable>) -> Self {
        Self {
            inputs,
            outputs,
            table,
            key: None,
            pos: 0,
            at_end: true,
        }
    }

    /// Builds a generator from a finite predicate table.
    ///
    /// The pattern tells which arguments are inputs and which are outputs.
    /// Only the tuples of the predicate table which belong to the universe are considered.
    /// If a cell appears at several positions, only its first output occurrence is produced; the other positions must hold the same value.
    /// A cell appearing at an input position is considered as an input at all its positions.
    ///
    /// An error is returned if the table cannot be enumerated, or if the arities of the arguments mismatch.
    pub fn new_from_pred_table(
        table: &dyn PredTable,
        universe: &Universe,
        pattern: &[Pattern],
        cells: &[VarCell],
    ) -> Result<Self> {
        if pattern.len() != cells.len()
            || table.arity() != cells.len()
            || universe.arity() != cells.len()
        {
            return Err(anyhow!(
                "arity mismatch while building a lookup generator \
                 (table: {}, universe: {}, pattern: {}, cells: {})",
                table.arity(),
                universe.arity(),
                pattern.len(),
                cells.len()
            ));
        }
        let tuples = table.tuples().ok_or_else(|| {
            anyhow!("cannot build a lookup generator on a table that cannot be enumerated")
        })?;
        let is_input_cell = |c: &VarCell| {
            cells
                .iter()
                .zip(pattern.iter())
                .any(|(other, p)| p.is_input() && other.same_cell(c))
        };
        let input_positions = (0..cells.len())
            .filter(|i| is_input_cell(&cells[*i]))
            .collect::<Vec<usize>>();
        let mut output_positions: Vec<usize> = Vec::new();
        let mut constrained_positions: Vec<(usize, usize)> = Vec::new();
        for i in (0..cells.len()).filter(|i| !is_input_cell(&cells[*i])) {
            match output_positions.iter().find(|j| cells[**j].same_cell(&cells[i])) {
                Some(j) => constrained_positions.push((i, *j)),
                None => output_positions.push(i),
            }
        }
        let mut lookup_table = LookupTable::new();
        for tuple in tuples {
            if !universe.contains(tuple)
                || constrained_positions
                    .iter()
                    .any(|(i, j)| tuple[*i] != tuple[*j])
            {
                continue;
            }
            let key = input_positions.iter().map(|i| tuple[*i].clone()).collect();
            let value = output_positions.iter().map(|i| tuple[*i].clone()).collect();
            lookup_table.entry(key).or_insert_with(Vec::new).push(value);
        }
        debug!(
            "built a lookup table with {} key(s) for {} input(s) and {} output(s)",
            lookup_table.len(),
            input_positions.len(),
            output_positions.len()
        );
        Ok(Self::new(
            input_positions.iter().map(|i| cells[*i].clone()).collect(),
            output_positions.iter().map(|i| cells[*i].clone()).collect(),
            Rc::new(lookup_table),
        ))
    }

    fn current_list(&self) -> &[ElementTuple] {
        self.key
            .as_ref()
            .and_then(|k| self.table.get(k))
            .map(|l| l.as_slice())
            .unwrap_or(&[])
    }
}

impl InstChecker for EnumLookupGenerator {
    fn check(&mut self) -> bool {
        let key = values_of(&self.inputs);
        let values = values_of(&self.outputs);
        self.table
            .get(&key)
            .map(|l| l.contains(&values))
            .unwrap_or(false)
    }
}

impl InstGenerator for EnumLookupGenerator {
    fn reset(&mut self) {
        let key = values_of(&self.inputs);
        self.at_end = self.table.get(&key).map(|l| l.is_empty()).unwrap_or(true);
        self.key = Some(key);
        self.pos = 0;
    }

    fn next(&mut self) {
        assert_not_at_end(self.at_end, &*self);
        let list = self.current_list();
        if self.pos < list.len() {
            assign(&self.outputs, &list[self.pos]);
            self.pos += 1;
        } else {
            self.at_end = true;
        }
    }

    fn is_at_end(&self) -> bool {
        self.at_end
    }

    fn set_vars_again(&mut self) {
        if self.pos > 0 {
            let list = self.current_list();
            assign(&self.outputs, &list[self.pos - 1]);
        }
    }
}

impl CloneableGenerator for EnumLookupGenerator {
    fn clone_with_map(&self, cells: &mut CellMap) -> Box<dyn CloneableGenerator> {
        Box::new(Self::new(
            cells.map_all(&self.inputs),
            cells.map_all(&self.outputs),
            Rc::clone(&self.table),
        ))
    }
}

impl Display for EnumLookupGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lookup({} -> {})",
            fmt_cells(&self.inputs),
            fmt_cells(&self.outputs)
        )
    }
}
