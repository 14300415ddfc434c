use super::{
    specs::assert_not_at_end, CellMap, CloneableGenerator, InstChecker, InstGenerator, VarCell,
};
use crate::structure::{DomainElement, SortTable};
use anyhow::{anyhow, Result};
use std::{fmt::Display, rc::Rc};

/// A generator iterating over the elements of a sort table.
///
/// Elements are produced in the order of the table.
pub struct SortInstGenerator {
    var: VarCell,
    table: Rc<dyn SortTable>,
    current: Option<DomainElement>,
    at_end: bool,
}

impl SortInstGenerator {
    /// Builds a generator binding the cell to each element of the table.
    ///
    /// An error is returned if the table cannot be enumerated (dense tables, or infinite tables without least element).
    pub fn new(var: VarCell, table: Rc<dyn SortTable>) -> Result<Self> {
        if !table.is_enumerable() {
            return Err(anyhow!(
                "cannot enumerate the values of {} over the sort {:?}",
                var.name(),
                table
            ));
        }
        Ok(Self {
            var,
            table,
            current: None,
            at_end: true,
        })
    }
}

impl InstChecker for SortInstGenerator {
    fn check(&mut self) -> bool {
        self.table.contains(&self.var.value())
    }
}

impl InstGenerator for SortInstGenerator {
    fn reset(&mut self) {
        self.current = None;
        self.at_end = false;
    }

    fn next(&mut self) {
        assert_not_at_end(self.at_end, &*self);
        let candidate = match &self.current {
            None => self.table.first(),
            Some(c) => self.table.next_after(c),
        };
        match candidate {
            Some(e) => {
                self.var.set(e.clone());
                self.current = Some(e);
            }
            None => self.at_end = true,
        }
    }

    fn is_at_end(&self) -> bool {
        self.at_end
    }

    fn set_vars_again(&mut self) {
        if let Some(c) = &self.current {
            self.var.set(c.clone());
        }
    }
}

impl CloneableGenerator for SortInstGenerator {
    fn clone_with_map(&self, cells: &mut CellMap) -> Box<dyn CloneableGenerator> {
        Box::new(Self {
            var: cells.map(&self.var),
            table: Rc::clone(&self.table),
            current: None,
            at_end: true,
        })
    }
}

impl Display for SortInstGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} in {:?}", self.var, self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::collect_instances,
        structure::{ElementFactory, EnumeratedSortTable, IntSortTable, NaturalSortTable},
    };

    #[test]
    fn test_enumerate() {
        let factory = ElementFactory::default();
        let x = VarCell::new("x");
        let table = Rc::new(EnumeratedSortTable::new(vec![
            factory.string("b"),
            factory.string("a"),
        ]));
        let mut g = SortInstGenerator::new(x.clone(), table).unwrap();
        let expected = vec![vec![factory.string("a")], vec![factory.string("b")]];
        assert_eq!(expected, collect_instances(&mut g, &[x.clone()], None));
        assert_eq!(expected, collect_instances(&mut g, &[x], None));
    }

    #[test]
    fn test_empty_table() {
        let x = VarCell::new("x");
        let mut g = SortInstGenerator::new(x, Rc::new(EnumeratedSortTable::new(vec![]))).unwrap();
        g.begin();
        assert!(g.is_at_end());
    }

    #[test]
    fn test_infinite_prefix() {
        let factory = Rc::new(ElementFactory::default());
        let x = VarCell::new("x");
        let mut g =
            SortInstGenerator::new(x.clone(), Rc::new(NaturalSortTable::new(Rc::clone(&factory))))
                .unwrap();
        let values = collect_instances(&mut g, &[x], Some(3));
        assert_eq!(
            vec![vec![factory.int(0)], vec![factory.int(1)], vec![factory.int(2)]],
            values
        );
    }

    #[test]
    fn test_not_enumerable() {
        let factory = Rc::new(ElementFactory::default());
        let int = Rc::new(IntSortTable::new(factory));
        assert!(SortInstGenerator::new(VarCell::new("x"), int).is_err());
    }

    #[test]
    fn test_set_vars_again() {
        let factory = ElementFactory::default();
        let x = VarCell::new("x");
        let table = Rc::new(EnumeratedSortTable::new(vec![factory.int(1), factory.int(2)]));
        let mut g = SortInstGenerator::new(x.clone(), table).unwrap();
        g.begin();
        g.next();
        x.set(factory.int(42));
        g.set_vars_again();
        assert_eq!(factory.int(2), x.value());
        assert!(g.check());
    }

    #[test]
    fn test_clone_with_fresh_cell() {
        let factory = ElementFactory::default();
        let x = VarCell::new("x");
        let table = Rc::new(EnumeratedSortTable::new(vec![factory.int(1), factory.int(2)]));
        let g = SortInstGenerator::new(x.clone(), table).unwrap();
        let mut map = CellMap::new_with_fresh_cells(&[x.clone()]);
        let mut clone = g.clone_with_map(&mut map);
        clone.begin();
        assert!(!x.is_bound());
        assert_eq!(factory.int(1), map.map(&x).value());
    }
}
