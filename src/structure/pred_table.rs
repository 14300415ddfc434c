use super::{DomainElement, ElementTuple, SortTable};
use anyhow::{anyhow, Result};
use std::{collections::BTreeSet, fmt::Debug, rc::Rc};

/// The trait for the tables of predicates (sets of tuples of a fixed arity).
pub trait PredTable: Debug {
    /// Returns the arity of the tuples of this table.
    fn arity(&self) -> usize;

    /// Returns `true` iff the tuple belongs to this table.
    fn contains(&self, tuple: &[DomainElement]) -> bool;

    /// Returns `true` iff this table has a finite number of tuples.
    fn is_finite(&self) -> bool;

    /// Returns the number of tuples, or `None` if the table is infinite.
    fn size(&self) -> Option<usize>;

    /// Iterates over the tuples of the table, or returns `None` if the table cannot be enumerated.
    fn tuples(&self) -> Option<Box<dyn Iterator<Item = &ElementTuple> + '_>>;
}

/// A finite predicate table given by its tuples.
///
/// Tuples are kept in lexicographic order.
#[derive(Debug, Clone)]
pub struct EnumeratedPredTable {
    arity: usize,
    tuples: BTreeSet<ElementTuple>,
}

impl EnumeratedPredTable {
    /// Builds an empty table of the given arity.
    pub fn new(arity: usize) -> Self {
        Self {
            arity,
            tuples: BTreeSet::new(),
        }
    }

    /// Builds a table of the given arity containing the provided tuples.
    ///
    /// An error is returned if one of the tuples does not have the right arity.
    ///
    /// # Example
    ///
    /// ```
    /// # use fogrounder::structure::{ElementFactory, EnumeratedPredTable, PredTable};
    /// let factory = ElementFactory::default();
    /// let table = EnumeratedPredTable::new_with_tuples(
    ///     2,
    ///     vec![vec![factory.int(1), factory.int(2)], vec![factory.int(1), factory.int(2)]],
    /// )
    /// .unwrap();
    /// assert_eq!(Some(1), table.size());
    /// assert!(table.contains(&[factory.int(1), factory.int(2)]));
    /// ```
    pub fn new_with_tuples(arity: usize, tuples: Vec<ElementTuple>) -> Result<Self> {
        let mut table = Self::new(arity);
        for t in tuples {
            table.add_tuple(t)?;
        }
        Ok(table)
    }

    /// Adds a tuple to this table.
    ///
    /// An error is returned if the tuple does not have the right arity.
    pub fn add_tuple(&mut self, tuple: ElementTuple) -> Result<()> {
        if tuple.len() != self.arity {
            return Err(anyhow!(
                "cannot add a tuple of arity {} to a table of arity {}",
                tuple.len(),
                self.arity
            ));
        }
        self.tuples.insert(tuple);
        Ok(())
    }
}

impl PredTable for EnumeratedPredTable {
    fn arity(&self) -> usize {
        self.arity
    }

    fn contains(&self, tuple: &[DomainElement]) -> bool {
        self.tuples.contains(tuple)
    }

    fn is_finite(&self) -> bool {
        true
    }

    fn size(&self) -> Option<usize> {
        Some(self.tuples.len())
    }

    fn tuples(&self) -> Option<Box<dyn Iterator<Item = &ElementTuple> + '_>> {
        Some(Box::new(self.tuples.iter()))
    }
}

/// The list of per-argument domains tuples must belong to.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    tables: Vec<Rc<dyn SortTable>>,
}

impl Universe {
    /// Builds a universe from its per-argument tables.
    pub fn new(tables: Vec<Rc<dyn SortTable>>) -> Self {
        Self { tables }
    }

    /// Returns the number of arguments of this universe.
    pub fn arity(&self) -> usize {
        self.tables.len()
    }

    /// Returns the table of the argument at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn table(&self, index: usize) -> &Rc<dyn SortTable> {
        &self.tables[index]
    }

    /// Returns the per-argument tables.
    pub fn tables(&self) -> &[Rc<dyn SortTable>] {
        &self.tables
    }

    /// Returns `true` iff each element of the tuple belongs to the corresponding table.
    pub fn contains(&self, tuple: &[DomainElement]) -> bool {
        tuple.len() == self.tables.len()
            && tuple
                .iter()
                .zip(self.tables.iter())
                .all(|(e, t)| t.contains(e))
    }

    /// Returns `true` iff all the tables are finite.
    pub fn is_finite(&self) -> bool {
        self.tables.iter().all(|t| t.is_finite())
    }
}
