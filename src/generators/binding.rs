use crate::structure::{DomainElement, ElementTuple};
use std::{
    cell::RefCell,
    collections::HashMap,
    fmt::{Debug, Display},
    rc::Rc,
};

/// The role of an argument of a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// The argument is bound before the generator is used; its value is read.
    Input,
    /// The argument is produced by the generator.
    Output,
}

impl Pattern {
    /// Returns `true` iff this is [`Pattern::Input`].
    pub fn is_input(&self) -> bool {
        matches!(self, Pattern::Input)
    }

    /// Returns `true` iff this is [`Pattern::Output`].
    pub fn is_output(&self) -> bool {
        matches!(self, Pattern::Output)
    }
}

struct CellContent {
    name: String,
    value: RefCell<Option<DomainElement>>,
}

/// A binding cell, holding the current value of a logical variable.
///
/// Cells are shared: cloning a [`VarCell`] gives another handle to the same cell.
/// All the generators mentioning the same variable hold handles to the same cell.
#[derive(Clone)]
pub struct VarCell(Rc<CellContent>);

impl VarCell {
    /// Creates a new unprimed cell.
    pub fn new(name: &str) -> Self {
        Self(Rc::new(CellContent {
            name: name.to_string(),
            value: RefCell::new(None),
        }))
    }

    /// Returns the name of the variable held by this cell.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the value of the cell, or `None` if the cell has not been primed.
    pub fn get(&self) -> Option<DomainElement> {
        self.0.value.borrow().clone()
    }

    /// Returns the value of the cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell has not been primed.
    pub fn value(&self) -> DomainElement {
        match self.0.value.borrow().as_ref() {
            Some(e) => e.clone(),
            None => panic!("variable {} read before being bound", self.name()),
        }
    }

    /// Binds the cell to a value.
    pub fn set(&self, e: DomainElement) {
        *self.0.value.borrow_mut() = Some(e);
    }

    /// Unbinds the cell.
    pub fn clear(&self) {
        *self.0.value.borrow_mut() = None;
    }

    /// Returns `true` iff the cell holds a value.
    pub fn is_bound(&self) -> bool {
        self.0.value.borrow().is_some()
    }

    /// Returns `true` iff both handles refer to the same cell.
    pub fn same_cell(&self, other: &VarCell) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn key(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl Debug for VarCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get() {
            Some(v) => write!(f, "{}={}", self.name(), v),
            None => write!(f, "{}=?", self.name()),
        }
    }
}

impl Display for VarCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Reads the values of a list of cells.
///
/// # Panics
///
/// Panics if one of the cells is unbound.
pub fn values_of(cells: &[VarCell]) -> ElementTuple {
    cells.iter().map(|c| c.value()).collect()
}

pub(crate) fn assign(cells: &[VarCell], values: &[DomainElement]) {
    cells
        .iter()
        .zip(values.iter())
        .for_each(|(c, v)| c.set(v.clone()));
}

pub(crate) fn fmt_cells(cells: &[VarCell]) -> String {
    cells
        .iter()
        .map(|c| c.name().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// The remapping table used when generators are cloned.
///
/// Cells registered in the map are replaced by their image in the cloned generators;
/// the other cells stay shared between the original and the clone.
///
/// # Example
///
/// ```
/// # use fogrounder::generators::{CellMap, VarCell};
/// let x = VarCell::new("x");
/// let y = VarCell::new("y");
/// let map = CellMap::new_with_fresh_cells(&[x.clone()]);
/// assert!(!map.map(&x).same_cell(&x));
/// assert!(map.map(&x).same_cell(&map.map(&x)));
/// assert!(map.map(&y).same_cell(&y));
/// ```
#[derive(Default)]
pub struct CellMap {
    images: HashMap<usize, VarCell>,
}

impl CellMap {
    /// Builds a map in which each of the provided cells is mapped to a fresh cell.
    ///
    /// Fresh cells have the same name and value as the cells they replace.
    /// A cell appearing several times in the slice gets a single image.
    pub fn new_with_fresh_cells(cells: &[VarCell]) -> Self {
        let mut map = Self::default();
        cells.iter().for_each(|c| {
            map.images.entry(c.key()).or_insert_with(|| {
                let fresh = VarCell::new(c.name());
                if let Some(v) = c.get() {
                    fresh.set(v);
                }
                fresh
            });
        });
        map
    }

    /// Registers an image for a cell, replacing the previous one if any.
    pub fn substitute(&mut self, from: &VarCell, to: VarCell) {
        self.images.insert(from.key(), to);
    }

    /// Returns the image of a cell, which is the cell itself if it is not registered.
    pub fn map(&self, cell: &VarCell) -> VarCell {
        self.images
            .get(&cell.key())
            .cloned()
            .unwrap_or_else(|| cell.clone())
    }

    /// Returns the images of a list of cells.
    pub fn map_all(&self, cells: &[VarCell]) -> Vec<VarCell> {
        cells.iter().map(|c| self.map(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::ElementFactory;

    #[test]
    fn test_shared_cell() {
        let factory = ElementFactory::default();
        let x = VarCell::new("x");
        let other_handle = x.clone();
        assert!(!x.is_bound());
        other_handle.set(factory.int(1));
        assert_eq!(factory.int(1), x.value());
        assert_eq!("x=1", format!("{:?}", x));
        x.clear();
        assert_eq!(None, other_handle.get());
    }

    #[test]
    #[should_panic(expected = "variable x read before being bound")]
    fn test_read_unbound() {
        VarCell::new("x").value();
    } // kcov-ignore

    #[test]
    fn test_fresh_cells_keep_values() {
        let factory = ElementFactory::default();
        let x = VarCell::new("x");
        x.set(factory.int(4));
        let map = CellMap::new_with_fresh_cells(&[x.clone(), x.clone()]);
        let image = map.map(&x);
        assert!(!image.same_cell(&x));
        assert_eq!(factory.int(4), image.value());
        image.set(factory.int(5));
        assert_eq!(factory.int(4), x.value());
    }

    #[test]
    fn test_substitute() {
        let x = VarCell::new("x");
        let y = VarCell::new("y");
        let mut map = CellMap::default();
        map.substitute(&x, y.clone());
        let images = map.map_all(&[x.clone(), y.clone()]);
        assert!(images[0].same_cell(&y));
        assert!(images[1].same_cell(&y));
    }

    #[test]
    fn test_values_of_and_assign() {
        let factory = ElementFactory::default();
        let cells = vec![VarCell::new("x"), VarCell::new("y")];
        assign(&cells, &[factory.int(1), factory.int(2)]);
        assert_eq!(vec![factory.int(1), factory.int(2)], values_of(&cells));
        assert_eq!("x,y", fmt_cells(&cells));
    }
}
