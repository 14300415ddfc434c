use super::{DomainElement, ElementFactory, ElementValue};
use std::{fmt::Debug, rc::Rc};

/// The trait for the (possibly infinite) domains of sorts.
///
/// Iteration is made through [`first`](SortTable::first) and [`next_after`](SortTable::next_after).
/// Implementations MUST produce their elements in strictly increasing order w.r.t. the order of [`DomainElement`];
/// generators rely on this property to stop enumerations early.
///
/// Tables that cannot be enumerated this way (dense domains, like all the numbers or all the strings) return `false` for [`is_discrete`](SortTable::is_discrete)
/// and `None` for all the navigation functions.
pub trait SortTable: Debug {
    /// Returns `true` iff the element belongs to this table.
    fn contains(&self, e: &DomainElement) -> bool;

    /// Returns `true` iff this table has a finite number of elements.
    fn is_finite(&self) -> bool;

    /// Returns the number of elements, or `None` if the table is infinite.
    fn size(&self) -> Option<usize>;

    /// Returns `true` iff successors and predecessors of elements are well defined.
    fn is_discrete(&self) -> bool {
        true
    }

    /// Returns the least element, if any.
    fn first(&self) -> Option<DomainElement>;

    /// Returns the greatest element, if any.
    fn last(&self) -> Option<DomainElement>;

    /// Returns the least element of the table which is strictly greater than `e`.
    ///
    /// The provided element does not need to belong to the table.
    fn next_after(&self, e: &DomainElement) -> Option<DomainElement>;

    /// Returns the greatest element of the table which is strictly lower than `e`.
    ///
    /// The provided element does not need to belong to the table.
    fn prev_before(&self, e: &DomainElement) -> Option<DomainElement>;

    /// Returns the least element of the table which is greater or equal to `e`.
    fn first_from(&self, e: &DomainElement) -> Option<DomainElement> {
        if self.contains(e) {
            Some(e.clone())
        } else {
            self.next_after(e)
        }
    }

    /// Returns the greatest element of the table which is lower or equal to `e`.
    fn last_upto(&self, e: &DomainElement) -> Option<DomainElement> {
        if self.contains(e) {
            Some(e.clone())
        } else {
            self.prev_before(e)
        }
    }

    /// Returns `true` iff all the elements of the table can be enumerated in increasing order.
    fn is_enumerable(&self) -> bool {
        self.is_discrete() && (self.is_finite() || self.first().is_some())
    }
}

impl<'a> dyn SortTable + 'a {
    /// Iterates over the elements of the table, in increasing order.
    ///
    /// If the table has no least element, the iterator is empty.
    pub fn iter(&self) -> SortTableIter<'_, 'a> {
        SortTableIter {
            table: self,
            current: None,
            started: false,
        }
    }
}

/// An iterator over the elements of a sort table.
pub struct SortTableIter<'t, 'a> {
    table: &'t (dyn SortTable + 'a),
    current: Option<DomainElement>,
    started: bool,
}

impl Iterator for SortTableIter<'_, '_> {
    type Item = DomainElement;

    fn next(&mut self) -> Option<Self::Item> {
        self.current = if self.started {
            self.current
                .as_ref()
                .and_then(|c| self.table.next_after(c))
        } else {
            self.started = true;
            self.table.first()
        };
        self.current.clone()
    }
}

const I64_UPPER_EXCLUSIVE: f64 = 9_223_372_036_854_775_808.0;

// least integer strictly greater than e; None if there is no such i64
fn int_successor(e: &DomainElement) -> Option<i64> {
    match e.value() {
        ElementValue::Int(n) => n.checked_add(1),
        ElementValue::Double(x) => {
            let c = x.floor() + 1.0;
            if c < -I64_UPPER_EXCLUSIVE {
                Some(i64::MIN)
            } else if c >= I64_UPPER_EXCLUSIVE {
                None
            } else {
                Some(c as i64)
            }
        }
        ElementValue::Str(_) | ElementValue::Compound(_, _) => None,
    }
}

// greatest integer strictly lower than e; None if there is no such i64
fn int_predecessor(e: &DomainElement) -> Option<i64> {
    match e.value() {
        ElementValue::Int(n) => n.checked_sub(1),
        ElementValue::Double(x) => {
            let f = x.floor();
            if f < -I64_UPPER_EXCLUSIVE {
                None
            } else if f >= I64_UPPER_EXCLUSIVE {
                Some(i64::MAX)
            } else {
                Some(f as i64)
            }
        }
        ElementValue::Str(_) | ElementValue::Compound(_, _) => Some(i64::MAX),
    }
}

/// A finite sort table given by the list of its elements.
#[derive(Debug, Clone)]
pub struct EnumeratedSortTable {
    elements: Vec<DomainElement>,
}

impl EnumeratedSortTable {
    /// Builds a new table from its elements.
    ///
    /// Elements are sorted and duplicates are removed.
    ///
    /// # Example
    ///
    /// ```
    /// # use fogrounder::structure::{ElementFactory, EnumeratedSortTable, SortTable};
    /// let factory = ElementFactory::default();
    /// let table = EnumeratedSortTable::new(vec![factory.int(7), factory.int(5), factory.int(5)]);
    /// assert_eq!(Some(2), table.size());
    /// assert_eq!(Some(factory.int(5)), table.first());
    /// assert_eq!(Some(factory.int(7)), table.next_after(&factory.int(5)));
    /// ```
    pub fn new(mut elements: Vec<DomainElement>) -> Self {
        elements.sort_unstable();
        elements.dedup();
        Self { elements }
    }

    /// Returns the elements of this table, in increasing order.
    pub fn elements(&self) -> &[DomainElement] {
        &self.elements
    }
}

impl SortTable for EnumeratedSortTable {
    fn contains(&self, e: &DomainElement) -> bool {
        self.elements.binary_search(e).is_ok()
    }

    fn is_finite(&self) -> bool {
        true
    }

    fn size(&self) -> Option<usize> {
        Some(self.elements.len())
    }

    fn first(&self) -> Option<DomainElement> {
        self.elements.first().cloned()
    }

    fn last(&self) -> Option<DomainElement> {
        self.elements.last().cloned()
    }

    fn next_after(&self, e: &DomainElement) -> Option<DomainElement> {
        let index = self.elements.partition_point(|x| x <= e);
        self.elements.get(index).cloned()
    }

    fn prev_before(&self, e: &DomainElement) -> Option<DomainElement> {
        match self.elements.partition_point(|x| x < e) {
            0 => None,
            n => Some(self.elements[n - 1].clone()),
        }
    }
}

/// The finite table of the integers between two bounds (both included).
#[derive(Clone)]
pub struct IntRangeSortTable {
    lower: i64,
    upper: i64,
    factory: Rc<ElementFactory>,
}

impl IntRangeSortTable {
    /// Builds the table of the integers in `[lower, upper]`.
    ///
    /// The table is empty if `lower > upper`.
    pub fn new(lower: i64, upper: i64, factory: Rc<ElementFactory>) -> Self {
        Self {
            lower,
            upper,
            factory,
        }
    }
}

impl Debug for IntRangeSortTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}..{}]", self.lower, self.upper)
    }
}

impl SortTable for IntRangeSortTable {
    fn contains(&self, e: &DomainElement) -> bool {
        e.as_int()
            .map(|n| self.lower <= n && n <= self.upper)
            .unwrap_or(false)
    }

    fn is_finite(&self) -> bool {
        true
    }

    fn size(&self) -> Option<usize> {
        if self.lower > self.upper {
            Some(0)
        } else {
            Some((self.upper as i128 - self.lower as i128 + 1) as usize)
        }
    }

    fn first(&self) -> Option<DomainElement> {
        if self.lower > self.upper {
            None
        } else {
            Some(self.factory.int(self.lower))
        }
    }

    fn last(&self) -> Option<DomainElement> {
        if self.lower > self.upper {
            None
        } else {
            Some(self.factory.int(self.upper))
        }
    }

    fn next_after(&self, e: &DomainElement) -> Option<DomainElement> {
        int_successor(e)
            .map(|n| n.max(self.lower))
            .filter(|n| *n <= self.upper)
            .map(|n| self.factory.int(n))
    }

    fn prev_before(&self, e: &DomainElement) -> Option<DomainElement> {
        int_predecessor(e)
            .map(|n| n.min(self.upper))
            .filter(|n| *n >= self.lower)
            .map(|n| self.factory.int(n))
    }
}

/// The infinite table of the natural numbers.
#[derive(Clone)]
pub struct NaturalSortTable {
    factory: Rc<ElementFactory>,
}

impl NaturalSortTable {
    /// Builds the table of the natural numbers.
    pub fn new(factory: Rc<ElementFactory>) -> Self {
        Self { factory }
    }
}

impl Debug for NaturalSortTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "nat")
    }
}

impl SortTable for NaturalSortTable {
    fn contains(&self, e: &DomainElement) -> bool {
        e.as_int().map(|n| n >= 0).unwrap_or(false)
    }

    fn is_finite(&self) -> bool {
        false
    }

    fn size(&self) -> Option<usize> {
        None
    }

    fn first(&self) -> Option<DomainElement> {
        Some(self.factory.int(0))
    }

    fn last(&self) -> Option<DomainElement> {
        None
    }

    fn next_after(&self, e: &DomainElement) -> Option<DomainElement> {
        int_successor(e).map(|n| self.factory.int(n.max(0)))
    }

    fn prev_before(&self, e: &DomainElement) -> Option<DomainElement> {
        int_predecessor(e)
            .filter(|n| *n >= 0)
            .map(|n| self.factory.int(n))
    }
}

/// The infinite table of the integers.
///
/// This table has no least element; it cannot be enumerated from its beginning.
#[derive(Clone)]
pub struct IntSortTable {
    factory: Rc<ElementFactory>,
}

impl IntSortTable {
    /// Builds the table of the integers.
    pub fn new(factory: Rc<ElementFactory>) -> Self {
        Self { factory }
    }
}

impl Debug for IntSortTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "int")
    }
}

impl SortTable for IntSortTable {
    fn contains(&self, e: &DomainElement) -> bool {
        e.as_int().is_some()
    }

    fn is_finite(&self) -> bool {
        false
    }

    fn size(&self) -> Option<usize> {
        None
    }

    fn first(&self) -> Option<DomainElement> {
        None
    }

    fn last(&self) -> Option<DomainElement> {
        None
    }

    fn next_after(&self, e: &DomainElement) -> Option<DomainElement> {
        int_successor(e).map(|n| self.factory.int(n))
    }

    fn prev_before(&self, e: &DomainElement) -> Option<DomainElement> {
        int_predecessor(e).map(|n| self.factory.int(n))
    }
}

/// The dense table of all the numbers.
#[derive(Debug, Clone, Default)]
pub struct NumberSortTable;

impl SortTable for NumberSortTable {
    fn contains(&self, e: &DomainElement) -> bool {
        e.is_numeric()
    }

    fn is_finite(&self) -> bool {
        false
    }

    fn size(&self) -> Option<usize> {
        None
    }

    fn is_discrete(&self) -> bool {
        false
    }

    fn first(&self) -> Option<DomainElement> {
        None
    }

    fn last(&self) -> Option<DomainElement> {
        None
    }

    fn next_after(&self, _e: &DomainElement) -> Option<DomainElement> {
        None
    }

    fn prev_before(&self, _e: &DomainElement) -> Option<DomainElement> {
        None
    }
}

/// The dense table of all the strings.
#[derive(Debug, Clone, Default)]
pub struct StringSortTable;

impl SortTable for StringSortTable {
    fn contains(&self, e: &DomainElement) -> bool {
        e.as_str().is_some()
    }

    fn is_finite(&self) -> bool {
        false
    }

    fn size(&self) -> Option<usize> {
        None
    }

    fn is_discrete(&self) -> bool {
        false
    }

    fn first(&self) -> Option<DomainElement> {
        None
    }

    fn last(&self) -> Option<DomainElement> {
        None
    }

    fn next_after(&self, _e: &DomainElement) -> Option<DomainElement> {
        None
    }

    fn prev_before(&self, _e: &DomainElement) -> Option<DomainElement> {
        None
    }
}
