//! The data model read by generators and by the ground translator: interned domain elements, sort tables and predicate tables.

mod domain_element;
pub use domain_element::DomainElement;
pub use domain_element::ElementFactory;
pub use domain_element::ElementTuple;
pub use domain_element::ElementValue;

mod pred_table;
pub use pred_table::EnumeratedPredTable;
pub use pred_table::PredTable;
pub use pred_table::Universe;

mod sort_table;
pub use sort_table::EnumeratedSortTable;
pub use sort_table::IntRangeSortTable;
pub use sort_table::IntSortTable;
pub use sort_table::NaturalSortTable;
pub use sort_table::NumberSortTable;
pub use sort_table::SortTable;
pub use sort_table::SortTableIter;
pub use sort_table::StringSortTable;
