//! Instance generators and checkers enumerating or verifying the bindings of logical variables.

mod arithmetic_generators;
pub use arithmetic_generators::ArithChecker;
pub use arithmetic_generators::ArithGenerator;
pub use arithmetic_generators::ArithOp;
pub use arithmetic_generators::InverseAbsGenerator;
pub use arithmetic_generators::UnaryArithChecker;
pub use arithmetic_generators::UnaryArithGenerator;
pub use arithmetic_generators::UnaryArithOp;

mod basic_generators;
pub use basic_generators::EmptyGenerator;
pub use basic_generators::FullGenerator;

mod binding;
pub(crate) use binding::assign;
pub(crate) use binding::fmt_cells;
pub use binding::values_of;
pub use binding::CellMap;
pub use binding::Pattern;
pub use binding::VarCell;

mod chain_generator;
pub use chain_generator::ChainGenerator;

mod comparison_generator;
pub use comparison_generator::ComparisonGenerator;

mod enum_lookup_generator;
pub use enum_lookup_generator::EnumLookupGenerator;
pub use enum_lookup_generator::LookupTable;

mod generator_factory;
pub use generator_factory::arithmetic_checker;
pub use generator_factory::arithmetic_generator;
pub use generator_factory::comparison_generator;
pub use generator_factory::lookup_generator;
pub use generator_factory::unary_arithmetic_checker;
pub use generator_factory::unary_arithmetic_generator;

mod sort_inst_generator;
pub use sort_inst_generator::SortInstGenerator;

mod specs;
pub use specs::collect_instances;
pub use specs::CloneableGenerator;
pub use specs::InstChecker;
pub use specs::InstGenerator;

mod table_generator;
pub use table_generator::TableGenerator;

mod true_quant_kernel_generator;
pub use true_quant_kernel_generator::TrueQuantKernelGenerator;
