//! Miscellaneous components used in the library.

mod comp_type;
pub use comp_type::CompType;

mod logging;
pub use logging::init_logger;
pub use logging::init_logger_with_level;
