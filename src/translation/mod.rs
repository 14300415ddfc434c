//! The ground translator, mapping ground atoms and ground constructs to the literals and variables of a ground theory.

mod ground_translator;
pub use ground_translator::AtomKind;
pub use ground_translator::GroundTranslator;

mod literals;
pub use literals::Lit;
pub use literals::PropVar;
pub use literals::SetId;
pub use literals::SymbolOffset;
pub use literals::VarId;

mod options;
pub use options::TranslatorOptions;

mod symbols;
pub use symbols::Symbol;
pub use symbols::SymbolKind;

mod ts_body;
pub use ts_body::AggFunction;
pub use ts_body::CpBound;
pub use ts_body::CpDomain;
pub use ts_body::CpTerm;
pub use ts_body::TsBody;
pub use ts_body::TsType;

mod weighted_set;
pub use weighted_set::WeightedSet;
