//! Ground theories receiving the definitions produced by the ground translator.

mod cnf_theory;
pub use cnf_theory::AggregateRecord;
pub use cnf_theory::CnfTheory;
pub use cnf_theory::CpConstraintRecord;
pub use cnf_theory::RuleRecord;

mod specs;
pub use specs::GroundTheory;
