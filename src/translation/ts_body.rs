use super::{Lit, SetId, VarId};
use crate::utils::CompType;
use anyhow::anyhow;
use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

/// The direction of a Tseitin definition.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter,
)]
pub enum TsType {
    /// The head is equivalent to the body.
    #[strum(serialize = "<=>")]
    Eq,
    /// The head implies the body.
    #[strum(serialize = "=>")]
    Impl,
    /// The body implies the head.
    #[strum(serialize = "<=")]
    RImpl,
    /// The head is defined by the body inside an inductive definition.
    #[strum(serialize = "<-")]
    Rule,
}

impl TsType {
    /// Merges the directions of two definitions of the same body.
    ///
    /// Both directions must not be [`TsType::Rule`], unless they are equal.
    ///
    /// # Panics
    ///
    /// Panics if exactly one of the directions is [`TsType::Rule`].
    pub fn merge(self, other: TsType) -> TsType {
        match (self, other) {
            (a, b) if a == b => a,
            (TsType::Rule, _) | (_, TsType::Rule) => {
                let definition = if self == TsType::Rule { other } else { self };
                panic!("cannot merge a rule with a {} definition", definition)
            }
            _ => TsType::Eq,
        }
    }

    /// Returns `true` iff the head implies the body under this direction.
    pub fn has_impl(&self) -> bool {
        matches!(self, TsType::Eq | TsType::Impl)
    }

    /// Returns `true` iff the body implies the head under this direction.
    pub fn has_rimpl(&self) -> bool {
        matches!(self, TsType::Eq | TsType::RImpl)
    }
}

impl TryFrom<&str> for TsType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "<=>" | "eq" => Ok(TsType::Eq),
            "=>" | "impl" => Ok(TsType::Impl),
            "<=" | "rimpl" => Ok(TsType::RImpl),
            "<-" | "rule" => Ok(TsType::Rule),
            _ => Err(anyhow!(r#"undefined Tseitin type "{}""#, value)),
        }
    }
}

/// An aggregate function.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum AggFunction {
    /// Number of true literals
    Card,
    /// Sum of the weights of the true literals
    Sum,
    /// Product of the weights of the true literals
    Prod,
    /// Least weight of the true literals
    Min,
    /// Greatest weight of the true literals
    Max,
}

impl TryFrom<&str> for AggFunction {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "card" | "#" => Ok(AggFunction::Card),
            "sum" => Ok(AggFunction::Sum),
            "prod" => Ok(AggFunction::Prod),
            "min" => Ok(AggFunction::Min),
            "max" => Ok(AggFunction::Max),
            _ => Err(anyhow!(r#"undefined aggregate function "{}""#, value)),
        }
    }
}

/// The domain of a constraint-programming variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CpDomain {
    /// All the integers between two bounds, both included.
    Range {
        /// The least value
        lower: i64,
        /// The greatest value
        upper: i64,
    },
    /// An explicit set of integers, sorted in increasing order.
    Values(Vec<i64>),
}

impl CpDomain {
    /// Builds a domain from a list of values, which are sorted and deduplicated.
    pub fn values(mut values: Vec<i64>) -> Self {
        values.sort_unstable();
        values.dedup();
        CpDomain::Values(values)
    }

    /// Returns `true` iff the value belongs to the domain.
    pub fn contains(&self, value: i64) -> bool {
        match self {
            CpDomain::Range { lower, upper } => *lower <= value && value <= *upper,
            CpDomain::Values(v) => v.binary_search(&value).is_ok(),
        }
    }
}

impl Display for CpDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CpDomain::Range { lower, upper } => write!(f, "[{}..{}]", lower, upper),
            CpDomain::Values(v) => {
                let values = v.iter().map(|n| n.to_string()).collect::<Vec<String>>();
                write!(f, "{{{}}}", values.join(","))
            }
        }
    }
}

/// A constraint-programming term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CpTerm {
    /// A single variable
    Var(VarId),
    /// The sum of variables
    Sum(Vec<VarId>),
    /// The weighted sum of variables
    WSum(Vec<VarId>, Vec<i64>),
}

impl Display for CpTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CpTerm::Var(v) => write!(f, "{}", v),
            CpTerm::Sum(vars) => {
                let parts = vars.iter().map(|v| v.to_string()).collect::<Vec<String>>();
                write!(f, "sum({})", parts.join(","))
            }
            CpTerm::WSum(vars, weights) => {
                let parts = vars
                    .iter()
                    .zip(weights.iter())
                    .map(|(v, w)| format!("{}*{}", w, v))
                    .collect::<Vec<String>>();
                write!(f, "wsum({})", parts.join(","))
            }
        }
    }
}

/// The right hand side of a constraint-programming comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CpBound {
    /// A constant
    Value(i64),
    /// A variable
    Var(VarId),
}

impl Display for CpBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CpBound::Value(n) => write!(f, "{}", n),
            CpBound::Var(v) => write!(f, "{}", v),
        }
    }
}

/// The body of a Tseitin literal, that is the construct the literal stands for.
///
/// Bodies are compared semantically: the literals of conjunctions and disjunctions are sorted,
/// and aggregate bounds are compared by value.
/// Use the constructors [`TsBody::pc`], [`TsBody::aggregate`] and [`TsBody::cp`] to build them.
#[derive(Debug, Clone)]
pub enum TsBody {
    /// A conjunction or a disjunction of literals.
    Pc {
        /// The literals, sorted and without duplicates
        lits: Vec<Lit>,
        /// `true` for a conjunction
        conjunctive: bool,
    },
    /// The comparison of an aggregate over a weighted set with a bound.
    Agg {
        /// The weighted set
        set: SetId,
        /// The aggregate function
        function: AggFunction,
        /// The operator of the comparison `function(set) comp bound`
        comp: CompType,
        /// The bound
        bound: f64,
    },
    /// The comparison of a constraint-programming term with a bound.
    Cp {
        /// The term
        term: CpTerm,
        /// The operator of the comparison `term comp bound`
        comp: CompType,
        /// The bound
        bound: CpBound,
    },
}

impl TsBody {
    /// Builds a conjunction (or a disjunction) of literals.
    pub fn pc(mut lits: Vec<Lit>, conjunctive: bool) -> Self {
        lits.sort_unstable();
        lits.dedup();
        TsBody::Pc { lits, conjunctive }
    }

    /// Builds an aggregate comparison `function(set) comp bound`.
    ///
    /// # Panics
    ///
    /// Panics if the bound is NaN.
    pub fn aggregate(set: SetId, function: AggFunction, comp: CompType, bound: f64) -> Self {
        if bound.is_nan() {
            panic!("cannot compare an aggregate with NaN")
        }
        let bound = if bound == 0.0 { 0.0 } else { bound };
        TsBody::Agg {
            set,
            function,
            comp,
            bound,
        }
    }

    /// Builds a constraint-programming comparison `term comp bound`.
    pub fn cp(term: CpTerm, comp: CompType, bound: CpBound) -> Self {
        TsBody::Cp { term, comp, bound }
    }
}

impl PartialEq for TsBody {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                TsBody::Pc {
                    lits: l1,
                    conjunctive: c1,
                },
                TsBody::Pc {
                    lits: l2,
                    conjunctive: c2,
                },
            ) => c1 == c2 && l1 == l2,
            (
                TsBody::Agg {
                    set: s1,
                    function: f1,
                    comp: c1,
                    bound: b1,
                },
                TsBody::Agg {
                    set: s2,
                    function: f2,
                    comp: c2,
                    bound: b2,
                },
            ) => s1 == s2 && f1 == f2 && c1 == c2 && b1.to_bits() == b2.to_bits(),
            (
                TsBody::Cp {
                    term: t1,
                    comp: c1,
                    bound: b1,
                },
                TsBody::Cp {
                    term: t2,
                    comp: c2,
                    bound: b2,
                },
            ) => t1 == t2 && c1 == c2 && b1 == b2,
            _ => false,
        }
    }
}

impl Eq for TsBody {}

impl Hash for TsBody {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            TsBody::Pc { lits, conjunctive } => {
                0u8.hash(state);
                lits.hash(state);
                conjunctive.hash(state);
            }
            TsBody::Agg {
                set,
                function,
                comp,
                bound,
            } => {
                1u8.hash(state);
                set.hash(state);
                function.hash(state);
                comp.hash(state);
                bound.to_bits().hash(state);
            }
            TsBody::Cp { term, comp, bound } => {
                2u8.hash(state);
                term.hash(state);
                comp.hash(state);
                bound.hash(state);
            }
        }
    }
}

impl Display for TsBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TsBody::Pc { lits, conjunctive } => {
                let parts = lits.iter().map(|l| l.to_string()).collect::<Vec<String>>();
                let op = if *conjunctive { " & " } else { " | " };
                write!(f, "{}", parts.join(op))
            }
            TsBody::Agg {
                set,
                function,
                comp,
                bound,
            } => write!(f, "{}({}) {} {}", function, set, comp, bound),
            TsBody::Cp { term, comp, bound } => write!(f, "{} {} {}", term, comp, bound),
        }
    }
}
