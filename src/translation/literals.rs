use std::{
    fmt::Display,
    num::{NonZeroIsize, NonZeroUsize},
};

/// A propositional variable of the ground theory.
///
/// A variable is represented by a non-null positive integer.
/// It can be obtained through the [From] trait from an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropVar(NonZeroUsize);

macro_rules! impl_var_from {
    ($t: ty) => {
        impl From<$t> for PropVar {
            fn from(v: $t) -> Self {
                match NonZeroUsize::new(v as usize) {
                    Some(n) => Self(n),
                    None => panic!("cannot build a variable from 0"),
                }
            }
        }
    };
}
impl_var_from!(usize);
impl_var_from!(u64);
impl_var_from!(u32);

macro_rules! impl_var_from_neg {
    ($t: ty) => {
        impl From<$t> for PropVar {
            fn from(v: $t) -> Self {
                if v < 0 {
                    panic!("cannot build a variable from a negative integer")
                }
                PropVar::from(v as usize)
            }
        }
    };
}
impl_var_from_neg!(isize);
impl_var_from_neg!(i64);
impl_var_from_neg!(i32);

impl From<PropVar> for usize {
    fn from(v: PropVar) -> Self {
        v.0.into()
    }
}

impl Display for PropVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A ground literal.
///
/// A literal is represented by a non-null integer; its sign gives its polarity.
/// Literal `1` stands for `true` and `-1` for `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit(NonZeroIsize);

impl Lit {
    /// Returns the literal which is always true.
    pub fn true_lit() -> Self {
        Self::from(1)
    }

    /// Returns the literal which is always false.
    pub fn false_lit() -> Self {
        Self::from(-1)
    }

    /// Returns the opposite literal.
    pub fn negate(self) -> Self {
        Self::from(-self.0.get())
    }

    /// Returns the variable of this literal.
    pub fn var(&self) -> PropVar {
        PropVar(self.0.unsigned_abs())
    }

    /// Returns `true` iff this literal is positive.
    pub fn is_positive(&self) -> bool {
        self.0.get() > 0
    }

    /// Returns `true` iff this literal is the true or the false literal.
    pub fn is_constant(&self) -> bool {
        self.0.get().abs() == 1
    }

    /// Returns the positive literal of a variable.
    pub fn positive(var: PropVar) -> Self {
        Self::from(usize::from(var) as isize)
    }
}

macro_rules! impl_lit_from {
    ($t: ty) => {
        impl From<$t> for Lit {
            fn from(l: $t) -> Self {
                match NonZeroIsize::new(l as isize) {
                    Some(n) => Self(n),
                    None => panic!("cannot build a literal from 0"),
                }
            }
        }
    };
}
impl_lit_from!(isize);
impl_lit_from!(i64);
impl_lit_from!(i32);

impl From<Lit> for isize {
    fn from(l: Lit) -> Self {
        l.0.into()
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a clause from a list of integers.
#[macro_export]
macro_rules! clause {
    () => (
        vec![] as Vec<$crate::translation::Lit>
    );
    ($($x:expr),+ $(,)?) => (
        [$($x),+]
            .into_iter()
            .map($crate::translation::Lit::from)
            .collect::<Vec<$crate::translation::Lit>>()
    );
}

/// The identifier of a constraint-programming variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub usize);

impl Display for VarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "var_{}", self.0)
    }
}

/// The identifier of a weighted set of literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SetId(pub usize);

impl Display for SetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "set_{}", self.0)
    }
}

/// The place a symbol is stored at in the ground translator.
///
/// Predicate-like storage maps argument tuples to literals;
/// function-like storage maps argument tuples to constraint-programming variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolOffset {
    /// The index of the symbol in its storage
    pub index: usize,
    /// `true` for function-like storage
    pub function_like: bool,
}
