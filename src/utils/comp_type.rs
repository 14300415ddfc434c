use anyhow::anyhow;
use std::cmp::Ordering;

/// A comparison operator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter,
)]
pub enum CompType {
    /// Lower than
    #[strum(serialize = "<")]
    Lt,
    /// Lower or equal
    #[strum(serialize = "=<")]
    Leq,
    /// Greater than
    #[strum(serialize = ">")]
    Gt,
    /// Greater or equal
    #[strum(serialize = ">=")]
    Geq,
    /// Equal
    #[strum(serialize = "=")]
    Eq,
    /// Not equal
    #[strum(serialize = "~=")]
    Neq,
}

impl CompType {
    /// Returns `true` iff the ordering between the left and the right operand satisfies this operator.
    ///
    /// # Example
    ///
    /// ```
    /// # use fogrounder::utils::CompType;
    /// assert!(CompType::Leq.holds(1.cmp(&1)));
    /// assert!(!CompType::Lt.holds(1.cmp(&1)));
    /// ```
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            CompType::Lt => ordering == Ordering::Less,
            CompType::Leq => ordering != Ordering::Greater,
            CompType::Gt => ordering == Ordering::Greater,
            CompType::Geq => ordering != Ordering::Less,
            CompType::Eq => ordering == Ordering::Equal,
            CompType::Neq => ordering != Ordering::Equal,
        }
    }

    /// Returns the operator obtained by swapping the operands (`x < y` iff `y > x`).
    pub fn invert(&self) -> Self {
        match self {
            CompType::Lt => CompType::Gt,
            CompType::Leq => CompType::Geq,
            CompType::Gt => CompType::Lt,
            CompType::Geq => CompType::Leq,
            CompType::Eq => CompType::Eq,
            CompType::Neq => CompType::Neq,
        }
    }

    /// Returns the negation of this operator (`not x < y` iff `x >= y`).
    pub fn negate(&self) -> Self {
        match self {
            CompType::Lt => CompType::Geq,
            CompType::Leq => CompType::Gt,
            CompType::Gt => CompType::Leq,
            CompType::Geq => CompType::Lt,
            CompType::Eq => CompType::Neq,
            CompType::Neq => CompType::Eq,
        }
    }
}

impl TryFrom<&str> for CompType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "<" => Ok(CompType::Lt),
            "=<" | "<=" => Ok(CompType::Leq),
            ">" => Ok(CompType::Gt),
            ">=" | "=>" => Ok(CompType::Geq),
            "=" => Ok(CompType::Eq),
            "~=" | "!=" => Ok(CompType::Neq),
            _ => Err(anyhow!(r#"undefined comparison operator "{}""#, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display_round_trip() {
        for c in CompType::iter() {
            assert_eq!(c, CompType::try_from(c.to_string().as_str()).unwrap());
        }
    }

    #[test]
    fn test_unknown_operator() {
        assert_eq!(
            r#"undefined comparison operator "<>""#,
            CompType::try_from("<>").unwrap_err().to_string()
        );
    }

    #[test]
    fn test_negate_and_invert() {
        for c in CompType::iter() {
            for o in [Ordering::Less, Ordering::Equal, Ordering::Greater] {
                assert_ne!(c.holds(o), c.negate().holds(o));
                assert_eq!(c.holds(o), c.invert().holds(o.reverse()));
            }
        }
    }
}
