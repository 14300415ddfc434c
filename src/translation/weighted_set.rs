use super::Lit;
use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

/// A set of literals, each one carrying a weight.
///
/// Weighted sets are the operands of aggregates.
/// Two sets are equal if they have the same literals with the same weights, in the same order.
#[derive(Debug, Clone, Default)]
pub struct WeightedSet {
    lits: Vec<Lit>,
    weights: Vec<f64>,
}

impl WeightedSet {
    /// Builds a weighted set from a list of literals and their weights.
    ///
    /// # Panics
    ///
    /// Panics if the lists have different lengths, or if a weight is NaN.
    pub fn new(lits: Vec<Lit>, weights: Vec<f64>) -> Self {
        if lits.len() != weights.len() {
            panic!(
                "cannot build a weighted set with {} literal(s) and {} weight(s)",
                lits.len(),
                weights.len()
            )
        }
        if weights.iter().any(|w| w.is_nan()) {
            panic!("cannot build a weighted set with a NaN weight")
        }
        let weights = weights
            .into_iter()
            .map(|w| if w == 0.0 { 0.0 } else { w })
            .collect();
        Self { lits, weights }
    }

    /// Builds a weighted set in which all the literals have weight 1.
    pub fn new_unweighted(lits: Vec<Lit>) -> Self {
        let weights = vec![1.0; lits.len()];
        Self::new(lits, weights)
    }

    /// Returns the literals of the set.
    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    /// Returns the weights of the literals, in the order of [`lits`](Self::lits).
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Returns the number of literals in the set.
    pub fn len(&self) -> usize {
        self.lits.len()
    }

    /// Returns `true` iff the set has no literal.
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }
}

impl PartialEq for WeightedSet {
    fn eq(&self, other: &Self) -> bool {
        self.lits == other.lits
            && self
                .weights
                .iter()
                .zip(other.weights.iter())
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for WeightedSet {}

impl Hash for WeightedSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lits.hash(state);
        self.weights.iter().for_each(|w| w.to_bits().hash(state));
    }
}

impl Display for WeightedSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = self
            .lits
            .iter()
            .zip(self.weights.iter())
            .map(|(l, w)| format!("({},{})", l, w))
            .collect::<Vec<String>>();
        write!(f, "[{}]", parts.join(" "))
    }
}
