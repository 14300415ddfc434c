use super::CpDomain;
use std::fmt::Display;

/// The kind of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SymbolKind {
    /// A predicate symbol
    Predicate,
    /// A function symbol; its ground atoms are the tuples of its graph (arguments and value)
    Function,
}

/// A vocabulary symbol, as known by the ground translator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    name: String,
    arity: usize,
    kind: SymbolKind,
    cp_domain: Option<CpDomain>,
}

impl Symbol {
    /// Builds a predicate symbol.
    pub fn predicate(name: &str, arity: usize) -> Self {
        Self {
            name: name.to_string(),
            arity,
            kind: SymbolKind::Predicate,
            cp_domain: None,
        }
    }

    /// Builds a function symbol; the arity does not count the value.
    pub fn function(name: &str, arity: usize) -> Self {
        Self {
            name: name.to_string(),
            arity,
            kind: SymbolKind::Function,
            cp_domain: None,
        }
    }

    /// Sets the domain of the constraint-programming variables standing for the terms of this function.
    ///
    /// # Panics
    ///
    /// Panics if this symbol is not a function.
    pub fn with_cp_domain(mut self, domain: CpDomain) -> Self {
        if self.kind != SymbolKind::Function {
            panic!("cannot set a CP domain to the predicate {}", self.name)
        }
        self.cp_domain = Some(domain);
        self
    }

    /// Returns the name of the symbol.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the arity of the symbol; for functions, the value is not counted.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the number of elements in the ground atoms of the symbol.
    pub fn atom_len(&self) -> usize {
        match self.kind {
            SymbolKind::Predicate => self.arity,
            SymbolKind::Function => self.arity + 1,
        }
    }

    /// Returns the kind of the symbol.
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Returns the domain of the CP variables of this function, if any.
    pub fn cp_domain(&self) -> Option<&CpDomain> {
        self.cp_domain.as_ref()
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_len() {
        assert_eq!(2, Symbol::predicate("p", 2).atom_len());
        assert_eq!(3, Symbol::function("f", 2).atom_len());
        assert_eq!("f/2", Symbol::function("f", 2).to_string());
    }

    #[test]
    #[should_panic(expected = "cannot set a CP domain to the predicate p")]
    fn test_cp_domain_on_predicate() {
        Symbol::predicate("p", 1).with_cp_domain(CpDomain::values(vec![1]));
    }
}
