/// The options of the ground translator.
///
/// # Example
///
/// ```
/// # use fogrounder::translation::TranslatorOptions;
/// let options = TranslatorOptions::default().with_cp_support(true);
/// assert!(options.share_tseitins());
/// assert!(options.cp_support());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslatorOptions {
    share_tseitins: bool,
    cp_support: bool,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            share_tseitins: true,
            cp_support: false,
        }
    }
}

impl TranslatorOptions {
    /// Sets whether semantically equal bodies share the same Tseitin literal.
    pub fn with_share_tseitins(mut self, value: bool) -> Self {
        self.share_tseitins = value;
        self
    }

    /// Sets whether the graph atoms of functions with a CP domain are translated into CP constraints.
    pub fn with_cp_support(mut self, value: bool) -> Self {
        self.cp_support = value;
        self
    }

    /// Returns whether semantically equal bodies share the same Tseitin literal.
    pub fn share_tseitins(&self) -> bool {
        self.share_tseitins
    }

    /// Returns whether CP support is enabled.
    pub fn cp_support(&self) -> bool {
        self.cp_support
    }
}
