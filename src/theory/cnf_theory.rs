use super::GroundTheory;
use crate::{
    translation::{AggFunction, CpBound, CpDomain, CpTerm, Lit, SetId, TsType, VarId, WeightedSet},
    utils::CompType,
};
use anyhow::{anyhow, Context, Result};
use std::io::Write;

const DEFAULT_BUFFER_CAP: usize = 1 << 20;

/// A rule of an inductive definition, as recorded by a [`CnfTheory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRecord {
    /// The defined literal
    pub head: Lit,
    /// The literals of the body
    pub body: Vec<Lit>,
    /// `true` if the body is a conjunction
    pub conjunctive: bool,
}

/// An aggregate definition, as recorded by a [`CnfTheory`].
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRecord {
    /// The defined literal
    pub head: Lit,
    /// The direction of the definition
    pub ts_type: TsType,
    /// The weighted set
    pub set: SetId,
    /// The aggregate function
    pub function: AggFunction,
    /// The comparison operator
    pub comp: CompType,
    /// The bound
    pub bound: f64,
}

/// A constraint-programming definition, as recorded by a [`CnfTheory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpConstraintRecord {
    /// The defined literal
    pub head: Lit,
    /// The direction of the definition
    pub ts_type: TsType,
    /// The term
    pub term: CpTerm,
    /// The comparison operator
    pub comp: CompType,
    /// The bound
    pub bound: CpBound,
}

/// A ground theory buffering its clauses in the DIMACS format.
///
/// The records that cannot be expressed as clauses (rules, aggregates, CP constraints and their operands) are kept aside.
#[derive(Debug)]
pub struct CnfTheory {
    n_vars: usize,
    n_clauses: usize,
    clauses: String,
    rules: Vec<RuleRecord>,
    sets: Vec<(SetId, WeightedSet)>,
    aggregates: Vec<AggregateRecord>,
    cp_variables: Vec<(VarId, CpDomain)>,
    cp_constraints: Vec<CpConstraintRecord>,
}

impl Default for CnfTheory {
    fn default() -> Self {
        Self {
            n_vars: 0,
            n_clauses: 0,
            clauses: String::with_capacity(DEFAULT_BUFFER_CAP),
            rules: Vec::new(),
            sets: Vec::new(),
            aggregates: Vec::new(),
            cp_variables: Vec::new(),
            cp_constraints: Vec::new(),
        }
    }
}

impl CnfTheory {
    /// Returns the rules added so far.
    pub fn rules(&self) -> &[RuleRecord] {
        &self.rules
    }

    /// Returns the weighted sets added so far.
    pub fn sets(&self) -> &[(SetId, WeightedSet)] {
        &self.sets
    }

    /// Returns the aggregate definitions added so far.
    pub fn aggregates(&self) -> &[AggregateRecord] {
        &self.aggregates
    }

    /// Returns the CP variables added so far.
    pub fn cp_variables(&self) -> &[(VarId, CpDomain)] {
        &self.cp_variables
    }

    /// Returns the CP definitions added so far.
    pub fn cp_constraints(&self) -> &[CpConstraintRecord] {
        &self.cp_constraints
    }

    /// Returns `true` iff this theory only contains clauses.
    pub fn is_clausal(&self) -> bool {
        self.rules.is_empty() && self.aggregates.is_empty() && self.cp_constraints.is_empty()
    }

    /// Writes the clauses in the DIMACS format.
    ///
    /// An error is returned if the theory contains rules, aggregates or CP constraints, or if the writer fails.
    ///
    /// # Example
    ///
    /// ```
    /// # use fogrounder::theory::{CnfTheory, GroundTheory};
    /// # use fogrounder::translation::Lit;
    /// let mut theory = CnfTheory::default();
    /// theory.add_clause(vec![Lit::from(1), Lit::from(-2)]);
    /// let mut buffer = Vec::new();
    /// theory.write_dimacs(&mut buffer).unwrap();
    /// assert_eq!("p cnf 2 1\n1 -2 0\n", String::from_utf8(buffer).unwrap());
    /// ```
    pub fn write_dimacs(&self, writer: &mut dyn Write) -> Result<()> {
        if !self.is_clausal() {
            return Err(anyhow!(
                "cannot write a DIMACS file for a theory with \
                 {} rule(s), {} aggregate(s) and {} CP constraint(s)",
                self.rules.len(),
                self.aggregates.len(),
                self.cp_constraints.len()
            ));
        }
        let context = "while writing a DIMACS theory";
        write!(
            writer,
            "p cnf {} {}\n{}",
            self.n_vars, self.n_clauses, self.clauses
        )
        .context(context)?;
        writer.flush().context(context)
    }
}

impl GroundTheory for CnfTheory {
    fn add_clause(&mut self, cl: Vec<Lit>) {
        cl.iter().for_each(|l| {
            self.n_vars = usize::max(self.n_vars, usize::from(l.var()));
            self.clauses.push_str(&format!("{} ", l));
        });
        self.clauses.push('0');
        self.clauses.push('\n');
        self.n_clauses += 1;
    }

    fn add_rule(&mut self, head: Lit, body: Vec<Lit>, conjunctive: bool) {
        self.reserve(usize::from(head.var()));
        body.iter().for_each(|l| self.reserve(usize::from(l.var())));
        self.rules.push(RuleRecord {
            head,
            body,
            conjunctive,
        });
    }

    fn add_set(&mut self, id: SetId, set: &WeightedSet) {
        set.lits().iter().for_each(|l| self.reserve(usize::from(l.var())));
        self.sets.push((id, set.clone()));
    }

    fn add_aggregate(
        &mut self,
        head: Lit,
        ts_type: TsType,
        set: SetId,
        function: AggFunction,
        comp: CompType,
        bound: f64,
    ) {
        self.reserve(usize::from(head.var()));
        self.aggregates.push(AggregateRecord {
            head,
            ts_type,
            set,
            function,
            comp,
            bound,
        });
    }

    fn add_cp_variable(&mut self, var: VarId, domain: &CpDomain) {
        self.cp_variables.push((var, domain.clone()));
    }

    fn add_cp_constraint(
        &mut self,
        head: Lit,
        ts_type: TsType,
        term: &CpTerm,
        comp: CompType,
        bound: &CpBound,
    ) {
        self.reserve(usize::from(head.var()));
        self.cp_constraints.push(CpConstraintRecord {
            head,
            ts_type,
            term: term.clone(),
            comp,
            bound: bound.clone(),
        });
    }

    fn reserve(&mut self, new_max_id: usize) {
        if new_max_id > self.n_vars {
            self.n_vars = new_max_id;
        }
    }

    fn n_vars(&self) -> usize {
        self.n_vars
    }

    fn n_clauses(&self) -> usize {
        self.n_clauses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause;

    fn dimacs(theory: &CnfTheory) -> Result<String> {
        let mut buffer = Vec::new();
        theory.write_dimacs(&mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn test_dimacs_ok() {
        let mut theory = CnfTheory::default();
        theory.add_clause(clause![1, 2]);
        theory.add_clause(clause![-1, -2]);
        theory.reserve(4);
        assert_eq!(2, theory.n_clauses());
        assert_eq!("p cnf 4 2\n1 2 0\n-1 -2 0\n", dimacs(&theory).unwrap());
    }

    #[test]
    fn test_empty_theory() {
        assert_eq!("p cnf 0 0\n", dimacs(&CnfTheory::default()).unwrap());
    }

    #[test]
    fn test_non_clausal() {
        let mut theory = CnfTheory::default();
        theory.add_rule(Lit::from(3), clause![1, 2], true);
        assert_eq!(3, theory.n_vars());
        assert!(!theory.is_clausal());
        assert!(dimacs(&theory).is_err());
    }

    #[test]
    fn test_side_records() {
        let mut theory = CnfTheory::default();
        theory.add_set(SetId(1), &WeightedSet::new_unweighted(clause![2, 5]));
        theory.add_aggregate(
            Lit::from(6),
            TsType::Eq,
            SetId(1),
            AggFunction::Card,
            CompType::Geq,
            1.0,
        );
        theory.add_cp_variable(VarId(0), &CpDomain::Range { lower: 0, upper: 3 });
        theory.add_cp_constraint(
            Lit::from(7),
            TsType::Impl,
            &CpTerm::Var(VarId(0)),
            CompType::Eq,
            &CpBound::Value(2),
        );
        assert_eq!(7, theory.n_vars());
        assert_eq!(1, theory.sets().len());
        assert_eq!(1, theory.aggregates().len());
        assert_eq!(1, theory.cp_variables().len());
        assert_eq!(TsType::Impl, theory.cp_constraints()[0].ts_type);
        assert_eq!(0, theory.n_clauses());
    }
}
