use crate::{
    translation::{AggFunction, CpBound, CpDomain, CpTerm, Lit, SetId, TsType, VarId, WeightedSet},
    utils::CompType,
};

/// The trait for the consumers of ground definitions.
///
/// The ground translator emits the definitions of its Tseitin literals into a ground theory
/// (see [`GroundTranslator::materialize_pending`](crate::translation::GroundTranslator::materialize_pending)).
pub trait GroundTheory {
    /// Adds a clause to this theory.
    fn add_clause(&mut self, cl: Vec<Lit>);

    /// Adds a rule `head <- body` of an inductive definition; the body is a conjunction or a disjunction of literals.
    fn add_rule(&mut self, head: Lit, body: Vec<Lit>, conjunctive: bool);

    /// Declares a weighted set used by aggregates.
    fn add_set(&mut self, id: SetId, set: &WeightedSet);

    /// Adds the definition `head ts_type function(set) comp bound`.
    fn add_aggregate(
        &mut self,
        head: Lit,
        ts_type: TsType,
        set: SetId,
        function: AggFunction,
        comp: CompType,
        bound: f64,
    );

    /// Declares a constraint-programming variable.
    fn add_cp_variable(&mut self, var: VarId, domain: &CpDomain);

    /// Adds the definition `head ts_type term comp bound`.
    fn add_cp_constraint(
        &mut self,
        head: Lit,
        ts_type: TsType,
        term: &CpTerm,
        comp: CompType,
        bound: &CpBound,
    );

    /// Ensures the theory takes into account the variables up to the provided one.
    fn reserve(&mut self, new_max_id: usize);

    /// Returns the number of propositional variables of the theory.
    fn n_vars(&self) -> usize;

    /// Returns the number of clauses added so far.
    fn n_clauses(&self) -> usize;
}
