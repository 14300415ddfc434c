use super::{
    AggFunction, CpBound, CpDomain, CpTerm, Lit, PropVar, SetId, Symbol, SymbolKind,
    SymbolOffset, TranslatorOptions, TsBody, TsType, VarId, WeightedSet,
};
use crate::{
    structure::{DomainElement, ElementTuple},
    theory::GroundTheory,
    utils::CompType,
};
use log::{info, trace};
use std::collections::HashMap;

/// The kind of an assigned literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum AtomKind {
    /// A ground atom of a symbol of the vocabulary.
    InputAtom,
    /// A literal standing for a construct described by a [`TsBody`].
    TseitinWithSubformula,
    /// A fresh literal without any attached construct.
    LoneTseitin,
    /// A graph atom `f(args) = v` of a function handled by constraint programming.
    CpGraphEquality,
}

struct AtomInfo {
    kind: AtomKind,
    origin: Option<(usize, ElementTuple)>,
    ts_type: Option<TsType>,
    body: Option<TsBody>,
}

struct PredicateStore {
    symbol: Symbol,
    lits: HashMap<ElementTuple, Lit>,
    function_index: Option<usize>,
}

struct FunctionStore {
    predicate_index: usize,
    domain: CpDomain,
    vars: HashMap<ElementTuple, VarId>,
}

struct CpVarInfo {
    domain: CpDomain,
    origin: Option<(usize, ElementTuple)>,
}

/// The bijection between ground constructs and the literals and variables of the ground theory.
///
/// The translator assigns literals to ground atoms (at most one literal per atom),
/// reifies composite constructs into Tseitin literals (sharing the literals of semantically equal constructs),
/// and manages the constraint-programming variables and the weighted sets of the theory.
///
/// Literal `1` is reserved for `true`.
/// The definitions of the Tseitin literals are kept until they are emitted into a [`GroundTheory`] by [`materialize_pending`](Self::materialize_pending).
///
/// # Example
///
/// ```
/// # use fogrounder::structure::ElementFactory;
/// # use fogrounder::theory::{CnfTheory, GroundTheory};
/// # use fogrounder::translation::{GroundTranslator, Symbol, TsType};
/// let factory = ElementFactory::default();
/// let mut translator = GroundTranslator::default();
/// let p = translator.add_symbol(Symbol::predicate("p", 1));
/// let a = translator.get_or_create_literal(p, &[factory.int(1)]);
/// let b = translator.get_or_create_literal(p, &[factory.int(2)]);
/// let conj = translator.reify(vec![a, b], true, TsType::Eq);
/// assert_eq!(conj, translator.reify(vec![b, a], true, TsType::Eq));
/// let mut theory = CnfTheory::default();
/// translator.materialize_pending(&mut theory);
/// assert_eq!(4, theory.n_clauses());
/// ```
pub struct GroundTranslator {
    options: TranslatorOptions,
    atoms: Vec<AtomInfo>,
    predicates: Vec<PredicateStore>,
    symbol_indices: HashMap<(String, usize, SymbolKind), usize>,
    functions: Vec<FunctionStore>,
    cp_vars: Vec<CpVarInfo>,
    cp_term_vars: HashMap<(CpTerm, CpDomain), VarId>,
    pending_cp_definitions: Vec<(CpTerm, VarId)>,
    n_emitted_cp_vars: usize,
    sets: Vec<Option<WeightedSet>>,
    set_ids: HashMap<WeightedSet, SetId>,
    pending_sets: Vec<SetId>,
    ts_cache: HashMap<(TsBody, bool), Lit>,
    pending: Vec<PropVar>,
}

impl Default for GroundTranslator {
    fn default() -> Self {
        Self::new(TranslatorOptions::default())
    }
}

impl GroundTranslator {
    /// Builds a new translator, which only knows the true literal.
    pub fn new(options: TranslatorOptions) -> Self {
        let mut translator = Self {
            options,
            atoms: Vec::new(),
            predicates: Vec::new(),
            symbol_indices: HashMap::new(),
            functions: Vec::new(),
            cp_vars: Vec::new(),
            cp_term_vars: HashMap::new(),
            pending_cp_definitions: Vec::new(),
            n_emitted_cp_vars: 0,
            sets: Vec::new(),
            set_ids: HashMap::new(),
            pending_sets: Vec::new(),
            ts_cache: HashMap::new(),
            pending: Vec::new(),
        };
        let true_body = TsBody::pc(vec![], true);
        let true_lit = translator.new_atom(AtomInfo {
            kind: AtomKind::TseitinWithSubformula,
            origin: None,
            ts_type: Some(TsType::Eq),
            body: Some(true_body.clone()),
        });
        translator.pending.push(true_lit.var());
        translator.ts_cache.insert((true_body, false), true_lit);
        translator
    }

    /// Returns the options of this translator.
    pub fn options(&self) -> TranslatorOptions {
        self.options
    }

    /// Returns the number of propositional variables assigned so far, the one of the true literal included.
    pub fn n_vars(&self) -> usize {
        self.atoms.len()
    }

    /// Returns the number of CP variables created so far.
    pub fn n_cp_vars(&self) -> usize {
        self.cp_vars.len()
    }

    /// Registers a symbol, returning its predicate-like offset.
    ///
    /// Registering a symbol twice returns the same offset.
    /// For a function with a CP domain, the function-like offset of its terms is given by [`cp_offset_of`](Self::cp_offset_of).
    pub fn add_symbol(&mut self, symbol: Symbol) -> SymbolOffset {
        let key = (symbol.name().to_string(), symbol.arity(), symbol.kind());
        if let Some(index) = self.symbol_indices.get(&key) {
            return SymbolOffset {
                index: *index,
                function_like: false,
            };
        }
        let index = self.predicates.len();
        let function_index = symbol.cp_domain().map(|domain| {
            self.functions.push(FunctionStore {
                predicate_index: index,
                domain: domain.clone(),
                vars: HashMap::new(),
            });
            self.functions.len() - 1
        });
        trace!("registered symbol {} at offset {}", symbol, index);
        self.predicates.push(PredicateStore {
            symbol,
            lits: HashMap::new(),
            function_index,
        });
        self.symbol_indices.insert(key, index);
        SymbolOffset {
            index,
            function_like: false,
        }
    }

    /// Returns the function-like offset of a function registered with a CP domain.
    pub fn cp_offset_of(&self, offset: SymbolOffset) -> Option<SymbolOffset> {
        self.predicate_store(offset)
            .function_index
            .map(|index| SymbolOffset {
                index,
                function_like: true,
            })
    }

    /// Returns the symbol stored at an offset.
    ///
    /// # Panics
    ///
    /// Panics if the offset is unknown.
    pub fn symbol(&self, offset: SymbolOffset) -> &Symbol {
        if offset.function_like {
            &self.predicates[self.function_store(offset).predicate_index].symbol
        } else {
            &self.predicate_store(offset).symbol
        }
    }

    fn predicate_store(&self, offset: SymbolOffset) -> &PredicateStore {
        match self.predicates.get(offset.index) {
            Some(store) if !offset.function_like => store,
            _ => panic!("unknown symbol offset {:?}", offset),
        }
    }

    fn function_store(&self, offset: SymbolOffset) -> &FunctionStore {
        match self.functions.get(offset.index) {
            Some(store) if offset.function_like => store,
            _ => panic!("unknown symbol offset {:?}", offset),
        }
    }

    fn new_atom(&mut self, info: AtomInfo) -> Lit {
        self.atoms.push(info);
        Lit::positive(PropVar::from(self.atoms.len()))
    }

    fn atom(&self, lit: Lit) -> &AtomInfo {
        match self.atoms.get(usize::from(lit.var()) - 1) {
            Some(info) => info,
            None => panic!("unknown literal {}", lit),
        }
    }

    /// Returns the literal of the ground atom `symbol(args)`, creating it if needed.
    ///
    /// For functions, the arguments include the value.
    /// If CP support is enabled and the symbol is a function with a CP domain, the graph atom is translated into a CP constraint on the term;
    /// graph atoms whose value is not in the CP domain are false.
    ///
    /// # Panics
    ///
    /// Panics if the offset is unknown, or if the number of arguments does not match the symbol.
    pub fn get_or_create_literal(&mut self, offset: SymbolOffset, args: &[DomainElement]) -> Lit {
        let store = self.predicate_store(offset);
        if args.len() != store.symbol.atom_len() {
            panic!(
                "symbol {} expects {} argument(s), got {}",
                store.symbol,
                store.symbol.atom_len(),
                args.len()
            )
        }
        if let Some(lit) = store.lits.get(args) {
            return *lit;
        }
        let lit = match (self.options.cp_support(), self.cp_offset_of(offset)) {
            (true, Some(cp_offset)) => self.new_cp_graph_atom(offset, cp_offset, args),
            _ => self.new_atom(AtomInfo {
                kind: AtomKind::InputAtom,
                origin: Some((offset.index, args.to_vec())),
                ts_type: None,
                body: None,
            }),
        };
        trace!("assigned {} to {}", lit, self.lit_to_string(lit));
        self.predicates[offset.index].lits.insert(args.to_vec(), lit);
        lit
    }

    fn new_cp_graph_atom(
        &mut self,
        offset: SymbolOffset,
        cp_offset: SymbolOffset,
        args: &[DomainElement],
    ) -> Lit {
        let (value, term_args) = match args.split_last() {
            Some((value, term_args)) => (value, term_args),
            None => return Lit::false_lit(),
        };
        match value.as_int() {
            Some(v) if self.function_store(cp_offset).domain.contains(v) => {
                let var = self.translate_term(cp_offset, term_args);
                let body = TsBody::cp(CpTerm::Var(var), CompType::Eq, CpBound::Value(v));
                let lit = self.new_atom(AtomInfo {
                    kind: AtomKind::CpGraphEquality,
                    origin: Some((offset.index, args.to_vec())),
                    ts_type: Some(TsType::Eq),
                    body: Some(body.clone()),
                });
                self.pending.push(lit.var());
                if self.options.share_tseitins() {
                    self.ts_cache.entry((body, false)).or_insert(lit);
                }
                lit
            }
            _ => Lit::false_lit(),
        }
    }

    /// Returns a literal standing for the conjunction (or the disjunction) of the provided literals.
    ///
    /// The construct is simplified first: constants are absorbed, complementary literals make the construct constant,
    /// and empty conjunctions (resp. disjunctions) are true (resp. false).
    /// A single remaining literal is returned as is for [`TsType::Eq`] definitions.
    /// Otherwise, a Tseitin literal is returned, which is shared with previous reifications of the same construct if sharing is enabled.
    ///
    /// # Panics
    ///
    /// Panics if one of the literals is unknown.
    pub fn reify(&mut self, lits: Vec<Lit>, conjunctive: bool, ts_type: TsType) -> Lit {
        lits.iter().for_each(|l| {
            self.atom(*l);
        });
        let (absorbing, neutral) = if conjunctive {
            (Lit::false_lit(), Lit::true_lit())
        } else {
            (Lit::true_lit(), Lit::false_lit())
        };
        let mut lits = lits.into_iter().filter(|l| *l != neutral).collect::<Vec<Lit>>();
        lits.sort_unstable();
        lits.dedup();
        if lits.contains(&absorbing)
            || lits.iter().any(|l| lits.binary_search(&l.negate()).is_ok())
        {
            return absorbing;
        }
        if lits.is_empty() {
            return neutral;
        }
        if lits.len() == 1 && ts_type == TsType::Eq {
            return lits[0];
        }
        self.reify_body(TsBody::pc(lits, conjunctive), ts_type)
    }

    /// Returns a literal standing for the aggregate comparison `function(set) comp bound`.
    ///
    /// # Panics
    ///
    /// Panics if the set is unknown, or if the bound is NaN.
    pub fn reify_aggregate(
        &mut self,
        set: SetId,
        function: AggFunction,
        comp: CompType,
        bound: f64,
        ts_type: TsType,
    ) -> Lit {
        self.set_of(set);
        self.reify_body(TsBody::aggregate(set, function, comp, bound), ts_type)
    }

    /// Returns a literal standing for the CP comparison `term comp bound`.
    ///
    /// # Panics
    ///
    /// Panics if a CP variable of the comparison is unknown.
    pub fn reify_cp(
        &mut self,
        term: CpTerm,
        comp: CompType,
        bound: CpBound,
        ts_type: TsType,
    ) -> Lit {
        self.check_cp_term(&term);
        if let CpBound::Var(v) = &bound {
            self.cp_domain_of(*v);
        }
        self.reify_body(TsBody::cp(term, comp, bound), ts_type)
    }

    fn check_cp_term(&self, term: &CpTerm) {
        match term {
            CpTerm::Var(v) => {
                self.cp_domain_of(*v);
            }
            CpTerm::Sum(vars) => vars.iter().for_each(|v| {
                self.cp_domain_of(*v);
            }),
            CpTerm::WSum(vars, weights) => {
                if vars.len() != weights.len() {
                    panic!(
                        "a weighted sum has {} variable(s) and {} weight(s)",
                        vars.len(),
                        weights.len()
                    )
                }
                vars.iter().for_each(|v| {
                    self.cp_domain_of(*v);
                })
            }
        }
    }

    fn reify_body(&mut self, body: TsBody, ts_type: TsType) -> Lit {
        let key = (body, ts_type == TsType::Rule);
        if self.options.share_tseitins() {
            if let Some(lit) = self.ts_cache.get(&key).copied() {
                trace!("sharing {} for {} {}", lit, ts_type, key.0);
                self.merge_ts_type(lit, ts_type, &key.0);
                return lit;
            }
        }
        let lit = self.new_atom(AtomInfo {
            kind: AtomKind::TseitinWithSubformula,
            origin: None,
            ts_type: Some(ts_type),
            body: Some(key.0.clone()),
        });
        self.pending.push(lit.var());
        trace!("assigned {} to {} {}", lit, ts_type, key.0);
        if self.options.share_tseitins() {
            self.ts_cache.insert(key, lit);
        }
        lit
    }

    fn merge_ts_type(&mut self, lit: Lit, ts_type: TsType, body: &TsBody) {
        let info = &mut self.atoms[usize::from(lit.var()) - 1];
        let current = info.ts_type.unwrap_or(ts_type);
        let merged = current.merge(ts_type);
        if merged != current {
            info.ts_type = Some(merged);
            if info.body.is_none() {
                info.body = Some(body.clone());
                self.pending.push(lit.var());
            }
        }
    }

    /// Returns the CP variable standing for the term `symbol(args)`, creating it if needed.
    ///
    /// # Panics
    ///
    /// Panics if the offset is not a function-like offset, or if the number of arguments does not match the symbol.
    pub fn translate_term(&mut self, offset: SymbolOffset, args: &[DomainElement]) -> VarId {
        let store = self.function_store(offset);
        let symbol = &self.predicates[store.predicate_index].symbol;
        if args.len() != symbol.arity() {
            panic!("function {} expects {} argument(s), got {}", symbol, symbol.arity(), args.len())
        }
        if let Some(var) = store.vars.get(args) {
            return *var;
        }
        let domain = store.domain.clone();
        let var = self.push_cp_var(domain, Some((offset.index, args.to_vec())));
        self.functions[offset.index].vars.insert(args.to_vec(), var);
        var
    }

    fn push_cp_var(&mut self, domain: CpDomain, origin: Option<(usize, ElementTuple)>) -> VarId {
        self.cp_vars.push(CpVarInfo { domain, origin });
        let var = VarId(self.cp_vars.len() - 1);
        trace!("created CP variable {}", var);
        var
    }

    /// Creates a fresh CP variable.
    pub fn new_cp_var(&mut self, domain: CpDomain) -> VarId {
        self.push_cp_var(domain, None)
    }

    /// Returns a CP variable equal to a term, creating it if needed.
    ///
    /// Variables are shared between equal terms with equal domains.
    /// A term made of a single variable with the requested domain is returned as is.
    ///
    /// # Panics
    ///
    /// Panics if a CP variable of the term is unknown.
    pub fn cp_var_for_term(&mut self, term: CpTerm, domain: CpDomain) -> VarId {
        self.check_cp_term(&term);
        if let CpTerm::Var(v) = &term {
            if self.cp_domain_of(*v) == &domain {
                return *v;
            }
        }
        let key = (term, domain);
        if let Some(var) = self.cp_term_vars.get(&key) {
            return *var;
        }
        let var = self.new_cp_var(key.1.clone());
        self.pending_cp_definitions.push((key.0.clone(), var));
        self.cp_term_vars.insert(key, var);
        var
    }

    /// Reserves an id for a weighted set that will be registered later.
    pub fn reserve_set_id(&mut self) -> SetId {
        self.sets.push(None);
        SetId(self.sets.len())
    }

    /// Registers a weighted set, returning its id.
    ///
    /// If an id is provided, it must have been reserved by [`reserve_set_id`](Self::reserve_set_id).
    /// Otherwise, sets equal to an already registered set get its id.
    ///
    /// # Panics
    ///
    /// Panics if the provided id was not reserved or is already used, or if a literal of the set is unknown.
    pub fn register_set(&mut self, set: WeightedSet, id: Option<SetId>) -> SetId {
        set.lits().iter().for_each(|l| {
            self.atom(*l);
        });
        let id = match id {
            Some(id) => {
                let slot = match id.0.checked_sub(1).and_then(|i| self.sets.get_mut(i)) {
                    Some(slot) => slot,
                    None => panic!("{} was not reserved", id),
                };
                if slot.is_some() {
                    panic!("{} is already used", id)
                }
                *slot = Some(set.clone());
                self.set_ids.entry(set).or_insert(id);
                id
            }
            None => {
                if let Some(id) = self.set_ids.get(&set) {
                    return *id;
                }
                self.sets.push(Some(set.clone()));
                let id = SetId(self.sets.len());
                self.set_ids.insert(set, id);
                id
            }
        };
        trace!("registered weighted set {}", id);
        self.pending_sets.push(id);
        id
    }

    /// Returns a fresh literal which is not attached to any construct.
    pub fn new_lone_tseitin(&mut self) -> Lit {
        let lit = self.new_atom(AtomInfo {
            kind: AtomKind::LoneTseitin,
            origin: None,
            ts_type: None,
            body: None,
        });
        trace!("assigned {} to a lone Tseitin", lit);
        lit
    }

    /// Releases the body attached to a Tseitin literal whose definition has been materialized.
    ///
    /// Materialization already releases the bodies it emits, so this is a no-op for them.
    ///
    /// # Panics
    ///
    /// Panics if the literal is unknown, or if its definition is still pending.
    pub fn forget_body(&mut self, lit: Lit) {
        if self.atom(lit).body.is_some() {
            panic!(
                "cannot forget the body of {} before it is materialized",
                lit
            )
        }
    }

    /// Emits the pending definitions into a theory, in creation order, and releases their bodies.
    ///
    /// CP variables, weighted sets and the definitions of the CP variables standing for terms are emitted first.
    /// Conjunctions and disjunctions become clauses (rules for [`TsType::Rule`] definitions);
    /// aggregates and CP comparisons are forwarded as such.
    pub fn materialize_pending(&mut self, theory: &mut dyn GroundTheory) {
        theory.reserve(self.atoms.len());
        self.cp_vars
            .iter()
            .enumerate()
            .skip(self.n_emitted_cp_vars)
            .for_each(|(i, info)| theory.add_cp_variable(VarId(i), &info.domain));
        self.n_emitted_cp_vars = self.cp_vars.len();
        for id in self.pending_sets.drain(..) {
            if let Some(Some(set)) = self.sets.get(id.0 - 1) {
                theory.add_set(id, set);
            }
        }
        for (term, var) in self.pending_cp_definitions.drain(..) {
            theory.add_cp_constraint(
                Lit::true_lit(),
                TsType::Impl,
                &term,
                CompType::Eq,
                &CpBound::Var(var),
            );
        }
        let mut n_definitions = 0;
        for var in std::mem::take(&mut self.pending) {
            let info = &mut self.atoms[usize::from(var) - 1];
            if let (Some(ts_type), Some(body)) = (info.ts_type, info.body.take()) {
                Self::emit_definition(theory, Lit::positive(var), ts_type, &body);
                n_definitions += 1;
            }
        }
        info!(
            "materialized {} definition(s); the theory has {} variable(s) and {} clause(s)",
            n_definitions,
            theory.n_vars(),
            theory.n_clauses()
        );
    }

    fn emit_definition(theory: &mut dyn GroundTheory, head: Lit, ts_type: TsType, body: &TsBody) {
        match body {
            TsBody::Pc { lits, conjunctive } if ts_type == TsType::Rule => {
                theory.add_rule(head, lits.clone(), *conjunctive)
            }
            TsBody::Pc {
                lits,
                conjunctive: true,
            } => {
                if ts_type.has_impl() {
                    lits.iter()
                        .for_each(|l| theory.add_clause(vec![head.negate(), *l]));
                }
                if ts_type.has_rimpl() {
                    let mut cl = Vec::with_capacity(lits.len() + 1);
                    cl.push(head);
                    lits.iter().for_each(|l| cl.push(l.negate()));
                    theory.add_clause(cl);
                }
            }
            TsBody::Pc {
                lits,
                conjunctive: false,
            } => {
                if ts_type.has_impl() {
                    let mut cl = Vec::with_capacity(lits.len() + 1);
                    cl.push(head.negate());
                    cl.extend(lits.iter().copied());
                    theory.add_clause(cl);
                }
                if ts_type.has_rimpl() {
                    lits.iter()
                        .for_each(|l| theory.add_clause(vec![head, l.negate()]));
                }
            }
            TsBody::Agg {
                set,
                function,
                comp,
                bound,
            } => theory.add_aggregate(head, ts_type, *set, *function, *comp, *bound),
            TsBody::Cp { term, comp, bound } => {
                theory.add_cp_constraint(head, ts_type, term, *comp, bound)
            }
        }
    }

    /// Returns `true` iff the literal is a ground atom of a symbol.
    pub fn is_input_atom(&self, lit: Lit) -> bool {
        self.atom(lit).kind == AtomKind::InputAtom
    }

    /// Returns `true` iff the literal is a Tseitin literal, with or without attached construct.
    pub fn is_tseitin(&self, lit: Lit) -> bool {
        matches!(
            self.atom(lit).kind,
            AtomKind::TseitinWithSubformula | AtomKind::LoneTseitin
        )
    }

    /// Returns the kind of the literal.
    ///
    /// # Panics
    ///
    /// Panics if the literal is unknown.
    pub fn atom_kind(&self, lit: Lit) -> AtomKind {
        self.atom(lit).kind
    }

    /// Returns the offset of the symbol of a ground atom.
    pub fn symbol_of(&self, lit: Lit) -> Option<SymbolOffset> {
        self.atom(lit).origin.as_ref().map(|(index, _)| SymbolOffset {
            index: *index,
            function_like: false,
        })
    }

    /// Returns the arguments of a ground atom.
    pub fn args_of(&self, lit: Lit) -> Option<&[DomainElement]> {
        self.atom(lit).origin.as_ref().map(|(_, args)| args.as_slice())
    }

    /// Returns the construct attached to a Tseitin literal, unless it was released.
    pub fn ts_body_of(&self, lit: Lit) -> Option<&TsBody> {
        self.atom(lit).body.as_ref()
    }

    /// Returns the direction of the definition of a Tseitin literal.
    pub fn ts_type_of(&self, lit: Lit) -> Option<TsType> {
        self.atom(lit).ts_type
    }

    fn cp_var(&self, var: VarId) -> &CpVarInfo {
        match self.cp_vars.get(var.0) {
            Some(info) => info,
            None => panic!("unknown CP variable {}", var),
        }
    }

    /// Returns the function-like offset of the function a CP variable stands for.
    pub fn cp_symbol_of(&self, var: VarId) -> Option<SymbolOffset> {
        self.cp_var(var).origin.as_ref().map(|(index, _)| SymbolOffset {
            index: *index,
            function_like: true,
        })
    }

    /// Returns the arguments of the term a CP variable stands for.
    pub fn cp_args_of(&self, var: VarId) -> Option<&[DomainElement]> {
        self.cp_var(var).origin.as_ref().map(|(_, args)| args.as_slice())
    }

    /// Returns the domain of a CP variable.
    ///
    /// # Panics
    ///
    /// Panics if the variable is unknown.
    pub fn cp_domain_of(&self, var: VarId) -> &CpDomain {
        &self.cp_var(var).domain
    }

    /// Returns a registered weighted set.
    ///
    /// # Panics
    ///
    /// Panics if the set is unknown, or if its id is reserved but the set is not registered yet.
    pub fn set_of(&self, id: SetId) -> &WeightedSet {
        match id.0.checked_sub(1).and_then(|i| self.sets.get(i)) {
            Some(Some(set)) => set,
            _ => panic!("unknown set {}", id),
        }
    }

    /// Returns a human readable description of a literal.
    pub fn lit_to_string(&self, lit: Lit) -> String {
        if lit == Lit::true_lit() {
            return "true".to_string();
        }
        if lit == Lit::false_lit() {
            return "false".to_string();
        }
        let sign = if lit.is_positive() { "" } else { "~" };
        let info = self.atom(lit);
        match &info.origin {
            Some((index, args)) => {
                let symbol = &self.predicates[*index].symbol;
                let fmt_args = |args: &[DomainElement]| {
                    args.iter()
                        .map(|a| a.to_string())
                        .collect::<Vec<String>>()
                        .join(",")
                };
                match symbol.kind() {
                    SymbolKind::Predicate => {
                        format!("{}{}({})", sign, symbol.name(), fmt_args(args))
                    }
                    SymbolKind::Function => {
                        let (value, term_args) = match args.split_last() {
                            Some(split) => split,
                            None => return format!("{}{}", sign, symbol.name()),
                        };
                        format!("{}{}({}) = {}", sign, symbol.name(), fmt_args(term_args), value)
                    }
                }
            }
            None => format!("{}tseitin_{}", sign, lit.var()),
        }
    }
}
