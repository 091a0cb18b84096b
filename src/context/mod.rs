/*!
The solver --- to which formulas are added and within which solves take place.

Strictly, a [GenericSolver] and a [Solver].

The generic solver is parameterised to its source of randomness.
The [Solver] alias fixes the source to the crate's [MinimalPCG32], seeded from the `rnd-seed`
configuration option, and is the intended entry point.

# Example

```rust
# use marten_sat::context::Solver;
# use marten_sat::config::Config;
# use marten_sat::reports::Report;
# use marten_sat::structures::literal::Lit;
let mut solver = Solver::from_config(Config::default());

let p = solver.new_var();
let q = solver.new_var();

assert!(solver.add_clause(vec![Lit::positive(p), Lit::positive(q)]).is_ok());
assert!(solver.add_clause(vec![Lit::negative(p)]).is_ok());

assert_eq!(solver.solve(), Report::Satisfiable);
assert_eq!(solver.model_value(Lit::positive(q)), Some(true));
```
*/

mod counters;
pub use counters::Counters;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use rand::{Rng, SeedableRng};

use crate::{
    config::Config,
    db::{arena::ClauseArena, trail::Trail, vars::VarDB, watches::WatchLists, ClauseRef, LevelIndex},
    generic::minimal_pcg::MinimalPCG32,
    structures::literal::{Lit, Var},
    symmetry::SymmetryState,
};

/// The state of the conflict-clause minimization scratchpad, per variable.
///
/// [Undef](Seen::Undef) and [Source](Seen::Source) double as the plain unseen/seen marks of
/// conflict analysis; the remaining states memoize the recursive minimization walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seen {
    Undef,
    Source,
    Removable,
    Failed,
}

/// A generic solver, parameterised to a source of randomness.
pub struct GenericSolver<R: Rng + SeedableRng> {
    /// The configuration of the solver.
    pub config: Config,

    /// Counters related to the solver/solve.
    pub counters: Counters,

    /// The clause arena.
    pub(crate) arena: ClauseArena,

    /// Per-variable records and the activity heap.
    pub(crate) vars: VarDB,

    /// Watch lists, indexed by literal.
    pub(crate) watches: WatchLists,

    /// The assignment trail.
    pub(crate) trail: Trail,

    /// References to the original (and symmetry-breaking) clauses.
    pub(crate) clauses: Vec<ClauseRef>,

    /// References to the learnt clauses.
    pub(crate) learnts: Vec<ClauseRef>,

    /// The symmetry-breaking subsystem.
    pub(crate) symmetry: SymmetryState,

    /// The assumptions of the present solve, consumed as the lowest decision levels.
    pub(crate) assumptions: Vec<Lit>,

    /// The model found by the last satisfiable solve.
    pub(crate) model: Vec<Option<bool>>,

    /// The subset of assumptions responsible for the last unsatisfiable solve.
    pub(crate) conflict: Vec<Lit>,

    /// False if the solver has derived the empty clause; every further query is unsatisfiable.
    pub(crate) ok: bool,

    // Conflict analysis scratch.
    pub(crate) seen: Vec<Seen>,
    pub(crate) analyze_toclear: Vec<Lit>,
    pub(crate) analyze_stack: Vec<(u32, Lit)>,

    /// The increment applied when bumping a clause activity.
    pub(crate) cla_inc: f64,

    // Bookkeeping which amortizes top-level simplification.
    pub(crate) simp_db_assigns: i64,
    pub(crate) simp_db_props: i64,

    /// Variables released for reuse, pending expunging from the trail.
    pub(crate) released_vars: Vec<Var>,

    /// Variables free to be handed out again.
    pub(crate) free_vars: Vec<Var>,

    /// The next fresh variable.
    pub(crate) next_var: Var,

    /// Whether top-level satisfied clauses are removed during simplification.
    pub(crate) remove_satisfied: bool,

    /// An estimate of search coverage, saved when a conflict bound interrupts a search.
    pub progress_estimate: f64,

    // The learnt clause limit and its adjustment schedule.
    pub(crate) max_learnts: f64,
    pub(crate) learntsize_adjust_confl: f64,
    pub(crate) learntsize_adjust_cnt: i32,

    // Resource constraints.
    pub(crate) conflict_budget: Option<u64>,
    pub(crate) propagation_budget: Option<u64>,
    pub(crate) asynch_interrupt: Arc<AtomicBool>,

    /// The source of rng.
    pub rng: R,
}

/// The canonical solver.
pub type Solver = GenericSolver<MinimalPCG32>;

impl<R: Rng + SeedableRng> GenericSolver<R> {
    pub fn from_config(config: Config) -> Self {
        let rng = R::seed_from_u64(config.random_seed.value);
        let vars = VarDB::new(&config);
        GenericSolver {
            config,
            counters: Counters::default(),

            arena: ClauseArena::default(),
            vars,
            watches: WatchLists::default(),
            trail: Trail::default(),

            clauses: Vec::default(),
            learnts: Vec::default(),

            symmetry: SymmetryState::default(),

            assumptions: Vec::default(),
            model: Vec::default(),
            conflict: Vec::default(),

            ok: true,

            seen: Vec::default(),
            analyze_toclear: Vec::default(),
            analyze_stack: Vec::default(),

            cla_inc: 1.0,

            simp_db_assigns: -1,
            simp_db_props: 0,

            released_vars: Vec::default(),
            free_vars: Vec::default(),
            next_var: 0,

            remove_satisfied: true,

            progress_estimate: 0.0,

            max_learnts: 0.0,
            learntsize_adjust_confl: 0.0,
            learntsize_adjust_cnt: 0,

            conflict_budget: None,
            propagation_budget: None,
            asynch_interrupt: Arc::new(AtomicBool::new(false)),

            rng,
        }
    }

    /// A count of variables in the solver.
    pub fn n_vars(&self) -> Var {
        self.next_var
    }

    /// A count of attached original clauses.
    pub fn n_clauses(&self) -> usize {
        self.counters.num_clauses as usize
    }

    /// A count of attached learnt clauses.
    pub fn n_learnts(&self) -> usize {
        self.counters.num_learnts as usize
    }

    /// A count of assigned variables.
    pub fn n_assigns(&self) -> usize {
        self.trail.len()
    }

    /// The current decision level.
    pub fn decision_level(&self) -> LevelIndex {
        self.trail.level()
    }

    /// False if the solver has derived the empty clause.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// The current value of `var`, if any.
    pub fn value_of(&self, var: Var) -> Option<bool> {
        self.vars.value_of(var)
    }

    /// The value of `lit` in the model of the last satisfiable solve.
    pub fn model_value(&self, lit: Lit) -> Option<bool> {
        self.model
            .get(lit.var() as usize)
            .copied()
            .flatten()
            .map(|value| value == lit.polarity())
    }

    /// The model of the last satisfiable solve, indexed by variable.
    pub fn model(&self) -> &[Option<bool>] {
        &self.model
    }

    /// The subset of assumptions responsible for the last unsatisfiable solve, negated.
    pub fn failed_assumptions(&self) -> &[Lit] {
        &self.conflict
    }

    /// A count of registered symmetry generators.
    pub fn symmetry_perm_count(&self) -> usize {
        self.symmetry.perm_count()
    }

    /// Overrides the polarity used when deciding on `var`, or clears the override with `None`.
    pub fn set_user_polarity(&mut self, var: Var, polarity: Option<bool>) {
        self.vars.set_user_polarity(var, polarity);
    }

    /// Marks `var` (in)eligible as a decision variable.
    pub fn set_decision_var(&mut self, var: Var, eligible: bool) {
        if self.vars.set_decision(var, eligible) {
            if eligible {
                self.counters.dec_vars += 1;
            } else {
                self.counters.dec_vars -= 1;
            }
        }
        self.vars.insert_var_order(var);
    }

    /// Limits the conflicts of subsequent solves to `count` more than seen so far.
    pub fn set_conf_budget(&mut self, count: u64) {
        self.conflict_budget = Some(self.counters.conflicts + count);
    }

    /// Limits the propagations of subsequent solves to `count` more than seen so far.
    pub fn set_prop_budget(&mut self, count: u64) {
        self.propagation_budget = Some(self.counters.propagations + count);
    }

    /// Clears any budget.
    pub fn budget_off(&mut self) {
        self.conflict_budget = None;
        self.propagation_budget = None;
    }

    /// A handle to the interrupt flag; setting the flag makes the solve return
    /// [Unknown](crate::reports::Report::Unknown) at the next restart boundary.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        self.asynch_interrupt.clone()
    }

    /// Clears the interrupt flag.
    pub fn clear_interrupt(&self) {
        self.asynch_interrupt.store(false, Ordering::Relaxed);
    }

    /// True while the interrupt flag is unset and no budget has been exhausted.
    pub fn within_budget(&self) -> bool {
        !self.asynch_interrupt.load(Ordering::Relaxed)
            && self
                .conflict_budget
                .map_or(true, |budget| self.counters.conflicts < budget)
            && self
                .propagation_budget
                .map_or(true, |budget| self.counters.propagations < budget)
    }

    /// True if some literal of the clause is true on the current valuation.
    pub(crate) fn satisfied(&self, cr: ClauseRef) -> bool {
        self.arena
            .literals(cr)
            .any(|l| self.vars.value_of_lit(l) == Some(true))
    }

    /// True if the clause is the reason for the assignment of its first literal.
    ///
    /// Locked clauses must not be deleted.
    pub(crate) fn locked(&self, cr: ClauseRef) -> bool {
        let first = self.arena.lit(cr, 0);
        self.vars.value_of_lit(first) == Some(true) && self.vars.reason(first.var()) == Some(cr)
    }
}
