/*!
Per-variable records, and the activity heap.

For each variable the database holds:
- The current value, as an `Option<bool>`.
- The reason clause of the assignment, if the assignment was a propagation.
- The decision level of the assignment.
- The saved polarity, for phase saving, and a user-requested polarity which overrides it.
- Whether the variable is eligible as a decision variable.

Activities live inside the [IndexHeap]: any decision-eligible variable without a value is active
on the heap, and the most active variable is at the root.
Bumps add a growing increment, and when an activity would exceed `1e100` every activity and the
increment are rescaled by `1e-100`.
*/

use crate::{
    config::{Activity, Config},
    db::{ClauseRef, LevelIndex},
    generic::index_heap::IndexHeap,
    structures::literal::{Lit, Var},
};

pub struct VarDB {
    values: Vec<Option<bool>>,
    reasons: Vec<Option<ClauseRef>>,
    levels: Vec<LevelIndex>,
    saved: Vec<bool>,
    user_pol: Vec<Option<bool>>,
    decision: Vec<bool>,

    heap: IndexHeap,
    var_inc: Activity,
    var_decay: f64,
}

impl VarDB {
    pub fn new(config: &Config) -> Self {
        VarDB {
            values: Vec::default(),
            reasons: Vec::default(),
            levels: Vec::default(),
            saved: Vec::default(),
            user_pol: Vec::default(),
            decision: Vec::default(),

            heap: IndexHeap::default(),
            var_inc: 1.0,
            var_decay: config.var_decay.value,
        }
    }

    /// A count of variables in the database.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Prepares records for `var`, resetting them if `var` is recycled.
    pub fn ensure(&mut self, var: Var, user_pol: Option<bool>, initial_activity: Activity) {
        let index = var as usize;
        if self.values.len() <= index {
            self.values.resize(index + 1, None);
            self.reasons.resize(index + 1, None);
            self.levels.resize(index + 1, 0);
            self.saved.resize(index + 1, false);
            self.user_pol.resize(index + 1, None);
            self.decision.resize(index + 1, false);
        }
        self.values[index] = None;
        self.reasons[index] = None;
        self.levels[index] = 0;
        self.saved[index] = false;
        self.user_pol[index] = user_pol;
        self.heap.set_value(index, initial_activity);
    }

    pub fn value_of(&self, var: Var) -> Option<bool> {
        self.values[var as usize]
    }

    pub fn value_of_lit(&self, lit: Lit) -> Option<bool> {
        self.values[lit.var() as usize].map(|value| value == lit.polarity())
    }

    /// Binds the variable of `lit` so `lit` is true, recording the reason and level.
    pub fn assign(&mut self, lit: Lit, reason: Option<ClauseRef>, level: LevelIndex) {
        let index = lit.var() as usize;
        debug_assert!(self.values[index].is_none());
        self.values[index] = Some(lit.polarity());
        self.reasons[index] = reason;
        self.levels[index] = level;
    }

    pub fn clear_value(&mut self, var: Var) {
        self.values[var as usize] = None;
    }

    pub fn reason(&self, var: Var) -> Option<ClauseRef> {
        self.reasons[var as usize]
    }

    pub fn set_reason(&mut self, var: Var, reason: Option<ClauseRef>) {
        self.reasons[var as usize] = reason;
    }

    pub fn level(&self, var: Var) -> LevelIndex {
        self.levels[var as usize]
    }

    pub fn saved_polarity(&self, var: Var) -> bool {
        self.saved[var as usize]
    }

    pub fn save_polarity(&mut self, var: Var, polarity: bool) {
        self.saved[var as usize] = polarity;
    }

    pub fn user_polarity(&self, var: Var) -> Option<bool> {
        self.user_pol[var as usize]
    }

    pub fn set_user_polarity(&mut self, var: Var, polarity: Option<bool>) {
        self.user_pol[var as usize] = polarity;
    }

    pub fn is_decision(&self, var: Var) -> bool {
        self.decision[var as usize]
    }

    /// Marks `var` (in)eligible for decisions, returning true if the eligibility changed.
    pub fn set_decision(&mut self, var: Var, eligible: bool) -> bool {
        let changed = self.decision[var as usize] != eligible;
        self.decision[var as usize] = eligible;
        changed
    }

    /// Places `var` on the activity heap, if eligible and absent.
    pub fn insert_var_order(&mut self, var: Var) {
        if self.decision[var as usize] {
            self.heap.activate(var as usize);
        }
    }

    /// Pops the most active variable off the heap, if any.
    pub fn pop_most_active(&mut self) -> Option<Var> {
        self.heap.pop_max().map(|index| index as Var)
    }

    /// A count of variables on the heap.
    pub fn heap_len(&self) -> usize {
        self.heap.active_count()
    }

    /// The variable at heap slot `slot`, for random decisions.
    pub fn heap_entry(&self, slot: usize) -> Var {
        self.heap.active_at(slot) as Var
    }

    /// Bumps the activity of `var`, rescaling every activity on overflow.
    pub fn bump_activity(&mut self, var: Var) {
        let index = var as usize;
        let bumped = self.heap.value(index) + self.var_inc;
        self.heap.set_value(index, bumped);
        if bumped > 1e100 {
            self.heap.scale_all(1e-100);
            self.var_inc *= 1e-100;
        }
        self.heap.heapify_if_active(index);
    }

    /// Decays every activity, by growing the increment applied on a bump.
    pub fn decay_activity(&mut self) {
        self.var_inc *= 1.0 / self.var_decay;
    }

    /// Rebuilds the heap to hold exactly the decision-eligible variables without a value.
    pub fn rebuild_heap(&mut self) {
        self.heap.clear_active();
        for var in 0..self.values.len() {
            if self.decision[var] && self.values[var].is_none() {
                self.heap.activate(var);
            }
        }
    }
}
