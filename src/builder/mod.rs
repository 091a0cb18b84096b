/*!
Construction of a formula within a solver.

Clauses may be added programmatically through [add_clause](GenericSolver::add_clause), or through
the [DIMACS](crate::builder::dimacs) representation of a formula; symmetry generators through
[add_symmetry_generator](GenericSolver::add_symmetry_generator) or the
[symmetry file](crate::builder::symmetry) representation.

Clause addition happens at decision level zero, where a clause is simplified against the
top-level valuation: true literals satisfy the clause, false literals are dropped.
The single exception is made for symmetry-breaking clauses, which may be added during a solve;
see [add_sbp_clause](GenericSolver::add_sbp_clause).
*/

pub mod dimacs;
pub mod symmetry;

use rand::{Rng, SeedableRng};

use crate::{
    context::{GenericSolver, Seen},
    db::{watches::Watcher, ClauseRef},
    misc::log::targets::{self},
    structures::literal::{Lit, Var},
    types::err::{self, BuildError},
};

/// Ok results of adding a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was added to the formula, or asserted, if unit.
    Added,

    /// The clause holds on every valuation, and was skipped.
    Tautology,

    /// The clause holds on the top-level valuation, and was skipped.
    Satisfied,
}

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// A fresh variable, eligible for decisions and with no polarity override.
    pub fn new_var(&mut self) -> Var {
        self.new_var_with(None, true)
    }

    /// A fresh variable with the given polarity override and decision eligibility.
    ///
    /// Note, an ineligible variable is never decided on, which affects the meaning of a
    /// satisfiable result.
    pub fn new_var_with(&mut self, user_polarity: Option<bool>, decision: bool) -> Var {
        let var = match self.free_vars.pop() {
            Some(var) => var,
            None => {
                let var = self.next_var;
                self.next_var += 1;
                var
            }
        };

        let initial_activity = if self.config.rnd_init_act.value {
            self.rng.random::<f64>() * 0.00001
        } else {
            0.0
        };

        self.watches.ensure(var);
        self.vars.ensure(var, user_polarity, initial_activity);
        if self.seen.len() <= var as usize {
            self.seen.resize(var as usize + 1, Seen::Undef);
        } else {
            self.seen[var as usize] = Seen::Undef;
        }
        self.set_decision_var(var, decision);

        var
    }

    /// Releases an unassigned variable for reuse by a later [new_var](GenericSolver::new_var).
    ///
    /// The literal is asserted at the top level, and the variable is expunged from the trail and
    /// recycled on the next top-level simplification.
    pub fn release_var(&mut self, lit: Lit) {
        if self.vars.value_of_lit(lit).is_none() {
            let _ = self.add_clause(vec![lit]);
            self.released_vars.push(lit.var());
        }
    }

    /// Adds a clause to the formula.
    ///
    /// The clause is simplified against the top-level valuation, and an empty or conflicting
    /// clause makes the formula unsatisfiable, an error which sticks for every further query.
    pub fn add_clause(&mut self, clause: impl Into<Vec<Lit>>) -> Result<ClauseOk, err::ErrorKind> {
        assert_eq!(self.trail.level(), 0, "clause addition above the root level");

        if !self.ok {
            return Err(BuildError::Unsatisfiable.into());
        }

        let mut literals = clause.into();
        literals.sort_unstable();
        literals.dedup();
        if literals.windows(2).any(|pair| pair[1] == !pair[0]) {
            return Ok(ClauseOk::Tautology);
        }

        if literals
            .iter()
            .any(|&l| self.vars.value_of_lit(l) == Some(true))
        {
            return Ok(ClauseOk::Satisfied);
        }
        literals.retain(|&l| self.vars.value_of_lit(l).is_none());

        match literals.len() {
            0 => {
                self.ok = false;
                Err(BuildError::Unsatisfiable.into())
            }

            1 => {
                self.unchecked_enqueue(literals[0], None);
                match self.propagate() {
                    None => Ok(ClauseOk::Added),
                    Some(_) => {
                        self.ok = false;
                        Err(BuildError::Unsatisfiable.into())
                    }
                }
            }

            _ => {
                let cr = self.arena.alloc(&literals, false);
                self.clauses.push(cr);
                self.attach_clause(cr);
                Ok(ClauseOk::Added)
            }
        }
    }

    /// Adds a symmetry-breaking clause.
    ///
    /// Unlike [add_clause](GenericSolver::add_clause) the clause may arrive above the root level,
    /// as the dynamic emission hook fires on every assignment.
    /// Simplification then only consults top-level values, and the watches of an attached clause
    /// prefer unfalsified literals, falling back to the most recently assigned.
    pub(crate) fn add_sbp_clause(&mut self, clause: &[Lit]) -> Result<(), err::ErrorKind> {
        if !self.ok {
            return Ok(());
        }

        let mut literals = clause.to_vec();
        literals.sort_unstable();
        literals.dedup();
        if literals.windows(2).any(|pair| pair[1] == !pair[0]) {
            return Ok(());
        }

        let root_value = |solver: &Self, l: Lit| match solver.vars.value_of_lit(l) {
            Some(value) if solver.vars.level(l.var()) == 0 => Some(value),
            _ => None,
        };

        if literals.iter().any(|&l| root_value(self, l) == Some(true)) {
            return Ok(());
        }
        literals.retain(|&l| root_value(self, l) != Some(false));

        match literals.len() {
            0 => {
                self.ok = false;
                Err(BuildError::Unsatisfiable.into())
            }

            1 => {
                let unit = literals[0];
                match self.vars.value_of_lit(unit) {
                    None if self.trail.level() == 0 => {
                        // Propagation is deferred to the solve loop.
                        self.unchecked_enqueue(unit, None);
                        Ok(())
                    }
                    None | Some(true) => {
                        log::debug!(target: targets::SYMMETRY, "Unit {unit} not asserted above the root level.");
                        Ok(())
                    }
                    Some(false) => {
                        log::debug!(target: targets::SYMMETRY, "Unit {unit} falsified above the root level.");
                        Ok(())
                    }
                }
            }

            _ => {
                if self.trail.level() > 0 {
                    // Watches go to unfalsified literals when possible, and otherwise to the
                    // literals falsified last.
                    literals.sort_unstable_by(|&a, &b| {
                        let rank = |l: Lit| match self.vars.value_of_lit(l) {
                            Some(false) => (1u8, u32::MAX - self.vars.level(l.var())),
                            _ => (0, 0),
                        };
                        rank(a).cmp(&rank(b))
                    });
                }
                let cr = self.arena.alloc(&literals, false);
                self.arena.set_sbp(cr);
                self.clauses.push(cr);
                self.attach_clause(cr);
                Ok(())
            }
        }
    }

    /// Attaches the clause to the watch lists of its first two literals.
    pub(crate) fn attach_clause(&mut self, cr: ClauseRef) {
        debug_assert!(self.arena.size(cr) > 1);
        let first = self.arena.lit(cr, 0);
        let second = self.arena.lit(cr, 1);
        self.watches.push(!first, Watcher { cref: cr, blocker: second });
        self.watches.push(!second, Watcher { cref: cr, blocker: first });

        if self.arena.is_learnt(cr) {
            self.counters.num_learnts += 1;
            self.counters.learnts_literals += self.arena.size(cr) as u64;
        } else {
            self.counters.num_clauses += 1;
            self.counters.clauses_literals += self.arena.size(cr) as u64;
        }
    }

    /// Detaches the clause from its watch lists, lazily through a smudge unless `strict`.
    pub(crate) fn detach_clause(&mut self, cr: ClauseRef, strict: bool) {
        debug_assert!(self.arena.size(cr) > 1);
        let first = self.arena.lit(cr, 0);
        let second = self.arena.lit(cr, 1);

        if strict {
            self.watches.detach_strict(!first, cr);
            self.watches.detach_strict(!second, cr);
        } else {
            self.watches.smudge(!first);
            self.watches.smudge(!second);
        }

        if self.arena.is_learnt(cr) {
            self.counters.num_learnts -= 1;
            self.counters.learnts_literals -= self.arena.size(cr) as u64;
        } else {
            self.counters.num_clauses -= 1;
            self.counters.clauses_literals -= self.arena.size(cr) as u64;
        }
    }

    /// Detaches the clause, clears any reason pointing at it, and frees it in the arena.
    pub(crate) fn remove_clause(&mut self, cr: ClauseRef) {
        log::trace!(target: targets::CLAUSE_DB, "Removing {cr}.");
        self.detach_clause(cr, false);
        if self.locked(cr) {
            self.vars.set_reason(self.arena.lit(cr, 0).var(), None);
        }
        self.arena.free(cr);
    }
}
