/*!
The search driver.

# Overview

[search](GenericSolver::search) runs the decision/propagation/analysis loop for a bounded number
of conflicts:

- On a conflict at the root level the formula is unsatisfiable.
- On a conflict above the root, [analysis](crate::procedures::analysis) produces an asserting
  clause, the solver backjumps, the clause is attached (a unit learnt is asserted directly), and
  the variable and clause activities decay.
- Without a conflict: the conflict budget and interrupt flag are consulted; the clause database
  is [simplified](crate::procedures::simplify) at the root and reduced when the learnt limit is
  reached; the next assumption is consumed as a decision, with a conflicting assumption surfaced
  through [analyze_final](crate::context::GenericSolver::analyze_final); and otherwise a
  [decision](crate::procedures::decision) is made --- no decision remaining means a model has
  been found.

[solve_internal](GenericSolver::solve_internal) wraps search in the restart policy: restart `k`
has budget `rfirst · luby(rinc, k)` under luby restarts, and `rfirst · rinc^k` otherwise.
On a satisfiable outcome the valuation is copied into the model; on an unsatisfiable outcome with
no failed assumptions the solver is marked permanently unsatisfiable.

The learnt-clause limit starts at a fraction of the original clause count and grows by
`learntsize_inc` every `learntsize_adjust_confl` conflicts, with the interval itself growing.
*/

use rand::{Rng, SeedableRng};

use crate::{
    context::GenericSolver,
    generic::luby::luby,
    misc::log::targets::{self},
    reports::Report,
    structures::literal::Lit,
};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Searches for a model until `nof_conflicts` conflicts are reached.
    ///
    /// Returns `Some(true)` if a satisfying assignment of every decision variable was found,
    /// `Some(false)` if the formula is unsatisfiable (perhaps under the assumptions), and `None`
    /// if the conflict bound or some budget was exhausted.
    pub(crate) fn search(&mut self, nof_conflicts: u64) -> Option<bool> {
        debug_assert!(self.ok);
        let mut conflicts_here: u64 = 0;
        let mut learnt_clause: Vec<Lit> = Vec::default();
        self.counters.starts += 1;

        loop {
            match self.propagate() {
                Some(confl) => {
                    // CONFLICT
                    self.counters.conflicts += 1;
                    conflicts_here += 1;

                    if self.trail.level() == 0 {
                        return Some(false);
                    }

                    learnt_clause.clear();
                    let backtrack_level = self.analyze(confl, &mut learnt_clause);
                    self.cancel_until(backtrack_level);

                    if learnt_clause.len() == 1 {
                        self.unchecked_enqueue(learnt_clause[0], None);
                    } else {
                        let cr = self.arena.alloc(&learnt_clause, true);
                        self.learnts.push(cr);
                        self.attach_clause(cr);
                        self.bump_clause_activity(cr);
                        self.unchecked_enqueue(learnt_clause[0], Some(cr));
                    }

                    self.vars.decay_activity();
                    self.decay_clause_activity();

                    self.learntsize_adjust_cnt -= 1;
                    if self.learntsize_adjust_cnt == 0 {
                        self.learntsize_adjust_confl *= self.config.learntsize_adjust_inc;
                        self.learntsize_adjust_cnt = self.learntsize_adjust_confl as i32;
                        self.max_learnts *= self.config.learntsize_inc;

                        log::info!(
                            target: targets::SEARCH,
                            "{} conflicts, {} clauses, learnt limit {:.0}, {} learnts, progress {:.3}%",
                            self.counters.conflicts,
                            self.n_clauses(),
                            self.max_learnts,
                            self.n_learnts(),
                            self.progress_estimate() * 100.0,
                        );
                    }
                }

                None => {
                    // NO CONFLICT
                    debug_assert!(self.trail.fully_propagated());

                    if conflicts_here >= nof_conflicts || !self.within_budget() {
                        // Reached the bound on the number of conflicts.
                        self.progress_estimate = self.progress_estimate();
                        self.cancel_until(0);
                        return None;
                    }

                    // Simplify the set of problem clauses.
                    if self.trail.level() == 0 && !self.simplify() {
                        return Some(false);
                    }

                    if self.learnts.len() as f64 - self.n_assigns() as f64 >= self.max_learnts {
                        self.reduce_db();
                    }

                    let mut next = None;
                    while (self.trail.level() as usize) < self.assumptions.len() {
                        // Perform a user provided assumption.
                        let p = self.assumptions[self.trail.level() as usize];
                        match self.vars.value_of_lit(p) {
                            Some(true) => {
                                // Dummy decision level.
                                self.trail.new_level();
                            }
                            Some(false) => {
                                self.analyze_final(!p);
                                return Some(false);
                            }
                            None => {
                                next = Some(p);
                                break;
                            }
                        }
                    }

                    let next = match next {
                        Some(assumption) => assumption,
                        None => {
                            // New variable decision.
                            self.counters.decisions += 1;
                            match self.pick_branch_lit() {
                                Some(decision) => decision,
                                None => return Some(true), // Model found.
                            }
                        }
                    };

                    // Increase the decision level and enqueue the choice.
                    self.trail.new_level();
                    self.unchecked_enqueue(next, None);
                }
            }
        }
    }

    /// An estimate of the proportion of the search space covered, for progress reporting.
    pub fn progress_estimate(&self) -> f64 {
        if self.n_vars() == 0 {
            return 0.0;
        }
        let f = 1.0 / self.n_vars() as f64;
        let mut progress = 0.0;

        for level in 0..=self.trail.level() as usize {
            let begin = match level {
                0 => 0,
                _ => self.trail.level_indices[level - 1],
            };
            let end = match level == self.trail.level() as usize {
                true => self.trail.len(),
                false => self.trail.level_indices[level],
            };
            progress += f.powi(level as i32) * (end - begin) as f64;
        }

        progress / self.n_vars() as f64
    }

    /// Determines the satisfiability of the formula in the solver.
    pub fn solve(&mut self) -> Report {
        self.solve_with_assumptions(&[])
    }

    /// Determines the satisfiability of the formula under the given assumptions.
    ///
    /// On an unsatisfiable return, [failed_assumptions](GenericSolver::failed_assumptions) holds
    /// a subset of the assumptions under which the formula is unsatisfiable, negated --- empty if
    /// the formula is unsatisfiable outright.
    pub fn solve_with_assumptions(&mut self, assumptions: &[Lit]) -> Report {
        self.assumptions.clear();
        self.assumptions.extend_from_slice(assumptions);

        match self.solve_internal() {
            Some(true) => Report::Satisfiable,
            Some(false) => Report::Unsatisfiable,
            None => Report::Unknown,
        }
    }

    fn solve_internal(&mut self) -> Option<bool> {
        self.model.clear();
        self.conflict.clear();
        if !self.ok {
            return Some(false);
        }

        self.counters.solves += 1;

        self.max_learnts = (self.n_clauses() as f64 * self.config.learntsize_factor)
            .max(self.config.min_learnts_lim.value as f64);
        self.learntsize_adjust_confl = self.config.learntsize_adjust_start;
        self.learntsize_adjust_cnt = self.learntsize_adjust_confl as i32;

        let mut status = None;
        let mut current_restarts: u32 = 0;

        while status.is_none() {
            let restart_base = match self.config.luby_restart.value {
                true => luby(self.config.restart_inc.value, current_restarts),
                false => self.config.restart_inc.value.powi(current_restarts as i32),
            };
            let budget = (restart_base * self.config.restart_first.value as f64) as u64;
            status = self.search(budget);
            if !self.within_budget() {
                break;
            }
            current_restarts += 1;
        }

        log::info!(
            target: targets::SEARCH,
            "Solve finished with {} conflicts over {} restarts.",
            self.counters.conflicts,
            current_restarts,
        );

        if status == Some(true) {
            // Extend and copy the model.
            self.model = (0..self.n_vars()).map(|v| self.vars.value_of(v)).collect();
        } else if status == Some(false) && self.conflict.is_empty() {
            self.ok = false;
        }

        self.cancel_until(0);
        status
    }

    /// The literals implied at the root level by the given assumptions, or `None` if the
    /// assumptions are inconsistent with the formula.
    pub fn implies(&mut self, assumptions: &[Lit]) -> Option<Vec<Lit>> {
        debug_assert_eq!(self.trail.level(), 0);
        self.trail.new_level();

        for &assumption in assumptions {
            match self.vars.value_of_lit(assumption) {
                Some(false) => {
                    self.cancel_until(0);
                    return None;
                }
                None => self.unchecked_enqueue(assumption, None),
                Some(true) => {}
            }
        }

        let trail_before = self.trail.len();
        let implied = match self.propagate() {
            None => Some(self.trail.assignments[trail_before..].to_vec()),
            Some(_) => None,
        };

        self.cancel_until(0);
        implied
    }
}
