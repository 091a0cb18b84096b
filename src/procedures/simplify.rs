/*!
Maintenance of the clause database.

# Reduction

[reduce_db](GenericSolver::reduce_db) halves the learnt clause database when the learnt limit is
reached.
Learnts are ordered with binary clauses protected at the top and the remainder by activity; the
lower half is deleted, along with any clause whose activity falls below a threshold derived from
the current bump increment.
Locked clauses --- those serving as the reason for an assignment --- are never deleted.

# Top-level simplification

[simplify](GenericSolver::simplify) runs at decision level zero: clauses satisfied at the root
are removed, false literals are trimmed from unwatched positions, released variables are expunged
from the trail and recycled, and the activity heap is rebuilt.
The calls are amortized against the assignments and propagations seen since the previous call.

Both operations finish by [collecting garbage](crate::procedures::gc) if the wasted share of the
arena crosses the `gc-frac` threshold.
*/

use rand::{Rng, SeedableRng};

use crate::{
    context::{GenericSolver, Seen},
    db::ClauseRef,
    misc::log::targets::{self},
};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Removes half of the learnt clauses, minus the clauses locked by the current assignment.
    /// Binary clauses are never removed.
    pub(crate) fn reduce_db(&mut self) {
        let mut learnts = std::mem::take(&mut self.learnts);
        log::debug!(target: targets::REDUCTION, "Reduction with {} learnts.", learnts.len());

        // Remove any clause below this activity.
        let extra_lim = (self.cla_inc / learnts.len() as f64) as f32;

        // Binary clauses order last; longer clauses by ascending activity.
        learnts.sort_unstable_by(|&x, &y| {
            let key = |cr: ClauseRef| (self.arena.size(cr) <= 2, self.arena.activity(cr));
            let (x_binary, x_activity) = key(x);
            let (y_binary, y_activity) = key(y);
            x_binary
                .cmp(&y_binary)
                .then(x_activity.total_cmp(&y_activity))
        });

        let half = learnts.len() / 2;
        let mut kept = 0;
        for i in 0..learnts.len() {
            let cr = learnts[i];
            if self.arena.size(cr) > 2
                && !self.locked(cr)
                && (i < half || self.arena.activity(cr) < extra_lim)
            {
                self.remove_clause(cr);
            } else {
                learnts[kept] = cr;
                kept += 1;
            }
        }
        learnts.truncate(kept);

        self.learnts = learnts;
        self.check_garbage();
    }

    /// Simplifies the clause database according to the current top-level assignment.
    ///
    /// Returns false if the formula was found unsatisfiable.
    pub fn simplify(&mut self) -> bool {
        debug_assert_eq!(self.trail.level(), 0);

        if !self.ok || self.propagate().is_some() {
            self.ok = false;
            return false;
        }

        if self.n_assigns() as i64 == self.simp_db_assigns || self.simp_db_props > 0 {
            return true;
        }

        // Remove satisfied clauses.
        let mut learnts = std::mem::take(&mut self.learnts);
        self.remove_satisfied(&mut learnts);
        self.learnts = learnts;

        if self.remove_satisfied {
            let mut clauses = std::mem::take(&mut self.clauses);
            self.remove_satisfied(&mut clauses);
            self.clauses = clauses;

            // Remove all released variables from the trail.
            for &var in &self.released_vars {
                debug_assert_eq!(self.seen[var as usize], Seen::Undef);
                self.seen[var as usize] = Seen::Source;
            }

            let mut kept = 0;
            for i in 0..self.trail.len() {
                let assignment = self.trail.assignments[i];
                if self.seen[assignment.var() as usize] == Seen::Undef {
                    self.trail.assignments[kept] = assignment;
                    kept += 1;
                }
            }
            self.trail.assignments.truncate(kept);
            self.trail.q_head = kept;

            for &var in &self.released_vars {
                self.seen[var as usize] = Seen::Undef;
            }

            // Released variables are now ready to be reused.
            self.free_vars.append(&mut self.released_vars);
        }

        self.check_garbage();
        self.vars.rebuild_heap();

        self.simp_db_assigns = self.n_assigns() as i64;
        // Shouldn't depend on the stats, but it will do for now.
        self.simp_db_props =
            (self.counters.clauses_literals + self.counters.learnts_literals) as i64;

        true
    }

    /// Removes clauses satisfied at the root from `clause_refs`, trimming false literals from
    /// the unwatched positions of the remainder.
    fn remove_satisfied(&mut self, clause_refs: &mut Vec<ClauseRef>) {
        let mut kept = 0;
        for i in 0..clause_refs.len() {
            let cr = clause_refs[i];
            if self.satisfied(cr) {
                self.remove_clause(cr);
            } else {
                debug_assert!(self.vars.value_of_lit(self.arena.lit(cr, 0)).is_none());
                debug_assert!(self.vars.value_of_lit(self.arena.lit(cr, 1)).is_none());

                // Trim the clause.
                let mut k = 2;
                let mut size = self.arena.size(cr);
                while k < size {
                    let l = self.arena.lit(cr, k);
                    if self.vars.value_of_lit(l) == Some(false) {
                        let last = self.arena.lit(cr, size - 1);
                        self.arena.set_lit(cr, k, last);
                        size -= 1;
                    } else {
                        k += 1;
                    }
                }
                if size < self.arena.size(cr) {
                    self.arena.shrink(cr, size);
                }

                clause_refs[kept] = cr;
                kept += 1;
            }
        }
        clause_refs.truncate(kept);
    }

    /// Collects garbage if the wasted share of the arena crosses the `gc-frac` threshold.
    pub(crate) fn check_garbage(&mut self) {
        if self.arena.wasted_words() as f64
            > self.arena.len_words() as f64 * self.config.garbage_frac.value
        {
            self.garbage_collect();
        }
    }
}
