/*!
Garbage collection of the clause arena.

Freed clauses leave their words behind until compaction, which copies every live clause into a
fresh arena and rewrites every root holding a [ClauseRef](crate::db::ClauseRef):

1. The watch lists, cleaned of watchers over deleted clauses beforehand.
2. The reason of each assignment on the trail.
3. The learnt and original clause lists, dropping deleted entries.

Relocation is idempotent: the first move leaves a forwarding reference in the source header, and
any later visit through another root reads the forward.
A reason is relocated only if its clause was already moved or is locked --- a reason over a
clause deleted through reduction would otherwise be resurrected.
*/

use rand::{Rng, SeedableRng};

use crate::{
    context::GenericSolver,
    db::arena::ClauseArena,
    misc::log::targets::{self},
};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Compacts the arena, preserving every observable clause and reason.
    pub fn garbage_collect(&mut self) {
        // Size the next region to the estimated utilization, avoiding some unnecessary
        // reallocation as relocation fills it.
        let estimate = self.arena.len_words() - self.arena.wasted_words();
        let mut target = ClauseArena::with_capacity(estimate);

        self.reloc_all(&mut target);

        log::debug!(
            target: targets::GC,
            "Garbage collection: {} words => {} words.",
            self.arena.len_words(),
            target.len_words(),
        );
        self.arena = target;
    }

    fn reloc_all(&mut self, target: &mut ClauseArena) {
        // All watchers.
        self.watches.clean_all(&self.arena);
        for list in self.watches.lists_mut() {
            for watcher in list.iter_mut() {
                watcher.cref = self.arena.relocate(watcher.cref, target);
            }
        }

        // All reasons.
        for i in 0..self.trail.len() {
            let var = self.trail.assignments[i].var();

            // Note, it is not safe to inspect locks through a relocated clause, so forwarded
            // reasons move unconditionally.
            if let Some(reason) = self.vars.reason(var) {
                if self.arena.is_reloced(reason) || self.locked(reason) {
                    debug_assert!(!self.arena.is_deleted(reason));
                    let forwarded = self.arena.relocate(reason, target);
                    self.vars.set_reason(var, Some(forwarded));
                }
            }
        }

        // All learnt.
        let mut learnts = std::mem::take(&mut self.learnts);
        let mut kept = 0;
        for i in 0..learnts.len() {
            let cr = learnts[i];
            if !self.arena.is_deleted(cr) {
                learnts[kept] = self.arena.relocate(cr, target);
                kept += 1;
            }
        }
        learnts.truncate(kept);
        self.learnts = learnts;

        // All original.
        let mut clauses = std::mem::take(&mut self.clauses);
        let mut kept = 0;
        for i in 0..clauses.len() {
            let cr = clauses[i];
            if !self.arena.is_deleted(cr) {
                clauses[kept] = self.arena.relocate(cr, target);
                kept += 1;
            }
        }
        clauses.truncate(kept);
        self.clauses = clauses;
    }
}
