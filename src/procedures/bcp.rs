/*!
Boolean constraint propagation over two watched literals.

# Overview

Each clause of two or more literals is watched by the negations of its first two literals, so a
clause is only inspected when one of the watched positions is falsified.
Propagation pops unpropagated literals off the trail and visits the watcher list of each:

1. If the blocker of the watcher is already true, the clause is satisfied and the entry kept.
2. The clause is normalized so the falsified literal is at position one.
3. If the literal at position zero is true, the clause is satisfied; the blocker is updated.
4. Otherwise a replacement watch is sought among the remaining literals, and the watcher moved.
5. With no replacement the clause is unit: a false first literal is a conflict, which is
   returned with the remainder of the list preserved; otherwise the first literal is enqueued
   with the clause as reason.

# Complications

The list under examination is taken out of the watch structure for the duration of the visit.
This settles the borrows of the list against the arena and valuation, and against pushes to
*other* lists when a watch moves --- a moved watch never lands in the list being visited, as the
replacement literal is not false while the visited list is for a falsified literal.
An addition to the visited list is possible all the same: enqueueing a literal may emit a
symmetry-breaking clause watching it.
Such additions are preserved by appending whatever accumulated in the structure before the
visited list is written back.

# Symmetry hook

[unchecked_enqueue](crate::context::GenericSolver::unchecked_enqueue) is the one place a variable
acquires a value, and so is where lazily emitted symmetry-breaking clauses surface: for each
permutation watching the assigned variable, if the chain of equalities up to the watched frontier
holds, the clauses of the next link are added.
See the [symmetry module](crate::symmetry) for details.
*/

use rand::{Rng, SeedableRng};

use crate::{
    context::GenericSolver,
    db::{watches::Watcher, ClauseRef},
    misc::log::targets::{self},
    structures::literal::Lit,
};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Assigns `lit` with the given reason at the current level, without consistency checks.
    ///
    /// The caller ensures the variable of `lit` has no value.
    pub(crate) fn unchecked_enqueue(&mut self, lit: Lit, reason: Option<ClauseRef>) {
        debug_assert!(self.vars.value_of_lit(lit).is_none());
        let level = self.trail.level();
        self.vars.assign(lit, reason, level);
        self.trail.push(lit);

        if self.symmetry.dynamic_chaining {
            self.symmetry_on_enqueue(lit.var());
        }
    }

    /// Propagates all enqueued assignments, returning the conflicting clause if one arises.
    ///
    /// The propagation queue is empty on return, even on conflict.
    pub fn propagate(&mut self) -> Option<ClauseRef> {
        let mut confl = None;
        let mut num_props: u64 = 0;

        while self.trail.q_head < self.trail.len() {
            let p = self.trail.assignments[self.trail.q_head];
            self.trail.q_head += 1;
            num_props += 1;

            if self.watches.is_dirty(p) {
                self.watches.clean(p, &self.arena);
            }
            let mut list = std::mem::take(self.watches.list_mut(p));
            let end = list.len();
            let mut i = 0;
            let mut j = 0;

            'watchers: while i < end {
                let Watcher { cref: cr, blocker } = list[i];
                if self.vars.value_of_lit(blocker) == Some(true) {
                    list[j] = list[i];
                    j += 1;
                    i += 1;
                    continue 'watchers;
                }

                // Make sure the false literal is at position one.
                let false_lit = !p;
                if self.arena.lit(cr, 0) == false_lit {
                    self.arena.swap_lits(cr, 0, 1);
                }
                debug_assert_eq!(self.arena.lit(cr, 1), false_lit);
                self.arena.set_propagated(cr);
                i += 1;

                // If the first watch is true, the clause is already satisfied.
                let first = self.arena.lit(cr, 0);
                let watcher = Watcher { cref: cr, blocker: first };
                if first != blocker && self.vars.value_of_lit(first) == Some(true) {
                    list[j] = watcher;
                    j += 1;
                    continue 'watchers;
                }

                // Look for a new watch.
                for k in 2..self.arena.size(cr) {
                    let candidate = self.arena.lit(cr, k);
                    if self.vars.value_of_lit(candidate) != Some(false) {
                        self.arena.set_lit(cr, 1, candidate);
                        self.arena.set_lit(cr, k, false_lit);
                        self.watches.push(!candidate, watcher);
                        continue 'watchers;
                    }
                }

                // Did not find a watch: the clause is unit under the assignment.
                list[j] = watcher;
                j += 1;
                match self.vars.value_of_lit(first) {
                    Some(false) => {
                        log::trace!(target: targets::PROPAGATION, "Conflict in {cr} on {p}.");
                        confl = Some(cr);
                        self.trail.q_head = self.trail.len();
                        // Copy the remaining watches.
                        while i < end {
                            list[j] = list[i];
                            j += 1;
                            i += 1;
                        }
                    }
                    _ => self.unchecked_enqueue(first, Some(cr)),
                }
            }

            list.truncate(j);
            // Pick up watchers attached while the list was out.
            let slot = self.watches.list_mut(p);
            if !slot.is_empty() {
                list.append(slot);
            }
            *slot = list;
        }

        self.counters.propagations += num_props;
        self.simp_db_props -= num_props as i64;

        confl
    }
}
