/*!
Analysis of a conflicting clause.

# Overview

[analyze](GenericSolver::analyze) takes a clause unsatisfiable on the current valuation and
resolves backwards along the trail until a single literal of the current decision level remains
--- the first unique implication point --- producing an asserting clause and the level to
backjump to.

A counter tracks how many marked literals of the current level remain to resolve; literals from
lower levels enter the learnt clause directly.
Activities of the variables met are bumped, as are the activities of the learnt reason clauses
resolved on.

# Minimization

The learnt clause is then minimized according to the `ccmin-mode` option:
- *0*: no minimization.
- *1*: a literal is dropped if every non-root literal of its reason is already marked.
- *2*: a literal is dropped if it is [redundant](GenericSolver::lit_redundant) --- a recursive
  condition over the reason graph, memoized in the four-state [Seen] scratchpad.

The scratchpad is cleared through a log of touched variables rather than a full reset.

# Final analysis

[analyze_final](GenericSolver::analyze_final) serves conflicting assumptions: a single backwards
walk of the trail collects the assumptions an assignment rests on, producing the subset of
assumptions under which the formula was found unsatisfiable.
*/

use rand::{Rng, SeedableRng};

use crate::{
    context::{GenericSolver, Seen},
    db::{ClauseRef, LevelIndex},
    misc::log::targets::{self},
    structures::literal::Lit,
};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Analyzes the conflict `confl`, writing an asserting clause into `learnt` and returning
    /// the backjump level.
    ///
    /// On return `learnt[0]` is the asserting literal, and `learnt[1]` (if present) a literal of
    /// the backjump level.
    ///
    /// May only be called above the root level.
    pub(crate) fn analyze(&mut self, confl: ClauseRef, learnt: &mut Vec<Lit>) -> LevelIndex {
        log::trace!(target: targets::ANALYSIS, "Analysis of {confl} at level {}.", self.trail.level());

        let mut path_count: u32 = 0;
        let mut p: Option<Lit> = None;

        learnt.push(Lit::positive(0)); // Leave room for the asserting literal.
        let mut index = self.trail.len();
        let mut confl = Some(confl);

        loop {
            let cr = confl.expect("no reason for a literal below the first implication point");
            if self.arena.is_learnt(cr) {
                self.bump_clause_activity(cr);
            }
            self.arena.set_res_anal(cr);

            let skip_first = usize::from(p.is_some());
            for j in skip_first..self.arena.size(cr) {
                let q = self.arena.lit(cr, j);
                let v = q.var() as usize;

                if self.seen[v] == Seen::Undef && self.vars.level(q.var()) > 0 {
                    self.vars.bump_activity(q.var());
                    self.seen[v] = Seen::Source;
                    if self.vars.level(q.var()) >= self.trail.level() {
                        path_count += 1;
                    } else {
                        learnt.push(q);
                    }
                }
            }

            // Select the next literal to look at.
            loop {
                index -= 1;
                if self.seen[self.trail.assignments[index].var() as usize] != Seen::Undef {
                    break;
                }
            }
            let pivot = self.trail.assignments[index];
            p = Some(pivot);
            confl = self.vars.reason(pivot.var());
            self.seen[pivot.var() as usize] = Seen::Undef;
            path_count -= 1;

            if path_count == 0 {
                break;
            }
        }
        let asserting = !p.expect("analysis visited no literal");
        learnt[0] = asserting;

        // Simplify the learnt clause.
        self.analyze_toclear.clear();
        self.analyze_toclear.extend_from_slice(learnt);
        self.counters.max_literals += learnt.len() as u64;

        match self.config.ccmin_mode.value {
            2 => {
                let mut kept = 1;
                for i in 1..learnt.len() {
                    let l = learnt[i];
                    if self.vars.reason(l.var()).is_none() || !self.lit_redundant(l) {
                        learnt[kept] = l;
                        kept += 1;
                    }
                }
                learnt.truncate(kept);
            }

            1 => {
                let mut kept = 1;
                for i in 1..learnt.len() {
                    let l = learnt[i];
                    match self.vars.reason(l.var()) {
                        None => {
                            learnt[kept] = l;
                            kept += 1;
                        }
                        Some(reason) => {
                            self.arena.set_res_anal(reason);
                            for k in 1..self.arena.size(reason) {
                                let parent = self.arena.lit(reason, k);
                                if self.seen[parent.var() as usize] == Seen::Undef
                                    && self.vars.level(parent.var()) > 0
                                {
                                    learnt[kept] = l;
                                    kept += 1;
                                    break;
                                }
                            }
                        }
                    }
                }
                learnt.truncate(kept);
            }

            _ => {}
        }
        self.counters.tot_literals += learnt.len() as u64;

        // Find the correct backtrack level.
        let out_btlevel = if learnt.len() == 1 {
            0
        } else {
            // Swap the literal of the next-highest level into position one.
            let mut max_i = 1;
            for i in 2..learnt.len() {
                if self.vars.level(learnt[i].var()) > self.vars.level(learnt[max_i].var()) {
                    max_i = i;
                }
            }
            learnt.swap(1, max_i);
            self.vars.level(learnt[1].var())
        };

        for i in 0..self.analyze_toclear.len() {
            self.seen[self.analyze_toclear[i].var() as usize] = Seen::Undef;
        }

        log::trace!(target: targets::ANALYSIS, "Learnt {learnt:?} with backtrack level {out_btlevel}.");
        out_btlevel
    }

    /// Checks whether `p` may be removed from a learnt clause.
    ///
    /// A literal is redundant if every ancestor in the reason graph is at the root level, marked
    /// in the learnt clause, or already established as removable.
    /// The walk is iterative, with positions held on an explicit stack, and its discoveries ---
    /// removable or failed --- are memoized in the [Seen] scratchpad.
    fn lit_redundant(&mut self, p: Lit) -> bool {
        debug_assert!(matches!(self.seen[p.var() as usize], Seen::Undef | Seen::Source));

        let mut p = p;
        let mut cr = self.vars.reason(p.var()).expect("a reason for minimization");
        self.analyze_stack.clear();

        let mut i: usize = 1;
        loop {
            if i < self.arena.size(cr) {
                let l = self.arena.lit(cr, i);
                let v = l.var();

                // A parent at the root level or previously established is fine.
                if self.vars.level(v) != 0
                    && !matches!(self.seen[v as usize], Seen::Source | Seen::Removable)
                {
                    if self.vars.reason(v).is_none() || self.seen[v as usize] == Seen::Failed {
                        // The failure spreads to everything on the stack.
                        self.analyze_stack.push((0, p));
                        for stack_index in 0..self.analyze_stack.len() {
                            let (_, failed) = self.analyze_stack[stack_index];
                            if self.seen[failed.var() as usize] == Seen::Undef {
                                self.seen[failed.var() as usize] = Seen::Failed;
                                self.analyze_toclear.push(failed);
                            }
                        }
                        return false;
                    }

                    // Check the parent recursively.
                    self.analyze_stack.push((i as u32, p));
                    i = 0;
                    p = l;
                    cr = self.vars.reason(v).expect("a reason for the parent");
                }
            } else {
                // Finished with the parents of p.
                if self.seen[p.var() as usize] == Seen::Undef {
                    self.seen[p.var() as usize] = Seen::Removable;
                    self.analyze_toclear.push(p);
                }

                match self.analyze_stack.pop() {
                    None => break,
                    Some((stack_i, stack_p)) => {
                        i = stack_i as usize;
                        p = stack_p;
                        cr = self.vars.reason(p.var()).expect("a reason on the stack");
                    }
                }
            }

            i += 1;
        }

        true
    }

    /// Expresses a conflict on the assumption `p` as a subset of the assumptions.
    ///
    /// The negations of the responsible assumptions, `p` among them, are written to the conflict
    /// set.
    pub(crate) fn analyze_final(&mut self, p: Lit) {
        self.conflict.clear();
        self.conflict.push(p);

        if self.trail.level() == 0 {
            return;
        }

        self.seen[p.var() as usize] = Seen::Source;

        for i in (self.trail.level_indices[0]..self.trail.len()).rev() {
            let assignment = self.trail.assignments[i];
            let x = assignment.var();
            if self.seen[x as usize] == Seen::Undef {
                continue;
            }

            match self.vars.reason(x) {
                None => {
                    debug_assert!(self.vars.level(x) > 0);
                    if x != p.var() {
                        self.conflict.push(!assignment);
                    }
                }
                Some(cr) => {
                    for j in 1..self.arena.size(cr) {
                        let l = self.arena.lit(cr, j);
                        if self.vars.level(l.var()) > 0 {
                            self.seen[l.var() as usize] = Seen::Source;
                        }
                    }
                }
            }
            self.seen[x as usize] = Seen::Undef;
        }

        self.seen[p.var() as usize] = Seen::Undef;
    }

    /// Bumps the activity of a learnt clause, rescaling every learnt activity on overflow.
    pub(crate) fn bump_clause_activity(&mut self, cr: ClauseRef) {
        let bumped = self.arena.activity(cr) + self.cla_inc as f32;
        self.arena.set_activity(cr, bumped);
        if bumped > 1e20 {
            for index in 0..self.learnts.len() {
                let learnt = self.learnts[index];
                let scaled = self.arena.activity(learnt) * 1e-20;
                self.arena.set_activity(learnt, scaled);
            }
            self.cla_inc *= 1e-20;
        }
    }

    /// Decays every clause activity, by growing the increment applied on a bump.
    pub(crate) fn decay_clause_activity(&mut self) {
        self.cla_inc *= 1.0 / self.config.clause_decay.value;
    }
}
