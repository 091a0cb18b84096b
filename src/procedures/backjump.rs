/*!
Recovery from a conflict.

A backjump is a jump from some (higher) decision level to some previous (lower) decision level:
every assignment above the target level is undone, in reverse trail order, and the variables
returned to the activity heap.

Depending on the `phase-saving` option, the polarity of an undone assignment is saved to guide
the next decision on its variable: always, only for assignments above the last decision level, or
never.

Backjumping to the current level or above is a no-op, so the operation is idempotent.
*/

use rand::{Rng, SeedableRng};

use crate::{
    context::GenericSolver,
    db::LevelIndex,
    misc::log::targets::{self},
};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Reverts to the state at the given level, keeping all assignments at `level` but not
    /// beyond.
    pub fn cancel_until(&mut self, level: LevelIndex) {
        if self.trail.level() <= level {
            return;
        }
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {level}.", self.trail.level());

        let level_start = self.trail.level_indices[level as usize];
        let top_start = *self.trail.level_indices.last().expect("a decision level");

        for c in (level_start..self.trail.len()).rev() {
            let assignment = self.trail.assignments[c];
            let var = assignment.var();
            self.vars.clear_value(var);

            match self.config.phase_saving.value {
                2 => self.vars.save_polarity(var, assignment.polarity()),
                1 if c > top_start => self.vars.save_polarity(var, assignment.polarity()),
                _ => {}
            }

            self.vars.insert_var_order(var);
        }

        self.trail.q_head = level_start;
        self.trail.assignments.truncate(level_start);
        self.trail.level_indices.truncate(level as usize);
    }
}
