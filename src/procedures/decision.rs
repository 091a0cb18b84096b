/*!
Choosing the next decision literal.

# Variable

With probability `rnd-freq` a variable is drawn at random from the activity heap; otherwise the
most active variable is popped off the heap until one is found which is decision-eligible and has
no value.
An empty heap means every eligible variable has a value, and no decision can be made.

# Polarity

A user-requested polarity overrides everything; with `rnd-pol` the polarity is random; otherwise
the saved polarity of the variable is used, so a variable revisits the value it last held.
*/

use rand::{Rng, SeedableRng};

use crate::{context::GenericSolver, structures::literal::Lit};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// The next decision literal, or `None` if every decision-eligible variable has a value.
    pub(crate) fn pick_branch_lit(&mut self) -> Option<Lit> {
        let mut next = None;

        // Random decision.
        if self.rng.random_bool(self.config.random_var_freq.value) && self.vars.heap_len() > 0 {
            let slot = self.rng.random_range(0..self.vars.heap_len());
            let var = self.vars.heap_entry(slot);
            if self.vars.value_of(var).is_none() && self.vars.is_decision(var) {
                self.counters.rnd_decisions += 1;
            }
            next = Some(var);
        }

        // Activity based decision.
        let var = loop {
            match next {
                Some(var) if self.vars.value_of(var).is_none() && self.vars.is_decision(var) => {
                    break var;
                }
                _ => match self.vars.pop_most_active() {
                    None => return None,
                    Some(var) => next = Some(var),
                },
            }
        };

        let polarity = match self.vars.user_polarity(var) {
            Some(polarity) => polarity,
            None if self.config.rnd_pol.value => self.rng.random_bool(0.5),
            None => self.vars.saved_polarity(var),
        };

        Some(Lit::new(var, polarity))
    }
}
