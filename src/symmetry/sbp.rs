/*!
Emission of symmetry-breaking predicates.

# Registration

[add_symmetry_generator](GenericSolver::add_symmetry_generator) dispatches on the symmetry
options:
- With `symm-eq-aux` or `symm-dynamic` the equality table is populated from the support.
- `symm-shatter` emits the full shatter encoding eagerly.
- `symm-chain` emits the full chaining encoding eagerly, or, with `symm-dynamic`, initializes
  the equality chain and emits only the clauses of the first link.

All SBP clauses are marked as such in the arena and take part in propagation and analysis like
any other clause.
Auxiliary variables are decision-eligible only under `symm-aux-decide`.

# Dynamic emission

Each permutation watches a frontier equality through the watch table of the
[symmetry state](crate::symmetry::SymmetryState).
On every assignment of a watched problem variable, [pred_sat](GenericSolver::pred_sat) walks the
predecessor links of the frontier verifying `value(v) = value(ℓ)` at each node:

- If every equality up to the front of the chain holds, [add_succ](GenericSolver::add_succ)
  emits the clauses of the successor link --- once, ever, per node --- and the frontier advances
  to the successor.
- If some equality fails, the watch moves back to the failing node and nothing is emitted.

Emission is monotone: `added` is a one-shot flag, and emitted clauses stay across backtracking.
*/

use rand::{Rng, SeedableRng};

use crate::{
    context::GenericSolver,
    misc::log::targets::{self},
    structures::literal::{Lit, Var},
    symmetry::{eq::EqId, Permutation},
    types::err::{self, BuildError},
};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Registers a permutation and emits its symmetry-breaking predicates per the configuration.
    pub fn add_symmetry_generator(&mut self, permutation: Permutation) -> Result<(), err::ErrorKind> {
        if !self.ok {
            return Err(BuildError::Unsatisfiable.into());
        }
        if permutation.support().is_empty() {
            log::debug!(target: targets::SYMMETRY, "Skipping a generator with empty support.");
            return Ok(());
        }

        let shatter = self.config.symm_shatter.value;
        let chain = self.config.symm_chain.value;
        let eq_aux = self.config.symm_eq_aux.value;
        let dynamic = self.config.symm_dynamic.value;

        let perm_index = self.symmetry.perms.len();
        self.symmetry.open_perm_column(self.n_vars());

        if eq_aux || dynamic {
            self.construct_eq_table(&permutation);
        }

        if dynamic && shatter {
            log::warn!(target: targets::SYMMETRY, "Dynamic shatter emission is not supported; only the equality table was built.");
            self.symmetry.chain_tip.push(0);
        } else if shatter {
            self.add_all_shatter_sbps(&permutation)?;
        } else if dynamic && chain {
            self.init_eq_watch_structure(&permutation, perm_index);

            // The first link of the chain is emitted eagerly.
            let x0 = permutation.support()[0];
            let f_x0 = permutation.image_of(x0).expect("an image for a support variable");
            let p0 = self.add_init_chaining_sbp(x0, f_x0)?;
            self.symmetry.chain_tip.push(p0);

            if let Some(first) = self.symmetry.eqs.find(x0, f_x0) {
                self.symmetry.eqs.node_mut(first).added = true;
            }
            self.symmetry.dynamic_chaining = true;
        } else if chain {
            self.add_all_chaining_sbps(&permutation)?;
        } else {
            self.symmetry.chain_tip.push(0);
        }

        self.symmetry.perms.push(permutation);
        Ok(())
    }

    /// A fresh auxiliary variable for the symmetry encodings.
    fn new_symm_aux_var(&mut self) -> Var {
        self.new_var_with(None, self.config.symm_aux_decide.value)
    }

    /// Registers the equality `v ↔ π(v)` of every support element.
    fn construct_eq_table(&mut self, permutation: &Permutation) {
        for &var in permutation.support() {
            let image = permutation.image_of(var).expect("an image for a support variable");
            self.symmetry.eqs.insert(var, image);
        }
    }

    /// Threads the equality nodes of the permutation into a chain and sets the initial watch.
    fn init_eq_watch_structure(&mut self, permutation: &Permutation, perm_index: usize) {
        let support = permutation.support();

        let first = support[0];
        let first_image = permutation.image_of(first).expect("an image for a support variable");
        let mut previous = self
            .symmetry
            .eqs
            .find(first, first_image)
            .expect("equality registered during table construction");

        self.symmetry.watch(first, perm_index, previous);
        self.symmetry.watch(first_image.var(), perm_index, previous);

        for &var in &support[1..] {
            let image = permutation.image_of(var).expect("an image for a support variable");
            let current = self
                .symmetry
                .eqs
                .find(var, image)
                .expect("equality registered during table construction");

            self.symmetry.eqs.set_succ(previous, perm_index, current);
            self.symmetry.eqs.set_pred(current, perm_index, previous);
            previous = current;
        }
    }

    /// Adds the definitions of the auxiliary pair reifying `v ↔ l`, if not present, and returns
    /// the pair.
    ///
    /// The pair `(a, b)` is defined by `(¬a ∨ ¬v ∨ l)`, `(l ∨ b)` and `(¬v ∨ b)`.
    fn add_eq_aux_vars(&mut self, v: Var, l: Lit) -> Result<(Var, Var), err::ErrorKind> {
        let id = match self.symmetry.eqs.find(v, l) {
            Some(id) => id,
            None => return Err(err::SymmetryError::UnregisteredEquality.into()),
        };

        if !self.symmetry.eqs.node(id).def_added {
            let a = self.new_symm_aux_var();
            self.add_sbp_clause(&[Lit::negative(a), Lit::negative(v), l])?;

            let b = self.new_symm_aux_var();
            self.add_sbp_clause(&[l, Lit::positive(b)])?;
            self.add_sbp_clause(&[Lit::negative(v), Lit::positive(b)])?;

            let node = self.symmetry.eqs.node_mut(id);
            node.aux = Some((a, b));
            node.def_added = true;
        }

        Ok(self.symmetry.eqs.node(id).aux.expect("definitions added"))
    }

    /// The initial shatter SBP for `x0 ↦ f_x0`, returning the first pointer variable.
    fn add_init_shatter_sbp(&mut self, x0: Var, f_x0: Lit) -> Result<Var, err::ErrorKind> {
        let p0 = self.new_symm_aux_var();
        if self.config.symm_eq_aux.value {
            let (a, _) = self.add_eq_aux_vars(x0, f_x0)?;
            self.add_sbp_clause(&[Lit::positive(a)])?;
            self.add_sbp_clause(&[Lit::positive(p0)])?;
        } else {
            self.add_sbp_clause(&[Lit::negative(x0), f_x0])?;
            self.add_sbp_clause(&[Lit::positive(p0)])?;
        }
        Ok(p0)
    }

    /// A shatter step from `prev_x ↦ f_prev` to `x ↦ f_x`, returning the next pointer variable.
    fn add_shatter_sbp(
        &mut self,
        prev_x: Var,
        f_prev: Lit,
        x: Var,
        f_x: Lit,
        current_p: Var,
    ) -> Result<Var, err::ErrorKind> {
        let next_p = self.new_symm_aux_var();
        let not_p = Lit::negative(current_p);

        if self.config.symm_eq_aux.value {
            let (_, b_prev) = self.add_eq_aux_vars(prev_x, f_prev)?;
            let (a_x, _) = self.add_eq_aux_vars(x, f_x)?;
            self.add_sbp_clause(&[not_p, Lit::negative(b_prev), Lit::positive(a_x)])?;
            self.add_sbp_clause(&[not_p, Lit::negative(b_prev), Lit::positive(next_p)])?;
        } else {
            self.add_sbp_clause(&[not_p, Lit::negative(prev_x), Lit::negative(x), f_x])?;
            self.add_sbp_clause(&[not_p, Lit::negative(prev_x), Lit::positive(next_p)])?;
            self.add_sbp_clause(&[not_p, f_prev, Lit::negative(x), f_x])?;
            self.add_sbp_clause(&[not_p, f_prev, Lit::positive(next_p)])?;
        }

        Ok(next_p)
    }

    /// Emits the full shatter encoding over the support.
    fn add_all_shatter_sbps(&mut self, permutation: &Permutation) -> Result<(), err::ErrorKind> {
        let support = permutation.support();
        let image = |var: Var| permutation.image_of(var).expect("an image for a support variable");

        let mut current_p = self.add_init_shatter_sbp(support[0], image(support[0]))?;
        for window in support.windows(2) {
            let (prev, x) = (window[0], window[1]);
            current_p = self.add_shatter_sbp(prev, image(prev), x, image(x), current_p)?;
        }

        self.symmetry.chain_tip.push(current_p);
        Ok(())
    }

    /// The initial chaining SBP for `x0 ↦ f_x0`, returning the first pointer variable.
    fn add_init_chaining_sbp(&mut self, x0: Var, f_x0: Lit) -> Result<Var, err::ErrorKind> {
        let p0 = self.new_symm_aux_var();
        if self.config.symm_eq_aux.value {
            let (a, b) = self.add_eq_aux_vars(x0, f_x0)?;
            self.add_sbp_clause(&[Lit::positive(a)])?;
            self.add_sbp_clause(&[Lit::negative(b), Lit::positive(p0)])?;
        } else {
            self.add_sbp_clause(&[Lit::negative(x0), f_x0])?;
            self.add_sbp_clause(&[Lit::negative(x0), Lit::positive(p0)])?;
            self.add_sbp_clause(&[f_x0, Lit::positive(p0)])?;
        }
        Ok(p0)
    }

    /// A chaining step for `x ↦ f_x` under the pointer `current_p`, returning the next pointer
    /// variable.
    fn add_chaining_sbp(&mut self, x: Var, f_x: Lit, current_p: Var) -> Result<Var, err::ErrorKind> {
        let next_p = self.new_symm_aux_var();
        let not_p = Lit::negative(current_p);

        if self.config.symm_eq_aux.value {
            let (a, b) = self.add_eq_aux_vars(x, f_x)?;
            self.add_sbp_clause(&[not_p, Lit::positive(a)])?;
            self.add_sbp_clause(&[not_p, Lit::negative(b), Lit::positive(next_p)])?;
        } else {
            self.add_sbp_clause(&[not_p, Lit::negative(x), f_x])?;
            self.add_sbp_clause(&[not_p, f_x, Lit::positive(next_p)])?;
            self.add_sbp_clause(&[not_p, Lit::negative(x), Lit::positive(next_p)])?;
        }

        Ok(next_p)
    }

    /// Emits the full chaining encoding over the support.
    fn add_all_chaining_sbps(&mut self, permutation: &Permutation) -> Result<(), err::ErrorKind> {
        let support = permutation.support();
        let image = |var: Var| permutation.image_of(var).expect("an image for a support variable");

        let mut current_p = self.add_init_chaining_sbp(support[0], image(support[0]))?;
        for &x in &support[1..] {
            current_p = self.add_chaining_sbp(x, image(x), current_p)?;
        }

        self.symmetry.chain_tip.push(current_p);
        Ok(())
    }

    /// The enqueue hook: checks the watched frontier of each permutation against the fresh
    /// assignment of `var`, emitting the next chain link where the chain holds.
    pub(crate) fn symmetry_on_enqueue(&mut self, var: Var) {
        if var >= self.symmetry.orig_vars {
            return;
        }

        for perm in 0..self.symmetry.perms.len() {
            let Some(frontier) = self.symmetry.watched[var as usize][perm] else {
                continue;
            };
            if self.pred_sat(frontier, perm) {
                if let Some(successor) = self.symmetry.eqs.succ_of(frontier, perm) {
                    self.add_succ(successor, perm);
                }
            }
        }
    }

    /// Walks the predecessor links from `eq`, verifying `value(v) = value(ℓ)` at each node.
    ///
    /// Returns true if every equality up to the front of the chain holds; otherwise the watch
    /// of the permutation moves to the failing node and the walk reports false.
    fn pred_sat(&mut self, eq: EqId, perm: usize) -> bool {
        let mut node = eq;
        loop {
            let (var, lit) = {
                let record = self.symmetry.eqs.node(node);
                (record.var, record.lit)
            };

            if self.vars.value_of(var) == self.vars.value_of_lit(lit) {
                match self.symmetry.eqs.pred_of(node, perm) {
                    None => return true,
                    Some(predecessor) => node = predecessor,
                }
            } else {
                // The failing node becomes the new frontier.
                self.symmetry.watch(var, perm, node);
                self.symmetry.watch(lit.var(), perm, node);
                return false;
            }
        }
    }

    /// Emits the chaining clauses of `eq`, once ever, and advances the frontier to it.
    fn add_succ(&mut self, eq: EqId, perm: usize) {
        let (var, lit, added) = {
            let record = self.symmetry.eqs.node(eq);
            (record.var, record.lit, record.added)
        };

        if !added {
            log::debug!(target: targets::SYMMETRY, "Emitting the chain link {} ↔ {lit} of permutation {perm}.", var + 1);
            let tip = self.symmetry.chain_tip[perm];
            match self.add_chaining_sbp(var, lit, tip) {
                Ok(next_p) => self.symmetry.chain_tip[perm] = next_p,
                Err(_) => {
                    log::warn!(target: targets::SYMMETRY, "Chain link emission failed; the formula is unsatisfiable.");
                }
            }
            self.symmetry.eqs.node_mut(eq).added = true;
        }

        self.symmetry.watch(var, perm, eq);
        self.symmetry.watch(lit.var(), perm, eq);
    }

    /// Provenance statistics over the clause database, split by the SBP mark.
    pub fn sbp_stats(&self) -> SbpStats {
        let mut stats = SbpStats::default();
        for &cr in &self.clauses {
            if self.arena.is_deleted(cr) {
                continue;
            }
            if self.arena.is_sbp(cr) {
                stats.sbp_clauses += 1;
                if !self.arena.propagated(cr) {
                    stats.sbp_untouched += 1;
                }
                if !self.arena.res_anal(cr) {
                    stats.sbp_unresolved += 1;
                }
            } else {
                stats.other_clauses += 1;
                if !self.arena.propagated(cr) {
                    stats.other_untouched += 1;
                }
                if !self.arena.res_anal(cr) {
                    stats.other_unresolved += 1;
                }
            }
        }
        stats
    }
}

/// Counts of symmetry-breaking clauses and how far they took part in the solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SbpStats {
    /// Attached SBP clauses.
    pub sbp_clauses: usize,

    /// SBP clauses never inspected during propagation.
    pub sbp_untouched: usize,

    /// SBP clauses never resolved on during analysis.
    pub sbp_unresolved: usize,

    /// Attached non-SBP original clauses.
    pub other_clauses: usize,

    /// Non-SBP clauses never inspected during propagation.
    pub other_untouched: usize,

    /// Non-SBP clauses never resolved on during analysis.
    pub other_unresolved: usize,
}
