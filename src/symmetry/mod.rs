/*!
The symmetry-breaking subsystem.

A *generator* is a permutation of the literals which maps the formula to itself; given one, any
model has a symmetric sibling under the permutation, and clauses which prune all but a
distinguished representative of each orbit --- symmetry-breaking predicates, SBPs --- preserve
satisfiability while shrinking the search space.

# Representations

Generators arrive either as cycle lists, [canonicalized](Generator::canonicalize) before use, or
directly as a [Permutation]: a sign-aware mapping from variables to literals together with its
*support*, the variables moved, in ascending order.

# Encodings

Two SBP encodings are available, both introducing auxiliary pointer variables `p_i` over the
support `x_0 < x_1 < …` of a permutation (see [sbp](crate::symmetry::sbp)):

- *Shatter*: `p_i` is active when the equalities up to `x_{i-1}` hold, and activation forces
  `x_i → π(x_i)`.
- *Chaining*: a lighter encoding in which `p_i` propagates forward along equalities, with
  `(¬p_i ∨ ¬x_i ∨ π(x_i))`, `(¬p_i ∨ π(x_i) ∨ p_{i+1})` and `(¬p_i ∨ ¬x_i ∨ p_{i+1})`.

With the `symm-eq-aux` option the equality `v ↔ π(v)` of each support element is reified through
a pair of auxiliary variables memoized in the [equality table](crate::symmetry::eq), so repeat
mappings across permutations share definitions.

# Dynamic emission

With `symm-dynamic`, chaining clauses are materialized lazily: the equality nodes of each
permutation form a doubly-linked chain, each permutation watches a *frontier* equality, and on
every assignment of a watched variable the chain is checked --- if the frontier and its
predecessors hold, the next link of the chain is emitted; if some equality fails, the watch moves
to the failing node.
Emission is one-shot and never retracted, as the auxiliary variables and clauses may safely
remain across backtracking and restarts.
*/

pub mod eq;
pub mod sbp;

use crate::structures::literal::{Lit, Var};

use eq::{EqId, EqTable};

/// A permutation of the literals, as a sign-aware mapping over variables with explicit support.
#[derive(Clone, Debug, Default)]
pub struct Permutation {
    image: Vec<Option<Lit>>,
    support: Vec<Var>,
}

impl Permutation {
    /// Registers `var ↦ image`, growing the mapping as needed.
    ///
    /// A repeat registration of `var` is ignored, matching the first-wins reading of the pair
    /// format.
    pub fn set_image(&mut self, var: Var, image: Lit) {
        if image == Lit::positive(var) {
            return;
        }
        if self.image.len() <= var as usize {
            self.image.resize(var as usize + 1, None);
        }
        if self.image[var as usize].is_none() {
            self.image[var as usize] = Some(image);
            self.support.push(var);
        }
    }

    /// The image of `var`, if `var` is moved.
    pub fn image_of(&self, var: Var) -> Option<Lit> {
        self.image.get(var as usize).copied().flatten()
    }

    /// The support of the permutation: the variables moved, in ascending order after
    /// [finalize](Permutation::finalize).
    pub fn support(&self) -> &[Var] {
        &self.support
    }

    /// Sorts the support into the canonical ascending order.
    pub fn finalize(&mut self) {
        self.support.sort_unstable();
    }

    /// Builds a permutation from `(l1, l2)` integer pairs in the symmetry-file convention:
    /// a pair with `|l1| ≤ |l2|` and `l1 > 0` registers `l1 ↦ l2`, and symmetrically with the
    /// pair reversed.
    pub fn from_pairs(pairs: &[(i32, i32)]) -> Self {
        let mut permutation = Permutation::default();
        for &(l1, l2) in pairs {
            if l1.abs() <= l2.abs() {
                if l1 > 0 {
                    permutation.set_image((l1 - 1) as Var, Lit::from_dimacs(l2));
                }
            } else if l2 > 0 {
                permutation.set_image((l2 - 1) as Var, Lit::from_dimacs(l1));
            }
        }
        permutation.finalize();
        permutation
    }
}

/// A generator given as cycles over literals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generator {
    cycles: Vec<Vec<Lit>>,
}

impl Generator {
    pub fn new(cycles: Vec<Vec<Lit>>) -> Self {
        Generator { cycles }
    }

    pub fn cycles(&self) -> &[Vec<Lit>] {
        &self.cycles
    }

    /// Normalizes the generator to the form `G = c_1 c_2 … c_m` where each cycle starts with
    /// its smallest literal, that literal is positive, and cycles are ordered by first literal
    /// with duplicates removed.
    ///
    /// A cycle and its boolean negation are semantically the same, so only the version starting
    /// with a positive variable is kept.
    /// The operation is idempotent.
    pub fn canonicalize(&mut self) {
        for cycle in self.cycles.iter_mut() {
            debug_assert!(cycle.len() > 1);

            // Rotate the smallest literal to the front.
            let mut min_index = 0;
            for (index, literal) in cycle.iter().enumerate().skip(1) {
                if *literal < cycle[min_index] {
                    min_index = index;
                }
            }
            cycle.rotate_left(min_index);

            // Normalize the sign.
            if !cycle[0].polarity() {
                for literal in cycle.iter_mut() {
                    *literal = !*literal;
                }
            }
        }

        // Sort the cycles on first literals, and compact duplicates.
        self.cycles.sort_by(|a, b| a[0].cmp(&b[0]));
        self.cycles.dedup_by(|a, b| {
            // Equal first literals entail identical cycles.
            debug_assert!(a[0] != b[0] || a == b);
            a[0] == b[0]
        });
    }

    /// The permutation of the generator: each cycle `(l_1 … l_k)` maps `l_i ↦ l_{i+1}`, with the
    /// mapping over variables obtained by pushing negations through.
    pub fn permutation(&self) -> Permutation {
        let mut permutation = Permutation::default();
        for cycle in &self.cycles {
            for (index, &literal) in cycle.iter().enumerate() {
                let successor = cycle[(index + 1) % cycle.len()];
                match literal.polarity() {
                    true => permutation.set_image(literal.var(), successor),
                    false => permutation.set_image(literal.var(), !successor),
                }
            }
        }
        permutation.finalize();
        permutation
    }
}

/// The state of the symmetry subsystem within a solver.
#[derive(Default)]
pub struct SymmetryState {
    /// The registered permutations.
    pub(crate) perms: Vec<Permutation>,

    /// The equality table, shared across permutations.
    pub(crate) eqs: EqTable,

    /// `watched[v][perm]`: the frontier equality of the permutation's chain watched by `v`.
    pub(crate) watched: Vec<Vec<Option<EqId>>>,

    /// The pointer variable at the open end of each permutation's chain.
    pub(crate) chain_tip: Vec<Var>,

    /// The count of problem variables when the first generator arrived; the hook ignores
    /// auxiliary variables beyond this.
    pub(crate) orig_vars: Var,

    /// True once some permutation participates in dynamic chaining.
    pub(crate) dynamic_chaining: bool,
}

impl SymmetryState {
    /// A count of registered permutations.
    pub fn perm_count(&self) -> usize {
        self.perms.len()
    }

    /// Sizes the watch table on first use, and opens a column for a fresh permutation.
    pub(crate) fn open_perm_column(&mut self, var_count: Var) {
        if self.watched.is_empty() {
            self.orig_vars = var_count;
            self.watched = vec![Vec::default(); var_count as usize];
        }
        for row in self.watched.iter_mut() {
            row.push(None);
        }
    }

    pub(crate) fn watch(&mut self, var: Var, perm: usize, eq: EqId) {
        if (var as usize) < self.watched.len() {
            self.watched[var as usize][perm] = Some(eq);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(ints: &[i32]) -> Vec<Lit> {
        ints.iter().map(|&i| Lit::from_dimacs(i)).collect()
    }

    #[test]
    fn canonicalization_rotates_and_signs() {
        let mut generator = Generator::new(vec![lits(&[-3, 1]), lits(&[4, 2])]);
        generator.canonicalize();

        assert_eq!(
            generator.cycles(),
            &[lits(&[1, -3]), lits(&[2, 4])],
        );
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let mut once = Generator::new(vec![lits(&[5, -2]), lits(&[-1, 3]), lits(&[3, -1])]);
        once.canonicalize();
        let mut twice = once.clone();
        twice.canonicalize();

        assert_eq!(once, twice);
    }

    #[test]
    fn permutation_of_transposition() {
        let mut generator = Generator::new(vec![lits(&[1, 3]), lits(&[2, 4])]);
        generator.canonicalize();
        let permutation = generator.permutation();

        assert_eq!(permutation.support(), &[0, 1, 2, 3]);
        assert_eq!(permutation.image_of(0), Some(Lit::from_dimacs(3)));
        assert_eq!(permutation.image_of(2), Some(Lit::from_dimacs(1)));
        assert_eq!(permutation.image_of(4), None);
    }

    #[test]
    fn permutation_pushes_negation_through() {
        // (1 -3): 1 ↦ -3, and so 3 ↦ -1.
        let mut generator = Generator::new(vec![lits(&[1, -3])]);
        generator.canonicalize();
        let permutation = generator.permutation();

        assert_eq!(permutation.image_of(0), Some(Lit::from_dimacs(-3)));
        assert_eq!(permutation.image_of(2), Some(Lit::from_dimacs(-1)));
    }

    #[test]
    fn pairs_registration_rule() {
        // Only pairs with the smaller variable positive register.
        let permutation = Permutation::from_pairs(&[(1, 3), (-2, 4), (6, 5)]);

        assert_eq!(permutation.image_of(0), Some(Lit::from_dimacs(3)));
        assert_eq!(permutation.image_of(1), None);
        assert_eq!(permutation.image_of(4), Some(Lit::from_dimacs(6)));
        assert_eq!(permutation.support(), &[0, 4]);
    }
}
