/*!
The equality table.

An [EqNode] represents the literal equality `v ↔ ℓ` induced by a permutation mapping `v ↦ ℓ`.
Nodes are deduplicated across permutations on `(v, ℓ)`, so a mapping shared by several
permutations shares its node, its auxiliary variables, and its one-shot emission flag.

Nodes are held in a typed arena and addressed by [EqId]s; for each variable the table lists the
nodes the variable takes part in, whether as `v` or within `ℓ`.
The per-permutation `pred`/`succ` links thread the nodes of each permutation's support into a
doubly-linked chain, walked by the dynamic emission of chaining SBPs.
*/

use crate::structures::literal::{Lit, Var};

/// A reference to an equality node in the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EqId(u32);

/// An equality `v ↔ ℓ`, with emission state and per-permutation chain links.
pub struct EqNode {
    /// The mapped variable.
    pub var: Var,

    /// The (sign-aware) image of the variable.
    pub lit: Lit,

    /// True once the chaining clauses of the node have been emitted; never unset.
    pub added: bool,

    /// True once the defining clauses of the auxiliary pair have been added.
    pub def_added: bool,

    /// The auxiliary pair `(a, b)` reifying the equality, if materialized.
    pub aux: Option<(Var, Var)>,

    /// The preceding node in each permutation's chain, indexed by permutation.
    pred: Vec<Option<EqId>>,

    /// The succeeding node in each permutation's chain, indexed by permutation.
    succ: Vec<Option<EqId>>,
}

/// The equality table: nodes, and per-variable membership lists.
#[derive(Default)]
pub struct EqTable {
    nodes: Vec<EqNode>,
    by_var: Vec<Vec<EqId>>,
}

impl EqTable {
    fn ensure_var(&mut self, var: Var) {
        if self.by_var.len() <= var as usize {
            self.by_var.resize_with(var as usize + 1, Vec::default);
        }
    }

    /// The node of the equality `var ↔ lit`, if registered.
    pub fn find(&self, var: Var, lit: Lit) -> Option<EqId> {
        self.by_var
            .get(var as usize)?
            .iter()
            .copied()
            .find(|&id| self.node(id).var == var && self.node(id).lit == lit)
    }

    /// Registers the equality `var ↔ lit`, deduplicating on `(var, lit)`, and returns its node.
    pub fn insert(&mut self, var: Var, lit: Lit) -> EqId {
        if let Some(existing) = self.find(var, lit) {
            return existing;
        }

        let id = EqId(self.nodes.len() as u32);
        self.nodes.push(EqNode {
            var,
            lit,
            added: false,
            def_added: false,
            aux: None,
            pred: Vec::default(),
            succ: Vec::default(),
        });

        self.ensure_var(var);
        self.ensure_var(lit.var());
        self.by_var[var as usize].push(id);
        if lit.var() != var {
            self.by_var[lit.var() as usize].push(id);
        }

        id
    }

    pub fn node(&self, id: EqId) -> &EqNode {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: EqId) -> &mut EqNode {
        &mut self.nodes[id.0 as usize]
    }

    pub fn pred_of(&self, id: EqId, perm: usize) -> Option<EqId> {
        self.node(id).pred.get(perm).copied().flatten()
    }

    pub fn succ_of(&self, id: EqId, perm: usize) -> Option<EqId> {
        self.node(id).succ.get(perm).copied().flatten()
    }

    pub fn set_pred(&mut self, id: EqId, perm: usize, pred: EqId) {
        let links = &mut self.node_mut(id).pred;
        if links.len() <= perm {
            links.resize(perm + 1, None);
        }
        links[perm] = Some(pred);
    }

    pub fn set_succ(&mut self, id: EqId, perm: usize, succ: EqId) {
        let links = &mut self.node_mut(id).succ;
        if links.len() <= perm {
            links.resize(perm + 1, None);
        }
        links[perm] = Some(succ);
    }

    /// A count of registered equalities.
    pub fn count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_deduplicates() {
        let mut table = EqTable::default();
        let a = table.insert(0, Lit::positive(2));
        let b = table.insert(0, Lit::positive(2));
        let c = table.insert(0, Lit::negative(2));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(table.count(), 2);
    }

    #[test]
    fn membership_covers_both_variables() {
        let mut table = EqTable::default();
        let id = table.insert(1, Lit::negative(4));

        assert_eq!(table.find(1, Lit::negative(4)), Some(id));
        // The node is listed for the image variable, but keyed by the mapped variable.
        assert_eq!(table.find(4, Lit::negative(4)), None);
    }

    #[test]
    fn chain_links_per_permutation() {
        let mut table = EqTable::default();
        let first = table.insert(0, Lit::positive(3));
        let second = table.insert(1, Lit::positive(4));

        table.set_succ(first, 1, second);
        table.set_pred(second, 1, first);

        assert_eq!(table.succ_of(first, 0), None);
        assert_eq!(table.succ_of(first, 1), Some(second));
        assert_eq!(table.pred_of(second, 1), Some(first));
    }
}
