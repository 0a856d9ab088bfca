//! The circuit builder: gates, copy constraints and selector allocation.
//!
//! A [Circuit] only accumulates. Gadgets register the polynomial constraints
//! of their gates once per gate shape (see [crate::selector]) and a copy
//! constraint per wire. Enabling a selector at a given row is a write into
//! the assignment table, not something the circuit records.

use ark_ff::PrimeField;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    expr::Expr,
    selector::{ComponentIdentity, SelectorBlock, SelectorCache},
    var::Var,
};

/// A set of constraints that must vanish at every row where the column
/// `selector_index` is one.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate<F> {
    pub selector_index: usize,
    pub constraints: Vec<Expr<F>>,
}

impl<F: PrimeField> Gate<F> {
    pub fn new(selector_index: usize, constraints: Vec<Expr<F>>) -> Self {
        Self {
            selector_index,
            constraints,
        }
    }

    /// Largest degree of the gate's constraints, the selector excluded.
    pub fn degree(&self) -> u64 {
        self.constraints.iter().map(Expr::degree).max().unwrap_or(0)
    }
}

/// Equality between two cells of the table.
///
/// The pair is unordered: the two variables are stored sorted, so `(a, b)`
/// and `(b, a)` build equal constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CopyConstraint {
    pub first: Var,
    pub second: Var,
}

impl CopyConstraint {
    pub fn new(a: Var, b: Var) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn is_trivial(&self) -> bool {
        self.first == self.second
    }
}

#[derive(Debug, Clone)]
pub struct Circuit<F> {
    gates: Vec<Gate<F>>,
    copy_constraints: Vec<CopyConstraint>,
    selector_cache: SelectorCache,
    /// Number of selector indices handed out so far.
    selectors_amount: usize,
}

impl<F: PrimeField> Default for Circuit<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PrimeField> Circuit<F> {
    pub fn new() -> Self {
        Self {
            gates: vec![],
            copy_constraints: vec![],
            selector_cache: SelectorCache::new(),
            selectors_amount: 0,
        }
    }

    fn fresh_selectors(&mut self, amount: usize) -> SelectorBlock {
        let block = SelectorBlock {
            first: self.selectors_amount,
            amount,
        };
        self.selectors_amount += amount;
        block
    }

    /// Register a gate under a fresh selector and return its index.
    ///
    /// The selector is not enabled anywhere: the caller enables it in the
    /// assignment table at the rows the gate applies to.
    pub fn add_gate(&mut self, constraints: Vec<Expr<F>>) -> usize {
        let selector = self.fresh_selectors(1).first;
        self.add_gate_with_selector(selector, constraints);
        selector
    }

    /// Register a gate under an already allocated selector.
    pub fn add_gate_with_selector(&mut self, selector_index: usize, constraints: Vec<Expr<F>>) {
        assert!(
            selector_index < self.selectors_amount,
            "selector {selector_index} was not allocated, only {} are",
            self.selectors_amount
        );
        debug!(
            "Adding gate with selector {selector_index} and {} constraints",
            constraints.len()
        );
        self.gates.push(Gate::new(selector_index, constraints));
    }

    /// Assert that `a` and `b` hold the same value.
    ///
    /// Both variables must be absolute cells of the table. The trivial
    /// constraint `a == a` is dropped.
    pub fn add_copy_constraint(&mut self, a: Var, b: Var) {
        for v in [&a, &b] {
            assert!(
                !v.is_relative(),
                "copy constraints link absolute cells, got the relative variable {v}"
            );
            assert!(
                !v.is_private_storage(),
                "private storage is not part of the table, cannot copy-constrain {v}"
            );
        }
        let constraint = CopyConstraint::new(a, b);
        if constraint.is_trivial() {
            trace!("Skipping trivial copy constraint on {a}");
            return;
        }
        trace!("Adding copy constraint {a} == {b}");
        self.copy_constraints.push(constraint);
    }

    // ------------------------------------------------------------------------
    // Selector cache

    /// First selector of the block allocated for `identity`, if any.
    pub fn find_selector(&self, identity: &ComponentIdentity) -> Option<usize> {
        self.selector_cache.get(identity).map(|block| block.first)
    }

    /// Allocate a block of `gates_amount` contiguous selectors for
    /// `identity` and return its first index.
    ///
    /// Panics if `identity` already owns a block: callers look it up with
    /// [Circuit::find_selector] first.
    pub fn allocate_selector(&mut self, identity: ComponentIdentity, gates_amount: usize) -> usize {
        assert!(gates_amount > 0, "{identity:?} requests an empty selector block");
        let block = self.fresh_selectors(gates_amount);
        debug!(
            "Allocating selectors {:?} for {}{:?}",
            block.indices(),
            identity.tag,
            identity.params
        );
        self.selector_cache.insert(identity, block);
        block.first
    }

    /// The selector block of `identity`, generating its gates on first use.
    ///
    /// On a cache hit the block is returned and `generate` is not called. On
    /// a miss a fresh block of `gates_amount` selectors is allocated,
    /// memoized, and `generate` is called exactly once with it to register
    /// the gates.
    pub fn get_or_generate_gates<G>(
        &mut self,
        identity: ComponentIdentity,
        gates_amount: usize,
        generate: G,
    ) -> SelectorBlock
    where
        G: FnOnce(&mut Self, SelectorBlock),
    {
        if let Some(block) = self.selector_cache.get(&identity) {
            assert_eq!(
                block.amount, gates_amount,
                "{identity:?} was first registered with {} gates",
                block.amount
            );
            trace!("Reusing selectors {:?} for {}", block.indices(), identity.tag);
            return block;
        }
        let first = self.allocate_selector(identity, gates_amount);
        let block = SelectorBlock {
            first,
            amount: gates_amount,
        };
        generate(self, block);
        block
    }

    // ------------------------------------------------------------------------

    pub fn gates(&self) -> &[Gate<F>] {
        &self.gates
    }

    pub fn gates_amount(&self) -> usize {
        self.gates.len()
    }

    /// Gates registered under `selector_index`.
    pub fn gates_with_selector(&self, selector_index: usize) -> impl Iterator<Item = &Gate<F>> {
        self.gates
            .iter()
            .filter(move |gate| gate.selector_index == selector_index)
    }

    pub fn copy_constraints(&self) -> &[CopyConstraint] {
        &self.copy_constraints
    }

    pub fn selectors_amount(&self) -> usize {
        self.selectors_amount
    }

    pub fn selector_cache(&self) -> &SelectorCache {
        &self.selector_cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use std::cell::Cell;

    fn addition_constraint() -> Vec<Expr<Fr>> {
        let w = |i| Expr::from(Var::witness_rel(i, 0));
        vec![w(0) + w(1) - w(2)]
    }

    #[test]
    fn test_add_gate_allocates_fresh_selectors() {
        let mut circuit = Circuit::<Fr>::new();
        assert_eq!(circuit.add_gate(addition_constraint()), 0);
        assert_eq!(circuit.add_gate(addition_constraint()), 1);
        assert_eq!(circuit.gates_amount(), 2);
        assert_eq!(circuit.selectors_amount(), 2);
    }

    #[test]
    fn test_copy_constraints_are_unordered() {
        let a = Var::witness(0, 1);
        let b = Var::public_input(0, 0);
        assert_eq!(CopyConstraint::new(a, b), CopyConstraint::new(b, a));
        let mut circuit = Circuit::<Fr>::new();
        circuit.add_copy_constraint(a, b);
        circuit.add_copy_constraint(a, a);
        assert_eq!(circuit.copy_constraints().len(), 1);
    }

    #[test]
    #[should_panic]
    fn test_copy_constraint_rejects_relative() {
        Circuit::<Fr>::new().add_copy_constraint(Var::witness_rel(0, 0), Var::witness(0, 0));
    }

    #[test]
    fn test_generate_gates_once_per_identity() {
        let mut circuit = Circuit::<Fr>::new();
        let calls = Cell::new(0);
        let id = ComponentIdentity::new("addition").with_witnesses(&[0, 1, 2]);
        let mut generate = || {
            circuit.get_or_generate_gates(id.clone(), 1, |c, block| {
                calls.set(calls.get() + 1);
                c.add_gate_with_selector(block.first, addition_constraint());
            })
        };
        let first = generate();
        let second = generate();
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
        assert_eq!(circuit.gates_amount(), 1);
        assert_eq!(circuit.find_selector(&id), Some(first.first));
    }

    #[test]
    fn test_multi_gate_blocks_are_contiguous() {
        let mut circuit = Circuit::<Fr>::new();
        circuit.add_gate(addition_constraint());
        let first = circuit.allocate_selector(ComponentIdentity::new("two-rows"), 2);
        assert_eq!(first, 1);
        assert_eq!(circuit.selectors_amount(), 3);
        assert_eq!(circuit.add_gate(addition_constraint()), 3);
    }

    #[test]
    #[should_panic]
    fn test_gate_with_unallocated_selector_panics() {
        Circuit::<Fr>::new().add_gate_with_selector(0, addition_constraint());
    }
}
