//! Reuse of selector columns across gadget instances.
//!
//! A circuit usually instantiates the same gadget many times (per round of a
//! hash, per limb of a big integer, ...). All instances sharing a gate shape
//! can share the selector column(s) of that shape; only the rows where the
//! selector is enabled differ. The [SelectorCache] maps the identity of a
//! gate shape to the block of selector indices allocated for it the first
//! time it was requested.

use std::collections::BTreeMap;

/// Identity of a gate shape.
///
/// Two gadgets with equal identities must generate identical gate
/// constraints. The identity is made of:
/// - a tag naming the gadget type;
/// - the structural parameters changing the constraints (an operation
///   mode, a number of limbs, ...);
/// - the global column indices the gadget's constraints refer to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentIdentity {
    pub tag: &'static str,
    pub params: Vec<u64>,
    pub witnesses: Vec<usize>,
    pub constants: Vec<usize>,
    pub public_inputs: Vec<usize>,
}

impl ComponentIdentity {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            params: vec![],
            witnesses: vec![],
            constants: vec![],
            public_inputs: vec![],
        }
    }

    pub fn with_params(mut self, params: impl IntoIterator<Item = u64>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn with_witnesses(mut self, witnesses: &[usize]) -> Self {
        self.witnesses.extend_from_slice(witnesses);
        self
    }

    pub fn with_constants(mut self, constants: &[usize]) -> Self {
        self.constants.extend_from_slice(constants);
        self
    }

    pub fn with_public_inputs(mut self, public_inputs: &[usize]) -> Self {
        self.public_inputs.extend_from_slice(public_inputs);
        self
    }
}

/// A contiguous block of selector indices `[first, first + amount)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorBlock {
    pub first: usize,
    pub amount: usize,
}

impl SelectorBlock {
    /// The `i`-th selector of the block.
    pub fn selector(&self, i: usize) -> usize {
        assert!(
            i < self.amount,
            "selector {i} requested from a block of {} selectors",
            self.amount
        );
        self.first + i
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.first..self.first + self.amount
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectorCache {
    blocks: BTreeMap<ComponentIdentity, SelectorBlock>,
}

impl SelectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identity: &ComponentIdentity) -> Option<SelectorBlock> {
        self.blocks.get(identity).copied()
    }

    /// Record the block allocated for `identity`.
    ///
    /// Panics if the identity already maps to a block: selector allocation
    /// must consult the cache first.
    pub fn insert(&mut self, identity: ComponentIdentity, block: SelectorBlock) {
        if let Some(previous) = self.blocks.get(&identity) {
            panic!("{identity:?} already owns the selectors {previous:?}, cannot rebind it to {block:?}");
        }
        self.blocks.insert(identity, block);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ComponentIdentity, &SelectorBlock)> {
        self.blocks.iter()
    }
}
