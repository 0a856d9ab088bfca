//! Column-count negotiation between gadgets.
//!
//! A [Manifest] states how many witness columns a gadget is able to work
//! with, and how many constant and public input columns it needs. A parent
//! gadget merges the manifests of its children with its own before picking
//! a layout, so no row is committed for a configuration a child rejects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{component::ColumnLayout, error::ManifestError};

/// A set of acceptable values for a column count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManifestParam {
    Single(usize),
    /// Every value from `min` to `max`, both included.
    Range { min: usize, max: usize },
    Set(BTreeSet<usize>),
}

impl ManifestParam {
    pub fn range(min: usize, max: usize) -> Self {
        if min > max {
            return ManifestParam::Set(BTreeSet::new());
        }
        ManifestParam::Range { min, max }
    }

    pub fn contains(&self, value: usize) -> bool {
        match self {
            ManifestParam::Single(v) => *v == value,
            ManifestParam::Range { min, max } => (*min..=*max).contains(&value),
            ManifestParam::Set(values) => values.contains(&value),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ManifestParam::Single(_) => false,
            ManifestParam::Range { min, max } => min > max,
            ManifestParam::Set(values) => values.is_empty(),
        }
    }

    /// Values accepted by both parameters.
    pub fn intersect(&self, other: &ManifestParam) -> ManifestParam {
        use ManifestParam::*;
        match (self, other) {
            (Range { min: a, max: b }, Range { min: c, max: d }) => {
                ManifestParam::range(std::cmp::max(*a, *c), std::cmp::min(*b, *d))
            }
            (Single(v), other) | (other, Single(v)) => {
                if other.contains(*v) {
                    Single(*v)
                } else {
                    Set(BTreeSet::new())
                }
            }
            (Set(values), other) | (other, Set(values)) => Set(
                values
                    .iter()
                    .copied()
                    .filter(|v| other.contains(*v))
                    .collect(),
            ),
        }
    }

    /// Largest accepted value not above `limit`.
    pub fn largest_up_to(&self, limit: usize) -> Option<usize> {
        match self {
            ManifestParam::Single(v) => (*v <= limit).then_some(*v),
            ManifestParam::Range { min, max } => {
                let candidate = std::cmp::min(*max, limit);
                (candidate >= *min).then_some(candidate)
            }
            ManifestParam::Set(values) => values.range(..=limit).next_back().copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub witness_amount: ManifestParam,
    pub constant_amount: usize,
    pub public_input_amount: usize,
}

impl Manifest {
    pub fn new(witness_amount: ManifestParam) -> Self {
        Self {
            witness_amount,
            constant_amount: 0,
            public_input_amount: 0,
        }
    }

    /// A manifest accepting no configuration at all.
    pub fn unsatisfiable() -> Self {
        Self::new(ManifestParam::Set(BTreeSet::new()))
    }

    pub fn with_constants(mut self, constant_amount: usize) -> Self {
        self.constant_amount = constant_amount;
        self
    }

    pub fn with_public_inputs(mut self, public_input_amount: usize) -> Self {
        self.public_input_amount = public_input_amount;
        self
    }

    /// Manifest accepted by both gadgets, when they are laid out on the same
    /// columns.
    pub fn merge_with(&self, other: &Manifest) -> Result<Manifest, ManifestError> {
        let witness_amount = self.witness_amount.intersect(&other.witness_amount);
        if witness_amount.is_empty() {
            return Err(ManifestError::Unsatisfiable);
        }
        Ok(Manifest {
            witness_amount,
            constant_amount: std::cmp::max(self.constant_amount, other.constant_amount),
            public_input_amount: std::cmp::max(self.public_input_amount, other.public_input_amount),
        })
    }

    /// Largest witness column count accepted, bounded by what the caller
    /// has available.
    pub fn choose_witness_amount(
        &self,
        tag: &'static str,
        available: usize,
    ) -> Result<usize, ManifestError> {
        self.witness_amount
            .largest_up_to(available)
            .ok_or(ManifestError::WitnessAmountRejected(tag, available))
    }

    /// Check that `layout` provides what the manifest requires.
    pub fn check(&self, tag: &'static str, layout: &ColumnLayout) -> Result<(), ManifestError> {
        if !self.witness_amount.contains(layout.witness_amount()) {
            return Err(ManifestError::WitnessAmountRejected(
                tag,
                layout.witness_amount(),
            ));
        }
        if layout.constant_amount() < self.constant_amount {
            return Err(ManifestError::NotEnoughConstants(
                tag,
                self.constant_amount,
                layout.constant_amount(),
            ));
        }
        if layout.public_input_amount() < self.public_input_amount {
            return Err(ManifestError::NotEnoughPublicInputs(
                tag,
                self.public_input_amount,
                layout.public_input_amount(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersections() {
        let r = ManifestParam::range(3, 15);
        assert_eq!(r.intersect(&ManifestParam::range(9, 20)), ManifestParam::range(9, 15));
        assert_eq!(r.intersect(&ManifestParam::Single(11)), ManifestParam::Single(11));
        assert!(r.intersect(&ManifestParam::Single(2)).is_empty());
        let s = ManifestParam::Set(BTreeSet::from([2, 9, 16]));
        assert_eq!(r.intersect(&s), ManifestParam::Set(BTreeSet::from([9])));
        assert!(ManifestParam::range(3, 5)
            .intersect(&ManifestParam::range(6, 8))
            .is_empty());
    }

    #[test]
    fn test_largest_up_to() {
        assert_eq!(ManifestParam::range(3, 15).largest_up_to(11), Some(11));
        assert_eq!(ManifestParam::range(3, 15).largest_up_to(20), Some(15));
        assert_eq!(ManifestParam::range(3, 15).largest_up_to(2), None);
        let s = ManifestParam::Set(BTreeSet::from([4, 8, 12]));
        assert_eq!(s.largest_up_to(11), Some(8));
        assert_eq!(ManifestParam::Single(9).largest_up_to(8), None);
    }

    #[test]
    fn test_merge() {
        let a = Manifest::new(ManifestParam::range(3, 15)).with_constants(1);
        let b = Manifest::new(ManifestParam::range(5, 9)).with_public_inputs(1);
        let merged = a.merge_with(&b).unwrap();
        assert_eq!(merged.witness_amount, ManifestParam::range(5, 9));
        assert_eq!(merged.constant_amount, 1);
        assert_eq!(merged.public_input_amount, 1);
        assert_eq!(merged.choose_witness_amount("parent", 15), Ok(9));

        let c = Manifest::new(ManifestParam::Single(2));
        assert_eq!(a.merge_with(&c), Err(ManifestError::Unsatisfiable));
    }

    #[test]
    fn test_check_layout() {
        let m = Manifest::new(ManifestParam::range(3, 15)).with_constants(1);
        assert_eq!(
            m.check("gadget", &ColumnLayout::contiguous(2, 1, 0)),
            Err(ManifestError::WitnessAmountRejected("gadget", 2))
        );
        assert_eq!(
            m.check("gadget", &ColumnLayout::contiguous(3, 0, 0)),
            Err(ManifestError::NotEnoughConstants("gadget", 1, 0))
        );
        assert!(m.check("gadget", &ColumnLayout::contiguous(11, 1, 0)).is_ok());
    }
}
