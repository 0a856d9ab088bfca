//! End-to-end runs of the reference gadgets: both passes, then the
//! satisfiability check.

use ark_bn254::Fr;
use ark_std::UniformRand;
use blueprint::{
    circuit::Circuit,
    component::{ColumnLayout, Component},
    components::{
        multiply_add::MultiplyAddInput, Addition, BinaryInput, Multiplication, MultiplyAdd, Sum,
    },
    error::{ManifestError, SatisfiabilityError},
    manifest::{Manifest, ManifestParam},
    resolve::var_value,
    satisfiability::is_satisfied,
};
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;

mod common;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn test_addition_and_multiplication() {
    let mut rng = rng(0);
    let (x, y) = (Fr::rand(&mut rng), Fr::rand(&mut rng));

    let mut circuit = Circuit::<Fr>::new();
    let mut table = common::table(3);
    let vars = common::place_inputs(&mut table, &[x, y]);
    let input = BinaryInput {
        x: vars[0],
        y: vars[1],
    };

    let layout = ColumnLayout::contiguous(3, 0, 0);
    let addition = Addition::new(layout.clone()).unwrap();
    let multiplication = Multiplication::new(layout).unwrap();
    let sum = common::run(&addition, &mut circuit, &mut table, &input, 0);
    let product = common::run(&multiplication, &mut circuit, &mut table, &input, 1);

    assert_eq!(var_value(&table, &sum.output), x + y);
    assert_eq!(var_value(&table, &product.output), x * y);
    common::assert_satisfied(&circuit, &table);
}

#[test]
fn test_tampered_witness_is_detected() {
    let mut circuit = Circuit::<Fr>::new();
    let mut table = common::table(3);
    let vars = common::place_inputs(&mut table, &[Fr::from(6u64), Fr::from(7u64)]);
    let input = BinaryInput {
        x: vars[0],
        y: vars[1],
    };
    let component = Multiplication::new(ColumnLayout::contiguous(3, 0, 0)).unwrap();
    let out = common::run(&component, &mut circuit, &mut table, &input, 2);
    common::assert_satisfied(&circuit, &table);

    *table.witness_mut(2, out.output.absolute_row()) = Fr::from(43u64);
    assert!(matches!(
        is_satisfied(&circuit, &table),
        Err(SatisfiabilityError::GateNotSatisfied { selector: 0, row: 2, .. })
    ));

    *table.witness_mut(2, 2) = Fr::from(42u64);
    *table.witness_mut(0, 2) = Fr::from(42u64);
    *table.witness_mut(1, 2) = Fr::from(1u64);
    assert!(matches!(
        is_satisfied(&circuit, &table),
        Err(SatisfiabilityError::CopyConstraintViolated(..))
    ));
}

#[test]
fn test_sum_of_random_values() {
    let mut rng = rng(1);
    let values: Vec<Fr> = (0..9).map(|_| Fr::rand(&mut rng)).collect();
    let expected = values.iter().fold(Fr::from(0u64), |acc, v| acc + v);

    let mut circuit = Circuit::<Fr>::new();
    let mut table = common::table(5);
    let inputs = common::place_inputs(&mut table, &values);
    let layout = ColumnLayout::new(vec![4, 0, 2], vec![], vec![]);
    let component = Sum::new(layout, values.len()).unwrap();
    let out = common::run(&component, &mut circuit, &mut table, &inputs, 3);

    assert_eq!(var_value(&table, &out.output), expected);
    assert_eq!(table.rows_amount(), 3 + values.len() - 1);
    common::assert_satisfied(&circuit, &table);
}

#[test]
fn test_multiply_add_chains_children() {
    let mut rng = rng(2);
    let values = [Fr::rand(&mut rng), Fr::rand(&mut rng), Fr::rand(&mut rng)];

    let mut circuit = Circuit::<Fr>::new();
    let mut table = common::table(4);
    let vars = common::place_inputs(&mut table, &values);
    let input = MultiplyAddInput {
        x: vars[0],
        y: vars[1],
        z: vars[2],
    };
    let component = MultiplyAdd::new(ColumnLayout::contiguous(4, 0, 0)).unwrap();
    let first = common::run(&component, &mut circuit, &mut table, &input, 0);
    let rows = Component::<Fr>::rows_amount(&component);
    let second = common::run(&component, &mut circuit, &mut table, &input, rows);

    let expected = values[0] * values[1] + values[2];
    assert_eq!(var_value(&table, &first.output), expected);
    assert_eq!(var_value(&table, &second.output), expected);
    // Two instances, one multiplication gate and one addition gate.
    assert_eq!(circuit.gates_amount(), 2);
    common::assert_satisfied(&circuit, &table);
}

#[test]
fn test_parent_negotiates_witness_columns() {
    let manifest = <MultiplyAdd as Component<Fr>>::manifest()
        .merge_with(&Manifest::new(ManifestParam::range(5, 9)))
        .unwrap();
    assert_eq!(manifest.choose_witness_amount("parent", 15), Ok(9));
    assert_eq!(
        manifest.choose_witness_amount("parent", 4),
        Err(ManifestError::WitnessAmountRejected("parent", 4))
    );
    assert!(Sum::new(ColumnLayout::contiguous(16, 0, 0), 3).is_err());
}

#[test]
fn test_independent_instances_in_parallel() {
    let results: Vec<(usize, Fr)> = (0..16u64)
        .into_par_iter()
        .map(|seed| {
            let mut rng = rng(seed);
            let values: Vec<Fr> = (0..(seed as usize % 5 + 2))
                .map(|_| Fr::rand(&mut rng))
                .collect();
            let mut circuit = Circuit::<Fr>::new();
            let mut table = common::table(3);
            let inputs = common::place_inputs(&mut table, &values);
            let component = Sum::new(ColumnLayout::contiguous(3, 0, 0), values.len()).unwrap();
            let out = common::run(&component, &mut circuit, &mut table, &inputs, 0);
            common::assert_satisfied(&circuit, &table);
            (circuit.selectors_amount(), var_value(&table, &out.output))
        })
        .collect();

    for (seed, (selectors, total)) in results.into_iter().enumerate() {
        let mut rng = rng(seed as u64);
        let expected = (0..(seed % 5 + 2))
            .map(|_| Fr::rand(&mut rng))
            .fold(Fr::from(0u64), |acc, v| acc + v);
        assert_eq!(selectors, 2);
        assert_eq!(total, expected);
    }
}
