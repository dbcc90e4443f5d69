// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use eeg_pid::PidError;
use eeg_pid::pid::{Alphabet, DiscretePidSolver, SupportPolicy};
use rstest::rstest;
use std::f64::consts::LN_2;

use crate::test_helpers::*;

fn xor(a: &Array1<i32>, b: &Array1<i32>) -> Array1<i32> {
    a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect()
}

#[test]
fn balanced_xor_is_pure_synergy() {
    let s1 = Array1::from_iter([0, 0, 1, 1].into_iter().cycle().take(400));
    let s2 = Array1::from_iter([0, 1, 0, 1].into_iter().cycle().take(400));
    let t = xor(&s1, &s2);
    let atoms = DiscretePidSolver::new().solve(s1.view(), s2.view(), t.view()).unwrap();
    assert_abs_diff_eq!(atoms.redundancy, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(atoms.unique1, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(atoms.unique2, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(atoms.synergy, LN_2, epsilon = 1e-12);
}

#[test]
fn sampled_xor_is_approximately_pure_synergy() {
    let s1 = coin_flips(20_000, 8);
    let s2 = coin_flips(20_000, 9);
    let t = xor(&s1, &s2);
    let atoms = DiscretePidSolver::new().solve(s1.view(), s2.view(), t.view()).unwrap();
    assert_abs_diff_eq!(atoms.redundancy, 0.0, epsilon = 5e-3);
    assert_abs_diff_eq!(atoms.unique1, 0.0, epsilon = 5e-3);
    assert_abs_diff_eq!(atoms.unique2, 0.0, epsilon = 5e-3);
    assert_abs_diff_eq!(atoms.synergy, LN_2, epsilon = 5e-3);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
fn atoms_sum_to_joint_mutual_information(#[case] seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let s1: Array1<i32> = (0..3000).map(|_| rng.gen_range(0..3)).collect();
    let s2: Array1<i32> = (0..3000).map(|_| rng.gen_range(0..2)).collect();
    // Noisy majority-style target.
    let t: Array1<i32> = s1
        .iter()
        .zip(s2.iter())
        .map(|(a, b)| if rng.gen_bool(0.1) { rng.gen_range(0..2) } else { i32::from(a + b >= 2) })
        .collect();

    let atoms = DiscretePidSolver::new().solve(s1.view(), s2.view(), t.view()).unwrap();
    let total = atoms.redundancy + atoms.unique1 + atoms.unique2 + atoms.synergy;
    let reference = plug_in_joint_mi(&s1, &s2, &t);
    assert_abs_diff_eq!(total, atoms.joint_mutual_information, epsilon = 1e-12);
    assert_abs_diff_eq!(total, reference, epsilon = 1e-10);
    assert!(atoms.redundancy >= -1e-12);
}

#[test]
fn log_base_two_reports_bits() {
    let s1 = coin_flips(5000, 21);
    let s2 = coin_flips(5000, 22);
    let t = xor(&s1, &s2);
    let nats = DiscretePidSolver::new().solve(s1.view(), s2.view(), t.view()).unwrap();
    let bits = DiscretePidSolver::new().with_base(2.0).solve(s1.view(), s2.view(), t.view()).unwrap();
    assert_abs_diff_eq!(bits.synergy, nats.synergy / LN_2, epsilon = 1e-12);
}

#[test]
fn full_support_rejects_unobserved_cells() {
    let bin = Alphabet::binary();
    let s1 = Array1::from(vec![0, 0, 1, 1]);
    let s2 = Array1::from(vec![0, 1, 0, 1]);
    let t = xor(&s1, &s2);
    let solver = DiscretePidSolver::new().with_support(SupportPolicy::FullSupport);
    let err = solver
        .solve_with_alphabets(s1.view(), s2.view(), t.view(), [&bin, &bin, &bin])
        .unwrap_err();
    assert!(matches!(err, PidError::DistributionUnderflow(_)));

    // The default policy treats the unobserved cells as zero probability.
    let atoms = DiscretePidSolver::new()
        .solve_with_alphabets(s1.view(), s2.view(), t.view(), [&bin, &bin, &bin])
        .unwrap();
    assert_abs_diff_eq!(atoms.synergy, LN_2, epsilon = 1e-12);
}

#[test]
fn too_few_samples_underflow() {
    let s = Array1::from(vec![0, 1, 0]);
    let err = DiscretePidSolver::new()
        .with_min_samples(10)
        .solve(s.view(), s.view(), s.view())
        .unwrap_err();
    assert!(matches!(err, PidError::DistributionUnderflow(_)));
}
