// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use eeg_pid::PidError;
use eeg_pid::estimators::approaches::KsgEstimator;
use eeg_pid::estimators::traits::InformationEstimator;
use rstest::rstest;

use crate::test_helpers::*;

fn bivariate(rho: f64, size: usize, seed: u64) -> (Array1<f64>, Array1<f64>) {
    let corr = array![[1.0, rho], [rho, 1.0]];
    let data = correlated_gaussian(&corr, size, seed);
    (data.column(0).to_owned(), data.column(1).to_owned())
}

#[rstest]
#[case(0.0, 3)]
#[case(0.3, 5)]
#[case(0.6, 5)]
#[case(0.9, 10)]
fn ksg_mi_matches_gaussian_closed_form(#[case] rho: f64, #[case] k: usize) {
    let (x, y) = bivariate(rho, 3000, 7);
    let mi = KsgEstimator::new(k).mutual_information(x.view(), y.view()).unwrap();
    let expected = gaussian_mi(rho);
    println!("rho={rho} k={k}: KSG={mi}, exact={expected}");
    assert!(mi >= 0.0);
    assert_abs_diff_eq!(mi, expected, epsilon = 0.05);
}

#[test]
fn ksg_mi_is_symmetric_and_deterministic() {
    let (x, y) = bivariate(0.5, 800, 3);
    let est = KsgEstimator::new(4);
    let a = est.mutual_information(x.view(), y.view()).unwrap();
    let b = est.mutual_information(x.view(), y.view()).unwrap();
    let c = est.mutual_information(y.view(), x.view()).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
    assert_abs_diff_eq!(a, c, epsilon = 1e-12);
}

#[test]
fn ksg_mi_is_scale_invariant() {
    let (x, y) = bivariate(0.5, 800, 5);
    let est = KsgEstimator::default();
    let base = est.mutual_information(x.view(), y.view()).unwrap();
    let scaled = x.mapv(|v| 250.0 * v - 3.0);
    let moved = est.mutual_information(scaled.view(), y.view()).unwrap();
    assert_abs_diff_eq!(base, moved, epsilon = 1e-9);
}

#[test]
fn ksg_cmi_of_conditionally_independent_pair_is_small() {
    // x and y are coupled only through z.
    let corr = array![[1.0, 0.64, 0.8], [0.64, 1.0, 0.8], [0.8, 0.8, 1.0]];
    let data = correlated_gaussian(&corr, 3000, 11);
    let est = KsgEstimator::new(5);
    let cmi = est
        .conditional_mutual_information(data.column(0), data.column(1), data.column(2))
        .unwrap();
    let mi = est.mutual_information(data.column(0), data.column(1)).unwrap();
    println!("CMI={cmi}, MI={mi}");
    assert!(cmi.abs() < 0.06);
    assert!(mi > 0.2);
}

#[test]
fn ksg_cmi_with_independent_condition_matches_mi() {
    let corr = array![[1.0, 0.6, 0.0], [0.6, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let data = correlated_gaussian(&corr, 3000, 13);
    let est = KsgEstimator::new(5);
    let cmi = est
        .conditional_mutual_information(data.column(0), data.column(1), data.column(2))
        .unwrap();
    assert_abs_diff_eq!(cmi, gaussian_mi(0.6), epsilon = 0.06);
}

#[rstest]
#[case::constant(vec![1.0; 20], 3)]
#[case::non_finite({ let mut v: Vec<f64> = (0..20).map(f64::from).collect(); v[4] = f64::NAN; v }, 3)]
#[case::too_few_samples((0..3).map(f64::from).collect(), 3)]
#[case::zero_neighbours((0..20).map(f64::from).collect(), 0)]
fn ksg_rejects_degenerate_input(#[case] x: Vec<f64>, #[case] k: usize) {
    let x = Array1::from(x);
    let y = Array1::from_iter((0..x.len()).map(|i| (i as f64 * 0.7).sin()));
    let est = KsgEstimator::new(k);
    assert!(matches!(
        est.mutual_information(x.view(), y.view()),
        Err(PidError::NumericalDegeneracy(_))
    ));
    assert!(matches!(
        est.conditional_mutual_information(y.view(), y.view(), x.view()),
        Err(PidError::NumericalDegeneracy(_))
    ));
}

#[test]
fn ksg_rejects_mismatched_lengths() {
    let x = Array1::from_iter((0..30).map(f64::from));
    let y = Array1::from_iter((0..29).map(|i| (i as f64).cos()));
    let err = KsgEstimator::new(3).mutual_information(x.view(), y.view()).unwrap_err();
    assert!(matches!(err, PidError::NumericalDegeneracy(_)));
}
