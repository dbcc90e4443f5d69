// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use eeg_pid::PidError;
use eeg_pid::topology::{ChannelPair, ChannelTopology, Triplet, TripletEnumerator};
use rstest::rstest;
use std::collections::HashSet;

fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

fn groups(size: usize, boundary: usize) -> ChannelTopology {
    let shared: Vec<String> = (0..boundary).map(|i| format!("M{i}")).collect();
    let side = |p: &str| {
        (0..size - boundary)
            .map(|i| format!("{p}{i}"))
            .chain(shared.iter().cloned())
            .collect::<Vec<_>>()
    };
    ChannelTopology::new(side("L"), side("R")).unwrap()
}

#[test]
fn montage_10_20_has_329_triplets_and_107_pairs() {
    let topology = ChannelTopology::eeg_10_20();
    let enumerator = TripletEnumerator::new(&topology).unwrap();
    let triplets = enumerator.triplets();
    let pairs = enumerator.pairs();

    assert_eq!(triplets.len(), 329);
    assert_eq!(pairs.len(), 107);
    assert_eq!(triplets.iter().collect::<HashSet<_>>().len(), 329);
    assert_eq!(pairs.iter().collect::<HashSet<_>>().len(), 107);
    assert_eq!(topology.boundary(), ["EEG Fz", "EEG Cz", "EEG Pz"]);

    // The midline triplet appears exactly once, from the left group.
    let midline = Triplet::new("EEG Pz", "EEG Fz", "EEG Cz").unwrap();
    assert_eq!(triplets.iter().filter(|t| **t == midline).count(), 1);
    assert!(triplets[..165].contains(&midline));
}

#[rstest]
#[case(5, 0)]
#[case(5, 2)]
#[case(4, 3)]
#[case(6, 4)]
#[case(11, 3)]
fn counts_follow_the_boundary_identity(#[case] size: usize, #[case] boundary: usize) {
    let topology = groups(size, boundary);
    let enumerator = TripletEnumerator::new(&topology).unwrap();
    assert_eq!(
        enumerator.triplets().len(),
        2 * binomial(size, 3) - binomial(boundary, 3)
    );
    assert_eq!(enumerator.pairs().len(), 2 * binomial(size, 2) - binomial(boundary, 2));
}

#[test]
fn enumeration_is_lexicographic_and_left_first() {
    let topology = ChannelTopology::new(["a", "b", "c", "m"], ["d", "m", "e"]).unwrap();
    let triplets = TripletEnumerator::new(&topology).unwrap().triplets();
    let names: Vec<[&str; 3]> = triplets
        .iter()
        .map(|t| {
            let c = t.channels();
            [c[0].as_str(), c[1].as_str(), c[2].as_str()]
        })
        .collect();
    assert_eq!(
        names,
        [
            ["a", "b", "c"],
            ["a", "b", "m"],
            ["a", "c", "m"],
            ["b", "c", "m"],
            ["d", "m", "e"],
        ]
    );
    let pairs = TripletEnumerator::new(&topology).unwrap().pairs();
    assert!(pairs.contains(&ChannelPair::new("e", "m")));
    assert_eq!(pairs.len(), 6 + 3);
}

#[rstest]
#[case::empty_group(vec![], vec!["a", "b", "c"])]
#[case::group_too_small(vec!["a", "b", "c"], vec!["c", "d"])]
#[case::duplicate(vec!["a", "b", "a"], vec!["c", "d", "e"])]
#[case::empty_label(vec!["a", " ", "b"], vec!["c", "d", "e"])]
fn malformed_topologies_are_configuration_errors(#[case] left: Vec<&str>, #[case] right: Vec<&str>) {
    let err = ChannelTopology::new(left, right).unwrap_err();
    assert!(matches!(err, PidError::ConfigurationError(_)));
}

#[test]
fn triplets_need_distinct_channels() {
    assert!(matches!(Triplet::new("a", "b", "a"), Err(PidError::ConfigurationError(_))));
    assert_eq!(Triplet::new("a", "b", "c").unwrap(), Triplet::new("c", "a", "b").unwrap());
}
