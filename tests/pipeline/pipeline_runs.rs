// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use eeg_pid::PidError;
use eeg_pid::config::{EstimatorConfig, PipelineConfig};
use eeg_pid::data::{ChannelTable, Discretization, SurrogateGenerator, SurrogateMethod};
use eeg_pid::pid::SupportPolicy;
use eeg_pid::pipeline::{Pipeline, PipelineOutput};
use eeg_pid::topology::ChannelTopology;
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tempfile::tempdir;

use crate::test_helpers::*;

const CHANNELS: [&str; 5] = ["a", "b", "c", "d", "e"];

/// Left {a, b, c}, right {c, d, e}: two triplets, six rows.
fn config(estimator: EstimatorConfig, parallel: bool) -> PipelineConfig {
    PipelineConfig {
        topology: ChannelTopology::new(["a", "b", "c"], ["c", "d", "e"]).unwrap(),
        estimator,
        parallel,
    }
}

fn table() -> ChannelTable {
    equicorrelated_table(&CHANNELS, 0.35, 1500, 77)
}

fn discrete() -> EstimatorConfig {
    EstimatorConfig::Discrete {
        discretization: Discretization::Binarize,
        log_base: 2.0,
        support: SupportPolicy::ObservedSupport,
        min_samples: 1,
    }
}

#[rstest]
#[case::analytical(EstimatorConfig::Analytical { neighbours: 5 }, 5)]
#[case::discrete(discrete(), 7)]
#[case::continuous(EstimatorConfig::Continuous { neighbours: 5 }, 7)]
fn run_subject_writes_one_table(#[case] estimator: EstimatorConfig, #[case] columns: usize) {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("subject_01.csv");
    let pipeline = Pipeline::new(config(estimator, false)).unwrap();

    let summary = pipeline.run_subject(&table(), &path).unwrap();
    assert_eq!(summary.records, 6);
    assert_eq!(summary.skipped, 0);

    let (header, rows) = read_csv(&path);
    assert_eq!(header.len(), columns);
    assert_eq!(header[..3], ["source1", "source2", "target"]);
    assert_eq!(rows.len(), 6);
    // (A, B -> C), (A, C -> B), (B, C -> A) for triplet (a, b, c).
    assert_eq!(rows[0][..3], ["a", "b", "c"]);
    assert_eq!(rows[1][..3], ["a", "c", "b"]);
    assert_eq!(rows[2][..3], ["b", "c", "a"]);
    assert_eq!(rows[3][..3], ["c", "d", "e"]);
}

#[test]
fn parallel_and_sequential_runs_are_identical() {
    let data = table();
    let seq = Pipeline::new(config(EstimatorConfig::Continuous { neighbours: 4 }, false)).unwrap();
    let par = Pipeline::new(config(EstimatorConfig::Continuous { neighbours: 4 }, true)).unwrap();
    match (seq.decompose(&data).unwrap(), par.decompose(&data).unwrap()) {
        (PipelineOutput::Full(a), PipelineOutput::Full(b)) => {
            assert_eq!(a.results.records(), b.results.records());
        }
        other => panic!("unexpected outputs {other:?}"),
    }
}

#[test]
fn constant_channel_skips_only_its_triplets() {
    let mut data = table().data().to_owned();
    data.column_mut(4).fill(1.0);
    let data = table().with_data(data).unwrap();

    let pipeline = Pipeline::new(config(EstimatorConfig::Continuous { neighbours: 4 }, false)).unwrap();
    let out = pipeline.decompose(&data).unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out.skipped().len(), 1);
    assert!(matches!(out.skipped()[0].error, PidError::NumericalDegeneracy(_)));

    let analytical = Pipeline::new(config(EstimatorConfig::Analytical { neighbours: 4 }, true)).unwrap();
    let out = analytical.decompose(&data).unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out.skipped().len(), 1);
}

#[test]
fn interrupted_run_persists_nothing() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("interrupted.csv");
    let flag = Arc::new(AtomicBool::new(true));
    let pipeline = Pipeline::new(config(EstimatorConfig::Continuous { neighbours: 4 }, false))
        .unwrap()
        .with_interrupt(flag);
    let err = pipeline.run_subject(&table(), &path).unwrap_err();
    assert!(matches!(err, PidError::Interrupted { completed: 0, total: 2 }));
    assert!(!path.exists());
}

#[test]
fn missing_channel_aborts_before_any_work() {
    let data = table().select(&["a", "b", "c", "d"]).unwrap();
    let pipeline = Pipeline::new(config(EstimatorConfig::Continuous { neighbours: 4 }, false)).unwrap();
    assert!(matches!(pipeline.decompose(&data), Err(PidError::ConfigurationError(_))));
}

#[test]
fn surrogate_runs_write_one_table_each() {
    let tmp = tempdir().unwrap();
    let pipeline = Pipeline::new(config(EstimatorConfig::Analytical { neighbours: 4 }, true)).unwrap();
    let generator = SurrogateGenerator::new(SurrogateMethod::GaussianCholesky, 1000);
    let summaries = pipeline
        .run_surrogates(&table(), generator, 3, tmp.path().join("surrogates"), "subject_01")
        .unwrap();
    assert_eq!(summaries.len(), 3);
    for (i, s) in summaries.iter().enumerate() {
        assert!(s.path.ends_with(format!("subject_01_surrogate_{i}.csv")));
        assert_eq!(s.records, 6);
        assert_eq!(read_csv(&s.path).1.len(), 6);
    }
    assert_ne!(
        std::fs::read_to_string(&summaries[0].path).unwrap(),
        std::fs::read_to_string(&summaries[1].path).unwrap()
    );
}

#[test]
fn channel_table_from_csv_feeds_the_pipeline() {
    let data = table();
    let mut csv_text = CHANNELS.join(",") + "\n";
    for row in data.data().rows() {
        let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        csv_text.push_str(&fields.join(","));
        csv_text.push('\n');
    }
    let loaded = ChannelTable::from_csv_reader(csv_text.as_bytes()).unwrap();
    assert_eq!(loaded.data(), data.data());

    let pipeline = Pipeline::new(config(discrete(), false)).unwrap();
    assert_eq!(pipeline.decompose(&loaded).unwrap().len(), 6);
}
