//! End-to-end aggregation over record files.

use crate::common::{RecordFiles, expected_total};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sf_reader_json::{GeneratorConfig, RecordSource, generate_file};
use sf_types::Record;
use sf_worker::{MAX_WORKERS, Pipeline, PoolConfig};

fn pipeline(workers: usize, capacity: usize) -> Pipeline {
    Pipeline::new(
        PoolConfig::new()
            .with_worker_count(workers)
            .with_queue_capacity(capacity),
    )
    .expect("valid config")
}

fn random_records(seed: u64, count: usize, range: i64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Record::new(rng.random_range(-range..=range), rng.random_range(-range..=range)))
        .collect()
}

#[test]
fn test_total_matches_exact_sum_for_any_pool_shape() {
    let files = RecordFiles::new();
    let records = random_records(11, 20_000, 10);
    let path = files.write("records.json", &records);
    let expected = expected_total(&records);

    for workers in [1, 2, 1000] {
        for capacity in [1, 1000] {
            let summary = pipeline(workers, capacity).run_file(&path).unwrap();
            assert_eq!(summary.total, expected, "workers={workers} capacity={capacity}");
            assert_eq!(summary.records, records.len() as u64);
        }
    }
}

#[test]
fn test_wide_value_range() {
    let files = RecordFiles::new();
    let mut records = random_records(5, 1000, i64::MAX / 2);
    records.push(Record::new(i64::MAX, i64::MAX));
    records.push(Record::new(i64::MIN, i64::MIN));
    let path = files.write("wide.json", &records);

    let summary = pipeline(8, 16).run_file(&path).unwrap();
    assert_eq!(summary.total, expected_total(&records));
}

#[test]
fn test_generated_file_round_trip() {
    let files = RecordFiles::new();
    let path = files.path("generated.json");
    let config = GeneratorConfig::new().with_count(10_000).with_seed(99);

    assert_eq!(generate_file(&path, &config).unwrap(), 10_000);

    let records: Vec<Record> = RecordSource::open(&path)
        .unwrap()
        .collect::<sf_error::Result<_>>()
        .unwrap();
    assert_eq!(records.len(), 10_000);
    assert!(records.iter().all(|r| (-10..=10).contains(&r.a) && (-10..=10).contains(&r.b)));

    let summary = pipeline(4, 1000).run_file(&path).unwrap();
    assert_eq!(summary.total, expected_total(&records));
}

#[test]
fn test_repeated_runs_are_idempotent() {
    let files = RecordFiles::new();
    let path = files.path("repeat.json");
    generate_file(&path, &GeneratorConfig::new().with_count(5000)).unwrap();

    let first = pipeline(3, 100).run_file(&path).unwrap();
    let second = pipeline(7, 1).run_file(&path).unwrap();
    assert_eq!(first.total, second.total);
    assert_eq!(first.records, second.records);
}

#[test]
fn test_empty_array_file() {
    let files = RecordFiles::new();
    let path = files.write_raw("empty.json", "[\n]\n");

    let summary = pipeline(16, 1000).run_file(&path).unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.records, 0);
    assert!(summary.workers.iter().all(|w| w.records == 0));
}

#[test]
fn test_single_record_file() {
    let files = RecordFiles::new();
    let path = files.write("single.json", &[Record::new(-4, 11)]);

    let summary = pipeline(2, 1000).run_file(&path).unwrap();
    assert_eq!(summary.total, 7);
    assert_eq!(summary.active_workers(), 1);
}

#[test]
fn test_two_record_file() {
    let files = RecordFiles::new();
    let path = files.write_raw(
        "scenario.json",
        "[\n{\"a\":3,\"b\":4}\n,\n{\"a\":-1,\"b\":2}\n]\n",
    );

    let summary = pipeline(2, 1000).run_file(&path).unwrap();
    assert_eq!(summary.total, 8);
}

#[test]
fn test_oversized_worker_request_is_capped() {
    let files = RecordFiles::new();
    let records = random_records(3, 3000, 10);
    let path = files.write("capped.json", &records);

    let summary = pipeline(5000, 1000).run_file(&path).unwrap();
    assert_eq!(summary.worker_count, MAX_WORKERS);
    assert_eq!(summary.requested_workers, 5000);
    assert_eq!(summary.workers.len(), MAX_WORKERS);
    assert_eq!(summary.total, expected_total(&records));
}
