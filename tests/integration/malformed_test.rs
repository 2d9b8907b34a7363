//! Malformed input handling.

use crate::common::RecordFiles;
use sf_error::{FormatError, ProcessingStage, SfError};
use sf_worker::{Pipeline, PoolConfig};

fn pipeline() -> Pipeline {
    Pipeline::new(
        PoolConfig::new()
            .with_worker_count(4)
            .with_queue_capacity(8),
    )
    .expect("valid config")
}

#[test]
fn test_object_instead_of_array() {
    let files = RecordFiles::new();
    let path = files.write_raw("object.json", "{\"a\":1,\"b\":2}\n");

    match pipeline().run_file(&path) {
        Err(SfError::Format(FormatError::MissingArrayStart { found, .. })) => {
            assert_eq!(found, "'{'");
        }
        other => panic!("Expected MissingArrayStart, got: {:?}", other),
    }
}

#[test]
fn test_missing_field_after_valid_records() {
    let files = RecordFiles::new();
    let mut contents = String::from("[\n");
    for i in 0..500 {
        contents.push_str(&format!("{{\"a\":{},\"b\":1}}\n,\n", i));
    }
    contents.push_str("{\"a\":1}\n]\n");
    let path = files.write_raw("missing.json", &contents);

    let err = pipeline().run_file(&path).unwrap_err();
    assert_eq!(err.stage(), ProcessingStage::Decode);
    assert!(matches!(
        err,
        SfError::Format(FormatError::InvalidRecord { index: 500, .. })
    ));
}

#[test]
fn test_non_integer_field() {
    let files = RecordFiles::new();
    let path = files.write_raw(
        "string.json",
        "[\n{\"a\":1,\"b\":2}\n,\n{\"a\":\"three\",\"b\":4}\n]\n",
    );

    let err = pipeline().run_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SfError::Format(FormatError::InvalidRecord { index: 1, .. })
    ));
    assert!(err.to_string().contains("Invalid record 1"));
}

#[test]
fn test_truncated_file() {
    let files = RecordFiles::new();
    let path = files.write_raw("truncated.json", "[\n{\"a\":1,\"b\":2}\n,\n{\"a\":3,");

    let err = pipeline().run_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SfError::Format(FormatError::UnexpectedEof { records: 1, .. })
    ));
}

#[test]
fn test_missing_file() {
    let files = RecordFiles::new();
    let err = pipeline().run_file(files.path("absent.json")).unwrap_err();
    assert_eq!(err.stage(), ProcessingStage::Open);
    assert!(err.to_string().contains("absent.json"));
}
