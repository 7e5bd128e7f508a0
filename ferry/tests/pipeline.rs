#![cfg(feature = "test-utils")]

use std::time::Duration;

use ferry::destination::file::FileDestination;
use ferry::destination::memory::MemoryDestination;
use ferry::error::ErrorKind;
use ferry::source::file::FileSource;
use ferry::source::memory::MemorySource;
use ferry::test_utils::destination::{FailingDestination, PanickingDestination};
use ferry::test_utils::file::{read_output_file, temp_file_path, write_input_file};
use ferry::test_utils::pipeline::create_pipeline;
use ferry::test_utils::source::PanickingSource;
use ferry_telemetry::tracing::init_test_tracing;
use tokio::time::timeout;

/// Upper bound for a complete pipeline run; generous enough for slow CI machines.
const RUN_TIMEOUT: Duration = Duration::from_secs(30);

/// Expands `input` the way the pipeline should: odd values once, even values twice.
fn expected_output(input: &[i64]) -> Vec<i64> {
    let mut expected = Vec::new();
    for &value in input {
        expected.push(value);
        if value % 2 == 0 {
            expected.push(value);
        }
    }

    expected
}

#[tokio::test(flavor = "multi_thread")]
async fn even_values_are_written_twice_and_odd_values_once() {
    init_test_tracing();

    let source = MemorySource::new([1, 2, 3, 4]);
    let destination = MemoryDestination::new();

    let pipeline = create_pipeline(source, destination.clone());
    pipeline.run().await.unwrap();

    assert_eq!(destination.records().await, vec![1, 2, 2, 3, 4, 4]);
    assert!(destination.closed().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_input_produces_empty_output() {
    init_test_tracing();

    let source = MemorySource::new([]);
    let destination = MemoryDestination::new();

    let pipeline = create_pipeline(source, destination.clone());
    pipeline.run().await.unwrap();

    assert!(destination.records().await.is_empty());
    assert!(destination.closed().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn single_even_value_produces_exactly_two_records() {
    init_test_tracing();

    let source = MemorySource::new([6]);
    let destination = MemoryDestination::new();

    let pipeline = create_pipeline(source, destination.clone());
    pipeline.run().await.unwrap();

    assert_eq!(destination.records().await, vec![6, 6]);
}

#[tokio::test(flavor = "multi_thread")]
async fn zero_and_negative_values_follow_signed_parity() {
    init_test_tracing();

    let source = MemorySource::new([-4, -3, 0, 7]);
    let destination = MemoryDestination::new();

    let pipeline = create_pipeline(source, destination.clone());
    pipeline.run().await.unwrap();

    assert_eq!(destination.records().await, vec![-4, -4, -3, 0, 0, 7]);
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_runs_produce_identical_output() {
    init_test_tracing();

    let input = [9, 10, -11, -12, 0, 1, 2];
    let expected = expected_output(&input);

    for _ in 0..5 {
        let source = MemorySource::new(input);
        let destination = MemoryDestination::new();

        let pipeline = create_pipeline(source, destination.clone());
        pipeline.run().await.unwrap();

        assert_eq!(destination.records().await, expected);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn large_input_preserves_order_within_wall_clock_bound() {
    init_test_tracing();

    let input: Vec<i64> = (0..10_000).map(|i| i * 3 - 15_000).collect();
    let expected = expected_output(&input);

    let source = MemorySource::new(input);
    let destination = MemoryDestination::new();

    let pipeline = create_pipeline(source, destination.clone());
    timeout(RUN_TIMEOUT, pipeline.run())
        .await
        .expect("pipeline run did not complete within the wall-clock bound")
        .unwrap();

    assert_eq!(destination.records().await, expected);
    assert!(destination.closed().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn wait_without_start_is_a_noop() {
    init_test_tracing();

    let source = MemorySource::new([1, 2, 3]);
    let destination = MemoryDestination::new();

    let pipeline = create_pipeline(source, destination.clone());
    pipeline.wait().await.unwrap();

    assert!(destination.records().await.is_empty());
    assert!(!destination.closed().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn starting_a_pipeline_twice_fails() {
    init_test_tracing();

    let source = MemorySource::new([5, 6]);
    let destination = MemoryDestination::new();

    let mut pipeline = create_pipeline(source, destination.clone());
    pipeline.start().await.unwrap();

    let err = pipeline.start().await.unwrap_err();
    assert!(
        err.kinds().contains(&ErrorKind::InvalidState),
        "Error should be InvalidState, got: {:?}",
        err.kinds()
    );

    // The first start is unaffected and the run completes normally.
    pipeline.wait().await.unwrap();
    assert_eq!(destination.records().await, vec![5, 6, 6]);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_input_file_fails_with_open_error() {
    init_test_tracing();

    let missing_path = temp_file_path("ferry_missing");

    let err = FileSource::open(&missing_path).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SourceOpenFailed);
    assert!(
        err.detail()
            .is_some_and(|detail| detail.contains("ferry_missing")),
        "open error should carry the path, got: {:?}",
        err.detail()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_line_aborts_the_run() {
    init_test_tracing();

    let input_path = write_input_file("ferry_malformed", "1\n2\nabc\n4\n")
        .await
        .unwrap();

    let source = FileSource::open(&input_path).await.unwrap();
    let destination = MemoryDestination::new();

    let pipeline = create_pipeline(source, destination.clone());
    let err = pipeline.run().await.unwrap_err();

    assert!(
        err.kinds().contains(&ErrorKind::MalformedRecord),
        "Error should contain MalformedRecord, got: {:?}",
        err.kinds()
    );
    // The diagnostic names the offending line.
    assert!(err.detail().is_some_and(|detail| detail.contains(":3:")));

    // The run failed before end of stream, so the destination was never closed.
    assert!(!destination.closed().await);

    let _ = tokio::fs::remove_file(&input_path).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn whitespace_only_lines_are_skipped() {
    init_test_tracing();

    let input_path = write_input_file("ferry_whitespace", "1\n\n   \n 2 \n\t\n3\n")
        .await
        .unwrap();
    let output_path = temp_file_path("ferry_whitespace_out");

    let source = FileSource::open(&input_path).await.unwrap();
    let destination = FileDestination::create(&output_path).await.unwrap();

    let pipeline = create_pipeline(source, destination);
    pipeline.run().await.unwrap();

    assert_eq!(read_output_file(&output_path).await.unwrap(), "1\n2\n2\n3\n");

    let _ = tokio::fs::remove_file(&input_path).await;
    let _ = tokio::fs::remove_file(&output_path).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn file_to_file_run_duplicates_even_values() {
    init_test_tracing();

    let input_path = write_input_file("ferry_file_run", "1\n2\n3\n4\n").await.unwrap();
    let output_path = temp_file_path("ferry_file_run_out");

    let source = FileSource::open(&input_path).await.unwrap();
    let destination = FileDestination::create(&output_path).await.unwrap();

    let pipeline = create_pipeline(source, destination);
    pipeline.run().await.unwrap();

    assert_eq!(
        read_output_file(&output_path).await.unwrap(),
        "1\n2\n2\n3\n4\n4\n"
    );

    let _ = tokio::fs::remove_file(&input_path).await;
    let _ = tokio::fs::remove_file(&output_path).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_input_file_produces_empty_output_file() {
    init_test_tracing();

    let input_path = write_input_file("ferry_empty", "").await.unwrap();
    let output_path = temp_file_path("ferry_empty_out");

    let source = FileSource::open(&input_path).await.unwrap();
    let destination = FileDestination::create(&output_path).await.unwrap();

    let pipeline = create_pipeline(source, destination);
    pipeline.run().await.unwrap();

    assert_eq!(read_output_file(&output_path).await.unwrap(), "");

    let _ = tokio::fs::remove_file(&input_path).await;
    let _ = tokio::fs::remove_file(&output_path).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn read_worker_panic_surfaces_as_typed_error() {
    init_test_tracing();

    let source = PanickingSource::panicking_after(1);
    let destination = MemoryDestination::new();

    let pipeline = create_pipeline(source, destination.clone());
    let err = pipeline.run().await.unwrap_err();

    assert!(
        err.kinds().contains(&ErrorKind::ReadWorkerPanic),
        "Error should contain ReadWorkerPanic, got: {:?}",
        err.kinds()
    );
    // The dropped sender is what the write worker observes.
    assert!(
        err.kinds().contains(&ErrorKind::HandoffClosed),
        "Error should contain HandoffClosed, got: {:?}",
        err.kinds()
    );

    // The record handed off before the panic was still processed, but the
    // destination was never closed.
    assert_eq!(destination.records().await, vec![0, 0]);
    assert!(!destination.closed().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn write_worker_panic_surfaces_as_typed_error() {
    init_test_tracing();

    let source = MemorySource::new([2, 4, 6, 8]);
    let destination = PanickingDestination::panicking_after(3);

    let pipeline = create_pipeline(source, destination);
    let err = pipeline.run().await.unwrap_err();

    assert!(
        err.kinds().contains(&ErrorKind::WriteWorkerPanic),
        "Error should contain WriteWorkerPanic, got: {:?}",
        err.kinds()
    );
    assert!(
        err.kinds().contains(&ErrorKind::HandoffClosed),
        "Error should contain HandoffClosed, got: {:?}",
        err.kinds()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn failing_destination_aborts_the_run() {
    init_test_tracing();

    let source = MemorySource::new([2, 4, 6, 8]);
    let destination = FailingDestination::failing_after(3);

    let pipeline = create_pipeline(source, destination);
    let err = pipeline.run().await.unwrap_err();

    // Both workers report: the write worker the injected failure, the read worker
    // the channel that closed under it.
    assert!(
        err.kinds().contains(&ErrorKind::DestinationIoError),
        "Error should contain DestinationIoError, got: {:?}",
        err.kinds()
    );
    assert!(
        err.kinds().contains(&ErrorKind::HandoffClosed),
        "Error should contain HandoffClosed, got: {:?}",
        err.kinds()
    );
}
