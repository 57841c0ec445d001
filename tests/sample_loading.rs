use std::path::PathBuf;

use StatPlots::errors::{DistError, VizError};
use StatPlots::samples::{SampleData, interpolated_quantile};
use assert_approx_eq::assert_approx_eq;

#[test]
fn loads_plain_values() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");
    let path: PathBuf = dir.path().join("sample.txt");
    std::fs::write(&path, "1.5\n2.5\n3.0\n").expect("write fixture");

    let sample: SampleData = SampleData::load(&path).expect("plain file should load");

    assert_eq!(sample.len(), 3);
    assert_eq!(sample.observations(), &[1.5, 2.5, 3.0]);
    assert_eq!(sample.censoring(), None);
}

#[test]
fn skips_comments_blanks_and_junk_lines() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");
    let path: PathBuf = dir.path().join("sample.txt");
    std::fs::write(
        &path,
        "# заголовок файла\n\n10.5\nмусорная строка\nnan\ninf\n-3.25\n",
    )
    .expect("write fixture");

    let sample: SampleData = SampleData::load(&path).expect("junk must not break the load");

    assert_eq!(sample.observations(), &[10.5, -3.25]);
}

#[test]
fn censor_flags_are_kept_when_every_line_carries_one() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");
    let path: PathBuf = dir.path().join("lifetimes.txt");
    std::fs::write(&path, "12.5 0\n30.2 1\n44.0 0\n").expect("write fixture");

    let sample: SampleData = SampleData::load(&path).expect("flagged file should load");

    assert_eq!(sample.censoring(), Some([false, true, false].as_slice()));
    assert_eq!(sample.complete(), vec![12.5, 44.0]);
    assert_eq!(sample.censored_values(), vec![30.2]);
}

#[test]
fn partial_censor_flags_are_dropped() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");
    let path: PathBuf = dir.path().join("lifetimes.txt");
    std::fs::write(&path, "12.5 0\n30.2\n44.0 1\n").expect("write fixture");

    let sample: SampleData = SampleData::load(&path).expect("file should load");

    assert_eq!(sample.censoring(), None);
    assert_eq!(sample.len(), 3);
    // without flags every observation counts as complete
    assert_eq!(sample.complete().len(), 3);
    assert!(sample.censored_values().is_empty());
}

#[test]
fn a_file_of_comments_is_a_valid_empty_sample() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");
    let path: PathBuf = dir.path().join("empty.txt");
    std::fs::write(&path, "# только комментарии\n\n# и пустые строки\n").expect("write fixture");

    let sample: SampleData = SampleData::load(&path).expect("an empty sample is not an error");

    assert!(sample.is_empty());
    assert_eq!(sample.mean(), None);
    assert_eq!(sample.std_dev(), None);
    assert_eq!(sample.median(), None);
}

#[test]
fn a_missing_file_is_an_io_error_with_the_path() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");
    let path: PathBuf = dir.path().join("does_not_exist.txt");

    let error: VizError = SampleData::load(&path).expect_err("the file is not there");
    match error {
        VizError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected an io error, got {:?}", other),
    }
}

#[test]
fn constructor_rejects_non_finite_observations() {
    assert!(matches!(
        SampleData::new(vec![1.0, f64::NAN]),
        Err(DistError::NanErr)
    ));
    assert!(matches!(
        SampleData::new(vec![1.0, f64::INFINITY]),
        Err(DistError::InvalidNumber)
    ));
}

#[test]
fn summary_statistics_match_hand_computed_values() {
    let sample: SampleData =
        SampleData::new(vec![4.0, 2.0, 5.0, 4.0, 5.0, 4.0, 9.0, 7.0]).expect("all finite");

    assert_eq!(sample.mean(), Some(5.0));
    assert_eq!(sample.min(), Some(2.0));
    assert_eq!(sample.max(), Some(9.0));
    assert_eq!(sample.sorted(), vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);

    let std_dev: f64 = sample.std_dev().expect("enough observations");
    assert_approx_eq!(std_dev, (32.0_f64 / 7.0).sqrt(), 1.0e-12);

    let (q1, median, q3): (f64, f64, f64) = sample.quartiles().expect("non empty");
    assert_eq!(q1, 4.0);
    assert_eq!(median, 4.5);
    assert_eq!(q3, 5.5);
}

#[test]
fn quantile_interpolates_between_order_statistics() {
    let sorted: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(interpolated_quantile(&sorted, 0.0), 1.0);
    assert_eq!(interpolated_quantile(&sorted, 1.0), 4.0);
    assert_eq!(interpolated_quantile(&sorted, 0.5), 2.5);
}

#[test]
fn single_observation_has_no_deviation() {
    let sample: SampleData = SampleData::new(vec![42.0]).expect("all finite");
    assert_eq!(sample.mean(), Some(42.0));
    assert_eq!(sample.std_dev(), None);
    assert_eq!(sample.quartiles(), Some((42.0, 42.0, 42.0)));
}
