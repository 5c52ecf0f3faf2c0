#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use reftest::prelude::*;
use tempfile::TempDir;

#[test]
fn prelude_covers_a_validation_run() {
    let tmp = TempDir::new().unwrap();
    let x: Vec<f32> = (0..20).map(|i| i as f32 * 0.5).collect();

    let store = ReferenceStore::new(ReferenceConfig::new(ReferenceMode::Generate, tmp.path()));
    let x_min = store.reference("x_min", &x, -0.25).unwrap();
    let x_max = store.reference("x_max", &x, 0.25).unwrap();

    let mut report = CheckReport::new();
    report.expect("x bounds", is_within_bounds(&x, &x_min, &x_max));
    report.expect(
        "x rises",
        has_at_least_n_consecutive_samples_above_threshold(&x, 1.0, 10),
    );
    report.expect_ok(
        "x corridor",
        is_within_2d_corridor(&[0.5], &[0.5], &[0.0, 0.0], &[0.0, 1.0], &[1.0, 1.0], &[0.0, 1.0]),
    );
    assert!(report.all_passed(), "{report}");

    let loaded: Vec<f32> = load_vector(tmp.path().join("x_min.bin")).unwrap();
    assert_eq!(loaded, x_min);
    let err = load_vector::<f64>(tmp.path().join("x_min.bin")).unwrap_err();
    assert_eq!(err.kind(), CodecErrorKind::TypeMismatch);
}
