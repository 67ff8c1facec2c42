//! Tests for verification oracles.

use fitting_types::FittingKind;
use geom_kernel::Aabb;
use test_harness::oracle::*;
use test_harness::FittingHarness;

/// Default pipe on the mock kernel: OD 30, ID 20, L 1000 (mm).
fn mock_pipe() -> FittingHarness {
    let mut h = FittingHarness::mock();
    h.build_kind("pipe", FittingKind::Pipe).unwrap();
    h
}

// ── Point Oracle Tests ──────────────────────────────────────────────────

#[test]
fn annulus_passes_for_pipe_wall() {
    let h = mock_pipe();
    let pipe = h.fitting("pipe").unwrap();
    let result = check_annulus(
        h.introspect(),
        pipe.handles(),
        [0.0, 0.0, 500.0],
        [0.0, 0.0, 1.0],
        10.0,
        15.0,
    );
    assert!(result.passed, "pipe wall: {}", result.detail);
}

#[test]
fn annulus_fails_for_wrong_radii() {
    let h = mock_pipe();
    let pipe = h.fitting("pipe").unwrap();
    let result = check_annulus(
        h.introspect(),
        pipe.handles(),
        [0.0, 0.0, 500.0],
        [0.0, 0.0, 1.0],
        5.0,
        12.0,
    );
    assert!(!result.passed);
    assert!(result.value.unwrap() > 0.0);
}

#[test]
fn point_oracles_disagree_on_the_bore() {
    let h = mock_pipe();
    let pipe = h.fitting("pipe").unwrap();
    let p = [0.0, 0.0, 500.0];
    assert!(!check_point_inside(h.introspect(), pipe.handles(), p).passed);
    assert!(check_point_outside(h.introspect(), pipe.handles(), p).passed);
}

// ── Bounding Box Oracle Tests ───────────────────────────────────────────

#[test]
fn bounding_box_matches_pipe_envelope() {
    let h = mock_pipe();
    let pipe = h.fitting("pipe").unwrap();
    let expected = Aabb {
        min: [-15.0, -15.0, 0.0],
        max: [15.0, 15.0, 1000.0],
    };
    let result = check_bounding_box(h.introspect(), pipe.handles(), &expected, 1e-9);
    assert!(result.passed, "{}", result.detail);

    let too_short = Aabb {
        max: [15.0, 15.0, 900.0],
        ..expected
    };
    let result = check_bounding_box(h.introspect(), pipe.handles(), &too_short, 1e-9);
    assert!(!result.passed);
    assert!((result.value.unwrap() - 100.0).abs() < 1e-9);
}

// ── Arena Oracle Tests ──────────────────────────────────────────────────

#[test]
fn built_pipe_is_solid_and_alone() {
    let h = mock_pipe();
    let pipe = h.fitting("pipe").unwrap();
    assert!(check_solidified(h.introspect(), pipe).passed);
    assert!(check_no_leftovers(h.introspect(), &[pipe]).passed);
}

#[test]
fn leftovers_are_detected() {
    let h = mock_pipe();
    let result = check_no_leftovers(h.introspect(), &[]);
    assert!(!result.passed);
    assert_eq!(result.value, Some(1.0));
}
