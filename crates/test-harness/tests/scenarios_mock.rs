//! Fitting scenarios against MockKernel.
//!
//! Every scenario goes through the engine, then samples the result with the
//! point and bounding-box oracles and checks that no construction shapes
//! were left in the kernel.

use fitting_types::{BossShape, FittingKind, FittingSpec, Quantity};
use geom_kernel::Aabb;
use test_harness::helpers::{inch, inch_point};
use test_harness::FittingHarness;

fn inch_box(min: [f64; 3], max: [f64; 3]) -> Aabb {
    Aabb {
        min: inch_point(min),
        max: inch_point(max),
    }
}

// ── Scenario 1: Pipe ────────────────────────────────────────────────────

#[test]
fn test_pipe_wall_and_envelope() {
    let mut h = FittingHarness::mock();
    h.build_kind("pipe", FittingKind::Pipe).unwrap();

    for z in [1.0, 500.0, 999.0] {
        h.assert_annulus("pipe", [0.0, 0.0, z], [0.0, 0.0, 1.0], 10.0, 15.0)
            .unwrap();
    }
    h.assert_outside("pipe", [0.0, 0.0, 0.0]).unwrap();
    h.assert_outside("pipe", [0.0, 0.0, 1000.0]).unwrap();
    h.assert_bounding_box(
        "pipe",
        Aabb {
            min: [-15.0, -15.0, 0.0],
            max: [15.0, 15.0, 1000.0],
        },
        1e-9,
    )
    .unwrap();
    h.assert_clean().unwrap();
}

// ── Scenario 2: Tee ─────────────────────────────────────────────────────

#[test]
fn test_tee_sockets() {
    let mut h = FittingHarness::mock();
    h.build_kind("tee", FittingKind::Tee).unwrap();

    // Run sockets: POD 3 in inside an M 5 in body.
    h.assert_annulus("tee", inch_point([-3.5, 0.0, 0.0]), [1.0, 0.0, 0.0], inch(1.5), inch(2.5))
        .unwrap();
    h.assert_annulus("tee", inch_point([4.0, 0.0, 0.0]), [1.0, 0.0, 0.0], inch(1.5), inch(2.5))
        .unwrap();
    // Between the sockets only the PID bore is open.
    h.assert_annulus("tee", inch_point([2.5, 0.0, 0.0]), [1.0, 0.0, 0.0], inch(1.0), inch(2.5))
        .unwrap();
    // Branch socket: POD1 2 in inside an M1 4 in body.
    h.assert_annulus("tee", inch_point([0.0, 0.0, 4.5]), [0.0, 0.0, 1.0], inch(1.0), inch(2.0))
        .unwrap();
    // Branch bore meets the run bore.
    h.assert_outside("tee", inch_point([0.0, 0.0, 1.5])).unwrap();

    h.assert_bounding_box("tee", inch_box([-4.0, -2.5, -2.5], [5.0, 2.5, 6.0]), 1e-6)
        .unwrap();
    h.assert_clean().unwrap();
}

// ── Scenario 3: Cross ───────────────────────────────────────────────────

#[test]
fn test_cross_four_open_sockets() {
    let mut h = FittingHarness::mock();
    h.build_kind("cross", FittingKind::Cross).unwrap();

    for x in [-3.5, 3.5] {
        h.assert_annulus("cross", inch_point([x, 0.0, 0.0]), [1.0, 0.0, 0.0], inch(1.5), inch(2.5))
            .unwrap();
    }
    for z in [-4.0, 4.0] {
        h.assert_annulus("cross", inch_point([0.0, 0.0, z]), [0.0, 0.0, 1.0], inch(1.0), inch(2.0))
            .unwrap();
    }
    h.assert_bounding_box("cross", inch_box([-4.0, -2.5, -5.0], [4.0, 2.5, 5.0]), 1e-6)
        .unwrap();
    h.assert_clean().unwrap();
}

// ── Scenario 4: Elbows ──────────────────────────────────────────────────

#[test]
fn test_elbow90_sockets_and_heel() {
    let mut h = FittingHarness::mock();
    h.build_kind("elbow", FittingKind::Elbow90).unwrap();

    h.assert_annulus("elbow", [20.0, 0.0, 0.0], [1.0, 0.0, 0.0], 10.0, 15.0)
        .unwrap();
    h.assert_annulus("elbow", [0.0, 0.0, 20.0], [0.0, 0.0, 1.0], 10.0, 15.0)
        .unwrap();
    // The heel behind the corner stays closed.
    h.assert_inside("elbow", [-10.0, 0.0, 0.0]).unwrap();
    h.assert_inside("elbow", [0.0, 0.0, -10.0]).unwrap();
    h.assert_bounding_box(
        "elbow",
        Aabb {
            min: [-15.0, -15.0, -15.0],
            max: [30.0, 15.0, 30.0],
        },
        1e-9,
    )
    .unwrap();
    h.assert_clean().unwrap();
}

#[test]
fn test_elbow_alpha_angles() {
    let mut h = FittingHarness::mock();
    for deg in [30.0, 60.0, 135.0] {
        let mut spec = FittingSpec::with_defaults(FittingKind::ElbowAlpha);
        spec.dims.insert("alpha", Quantity::deg(deg));
        h.build(&format!("elbow-{deg}"), &spec).unwrap();
    }
    assert_eq!(h.shape_count(), 3);
    h.assert_clean().unwrap();
}

// ── Scenario 5: Coupling and bushings ───────────────────────────────────

#[test]
fn test_reducing_coupling_envelope() {
    let mut h = FittingHarness::mock();
    h.build_kind("coupling", FittingKind::Coupling).unwrap();

    h.assert_outside("coupling", [0.0, 0.0, 40.0]).unwrap();
    h.assert_bounding_box(
        "coupling",
        Aabb {
            min: [-20.0, -20.0, 0.0],
            max: [20.0, 20.0, 80.0],
        },
        1e-9,
    )
    .unwrap();
    h.assert_clean().unwrap();
}

#[test]
fn test_both_bushing_bosses() {
    let mut h = FittingHarness::mock();
    h.build_kind("hex", FittingKind::Bushing { boss: BossShape::Hexagon })
        .unwrap();
    h.build_kind("oct", FittingKind::Bushing { boss: BossShape::Octagon })
        .unwrap();
    for name in ["hex", "oct"] {
        h.assert_outside(name, [0.0, 0.0, 1.0]).unwrap();
    }
    assert_eq!(h.shape_count(), 2);
    h.assert_clean().unwrap();
}

// ── Scenario 6: Frame box ───────────────────────────────────────────────

#[test]
fn test_frame_box_parts() {
    let mut h = FittingHarness::mock();
    let frame = h.build_kind("frame", FittingKind::FrameBox).unwrap();
    assert_eq!(frame.handles().len(), 20);

    // Pipes along each axis, halfway along an edge.
    h.assert_inside("frame", [250.0, 7.0, 0.0]).unwrap();
    h.assert_inside("frame", [0.0, 150.0, 7.0]).unwrap();
    h.assert_inside("frame", [7.0, 0.0, 100.0]).unwrap();
    // Box interior is empty.
    h.assert_outside("frame", [250.0, 150.0, 100.0]).unwrap();

    h.assert_bounding_box(
        "frame",
        Aabb {
            min: [-15.0, -15.0, -15.0],
            max: [515.0, 315.0, 215.0],
        },
        1e-6,
    )
    .unwrap();
    h.assert_clean().unwrap();
}

// ── Scenario 7: Mixed session ───────────────────────────────────────────

#[test]
fn test_every_kind_in_one_kernel() {
    let mut h = FittingHarness::mock();
    let mut expected = 0;
    for kind in FittingKind::ALL {
        let fitting = h.build_kind(&kind.to_string(), kind).unwrap();
        expected += fitting.handles().len();
    }
    assert_eq!(h.shape_count(), expected);
    assert_eq!(h.history().len(), FittingKind::ALL.len());
    h.assert_clean().unwrap();
}
