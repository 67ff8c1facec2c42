//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a test collect all failures in one pass.

use fitting_ops::FittingSolid;
use geom_kernel::{Aabb, KernelIntrospect, KernelSolidHandle, ShapeKind};

use crate::helpers::ring_points;

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

// ── Point Oracles ───────────────────────────────────────────────────────────

fn classify(
    introspect: &dyn KernelIntrospect,
    solids: &[KernelSolidHandle],
    p: [f64; 3],
) -> Result<bool, String> {
    for solid in solids {
        match introspect.contains_point(solid, p) {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(e) => return Err(e.to_string()),
        }
    }
    Ok(false)
}

/// Check that `p` lies in material of any of `solids`.
pub fn check_point_inside(
    introspect: &dyn KernelIntrospect,
    solids: &[KernelSolidHandle],
    p: [f64; 3],
) -> OracleVerdict {
    match classify(introspect, solids, p) {
        Ok(true) => OracleVerdict::pass("point_inside", format!("{:?} is material", p)),
        Ok(false) => OracleVerdict::fail("point_inside", format!("{:?} is empty", p)),
        Err(e) => OracleVerdict::fail("point_inside", format!("query at {:?} failed: {}", p, e)),
    }
}

/// Check that `p` lies outside every one of `solids`.
pub fn check_point_outside(
    introspect: &dyn KernelIntrospect,
    solids: &[KernelSolidHandle],
    p: [f64; 3],
) -> OracleVerdict {
    match classify(introspect, solids, p) {
        Ok(false) => OracleVerdict::pass("point_outside", format!("{:?} is empty", p)),
        Ok(true) => OracleVerdict::fail("point_outside", format!("{:?} is material", p)),
        Err(e) => OracleVerdict::fail("point_outside", format!("query at {:?} failed: {}", p, e)),
    }
}

/// Check a tube cross-section: empty just inside `inner`, material in the
/// middle of the wall, empty just outside `outer`. Eight samples per ring.
pub fn check_annulus(
    introspect: &dyn KernelIntrospect,
    solids: &[KernelSolidHandle],
    center: [f64; 3],
    axis: [f64; 3],
    inner: f64,
    outer: f64,
) -> OracleVerdict {
    let name = "annulus";
    let slack = 0.02 * (outer - inner);
    let mut rings = vec![((inner + outer) / 2.0, true), (outer + slack, false)];
    if inner > slack {
        rings.push((inner - slack, false));
    }

    let mut wrong = Vec::new();
    for (radius, material) in rings {
        for p in ring_points(center, axis, radius, 8) {
            match classify(introspect, solids, p) {
                Ok(found) if found == material => {}
                Ok(found) => wrong.push(format!(
                    "r={:.3} at {:?}: expected {}, got {}",
                    radius,
                    p,
                    if material { "material" } else { "empty" },
                    if found { "material" } else { "empty" }
                )),
                Err(e) => {
                    return OracleVerdict::fail(name, format!("query at {:?} failed: {}", p, e))
                }
            }
        }
    }

    if wrong.is_empty() {
        OracleVerdict::pass(
            name,
            format!("wall between r={:.3} and r={:.3} around {:?}", inner, outer, center),
        )
    } else {
        OracleVerdict::fail(
            name,
            format!(
                "{} wrong samples: {:?}",
                wrong.len(),
                &wrong[..wrong.len().min(3)]
            ),
        )
        .with_value(wrong.len() as f64)
    }
}

// ── Bounding Box Oracles ────────────────────────────────────────────────────

/// Union of the bounding boxes of `solids`, if every one is computed.
pub fn combined_bounds(
    introspect: &dyn KernelIntrospect,
    solids: &[KernelSolidHandle],
) -> Option<Aabb> {
    solids.iter().try_fold(Aabb::empty(), |acc, s| {
        introspect.bounding_box(s).map(|b| acc.union(&b))
    })
}

/// Check that the combined bounds match `expected` within `tol` per face.
pub fn check_bounding_box(
    introspect: &dyn KernelIntrospect,
    solids: &[KernelSolidHandle],
    expected: &Aabb,
    tol: f64,
) -> OracleVerdict {
    let name = "bounding_box";
    let Some(actual) = combined_bounds(introspect, solids) else {
        return OracleVerdict::fail(name, "bounds unavailable (uncomputed shape)".to_string());
    };
    let mut worst: f64 = 0.0;
    for i in 0..3 {
        worst = worst
            .max((actual.min[i] - expected.min[i]).abs())
            .max((actual.max[i] - expected.max[i]).abs());
    }
    let detail = format!(
        "actual {:?}..{:?}, expected {:?}..{:?}",
        actual.min, actual.max, expected.min, expected.max
    );
    if worst <= tol {
        OracleVerdict::pass(name, detail).with_value(worst)
    } else {
        OracleVerdict::fail(name, format!("{} (off by {:.4}, tol={})", detail, worst, tol))
            .with_value(worst)
    }
}

// ── Arena Oracles ───────────────────────────────────────────────────────────

/// Check that every body of `fitting` is a solid.
pub fn check_solidified(introspect: &dyn KernelIntrospect, fitting: &FittingSolid) -> OracleVerdict {
    let name = "solidified";
    if !fitting.solidified {
        return OracleVerdict::fail(name, format!("{} was not solidified", fitting.kind));
    }
    let bad: Vec<(u64, Option<ShapeKind>)> = fitting
        .handles()
        .iter()
        .map(|h| (h.raw(), introspect.shape_kind(h)))
        .filter(|(_, kind)| *kind != Some(ShapeKind::Solid))
        .collect();
    if bad.is_empty() {
        OracleVerdict::pass(name, format!("{} solid bodies", fitting.handles().len()))
    } else {
        OracleVerdict::fail(name, format!("bodies that are not solids: {:?}", bad))
    }
}

/// Check that the kernel holds exactly the bodies of `fittings` and nothing
/// else: no construction leftovers.
pub fn check_no_leftovers(
    introspect: &dyn KernelIntrospect,
    fittings: &[&FittingSolid],
) -> OracleVerdict {
    let name = "no_leftovers";
    let expected: usize = fittings.iter().map(|f| f.handles().len()).sum();
    let missing = fittings
        .iter()
        .flat_map(|f| f.handles())
        .filter(|h| !introspect.contains(h))
        .count();
    let actual = introspect.shape_count();
    if actual == expected && missing == 0 {
        OracleVerdict::pass(name, format!("kernel holds the {} result bodies", actual))
            .with_value(actual as f64)
    } else {
        OracleVerdict::fail(
            name,
            format!(
                "kernel holds {} shapes, expected {} ({} result bodies missing)",
                actual, expected, missing
            ),
        )
        .with_value(actual as f64)
    }
}
