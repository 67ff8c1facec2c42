//! Helper functions: error type and sample-point geometry.

use fitting_engine::EngineError;
use geom_kernel::KernelError;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("fitting not found: {name}")]
    FittingNotFound { name: String },

    #[error("duplicate name: {name}")]
    DuplicateName { name: String },

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("kernel query failed: {0}")]
    Kernel(#[from] KernelError),

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },
}

// ── Units ───────────────────────────────────────────────────────────────────

/// Inches to millimetres.
pub fn inch(value: f64) -> f64 {
    value * 25.4
}

/// Scale every coordinate of an inch point to millimetres.
pub fn inch_point(p: [f64; 3]) -> [f64; 3] {
    p.map(inch)
}

// ── Sample Points ───────────────────────────────────────────────────────────

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let n = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / n, v[1] / n, v[2] / n]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Two unit vectors spanning the plane normal to `axis`.
pub fn normal_frame(axis: [f64; 3]) -> ([f64; 3], [f64; 3]) {
    let a = normalize(axis);
    let seed = if a[0].abs() < 0.9 {
        [1.0, 0.0, 0.0]
    } else {
        [0.0, 1.0, 0.0]
    };
    let u = normalize(cross(a, seed));
    let v = cross(a, u);
    (u, v)
}

/// `count` points evenly spaced on the circle of `radius` around `axis`
/// through `center`.
pub fn ring_points(center: [f64; 3], axis: [f64; 3], radius: f64, count: usize) -> Vec<[f64; 3]> {
    let (u, v) = normal_frame(axis);
    (0..count)
        .map(|i| {
            let t = std::f64::consts::TAU * i as f64 / count as f64;
            let (s, c) = t.sin_cos();
            [
                center[0] + radius * (c * u[0] + s * v[0]),
                center[1] + radius * (c * u[1] + s * v[1]),
                center[2] + radius * (c * u[2] + s * v[2]),
            ]
        })
        .collect()
}
