//! Axial socket shift for reducing couplings.

/// Signed shift `a1` applied to the sockets of a reducing coupling.
///
/// The first socket is lengthened by `a1` and the second shortened by the
/// same amount before the transition cone is placed, which keeps the wall at
/// the cone–cylinder junctions from thinning below the straight sockets.
/// This is a catalog-compatible heuristic and certifies no minimum wall.
pub fn taper_shift(m: f64, m1: f64, pod: f64, pod1: f64, n: f64) -> f64 {
    let a2 = (m - pod).max(m1 - pod1) / 2.0;
    let dx = pod - pod1;
    a2 * dx / (4.0 * n * n + dx * dx).sqrt()
}
