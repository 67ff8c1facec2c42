//! Line–arc–line centreline of the arbitrary-angle elbow.

use geom_kernel::{PathSegment, SweepPath};

/// Centreline plus the points the socket placement needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ElbowPath {
    pub path: SweepPath,
    /// Far tangent point of the arc, `(x1, 0, z1)`.
    pub bend_end: [f64; 3],
    /// Unit direction of the far straight run.
    pub far_dir: [f64; 3],
    /// End of the far straight run, `(x2, 0, z2)`.
    pub far_end: [f64; 3],
}

/// Path in the XZ plane: a straight run of `len1` along +Z ending at the
/// origin, an arc of radius `r_bent` about +Y through `alpha` radians, and a
/// straight run of `len2` tangent to the arc's far end.
pub fn elbow_path(len1: f64, r_bent: f64, alpha: f64, len2: f64) -> ElbowPath {
    let (sin_a, cos_a) = alpha.sin_cos();
    let x1 = (1.0 - cos_a) * r_bent;
    let z1 = sin_a * r_bent;
    let half_pi = std::f64::consts::FRAC_PI_2;
    let x2 = x1 + (half_pi - alpha).cos() * len2;
    let z2 = z1 + (half_pi - alpha).sin() * len2;

    let bend_end = [x1, 0.0, z1];
    let far_end = [x2, 0.0, z2];
    let path = SweepPath::new(vec![
        PathSegment::Line {
            start: [0.0, 0.0, -len1],
            end: [0.0, 0.0, 0.0],
        },
        PathSegment::Arc {
            center: [r_bent, 0.0, 0.0],
            axis: [0.0, 1.0, 0.0],
            start: [0.0, 0.0, 0.0],
            angle: alpha,
        },
        PathSegment::Line {
            start: bend_end,
            end: far_end,
        },
    ]);
    ElbowPath {
        path,
        bend_end,
        far_dir: [sin_a, 0.0, cos_a],
        far_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn path_is_connected_for_any_bend() {
        for deg in [1.0, 30.0, 45.0, 90.0, 135.0, 180.0] {
            let p = elbow_path(40.0, 25.0, f64::to_radians(deg), 40.0);
            assert!(p.path.is_connected(1e-9), "{} deg path broken", deg);
        }
    }

    #[test]
    fn right_angle_bend() {
        let p = elbow_path(10.0, 5.0, FRAC_PI_2, 10.0);
        assert_abs_diff_eq!(p.bend_end[0], 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.bend_end[2], 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.far_end[0], 15.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.far_end[2], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn half_turn_is_a_real_arc() {
        let p = elbow_path(10.0, 5.0, PI, 10.0);
        assert_abs_diff_eq!(p.bend_end[0], 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.bend_end[2], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.far_dir[2], -1.0, epsilon = 1e-12);
        let PathSegment::Arc { angle, .. } = p.path.segments[1] else {
            panic!("middle segment is the arc");
        };
        assert_eq!(angle, PI);
    }
}
