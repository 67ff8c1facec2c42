use std::f64::consts::PI;

use fitting_types::{Axis, FittingKind, Placement};

use crate::builder::FittingBuilder;
use crate::primitive::ConstructionPrimitive;
use crate::sweep_path::{elbow_path, ElbowPath};
use crate::types::FittingError;
use crate::validate::{Dims, Rules};

/// Bent tube: straight run up the -Z axis to the origin, bend of radius `r`
/// through `alpha` about +Y, straight run to the far end. Both straight
/// runs are `h` long.
#[derive(Debug, Clone, PartialEq)]
pub struct ElbowAlpha {
    /// Radians.
    pub alpha: f64,
    pub m: f64,
    pub pod: f64,
    pub pid: f64,
    pub g: f64,
    pub h: f64,
    pub r: f64,
}

impl ElbowAlpha {
    pub fn from_dims(d: &Dims<'_>) -> Result<Self, FittingError> {
        Ok(Self {
            alpha: d.angle("alpha")?,
            m: d.length("M")?,
            pod: d.length("POD")?,
            pid: d.length("PID")?,
            g: d.length("G")?,
            h: d.length("H")?,
            r: d.length("R")?,
        })
    }

    pub fn path(&self) -> ElbowPath {
        elbow_path(self.h, self.r, self.alpha, self.h)
    }
}

impl FittingBuilder for ElbowAlpha {
    fn kind(&self) -> FittingKind {
        FittingKind::ElbowAlpha
    }

    fn validate(&self) -> Result<(), FittingError> {
        let rules = Rules::new(self.kind());
        let deg = self.alpha.to_degrees();
        rules.check(self.alpha > 0.0 && self.alpha <= PI + 1e-12, || {
            format!("alpha ({:.4}°) must lie in (0°, 180°]", deg)
        })?;
        rules.all_positive(&[("M", self.m), ("POD", self.pod), ("PID", self.pid)])?;
        rules.wall_order(("M", self.m), ("POD", self.pod), ("PID", self.pid))?;
        rules.inset(("G", self.g), ("H", self.h))?;
        rules.greater(("R", self.r), ("M/2", self.m / 2.0))
    }

    fn build_outer(&self) -> Vec<ConstructionPrimitive> {
        vec![ConstructionPrimitive::swept(self.m / 2.0, self.path().path)]
    }

    fn build_inner(&self) -> Vec<ConstructionPrimitive> {
        vec![ConstructionPrimitive::swept(self.pid / 2.0, self.path().path).open_both()]
    }

    fn socket_cutouts(&self) -> Vec<ConstructionPrimitive> {
        let depth = self.h - self.g;
        let radius = self.pod / 2.0;
        let near = ConstructionPrimitive::cylinder(
            radius,
            depth,
            Placement::at([0.0, 0.0, -self.h]),
        )
        .open_start();

        let ElbowPath {
            bend_end, far_dir, ..
        } = self.path();
        let origin = [
            bend_end[0] + far_dir[0] * self.g,
            bend_end[1] + far_dir[1] * self.g,
            bend_end[2] + far_dir[2] * self.g,
        ];
        let far = ConstructionPrimitive::cylinder(
            radius,
            depth,
            Placement::at(origin).rotated(Axis::Y, self.alpha),
        )
        .open_end();
        vec![near, far]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn elbow(alpha_deg: f64) -> ElbowAlpha {
        ElbowAlpha {
            alpha: alpha_deg.to_radians(),
            m: 30.0,
            pod: 20.0,
            pid: 10.0,
            g: 10.0,
            h: 30.0,
            r: 30.0,
        }
    }

    #[test]
    fn bend_angle_bounds() {
        assert!(elbow(0.0).validate().is_err());
        assert!(elbow(-10.0).validate().is_err());
        assert!(elbow(180.5).validate().is_err());
        assert!(elbow(180.0).validate().is_ok());
        assert!(elbow(0.5).validate().is_ok());
    }

    #[test]
    fn far_socket_is_coaxial_with_far_run() {
        let e = elbow(60.0);
        let far = &e.socket_cutouts()[1];
        let path = e.path();
        let axis = far.placement.rotate_vector([0.0, 0.0, 1.0]);
        for i in 0..3 {
            assert_abs_diff_eq!(axis[i], path.far_dir[i], epsilon = 1e-12);
        }
        // Socket mouth sits on the far end of the run.
        let mouth = far.placement.apply_point([0.0, 0.0, e.h - e.g]);
        for i in 0..3 {
            assert_abs_diff_eq!(mouth[i], path.far_end[i], epsilon = 1e-9);
        }
    }
}
