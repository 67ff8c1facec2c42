use fitting_types::{FittingKind, Placement};

use crate::builder::FittingBuilder;
use crate::primitive::ConstructionPrimitive;
use crate::taper::taper_shift;
use crate::types::FittingError;
use crate::validate::{Dims, Rules};

/// Straight or reducing coupling along +Z, `L` long with an `N` long middle.
#[derive(Debug, Clone, PartialEq)]
pub struct Coupling {
    pub m: f64,
    pub m1: f64,
    pub pod: f64,
    pub pod1: f64,
    pub pid: f64,
    pub pid1: f64,
    pub l: f64,
    pub n: f64,
}

fn at_z(z: f64) -> Placement {
    Placement::at([0.0, 0.0, z])
}

impl Coupling {
    pub fn from_dims(d: &Dims<'_>) -> Result<Self, FittingError> {
        Ok(Self {
            m: d.length("M")?,
            m1: d.length("M1")?,
            pod: d.length("POD")?,
            pod1: d.length("POD1")?,
            pid: d.length("PID")?,
            pid1: d.length("PID1")?,
            l: d.length("L")?,
            n: d.length("N")?,
        })
    }

    /// Any of the paired diameters differ.
    pub fn is_reducing(&self) -> bool {
        self.m != self.m1 || self.pod != self.pod1 || self.pid != self.pid1
    }

    /// Straight socket length before the taper shift.
    pub fn socket_len(&self) -> f64 {
        (self.l - self.n) / 2.0
    }

    pub fn shift(&self) -> f64 {
        if self.is_reducing() {
            taper_shift(self.m, self.m1, self.pod, self.pod1, self.n)
        } else {
            0.0
        }
    }

    /// Outer body radius of a reducing coupling at height `z`.
    fn outer_radius(&self, z: f64) -> f64 {
        profile(z, self.socket_len(), self.n, self.m / 2.0, self.m1 / 2.0)
    }

    /// Radius of the socket-cone-socket cavity at height `z`.
    fn cavity_radius(&self, z: f64) -> f64 {
        let start = self.socket_len() + self.shift();
        profile(z, start, self.n, self.pod / 2.0, self.pod1 / 2.0)
    }
}

/// `r0` below `start`, `r1` above `start + len`, linear in between.
fn profile(z: f64, start: f64, len: f64, r0: f64, r1: f64) -> f64 {
    let t = ((z - start) / len).clamp(0.0, 1.0);
    r0 + (r1 - r0) * t
}

impl FittingBuilder for Coupling {
    fn kind(&self) -> FittingKind {
        FittingKind::Coupling
    }

    fn validate(&self) -> Result<(), FittingError> {
        let rules = Rules::new(self.kind());
        rules.all_positive(&[
            ("M", self.m),
            ("M1", self.m1),
            ("POD", self.pod),
            ("POD1", self.pod1),
            ("PID", self.pid),
            ("PID1", self.pid1),
            ("L", self.l),
        ])?;
        rules.wall_order(("M", self.m), ("POD", self.pod), ("PID", self.pid))?;
        rules.wall_order(("M1", self.m1), ("POD1", self.pod1), ("PID1", self.pid1))?;
        rules.greater(("L", self.l), ("N", self.n))?;
        if !self.is_reducing() {
            return rules.check(self.n >= 0.0, || format!("N ({:.4}) must not be negative", self.n));
        }

        rules.positive(("N", self.n))?;
        let a1 = self.shift();
        rules.check(a1.abs() < self.n / 2.0, || {
            format!("taper shift |a1| ({:.4}) must stay below N/2 ({:.4})", a1.abs(), self.n / 2.0)
        })?;
        let s = self.socket_len();
        rules.check(s - a1.abs() > 0.0, || {
            format!("shifted socket length ({:.4}) must stay positive", s - a1.abs())
        })?;
        // Both radius profiles are piecewise linear, so their kinks bound the wall.
        for z in [s, s + a1, s + self.n, s + self.n + a1] {
            let (outer, cavity) = (self.outer_radius(z), self.cavity_radius(z));
            rules.check(cavity < outer, || {
                format!(
                    "cavity radius ({:.4}) reaches the outer surface ({:.4}) at z = {:.4}",
                    cavity, outer, z
                )
            })?;
        }
        Ok(())
    }

    fn build_outer(&self) -> Vec<ConstructionPrimitive> {
        if !self.is_reducing() {
            return vec![ConstructionPrimitive::cylinder(
                self.m / 2.0,
                self.l,
                Placement::identity(),
            )];
        }
        let s = self.socket_len();
        vec![
            ConstructionPrimitive::cylinder(self.m / 2.0, s, at_z(0.0)),
            ConstructionPrimitive::cone(self.m / 2.0, self.m1 / 2.0, self.n, at_z(s)),
            ConstructionPrimitive::cylinder(self.m1 / 2.0, s, at_z(s + self.n)),
        ]
    }

    /// Through bore when straight, the transition cone when reducing.
    fn build_inner(&self) -> Vec<ConstructionPrimitive> {
        if !self.is_reducing() {
            return vec![ConstructionPrimitive::cylinder(
                self.pid / 2.0,
                self.l,
                Placement::identity(),
            )
            .open_both()];
        }
        let (r1, r2) = (self.pod / 2.0, self.pod1 / 2.0);
        let cone = ConstructionPrimitive::cone(r1, r2, self.n, at_z(self.socket_len() + self.shift()));
        // Grow only the narrowing end.
        vec![if r2 < r1 { cone.open_end() } else { cone.open_start() }]
    }

    fn socket_cutouts(&self) -> Vec<ConstructionPrimitive> {
        let s = self.socket_len();
        let a1 = self.shift();
        let first = s + a1;
        let second = s - a1;
        vec![
            ConstructionPrimitive::cylinder(self.pod / 2.0, first, at_z(0.0)).open_start(),
            ConstructionPrimitive::cylinder(self.pod1 / 2.0, second, at_z(self.l - second))
                .open_end(),
        ]
    }
}
