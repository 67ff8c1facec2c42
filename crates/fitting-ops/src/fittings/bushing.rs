use std::f64::consts::PI;

use fitting_types::{Axis, BossShape, FittingKind, Placement};

use crate::builder::FittingBuilder;
use crate::primitive::ConstructionPrimitive;
use crate::types::FittingError;
use crate::validate::{Dims, Rules};

/// Reducing bushing along +Z: a spigot of diameter `POD` with a wrench boss
/// at the top and a `POD1` socket sunk into the boss end.
#[derive(Debug, Clone, PartialEq)]
pub struct Bushing {
    pub boss: BossShape,
    pub pod: f64,
    pub pid: f64,
    pub pod1: f64,
    pub pid1: f64,
    pub l: f64,
    pub n: f64,
    pub x: f64,
    pub g: f64,
}

impl Bushing {
    pub fn from_dims(d: &Dims<'_>, boss: BossShape) -> Result<Self, FittingError> {
        Ok(Self {
            boss,
            pod: d.length("POD")?,
            pid: d.length("PID")?,
            pod1: d.length("POD1")?,
            pid1: d.length("PID1")?,
            l: d.length("L")?,
            n: d.length("N")?,
            x: d.length("X")?,
            g: d.length("G")?,
        })
    }

    /// Length of the 45° cone between the two bores.
    fn cone_len(&self) -> f64 {
        (self.pid - self.pid1) / 2.0
    }

    /// Boxes whose intersection is the boss prism, across flats `X`.
    fn boss_boxes(&self) -> Vec<ConstructionPrimitive> {
        const HEXAGON: [f64; 3] = [0.0, PI / 3.0, 2.0 * PI / 3.0];
        const OCTAGON: [f64; 2] = [0.0, PI / 4.0];
        let (angles, length): (&[f64], f64) = match self.boss {
            BossShape::Hexagon => (&HEXAGON[..], 2.0 * self.x),
            BossShape::Octagon => (&OCTAGON[..], self.x),
        };
        let width = self.x;
        angles
            .iter()
            .map(|&theta| {
                let placement = Placement::at([0.0, 0.0, self.l - self.n])
                    .rotated(Axis::Z, theta)
                    .compose(&Placement::at([-length / 2.0, -width / 2.0, 0.0]));
                ConstructionPrimitive::cuboid(length, width, self.n, placement)
            })
            .collect()
    }
}

impl FittingBuilder for Bushing {
    fn kind(&self) -> FittingKind {
        FittingKind::Bushing { boss: self.boss }
    }

    fn validate(&self) -> Result<(), FittingError> {
        let rules = Rules::new(self.kind());
        rules.all_positive(&[
            ("POD", self.pod),
            ("PID", self.pid),
            ("POD1", self.pod1),
            ("PID1", self.pid1),
            ("X", self.x),
        ])?;
        rules.greater(("POD", self.pod), ("PID", self.pid))?;
        rules.greater(("PID", self.pid), ("PID1", self.pid1))?;
        rules.greater(("POD1", self.pod1), ("PID1", self.pid1))?;
        rules.greater(("POD", self.pod), ("POD1", self.pod1))?;
        rules.greater(("X", self.x), ("POD", self.pod))?;
        rules.inset(("N", self.n), ("L", self.l))?;
        rules.inset(("G", self.g), ("L", self.l))?;
        let below = self.l - self.g - self.cone_len();
        rules.check(below > 0.0, || {
            format!(
                "large bore and cone do not fit below the socket: L - G - (PID - PID1)/2 = {:.4}",
                below
            )
        })
    }

    fn build_outer(&self) -> Vec<ConstructionPrimitive> {
        vec![
            ConstructionPrimitive::cylinder(self.pod / 2.0, self.l, Placement::identity()),
            ConstructionPrimitive::intersection(self.boss_boxes()),
        ]
    }

    fn build_inner(&self) -> Vec<ConstructionPrimitive> {
        let large = self.l - self.g - self.cone_len();
        vec![
            ConstructionPrimitive::cylinder(self.pid / 2.0, large, Placement::identity())
                .open_start(),
            ConstructionPrimitive::cone(
                self.pid / 2.0,
                self.pid1 / 2.0,
                self.cone_len(),
                Placement::at([0.0, 0.0, large]),
            )
            .open_end(),
            ConstructionPrimitive::cylinder(self.pid1 / 2.0, self.l, Placement::identity())
                .open_both(),
        ]
    }

    fn socket_cutouts(&self) -> Vec<ConstructionPrimitive> {
        vec![ConstructionPrimitive::cylinder(
            self.pod1 / 2.0,
            self.g,
            Placement::at([0.0, 0.0, self.l - self.g]),
        )
        .open_end()]
    }
}
