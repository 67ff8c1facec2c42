use fitting_types::{Direction, FittingKind};

use super::{leg, socket};
use crate::builder::FittingBuilder;
use crate::primitive::ConstructionPrimitive;
use crate::types::FittingError;
use crate::validate::{Dims, Rules};

const LEGS: [Direction; 2] = [Direction::PosX, Direction::PosZ];

/// 90° elbow with legs along +X and +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Elbow90 {
    pub m: f64,
    pub pod: f64,
    pub pid: f64,
    pub g: f64,
    pub h: f64,
}

impl Elbow90 {
    pub fn from_dims(d: &Dims<'_>) -> Result<Self, FittingError> {
        Ok(Self {
            m: d.length("M")?,
            pod: d.length("POD")?,
            pid: d.length("PID")?,
            g: d.length("G")?,
            h: d.length("H")?,
        })
    }
}

impl FittingBuilder for Elbow90 {
    fn kind(&self) -> FittingKind {
        FittingKind::Elbow90
    }

    fn validate(&self) -> Result<(), FittingError> {
        let rules = Rules::new(self.kind());
        rules.all_positive(&[("M", self.m), ("POD", self.pod), ("PID", self.pid)])?;
        rules.wall_order(("M", self.m), ("POD", self.pod), ("PID", self.pid))?;
        rules.inset(("G", self.g), ("H", self.h))?;
        rules.greater(("H", self.h), ("M/2", self.m / 2.0))
    }

    fn build_outer(&self) -> Vec<ConstructionPrimitive> {
        let r = self.m / 2.0;
        LEGS.iter().map(|&dir| leg(r, dir, -r, self.h)).collect()
    }

    fn build_inner(&self) -> Vec<ConstructionPrimitive> {
        let r = self.pid / 2.0;
        LEGS.iter()
            .map(|&dir| leg(r, dir, -r, self.h).open_end())
            .collect()
    }

    fn socket_cutouts(&self) -> Vec<ConstructionPrimitive> {
        LEGS.iter()
            .map(|&dir| socket(self.pod, dir, self.g, self.h))
            .collect()
    }
}
