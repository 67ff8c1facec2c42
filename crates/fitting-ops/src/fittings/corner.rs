use fitting_types::{Direction, FittingKind, Placement};

use super::{leg, socket};
use crate::builder::FittingBuilder;
use crate::primitive::ConstructionPrimitive;
use crate::types::FittingError;
use crate::validate::{Dims, Rules};

const LEGS: [Direction; 3] = [Direction::PosX, Direction::PosY, Direction::PosZ];

/// Three-way corner with legs along +X, +Y and +Z and a ball at the centre.
#[derive(Debug, Clone, PartialEq)]
pub struct OuterCorner {
    pub m: f64,
    pub pod: f64,
    pub pid: f64,
    pub g: f64,
    pub h: f64,
}

impl OuterCorner {
    pub fn from_dims(d: &Dims<'_>) -> Result<Self, FittingError> {
        Ok(Self {
            m: d.length("M")?,
            pod: d.length("POD")?,
            pid: d.length("PID")?,
            g: d.length("G")?,
            h: d.length("H")?,
        })
    }

    pub(crate) fn check(&self, rules: &Rules) -> Result<(), FittingError> {
        rules.all_positive(&[("M", self.m), ("POD", self.pod), ("PID", self.pid)])?;
        rules.wall_order(("M", self.m), ("POD", self.pod), ("PID", self.pid))?;
        rules.inset(("G", self.g), ("H", self.h))?;
        rules.greater(("H", self.h), ("M/2", self.m / 2.0))
    }

    fn star(&self, radius: f64) -> Vec<ConstructionPrimitive> {
        LEGS.iter()
            .map(|&dir| leg(radius, dir, 0.0, self.h))
            .chain(std::iter::once(ConstructionPrimitive::sphere(
                radius,
                Placement::identity(),
            )))
            .collect()
    }
}

impl FittingBuilder for OuterCorner {
    fn kind(&self) -> FittingKind {
        FittingKind::OuterCorner
    }

    fn validate(&self) -> Result<(), FittingError> {
        self.check(&Rules::new(self.kind()))
    }

    fn build_outer(&self) -> Vec<ConstructionPrimitive> {
        self.star(self.m / 2.0)
    }

    fn build_inner(&self) -> Vec<ConstructionPrimitive> {
        let mut inner = self.star(self.pid / 2.0);
        for bore in inner.iter_mut().take(LEGS.len()) {
            bore.overhang.end = true;
        }
        inner
    }

    fn socket_cutouts(&self) -> Vec<ConstructionPrimitive> {
        LEGS.iter()
            .map(|&dir| socket(self.pod, dir, self.g, self.h))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Shape;

    fn corner() -> OuterCorner {
        OuterCorner {
            m: 30.0,
            pod: 20.0,
            pid: 10.0,
            g: 10.0,
            h: 30.0,
        }
    }

    #[test]
    fn bores_open_only_at_leg_ends() {
        let inner = corner().build_inner();
        assert_eq!(inner.len(), 4);
        for bore in &inner[..3] {
            assert!(bore.overhang.end && !bore.overhang.start);
        }
        assert!(matches!(inner[3].shape, Shape::Sphere { radius } if radius == 5.0));
        assert!(!inner[3].overhang.start && !inner[3].overhang.end);
    }

    #[test]
    fn leg_shorter_than_body_is_rejected() {
        let c = OuterCorner {
            g: 5.0,
            h: 12.0,
            ..corner()
        };
        let err = c.validate().unwrap_err().to_string();
        assert!(err.contains("M/2"), "{}", err);
    }
}
