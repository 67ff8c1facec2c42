use fitting_types::{FittingKind, Placement};

use crate::builder::FittingBuilder;
use crate::primitive::ConstructionPrimitive;
use crate::types::FittingError;
use crate::validate::{Dims, Rules};

/// Straight pipe along +Z from the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub od: f64,
    pub id: f64,
    pub l: f64,
}

impl Pipe {
    pub fn from_dims(d: &Dims<'_>) -> Result<Self, FittingError> {
        Ok(Self {
            od: d.length("OD")?,
            id: d.length("ID")?,
            l: d.length("L")?,
        })
    }

    pub(crate) fn check(&self, rules: &Rules) -> Result<(), FittingError> {
        rules.all_positive(&[("OD", self.od), ("ID", self.id), ("L", self.l)])?;
        rules.greater(("OD", self.od), ("ID", self.id))
    }
}

impl FittingBuilder for Pipe {
    fn kind(&self) -> FittingKind {
        FittingKind::Pipe
    }

    fn validate(&self) -> Result<(), FittingError> {
        self.check(&Rules::new(self.kind()))
    }

    fn build_outer(&self) -> Vec<ConstructionPrimitive> {
        vec![ConstructionPrimitive::cylinder(
            self.od / 2.0,
            self.l,
            Placement::identity(),
        )]
    }

    fn build_inner(&self) -> Vec<ConstructionPrimitive> {
        vec![ConstructionPrimitive::cylinder(self.id / 2.0, self.l, Placement::identity()).open_both()]
    }

    fn socket_cutouts(&self) -> Vec<ConstructionPrimitive> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bore_must_be_narrower_than_wall() {
        let pipe = Pipe {
            od: 20.0,
            id: 20.0,
            l: 100.0,
        };
        assert!(matches!(
            pipe.validate(),
            Err(FittingError::ImplausibleDimensions { .. })
        ));
    }

    #[test]
    fn bore_is_open_at_both_ends() {
        let pipe = Pipe {
            od: 30.0,
            id: 20.0,
            l: 1000.0,
        };
        let inner = pipe.build_inner();
        assert!(inner[0].overhang.start && inner[0].overhang.end);
    }
}
