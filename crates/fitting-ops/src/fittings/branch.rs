//! Tee and cross: a run along X with branches along Z.

use fitting_types::{Direction, FittingKind};

use super::{leg, socket};
use crate::builder::FittingBuilder;
use crate::primitive::ConstructionPrimitive;
use crate::types::FittingError;
use crate::validate::{Dims, Rules};

/// Diameters shared by both run ends (`M`, `POD`, `PID`) or by the branch
/// (`M1`, `POD1`, `PID1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bore {
    pub m: f64,
    pub pod: f64,
    pub pid: f64,
}

impl Bore {
    fn read(d: &Dims<'_>, suffix: &str) -> Result<Self, FittingError> {
        Ok(Self {
            m: d.length(&format!("M{suffix}"))?,
            pod: d.length(&format!("POD{suffix}"))?,
            pid: d.length(&format!("PID{suffix}"))?,
        })
    }
}

fn check_bores(rules: &Rules, run: &Bore, branch: &Bore) -> Result<(), FittingError> {
    rules.all_positive(&[
        ("M", run.m),
        ("POD", run.pod),
        ("PID", run.pid),
        ("M1", branch.m),
        ("POD1", branch.pod),
        ("PID1", branch.pid),
    ])?;
    rules.wall_order(("M", run.m), ("POD", run.pod), ("PID", run.pid))?;
    rules.wall_order(("M1", branch.m), ("POD1", branch.pod), ("PID1", branch.pid))?;
    rules.at_least(("M", run.m), ("M1", branch.m))
}

/// Run from `-H` to `H1` along X, branch from the centre to `H2` along +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Tee {
    pub run: Bore,
    pub branch: Bore,
    pub g: f64,
    pub g1: f64,
    pub g2: f64,
    pub h: f64,
    pub h1: f64,
    pub h2: f64,
}

impl Tee {
    pub fn from_dims(d: &Dims<'_>) -> Result<Self, FittingError> {
        Ok(Self {
            run: Bore::read(d, "")?,
            branch: Bore::read(d, "1")?,
            g: d.length("G")?,
            g1: d.length("G1")?,
            g2: d.length("G2")?,
            h: d.length("H")?,
            h1: d.length("H1")?,
            h2: d.length("H2")?,
        })
    }
}

impl FittingBuilder for Tee {
    fn kind(&self) -> FittingKind {
        FittingKind::Tee
    }

    fn validate(&self) -> Result<(), FittingError> {
        let rules = Rules::new(self.kind());
        check_bores(&rules, &self.run, &self.branch)?;
        rules.inset(("G", self.g), ("H", self.h))?;
        rules.inset(("G1", self.g1), ("H1", self.h1))?;
        rules.inset(("G2", self.g2), ("H2", self.h2))?;
        let branch_body = ("M1/2", self.branch.m / 2.0);
        rules.greater(("H", self.h), branch_body)?;
        rules.greater(("H1", self.h1), branch_body)?;
        rules.greater(("H2", self.h2), ("M/2", self.run.m / 2.0))
    }

    fn build_outer(&self) -> Vec<ConstructionPrimitive> {
        vec![
            leg(self.run.m / 2.0, Direction::PosX, -self.h, self.h1),
            leg(self.branch.m / 2.0, Direction::PosZ, 0.0, self.h2),
        ]
    }

    fn build_inner(&self) -> Vec<ConstructionPrimitive> {
        vec![
            leg(self.run.pid / 2.0, Direction::PosX, -self.h, self.h1).open_both(),
            leg(self.branch.pid / 2.0, Direction::PosZ, 0.0, self.h2).open_end(),
        ]
    }

    fn socket_cutouts(&self) -> Vec<ConstructionPrimitive> {
        vec![
            socket(self.run.pod, Direction::NegX, self.g, self.h),
            socket(self.run.pod, Direction::PosX, self.g1, self.h1),
            socket(self.branch.pod, Direction::PosZ, self.g2, self.h2),
        ]
    }
}

/// Run from `-H` to `H` along X, branch from `-H1` to `H1` along Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Cross {
    pub run: Bore,
    pub branch: Bore,
    pub g: f64,
    pub g1: f64,
    pub h: f64,
    pub h1: f64,
}

impl Cross {
    pub fn from_dims(d: &Dims<'_>) -> Result<Self, FittingError> {
        Ok(Self {
            run: Bore::read(d, "")?,
            branch: Bore::read(d, "1")?,
            g: d.length("G")?,
            g1: d.length("G1")?,
            h: d.length("H")?,
            h1: d.length("H1")?,
        })
    }
}

impl FittingBuilder for Cross {
    fn kind(&self) -> FittingKind {
        FittingKind::Cross
    }

    fn validate(&self) -> Result<(), FittingError> {
        let rules = Rules::new(self.kind());
        check_bores(&rules, &self.run, &self.branch)?;
        rules.inset(("G", self.g), ("H", self.h))?;
        rules.inset(("G1", self.g1), ("H1", self.h1))?;
        rules.greater(("H", self.h), ("M1/2", self.branch.m / 2.0))?;
        rules.greater(("H1", self.h1), ("M/2", self.run.m / 2.0))
    }

    fn build_outer(&self) -> Vec<ConstructionPrimitive> {
        vec![
            leg(self.run.m / 2.0, Direction::PosX, -self.h, self.h),
            leg(self.branch.m / 2.0, Direction::PosZ, -self.h1, self.h1),
        ]
    }

    fn build_inner(&self) -> Vec<ConstructionPrimitive> {
        vec![
            leg(self.run.pid / 2.0, Direction::PosX, -self.h, self.h).open_both(),
            leg(self.branch.pid / 2.0, Direction::PosZ, -self.h1, self.h1).open_both(),
        ]
    }

    fn socket_cutouts(&self) -> Vec<ConstructionPrimitive> {
        let run = [Direction::NegX, Direction::PosX]
            .map(|dir| socket(self.run.pod, dir, self.g, self.h));
        let branch = [Direction::NegZ, Direction::PosZ]
            .map(|dir| socket(self.branch.pod, dir, self.g1, self.h1));
        run.into_iter().chain(branch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitting_types::{DimensionSet, FittingSpec, Quantity};

    #[test]
    fn tee_reads_scenario_dimensions() {
        let spec = FittingSpec::with_defaults(FittingKind::Tee);
        let tee = Tee::from_dims(&Dims::new(spec.kind, &spec.dims)).unwrap();
        assert_eq!(tee.branch.pod, 2.0 * 25.4);
        assert_eq!(tee.h2, 6.0 * 25.4);
        assert!(tee.validate().is_ok());
        assert_eq!(tee.socket_cutouts().len(), 3);
    }

    #[test]
    fn branch_wider_than_run_is_rejected() {
        let mut dims = DimensionSet::defaults_for(FittingKind::Cross);
        dims.insert("M1", Quantity::inch(6.0));
        let cross = Cross::from_dims(&Dims::new(FittingKind::Cross, &dims)).unwrap();
        let err = cross.validate().unwrap_err().to_string();
        assert!(err.contains("must be at least M1"), "{}", err);
    }

    #[test]
    fn short_branch_is_rejected() {
        let mut dims = DimensionSet::defaults_for(FittingKind::Tee);
        dims.insert("G2", Quantity::inch(2.0));
        dims.insert("H2", Quantity::inch(2.4));
        let tee = Tee::from_dims(&Dims::new(FittingKind::Tee, &dims)).unwrap();
        let err = tee.validate().unwrap_err().to_string();
        assert!(err.contains("H2"), "{}", err);
    }
}
