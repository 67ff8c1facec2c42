use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dims::DimensionSet;
use crate::quantity::UnitDim;

/// Polygon shape of a bushing's wrench boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BossShape {
    #[default]
    Hexagon,
    Octagon,
}

/// The topology to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FittingKind {
    Pipe,
    Elbow90,
    ElbowAlpha,
    Tee,
    Cross,
    Coupling,
    Bushing { boss: BossShape },
    OuterCorner,
    FrameBox,
}

const PIPE: &[&str] = &["OD", "ID", "L"];
const ELBOW_90: &[&str] = &["M", "POD", "PID", "G", "H"];
const ELBOW_ALPHA: &[&str] = &["alpha", "M", "POD", "PID", "G", "H", "R"];
const TEE: &[&str] = &[
    "M", "M1", "POD", "POD1", "PID", "PID1", "G", "G1", "G2", "H", "H1", "H2",
];
const CROSS: &[&str] = &[
    "M", "M1", "POD", "POD1", "PID", "PID1", "G", "G1", "H", "H1",
];
const COUPLING: &[&str] = &["M", "M1", "POD", "POD1", "PID", "PID1", "L", "N"];
const BUSHING: &[&str] = &["POD", "PID", "POD1", "PID1", "L", "N", "X", "G"];
const OUTER_CORNER: &[&str] = &["M", "POD", "PID", "G", "H"];
const FRAME_BOX: &[&str] = &["LX", "LY", "LZ", "M", "POD", "PID", "G", "H"];

impl FittingKind {
    /// Every kind, bushing with its default boss.
    pub const ALL: [FittingKind; 9] = [
        FittingKind::Pipe,
        FittingKind::Elbow90,
        FittingKind::ElbowAlpha,
        FittingKind::Tee,
        FittingKind::Cross,
        FittingKind::Coupling,
        FittingKind::Bushing {
            boss: BossShape::Hexagon,
        },
        FittingKind::OuterCorner,
        FittingKind::FrameBox,
    ];

    /// Fixed dimension schema of this kind.
    pub fn required_symbols(&self) -> &'static [&'static str] {
        match self {
            FittingKind::Pipe => PIPE,
            FittingKind::Elbow90 => ELBOW_90,
            FittingKind::ElbowAlpha => ELBOW_ALPHA,
            FittingKind::Tee => TEE,
            FittingKind::Cross => CROSS,
            FittingKind::Coupling => COUPLING,
            FittingKind::Bushing { .. } => BUSHING,
            FittingKind::OuterCorner => OUTER_CORNER,
            FittingKind::FrameBox => FRAME_BOX,
        }
    }

    /// Unit dimension a schema symbol must carry.
    pub fn symbol_dim(symbol: &str) -> UnitDim {
        match symbol {
            "alpha" => UnitDim::Angle,
            _ => UnitDim::Length,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FittingKind::Pipe => "pipe",
            FittingKind::Elbow90 => "elbow-90",
            FittingKind::ElbowAlpha => "elbow-alpha",
            FittingKind::Tee => "tee",
            FittingKind::Cross => "cross",
            FittingKind::Coupling => "coupling",
            FittingKind::Bushing { .. } => "bushing",
            FittingKind::OuterCorner => "outer-corner",
            FittingKind::FrameBox => "frame-box",
        }
    }
}

impl fmt::Display for FittingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FittingKind::Bushing { boss } => write!(f, "bushing ({:?} boss)", boss),
            other => f.write_str(other.name()),
        }
    }
}

/// A fitting topology plus the dimensions of one instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingSpec {
    pub kind: FittingKind,
    pub dims: DimensionSet,
}

impl FittingSpec {
    pub fn new(kind: FittingKind, dims: DimensionSet) -> Self {
        Self { kind, dims }
    }

    /// Spec populated with the built-in defaults for `kind`.
    pub fn with_defaults(kind: FittingKind) -> Self {
        Self::new(kind, DimensionSet::defaults_for(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_are_unique_per_kind() {
        for kind in FittingKind::ALL {
            let symbols = kind.required_symbols();
            let mut sorted = symbols.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), symbols.len(), "{} has duplicate symbols", kind);
        }
    }

    #[test]
    fn only_alpha_is_an_angle() {
        assert_eq!(FittingKind::symbol_dim("alpha"), UnitDim::Angle);
        assert_eq!(FittingKind::symbol_dim("POD1"), UnitDim::Length);
    }
}
