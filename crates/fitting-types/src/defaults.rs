//! Built-in dimension sets for ad-hoc construction and tests.

use crate::dims::DimensionSet;
use crate::fitting::FittingKind;
use crate::quantity::Quantity;

impl DimensionSet {
    /// A plausible instance of `kind`. Every default passes validation.
    pub fn defaults_for(kind: FittingKind) -> Self {
        let cm = Quantity::cm;
        let inch = Quantity::inch;
        match kind {
            FittingKind::Pipe => DimensionSet::new()
                .with("OD", cm(3.0))
                .with("ID", cm(2.0))
                .with("L", Quantity::m(1.0)),
            FittingKind::Elbow90 => corner_like(),
            FittingKind::ElbowAlpha => corner_like()
                .with("alpha", Quantity::deg(60.0))
                .with("R", cm(3.0)),
            FittingKind::Tee => DimensionSet::new()
                .with("M", inch(5.0))
                .with("M1", inch(4.0))
                .with("POD", inch(3.0))
                .with("POD1", inch(2.0))
                .with("PID", inch(2.0))
                .with("PID1", inch(1.0))
                .with("G", inch(3.0))
                .with("G1", inch(3.0))
                .with("G2", inch(3.0))
                .with("H", inch(4.0))
                .with("H1", inch(5.0))
                .with("H2", inch(6.0)),
            FittingKind::Cross => DimensionSet::new()
                .with("M", inch(5.0))
                .with("M1", inch(4.0))
                .with("POD", inch(3.0))
                .with("POD1", inch(2.0))
                .with("PID", inch(2.0))
                .with("PID1", inch(1.0))
                .with("G", inch(3.0))
                .with("G1", inch(3.0))
                .with("H", inch(4.0))
                .with("H1", inch(5.0)),
            FittingKind::Coupling => DimensionSet::new()
                .with("M", cm(4.0))
                .with("M1", cm(3.0))
                .with("POD", cm(3.0))
                .with("POD1", cm(2.0))
                .with("PID", cm(2.0))
                .with("PID1", cm(1.0))
                .with("L", cm(8.0))
                .with("N", cm(2.0)),
            FittingKind::Bushing { .. } => DimensionSet::new()
                .with("POD", cm(4.0))
                .with("PID", cm(3.0))
                .with("POD1", cm(2.5))
                .with("PID1", cm(1.5))
                .with("L", cm(5.0))
                .with("N", cm(1.5))
                .with("X", cm(5.0))
                .with("G", cm(2.0)),
            FittingKind::OuterCorner => corner_like(),
            FittingKind::FrameBox => corner_like()
                .with("LX", cm(50.0))
                .with("LY", cm(30.0))
                .with("LZ", cm(20.0)),
        }
    }
}

fn corner_like() -> DimensionSet {
    DimensionSet::new()
        .with("M", Quantity::cm(3.0))
        .with("POD", Quantity::cm(2.0))
        .with("PID", Quantity::cm(1.0))
        .with("G", Quantity::cm(1.0))
        .with("H", Quantity::cm(3.0))
}
