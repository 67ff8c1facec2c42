//! One builder per fitting topology.

mod branch;
mod bushing;
mod corner;
mod coupling;
mod elbow;
mod elbow_alpha;
mod frame_box;
mod pipe;

pub use branch::{Cross, Tee};
pub use bushing::Bushing;
pub use corner::OuterCorner;
pub use coupling::Coupling;
pub use elbow::Elbow90;
pub use elbow_alpha::ElbowAlpha;
pub use frame_box::FrameBox;
pub use pipe::Pipe;

use fitting_types::{Direction, Placement};

use crate::primitive::ConstructionPrimitive;

/// Cylinder of `radius` along `dir`, covering `[from, to]` measured from the
/// fitting centre.
pub(crate) fn leg(radius: f64, dir: Direction, from: f64, to: f64) -> ConstructionPrimitive {
    let [x, y, z] = dir.unit();
    ConstructionPrimitive::cylinder(
        radius,
        to - from,
        Placement::along(dir, [x * from, y * from, z * from]),
    )
}

/// Socket spanning `[g, h]` on the leg along `dir`, open at the leg end.
pub(crate) fn socket(diameter: f64, dir: Direction, g: f64, h: f64) -> ConstructionPrimitive {
    leg(diameter / 2.0, dir, g, h).open_end()
}
