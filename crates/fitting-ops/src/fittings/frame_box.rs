use std::f64::consts::{FRAC_PI_2, PI};

use fitting_types::{Axis, FittingKind, Placement};
use geom_kernel::KernelSolidHandle;
use tracing::debug;

use super::{OuterCorner, Pipe};
use crate::assemble::assemble;
use crate::builder::FittingBuilder;
use crate::context::ConstructionContext;
use crate::primitive::ConstructionPrimitive;
use crate::types::{FittingError, FittingSolid};
use crate::validate::{Dims, Rules};

/// Rectangular frame `LX × LY × LZ` between corner centres, spanning the
/// positive octant from the origin: eight outer corners joined by twelve
/// pipes whose ends sit in the corner sockets.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBox {
    pub lx: f64,
    pub ly: f64,
    pub lz: f64,
    pub corner: OuterCorner,
}

impl FrameBox {
    pub fn from_dims(d: &Dims<'_>) -> Result<Self, FittingError> {
        Ok(Self {
            lx: d.length("LX")?,
            ly: d.length("LY")?,
            lz: d.length("LZ")?,
            corner: OuterCorner::from_dims(d)?,
        })
    }

    /// Pipe cut to reach from socket bottom to socket bottom along an edge.
    pub fn pipe(&self, edge: f64) -> Pipe {
        Pipe {
            od: self.corner.pod,
            id: self.corner.pid,
            l: edge - 2.0 * self.corner.g,
        }
    }

    /// Placement of each of the eight corners. The corner at the origin keeps
    /// its legs along +X, +Y and +Z; every other one is turned so its legs
    /// point back into the box.
    pub fn corner_placements(&self) -> Vec<Placement> {
        let mut out = Vec::with_capacity(8);
        for z_min in [true, false] {
            for y_min in [true, false] {
                for x_min in [true, false] {
                    let origin = [
                        if x_min { 0.0 } else { self.lx },
                        if y_min { 0.0 } else { self.ly },
                        if z_min { 0.0 } else { self.lz },
                    ];
                    let p = Placement::at(origin);
                    out.push(match (x_min, y_min, z_min) {
                        (true, true, true) => p,
                        (false, true, true) => p.rotated(Axis::Z, FRAC_PI_2),
                        (true, false, true) => p.rotated(Axis::Z, -FRAC_PI_2),
                        (false, false, true) => p.rotated(Axis::Z, PI),
                        (true, true, false) => p.rotated(Axis::X, -FRAC_PI_2),
                        (false, true, false) => p.rotated(Axis::Y, PI),
                        (true, false, false) => p.rotated(Axis::X, PI),
                        (false, false, false) => {
                            p.rotated(Axis::X, PI).rotated(Axis::Y, FRAC_PI_2)
                        }
                    });
                }
            }
        }
        out
    }

    /// Placements of the pipes along each axis; the prototype runs along +Z
    /// from the origin.
    pub fn pipe_placements(&self, axis: Axis) -> Vec<Placement> {
        let g = self.corner.g;
        let mut out = Vec::with_capacity(4);
        for a in [0.0, 1.0] {
            for b in [0.0, 1.0] {
                out.push(match axis {
                    Axis::X => Placement::at([g, a * self.ly, b * self.lz])
                        .rotated(Axis::Y, FRAC_PI_2),
                    Axis::Y => Placement::at([a * self.lx, g, b * self.lz])
                        .rotated(Axis::X, -FRAC_PI_2),
                    Axis::Z => Placement::at([a * self.lx, b * self.ly, g]),
                });
            }
        }
        out
    }

    fn edge(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.lx,
            Axis::Y => self.ly,
            Axis::Z => self.lz,
        }
    }

    fn assemble_part(
        ctx: &mut ConstructionContext<'_>,
        part: &dyn FittingBuilder,
    ) -> Result<KernelSolidHandle, FittingError> {
        assemble(
            ctx,
            &part.build_outer(),
            &part.build_inner(),
            &part.socket_cutouts(),
        )
    }
}

impl FittingBuilder for FrameBox {
    fn kind(&self) -> FittingKind {
        FittingKind::FrameBox
    }

    fn validate(&self) -> Result<(), FittingError> {
        let rules = Rules::new(self.kind());
        self.corner.check(&rules)?;
        let reach = ("2H", 2.0 * self.corner.h);
        rules.greater(("LX", self.lx), reach)?;
        rules.greater(("LY", self.ly), reach)?;
        rules.greater(("LZ", self.lz), reach)
    }

    fn build_outer(&self) -> Vec<ConstructionPrimitive> {
        self.corner.build_outer()
    }

    fn build_inner(&self) -> Vec<ConstructionPrimitive> {
        self.corner.build_inner()
    }

    fn socket_cutouts(&self) -> Vec<ConstructionPrimitive> {
        self.corner.socket_cutouts()
    }

    /// One corner and one pipe per distinct edge length are built, then
    /// cloned into place. The prototypes stay in the arena and go with the
    /// next purge.
    fn construct(&self, ctx: &mut ConstructionContext<'_>) -> Result<FittingSolid, FittingError> {
        let corner = Self::assemble_part(ctx, &self.corner)?;

        let mut pipes: Vec<(f64, KernelSolidHandle)> = Vec::new();
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let edge = self.edge(axis);
            if !pipes.iter().any(|(len, _)| *len == edge) {
                let handle = Self::assemble_part(ctx, &self.pipe(edge))?;
                pipes.push((edge, handle));
            }
        }

        let mut parts = Vec::with_capacity(20);
        for placement in self.corner_placements() {
            parts.push(ctx.clone_placed(&corner, &placement)?);
        }
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let edge = self.edge(axis);
            for (len, proto) in &pipes {
                if *len != edge {
                    continue;
                }
                for placement in self.pipe_placements(axis) {
                    parts.push(ctx.clone_placed(proto, &placement)?);
                }
            }
        }
        debug!(
            prototypes = 1 + pipes.len(),
            parts = parts.len(),
            "instanced frame box"
        );
        Ok(FittingSolid::group(self.kind(), parts))
    }
}
