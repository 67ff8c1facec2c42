use fitting_types::{FittingKind, FittingSpec};

use crate::assemble::assemble;
use crate::context::ConstructionContext;
use crate::fittings::{
    Bushing, Coupling, Cross, Elbow90, ElbowAlpha, FrameBox, OuterCorner, Pipe, Tee,
};
use crate::primitive::ConstructionPrimitive;
use crate::types::{FittingError, FittingSolid};
use crate::validate::Dims;

/// One fitting topology with its dimensions already read and typed.
pub trait FittingBuilder {
    fn kind(&self) -> FittingKind;

    /// Plausibility checks; runs before any kernel object exists.
    fn validate(&self) -> Result<(), FittingError>;

    fn build_outer(&self) -> Vec<ConstructionPrimitive>;

    /// Bores and other internal passages.
    fn build_inner(&self) -> Vec<ConstructionPrimitive>;

    fn socket_cutouts(&self) -> Vec<ConstructionPrimitive>;

    /// Realise the fitting. Callers validate first.
    fn construct(&self, ctx: &mut ConstructionContext<'_>) -> Result<FittingSolid, FittingError> {
        let handle = assemble(
            ctx,
            &self.build_outer(),
            &self.build_inner(),
            &self.socket_cutouts(),
        )?;
        Ok(FittingSolid::single(self.kind(), handle))
    }
}

/// Read the dimensions `spec.kind` needs and return its builder.
///
/// Missing symbols and wrong unit dimensions are reported here, so a builder
/// only ever sees complete, typed input.
pub fn builder_for(spec: &FittingSpec) -> Result<Box<dyn FittingBuilder>, FittingError> {
    let dims = Dims::new(spec.kind, &spec.dims);
    Ok(match spec.kind {
        FittingKind::Pipe => Box::new(Pipe::from_dims(&dims)?),
        FittingKind::Elbow90 => Box::new(Elbow90::from_dims(&dims)?),
        FittingKind::ElbowAlpha => Box::new(ElbowAlpha::from_dims(&dims)?),
        FittingKind::Tee => Box::new(Tee::from_dims(&dims)?),
        FittingKind::Cross => Box::new(Cross::from_dims(&dims)?),
        FittingKind::Coupling => Box::new(Coupling::from_dims(&dims)?),
        FittingKind::Bushing { boss } => Box::new(Bushing::from_dims(&dims, boss)?),
        FittingKind::OuterCorner => Box::new(OuterCorner::from_dims(&dims)?),
        FittingKind::FrameBox => Box::new(FrameBox::from_dims(&dims)?),
    })
}
