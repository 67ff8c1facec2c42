use tracing::{debug, instrument};

use crate::context::ConstructionContext;
use crate::types::{FittingError, FittingSolid, SolidBody};

/// Recompute the document, then turn every body into a single solid.
///
/// Already solidified fittings are returned unchanged.
#[instrument(skip_all, fields(kind = %fitting.kind, attempt = %ctx.attempt()))]
pub fn solidify(
    ctx: &mut ConstructionContext<'_>,
    fitting: FittingSolid,
) -> Result<FittingSolid, FittingError> {
    if fitting.solidified {
        debug!("fitting already solidified");
        return Ok(fitting);
    }
    ctx.recompute()?;
    let body = match &fitting.body {
        SolidBody::Single(h) => SolidBody::Single(ctx.make_solid(h)?),
        SolidBody::Group(hs) => SolidBody::Group(
            hs.iter()
                .map(|h| ctx.make_solid(h))
                .collect::<Result<Vec<_>, _>>()?,
        ),
    };
    Ok(FittingSolid {
        kind: fitting.kind,
        body,
        solidified: true,
    })
}

/// Recompute, and solidify when asked to.
pub fn finish(
    ctx: &mut ConstructionContext<'_>,
    fitting: FittingSolid,
    convert_to_solid: bool,
) -> Result<FittingSolid, FittingError> {
    if convert_to_solid {
        solidify(ctx, fitting)
    } else {
        ctx.recompute()?;
        Ok(fitting)
    }
}

/// Delete every intermediate of the attempt, keeping the fitting's bodies.
#[instrument(skip_all, fields(kind = %fitting.kind, attempt = %ctx.attempt()))]
pub fn purge(ctx: &mut ConstructionContext<'_>, fitting: &FittingSolid) -> usize {
    ctx.purge_except(fitting.handles())
}
