use geom_kernel::KernelSolidHandle;
use tracing::{debug, instrument};

use crate::context::ConstructionContext;
use crate::primitive::ConstructionPrimitive;
use crate::types::FittingError;

/// `outer − (inner ∪ sockets)`.
///
/// Outer pieces are fused, then every tool is grown by the configured margin
/// at its open ends and fused, then the tool is cut from the body. Any kernel
/// failure aborts the whole assembly; no partial shape is returned.
#[instrument(skip_all, fields(kind = %ctx.kind(), attempt = %ctx.attempt()))]
pub fn assemble(
    ctx: &mut ConstructionContext<'_>,
    outer: &[ConstructionPrimitive],
    inner: &[ConstructionPrimitive],
    sockets: &[ConstructionPrimitive],
) -> Result<KernelSolidHandle, FittingError> {
    let margin = ctx.config().tool_margin;

    let pieces = ctx.realize_all(outer)?;
    let body = ctx.fuse(&pieces)?;

    let tools: Vec<ConstructionPrimitive> = inner
        .iter()
        .chain(sockets)
        .map(|t| t.with_margin(margin))
        .collect();
    if tools.is_empty() {
        return Ok(body);
    }
    let tool_handles = ctx.realize_all(&tools)?;
    let tool = ctx.fuse(&tool_handles)?;
    let result = ctx.cut(&body, &tool)?;

    debug!(
        outer = outer.len(),
        tools = tools.len(),
        arena = ctx.arena().len(),
        "assembled fitting body"
    );
    Ok(result)
}
