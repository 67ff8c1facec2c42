use std::collections::HashSet;

use fitting_types::{FittingKind, FittingSpec};
use geom_kernel::{Kernel, KernelError, KernelIntrospect, KernelSolidHandle, Profile};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::primitive::{ConstructionPrimitive, Shape};
use crate::types::{BuildConfig, FittingError};

/// A kernel that can both build shapes and answer queries about them.
pub trait KernelBundle: Kernel + KernelIntrospect {
    fn as_introspect(&self) -> &dyn KernelIntrospect;
}

impl<T: Kernel + KernelIntrospect> KernelBundle for T {
    fn as_introspect(&self) -> &dyn KernelIntrospect {
        self
    }
}

/// Exclusive access to the kernel for one construction attempt.
///
/// Every shape the attempt creates is registered in an arena, in creation
/// order, so the attempt can be torn down without walking any object graph.
pub struct ConstructionContext<'k> {
    kb: &'k mut dyn KernelBundle,
    arena: Vec<KernelSolidHandle>,
    attempt: Uuid,
    config: BuildConfig,
    kind: FittingKind,
    dims: String,
}

impl<'k> ConstructionContext<'k> {
    pub fn new(kb: &'k mut dyn KernelBundle, spec: &FittingSpec, config: BuildConfig) -> Self {
        Self {
            kb,
            arena: Vec::new(),
            attempt: Uuid::new_v4(),
            config,
            kind: spec.kind,
            dims: spec.dims.summary(),
        }
    }

    pub fn attempt(&self) -> Uuid {
        self.attempt
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn kind(&self) -> FittingKind {
        self.kind
    }

    pub fn introspect(&self) -> &dyn KernelIntrospect {
        self.kb.as_introspect()
    }

    /// Shapes created so far and not yet purged.
    pub fn arena(&self) -> &[KernelSolidHandle] {
        &self.arena
    }

    fn fail(&self, source: KernelError) -> FittingError {
        FittingError::GeometryKernelFailure {
            kind: self.kind,
            dims: self.dims.clone(),
            source,
        }
    }

    fn register(
        &mut self,
        result: Result<KernelSolidHandle, KernelError>,
    ) -> Result<KernelSolidHandle, FittingError> {
        let handle = result.map_err(|e| self.fail(e))?;
        self.arena.push(handle.clone());
        Ok(handle)
    }

    pub fn realize(&mut self, prim: &ConstructionPrimitive) -> Result<KernelSolidHandle, FittingError> {
        let p = &prim.placement;
        let result = match &prim.shape {
            Shape::Cylinder { radius, height } => self.kb.make_cylinder(*radius, *height, p),
            Shape::Cone {
                radius1,
                radius2,
                height,
            } => self.kb.make_cone(*radius1, *radius2, *height, p),
            Shape::Sphere { radius } => self.kb.make_sphere(*radius, p),
            Shape::Cuboid {
                length,
                width,
                height,
            } => self.kb.make_box(*length, *width, *height, p),
            Shape::Swept { radius, path } => {
                self.kb.sweep(&Profile::Circle { radius: *radius }, path)
            }
            Shape::Intersection(parts) => {
                let handles = self.realize_all(parts)?;
                return self.common(&handles);
            }
        };
        self.register(result)
    }

    pub fn realize_all(
        &mut self,
        prims: &[ConstructionPrimitive],
    ) -> Result<Vec<KernelSolidHandle>, FittingError> {
        prims.iter().map(|p| self.realize(p)).collect()
    }

    /// Union of `shapes`; a single shape is returned as is.
    pub fn fuse(&mut self, shapes: &[KernelSolidHandle]) -> Result<KernelSolidHandle, FittingError> {
        if let [only] = shapes {
            return Ok(only.clone());
        }
        let result = self.kb.fuse(shapes);
        self.register(result)
    }

    pub fn cut(
        &mut self,
        base: &KernelSolidHandle,
        tool: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, FittingError> {
        let result = self.kb.cut(base, tool);
        self.register(result)
    }

    pub fn common(&mut self, shapes: &[KernelSolidHandle]) -> Result<KernelSolidHandle, FittingError> {
        if let [only] = shapes {
            return Ok(only.clone());
        }
        let result = self.kb.common(shapes);
        self.register(result)
    }

    pub fn clone_placed(
        &mut self,
        source: &KernelSolidHandle,
        placement: &fitting_types::Placement,
    ) -> Result<KernelSolidHandle, FittingError> {
        let result = self.kb.clone_placed(source, placement);
        self.register(result)
    }

    pub fn recompute(&mut self) -> Result<(), FittingError> {
        self.kb.recompute().map_err(|e| self.fail(e))
    }

    pub fn make_solid(&mut self, shape: &KernelSolidHandle) -> Result<KernelSolidHandle, FittingError> {
        let result = self.kb.make_solid(shape);
        self.register(result)
    }

    /// Delete every arena entry not in `keep`, newest first.
    ///
    /// Duplicate entries and shapes that are already gone are skipped, and the
    /// arena is emptied, so a second call deletes nothing. Returns the number
    /// of shapes deleted.
    pub fn purge_except(&mut self, keep: &[KernelSolidHandle]) -> usize {
        let keep: HashSet<&KernelSolidHandle> = keep.iter().collect();
        let mut seen = HashSet::new();
        let mut deleted = 0;
        let arena = std::mem::take(&mut self.arena);
        for handle in arena.iter().rev() {
            if keep.contains(handle) || !seen.insert(handle.clone()) {
                continue;
            }
            if !self.kb.contains(handle) {
                continue;
            }
            match self.kb.delete(handle) {
                Ok(()) => deleted += 1,
                Err(e) => warn!(attempt = %self.attempt, error = %e, "purge could not delete shape"),
            }
        }
        debug!(attempt = %self.attempt, deleted, kept = keep.len(), "purged construction arena");
        deleted
    }
}
