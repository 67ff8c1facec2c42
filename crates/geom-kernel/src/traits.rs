use crate::types::*;
use fitting_types::Placement;

/// Core geometry kernel trait: primitives, booleans, sweeps and document upkeep.
/// Implemented by TruckKernel (wraps real truck) and MockKernel (deterministic test double).
///
/// Primitives are built in a local frame and then moved by `placement`:
/// cylinders and cones stand on the XY plane along +Z, spheres are centred on
/// the origin, boxes have a corner at the origin.
pub trait Kernel {
    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Truncated cone, `radius1` at z = 0 and `radius2` at z = height.
    fn make_cone(
        &mut self,
        radius1: f64,
        radius2: f64,
        height: f64,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError>;

    fn make_sphere(
        &mut self,
        radius: f64,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError>;

    fn make_box(
        &mut self,
        length: f64,
        width: f64,
        height: f64,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Sweep `profile` along `path`.
    fn sweep(
        &mut self,
        profile: &Profile,
        path: &SweepPath,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean union of all shapes.
    fn fuse(&mut self, shapes: &[KernelSolidHandle]) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean subtraction: base minus tool.
    fn cut(
        &mut self,
        base: &KernelSolidHandle,
        tool: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean intersection of all shapes.
    fn common(&mut self, shapes: &[KernelSolidHandle]) -> Result<KernelSolidHandle, KernelError>;

    /// Copy of `source` moved by `placement`. The source is left untouched.
    fn clone_placed(
        &mut self,
        source: &KernelSolidHandle,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Compute every pending shape in the document.
    fn recompute(&mut self) -> Result<(), KernelError>;

    /// Build one solid from the boundary faces of `shape`.
    /// Fails with [`KernelError::NullShape`] when `shape` was not recomputed.
    fn make_solid(&mut self, shape: &KernelSolidHandle) -> Result<KernelSolidHandle, KernelError>;

    /// Remove a shape from the document.
    fn delete(&mut self, shape: &KernelSolidHandle) -> Result<(), KernelError>;
}

/// Read-only queries on kernel shapes.
pub trait KernelIntrospect {
    fn contains(&self, shape: &KernelSolidHandle) -> bool;

    /// Number of live shapes in the document.
    fn shape_count(&self) -> usize;

    fn shape_kind(&self, shape: &KernelSolidHandle) -> Option<ShapeKind>;

    /// True once the shape's geometry has been computed.
    fn is_computed(&self, shape: &KernelSolidHandle) -> bool;

    fn bounding_box(&self, shape: &KernelSolidHandle) -> Option<Aabb>;

    /// Point membership. Points on the boundary count as inside.
    fn contains_point(
        &self,
        shape: &KernelSolidHandle,
        point: [f64; 3],
    ) -> Result<bool, KernelError>;
}
