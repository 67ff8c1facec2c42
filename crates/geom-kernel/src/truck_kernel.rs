//! TruckKernel: real geometry kernel wrapping truck's API.

use crate::primitives;
use crate::traits::Kernel;
use crate::types::*;
use fitting_types::Placement;
use std::collections::HashMap;
use tracing::debug;

use truck_modeling::topology::Solid;

/// Boolean tolerance handed to truck-shapeops.
const BOOLEAN_TOL: f64 = 0.05;

pub(crate) struct TruckShape {
    pub(crate) solid: Solid,
    pub(crate) kind: ShapeKind,
}

/// Real geometry kernel backed by the truck BREP library.
///
/// truck evaluates eagerly, so every shape is computed as soon as it exists
/// and `recompute` has nothing to do.
pub struct TruckKernel {
    next_handle: u64,
    pub(crate) shapes: HashMap<u64, TruckShape>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            shapes: HashMap::new(),
        }
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    pub(crate) fn store_solid(&mut self, solid: Solid, kind: ShapeKind) -> KernelSolidHandle {
        let handle = self.alloc_handle();
        self.shapes.insert(handle.id(), TruckShape { solid, kind });
        handle
    }

    pub(crate) fn get_solid(&self, handle: &KernelSolidHandle) -> Option<&Solid> {
        self.shapes.get(&handle.id()).map(|s| &s.solid)
    }

    fn solid(&self, handle: &KernelSolidHandle) -> Result<Solid, KernelError> {
        self.get_solid(handle)
            .cloned()
            .ok_or_else(|| KernelError::not_found(handle))
    }

    fn store_placed(
        &mut self,
        solid: Solid,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError> {
        let placed = if placement.is_identity() {
            solid
        } else {
            primitives::place(&solid, placement)
        };
        Ok(self.store_solid(placed, ShapeKind::Primitive))
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), KernelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidPrimitive {
            reason: format!("{} must be positive, got {}", name, value),
        })
    }
}

fn union(a: &Solid, b: &Solid) -> Result<Solid, KernelError> {
    truck_shapeops::or(a, b, BOOLEAN_TOL).ok_or_else(|| KernelError::BooleanFailed {
        reason: "truck or() returned None".to_string(),
    })
}

fn intersection(a: &Solid, b: &Solid) -> Result<Solid, KernelError> {
    truck_shapeops::and(a, b, BOOLEAN_TOL).ok_or_else(|| KernelError::BooleanFailed {
        reason: "truck and() returned None".to_string(),
    })
}

fn fold_solids(
    solids: Vec<Solid>,
    op: fn(&Solid, &Solid) -> Result<Solid, KernelError>,
) -> Result<Solid, KernelError> {
    let mut iter = solids.into_iter();
    let first = iter.next().ok_or_else(|| KernelError::BooleanFailed {
        reason: "boolean over zero shapes".to_string(),
    })?;
    iter.try_fold(first, |acc, next| op(&acc, &next))
}

impl Kernel for TruckKernel {
    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError> {
        check_positive("cylinder radius", radius)?;
        check_positive("cylinder height", height)?;
        let solid = primitives::make_cylinder(radius, height)?;
        self.store_placed(solid, placement)
    }

    fn make_cone(
        &mut self,
        radius1: f64,
        radius2: f64,
        height: f64,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError> {
        check_positive("cone height", height)?;
        if !(radius1 >= 0.0 && radius2 >= 0.0) || radius1 + radius2 <= 0.0 {
            return Err(KernelError::InvalidPrimitive {
                reason: format!("cone radii {} / {} are degenerate", radius1, radius2),
            });
        }
        let solid = primitives::make_cone(radius1, radius2, height);
        self.store_placed(solid, placement)
    }

    fn make_sphere(
        &mut self,
        radius: f64,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError> {
        check_positive("sphere radius", radius)?;
        let solid = primitives::make_sphere(radius);
        self.store_placed(solid, placement)
    }

    fn make_box(
        &mut self,
        length: f64,
        width: f64,
        height: f64,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError> {
        check_positive("box length", length)?;
        check_positive("box width", width)?;
        check_positive("box height", height)?;
        let solid = primitives::make_box(length, width, height);
        self.store_placed(solid, placement)
    }

    fn sweep(
        &mut self,
        profile: &Profile,
        path: &SweepPath,
    ) -> Result<KernelSolidHandle, KernelError> {
        let Profile::Circle { radius } = *profile;
        check_positive("profile radius", radius)?;
        if path.segments.is_empty() || !path.is_connected(1e-6) {
            return Err(KernelError::SweepFailed {
                reason: "path is empty or disconnected".to_string(),
            });
        }
        let pieces = primitives::sweep_segments(radius, &path.segments)?;
        debug!(segments = pieces.len(), "fusing swept segments");
        let solid = fold_solids(pieces, union).map_err(|e| KernelError::SweepFailed {
            reason: e.to_string(),
        })?;
        Ok(self.store_solid(solid, ShapeKind::Swept))
    }

    fn fuse(&mut self, shapes: &[KernelSolidHandle]) -> Result<KernelSolidHandle, KernelError> {
        let solids = shapes
            .iter()
            .map(|h| self.solid(h))
            .collect::<Result<Vec<_>, _>>()?;
        let result = fold_solids(solids, union)?;
        Ok(self.store_solid(result, ShapeKind::Boolean))
    }

    fn cut(
        &mut self,
        base: &KernelSolidHandle,
        tool: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.solid(base)?;
        let mut solid_b = self.solid(tool)?;

        // Subtraction = A ∩ ¬B. not() mutates in place.
        solid_b.not();
        let result = truck_shapeops::and(&solid_a, &solid_b, BOOLEAN_TOL).ok_or_else(|| {
            KernelError::BooleanFailed {
                reason: "truck and() returned None for subtraction".to_string(),
            }
        })?;
        Ok(self.store_solid(result, ShapeKind::Boolean))
    }

    fn common(&mut self, shapes: &[KernelSolidHandle]) -> Result<KernelSolidHandle, KernelError> {
        let solids = shapes
            .iter()
            .map(|h| self.solid(h))
            .collect::<Result<Vec<_>, _>>()?;
        let result = fold_solids(solids, intersection)?;
        Ok(self.store_solid(result, ShapeKind::Boolean))
    }

    fn clone_placed(
        &mut self,
        source: &KernelSolidHandle,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid = self.solid(source)?;
        let placed = primitives::place(&solid, placement);
        Ok(self.store_solid(placed, ShapeKind::Clone))
    }

    fn recompute(&mut self) -> Result<(), KernelError> {
        Ok(())
    }

    fn make_solid(&mut self, shape: &KernelSolidHandle) -> Result<KernelSolidHandle, KernelError> {
        let source = self.solid(shape)?;
        let shells = source.boundaries().clone();
        if shells.is_empty() {
            return Err(KernelError::NullShape { id: shape.id() });
        }
        let solid = Solid::try_new(shells).map_err(|e| KernelError::Other {
            message: format!("shells do not bound a solid: {}", e),
        })?;
        Ok(self.store_solid(solid, ShapeKind::Solid))
    }

    fn delete(&mut self, shape: &KernelSolidHandle) -> Result<(), KernelError> {
        self.shapes
            .remove(&shape.id())
            .map(|_| ())
            .ok_or_else(|| KernelError::not_found(shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::KernelIntrospect;

    #[test]
    fn test_truck_kernel_box_and_delete() {
        let mut kernel = TruckKernel::new();
        let handle = kernel
            .make_box(1.0, 2.0, 3.0, &Placement::identity())
            .unwrap();
        let solid = kernel.get_solid(&handle).unwrap();
        assert_eq!(solid.boundaries()[0].face_iter().count(), 6);

        kernel.delete(&handle).unwrap();
        assert!(!kernel.contains(&handle));
        assert!(kernel.delete(&handle).is_err());
    }

    #[test]
    fn test_truck_make_solid_keeps_source() {
        let mut kernel = TruckKernel::new();
        let b = kernel
            .make_box(1.0, 1.0, 1.0, &Placement::identity())
            .unwrap();
        let s = kernel.make_solid(&b).unwrap();
        assert_eq!(kernel.shape_count(), 2);
        assert_eq!(kernel.shape_kind(&s), Some(ShapeKind::Solid));
    }

    #[test]
    fn test_truck_degenerate_primitive() {
        let mut kernel = TruckKernel::new();
        let err = kernel
            .make_cylinder(-1.0, 1.0, &Placement::identity())
            .unwrap_err();
        assert!(matches!(err, KernelError::InvalidPrimitive { .. }));
    }
}
