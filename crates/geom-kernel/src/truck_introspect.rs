//! KernelIntrospect for TruckKernel.

use crate::traits::KernelIntrospect;
use crate::truck_kernel::TruckKernel;
use crate::types::*;

use truck_modeling::topology::Solid;
use truck_modeling::{BoundedCurve, ParameterDivision1D};

/// Chord tolerance used when sampling edges for bounds.
const SAMPLE_TOL: f64 = 0.01;

impl KernelIntrospect for TruckKernel {
    fn contains(&self, shape: &KernelSolidHandle) -> bool {
        self.shapes.contains_key(&shape.id())
    }

    fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    fn shape_kind(&self, shape: &KernelSolidHandle) -> Option<ShapeKind> {
        self.shapes.get(&shape.id()).map(|s| s.kind)
    }

    fn is_computed(&self, shape: &KernelSolidHandle) -> bool {
        self.contains(shape)
    }

    fn bounding_box(&self, shape: &KernelSolidHandle) -> Option<Aabb> {
        self.get_solid(shape).map(solid_bounds)
    }

    fn contains_point(
        &self,
        _shape: &KernelSolidHandle,
        _point: [f64; 3],
    ) -> Result<bool, KernelError> {
        Err(KernelError::NotSupported {
            operation: "contains_point".to_string(),
        })
    }
}

/// Bounds of every edge curve, sampled at `SAMPLE_TOL`.
fn solid_bounds(solid: &Solid) -> Aabb {
    let mut out = Aabb::empty();
    for shell in solid.boundaries() {
        for edge in shell.edge_iter() {
            let curve = edge.oriented_curve();
            let range = curve.range_tuple();
            let (_params, points) = curve.parameter_division(range, SAMPLE_TOL);
            for p in points {
                out.include([p.x, p.y, p.z]);
            }
        }
    }
    out
}
