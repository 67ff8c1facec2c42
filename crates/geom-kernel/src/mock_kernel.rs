//! MockKernel: deterministic test double implementing Kernel + KernelIntrospect.
//!
//! Every shape is a CSG tree over exact primitives, so point membership and
//! bounding boxes are answered analytically. Boolean, sweep and clone results
//! stay uncomputed until `recompute()`, mirroring kernels that evaluate
//! lazily. Used by fitting-ops and fitting-engine for unit testing.

use crate::traits::{Kernel, KernelIntrospect};
use crate::types::*;
use fitting_types::Placement;
use std::collections::HashMap;

/// Membership slack, in millimetres.
const TOL: f64 = 1e-7;

/// Operation that a [`MockKernel`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailurePoint {
    Fuse,
    Cut,
    Common,
    Sweep,
    Clone,
    Recompute,
    MakeSolid,
}

#[derive(Debug, Clone)]
enum Node {
    Cylinder {
        radius: f64,
        height: f64,
        placement: Placement,
    },
    Cone {
        radius1: f64,
        radius2: f64,
        height: f64,
        placement: Placement,
    },
    Sphere {
        radius: f64,
        placement: Placement,
    },
    Cuboid {
        size: [f64; 3],
        placement: Placement,
    },
    Swept {
        radius: f64,
        path: SweepPath,
    },
    Union(Vec<Node>),
    Difference(Box<Node>, Box<Node>),
    Intersection(Vec<Node>),
    Placed {
        inner: Box<Node>,
        placement: Placement,
    },
}

#[derive(Debug, Clone)]
struct MockShape {
    node: Node,
    kind: ShapeKind,
    computed: bool,
}

/// Deterministic test double for the geometry kernel.
/// Implements both Kernel and KernelIntrospect.
pub struct MockKernel {
    next_handle: u64,
    shapes: HashMap<u64, MockShape>,
    failure: Option<FailurePoint>,
    deletion_log: Vec<u64>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            shapes: HashMap::new(),
            failure: None,
            deletion_log: Vec::new(),
        }
    }

    /// Kernel whose every `point` operation fails.
    pub fn with_failure(point: FailurePoint) -> Self {
        let mut kernel = Self::new();
        kernel.failure = Some(point);
        kernel
    }

    pub fn set_failure(&mut self, point: Option<FailurePoint>) {
        self.failure = point;
    }

    /// Raw ids of deleted shapes, in deletion order.
    pub fn deletion_log(&self) -> &[u64] {
        &self.deletion_log
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    fn store(&mut self, node: Node, kind: ShapeKind, computed: bool) -> KernelSolidHandle {
        let handle = self.alloc_handle();
        self.shapes.insert(
            handle.id(),
            MockShape {
                node,
                kind,
                computed,
            },
        );
        handle
    }

    fn node(&self, handle: &KernelSolidHandle) -> Result<&Node, KernelError> {
        self.shapes
            .get(&handle.id())
            .map(|s| &s.node)
            .ok_or_else(|| KernelError::not_found(handle))
    }

    fn nodes(&self, handles: &[KernelSolidHandle]) -> Result<Vec<Node>, KernelError> {
        handles.iter().map(|h| self.node(h).cloned()).collect()
    }

    fn check_failure(&self, point: FailurePoint) -> Result<(), KernelError> {
        if self.failure != Some(point) {
            return Ok(());
        }
        let reason = format!("injected {:?} failure", point);
        Err(match point {
            FailurePoint::Fuse | FailurePoint::Cut | FailurePoint::Common => {
                KernelError::BooleanFailed { reason }
            }
            FailurePoint::Sweep => KernelError::SweepFailed { reason },
            _ => KernelError::Other { message: reason },
        })
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn positive(name: &str, value: f64) -> Result<(), KernelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidPrimitive {
            reason: format!("{} must be positive, got {}", name, value),
        })
    }
}

impl Kernel for MockKernel {
    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError> {
        positive("cylinder radius", radius)?;
        positive("cylinder height", height)?;
        let node = Node::Cylinder {
            radius,
            height,
            placement: placement.clone(),
        };
        Ok(self.store(node, ShapeKind::Primitive, true))
    }

    fn make_cone(
        &mut self,
        radius1: f64,
        radius2: f64,
        height: f64,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError> {
        positive("cone height", height)?;
        if !(radius1 >= 0.0 && radius2 >= 0.0) || radius1 + radius2 <= 0.0 {
            return Err(KernelError::InvalidPrimitive {
                reason: format!("cone radii {} / {} are degenerate", radius1, radius2),
            });
        }
        let node = Node::Cone {
            radius1,
            radius2,
            height,
            placement: placement.clone(),
        };
        Ok(self.store(node, ShapeKind::Primitive, true))
    }

    fn make_sphere(
        &mut self,
        radius: f64,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError> {
        positive("sphere radius", radius)?;
        let node = Node::Sphere {
            radius,
            placement: placement.clone(),
        };
        Ok(self.store(node, ShapeKind::Primitive, true))
    }

    fn make_box(
        &mut self,
        length: f64,
        width: f64,
        height: f64,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError> {
        positive("box length", length)?;
        positive("box width", width)?;
        positive("box height", height)?;
        let node = Node::Cuboid {
            size: [length, width, height],
            placement: placement.clone(),
        };
        Ok(self.store(node, ShapeKind::Primitive, true))
    }

    fn sweep(
        &mut self,
        profile: &Profile,
        path: &SweepPath,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.check_failure(FailurePoint::Sweep)?;
        let Profile::Circle { radius } = *profile;
        positive("profile radius", radius)?;
        if path.segments.is_empty() {
            return Err(KernelError::SweepFailed {
                reason: "empty path".to_string(),
            });
        }
        if !path.is_connected(1e-6) {
            return Err(KernelError::SweepFailed {
                reason: "path segments are not connected".to_string(),
            });
        }
        let node = Node::Swept {
            radius,
            path: path.clone(),
        };
        Ok(self.store(node, ShapeKind::Swept, false))
    }

    fn fuse(&mut self, shapes: &[KernelSolidHandle]) -> Result<KernelSolidHandle, KernelError> {
        self.check_failure(FailurePoint::Fuse)?;
        if shapes.is_empty() {
            return Err(KernelError::BooleanFailed {
                reason: "fuse of zero shapes".to_string(),
            });
        }
        let nodes = self.nodes(shapes)?;
        Ok(self.store(Node::Union(nodes), ShapeKind::Boolean, false))
    }

    fn cut(
        &mut self,
        base: &KernelSolidHandle,
        tool: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.check_failure(FailurePoint::Cut)?;
        let a = self.node(base)?.clone();
        let b = self.node(tool)?.clone();
        Ok(self.store(
            Node::Difference(Box::new(a), Box::new(b)),
            ShapeKind::Boolean,
            false,
        ))
    }

    fn common(&mut self, shapes: &[KernelSolidHandle]) -> Result<KernelSolidHandle, KernelError> {
        self.check_failure(FailurePoint::Common)?;
        if shapes.is_empty() {
            return Err(KernelError::BooleanFailed {
                reason: "common of zero shapes".to_string(),
            });
        }
        let nodes = self.nodes(shapes)?;
        Ok(self.store(Node::Intersection(nodes), ShapeKind::Boolean, false))
    }

    fn clone_placed(
        &mut self,
        source: &KernelSolidHandle,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.check_failure(FailurePoint::Clone)?;
        let inner = self.node(source)?.clone();
        let node = Node::Placed {
            inner: Box::new(inner),
            placement: placement.clone(),
        };
        Ok(self.store(node, ShapeKind::Clone, false))
    }

    fn recompute(&mut self) -> Result<(), KernelError> {
        self.check_failure(FailurePoint::Recompute)?;
        for shape in self.shapes.values_mut() {
            shape.computed = true;
        }
        Ok(())
    }

    fn make_solid(&mut self, shape: &KernelSolidHandle) -> Result<KernelSolidHandle, KernelError> {
        self.check_failure(FailurePoint::MakeSolid)?;
        let source = self
            .shapes
            .get(&shape.id())
            .ok_or_else(|| KernelError::not_found(shape))?;
        if !source.computed {
            return Err(KernelError::NullShape { id: shape.id() });
        }
        let node = source.node.clone();
        Ok(self.store(node, ShapeKind::Solid, true))
    }

    fn delete(&mut self, shape: &KernelSolidHandle) -> Result<(), KernelError> {
        self.shapes
            .remove(&shape.id())
            .ok_or_else(|| KernelError::not_found(shape))?;
        self.deletion_log.push(shape.id());
        Ok(())
    }
}

impl KernelIntrospect for MockKernel {
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
        self.shapes.get(&shape.id()).is_some_and(|s| s.computed)
    }

    fn bounding_box(&self, shape: &KernelSolidHandle) -> Option<Aabb> {
        let s = self.shapes.get(&shape.id())?;
        if !s.computed {
            return None;
        }
        Some(node_bounds(&s.node))
    }

    fn contains_point(
        &self,
        shape: &KernelSolidHandle,
        point: [f64; 3],
    ) -> Result<bool, KernelError> {
        let s = self
            .shapes
            .get(&shape.id())
            .ok_or_else(|| KernelError::not_found(shape))?;
        if !s.computed {
            return Err(KernelError::NullShape { id: shape.id() });
        }
        Ok(inside(&s.node, point, TOL))
    }
}

/// Membership test. Positive `tol` grows the shape, negative shrinks it.
fn inside(node: &Node, p: [f64; 3], tol: f64) -> bool {
    match node {
        Node::Cylinder {
            radius,
            height,
            placement,
        } => {
            let q = placement.inverse_point(p);
            q[2] >= -tol && q[2] <= height + tol && q[0].hypot(q[1]) <= radius + tol
        }
        Node::Cone {
            radius1,
            radius2,
            height,
            placement,
        } => {
            let q = placement.inverse_point(p);
            if q[2] < -tol || q[2] > height + tol {
                return false;
            }
            let t = (q[2] / height).clamp(0.0, 1.0);
            let r = radius1 + (radius2 - radius1) * t;
            q[0].hypot(q[1]) <= r + tol
        }
        Node::Sphere { radius, placement } => norm(placement.inverse_point(p)) <= radius + tol,
        Node::Cuboid { size, placement } => {
            let q = placement.inverse_point(p);
            (0..3).all(|i| q[i] >= -tol && q[i] <= size[i] + tol)
        }
        Node::Swept { radius, path } => path
            .segments
            .iter()
            .any(|seg| inside_segment(seg, *radius, p, tol)),
        Node::Union(children) => children.iter().any(|c| inside(c, p, tol)),
        Node::Intersection(children) => children.iter().all(|c| inside(c, p, tol)),
        Node::Difference(a, b) => inside(a, p, tol) && !inside(b, p, -tol),
        Node::Placed { inner, placement } => inside(inner, placement.inverse_point(p), tol),
    }
}

fn inside_segment(seg: &PathSegment, radius: f64, p: [f64; 3], tol: f64) -> bool {
    match *seg {
        PathSegment::Line { start, end } => {
            let d = sub(end, start);
            let len = norm(d);
            if len < 1e-15 {
                return false;
            }
            let u = scale(d, 1.0 / len);
            let w = sub(p, start);
            let along = dot(w, u);
            if along < -tol || along > len + tol {
                return false;
            }
            norm(sub(w, scale(u, along))) <= radius + tol
        }
        PathSegment::Arc {
            center,
            axis,
            start,
            angle,
        } => {
            let k = normalize(axis);
            let s0 = sub(start, center);
            let bend = norm(s0);
            let w = sub(p, center);
            let h = dot(w, k);
            let planar = sub(w, scale(k, h));
            let rho = norm(planar);
            let mut phi = dot(cross(s0, planar), k).atan2(dot(s0, planar));
            let slack = if bend > 0.0 { tol.abs() / bend } else { 0.0 };
            if phi < -slack {
                phi += std::f64::consts::TAU;
            }
            if phi > angle + slack {
                return false;
            }
            let r = radius + tol;
            r >= 0.0 && (rho - bend).powi(2) + h * h <= r * r
        }
    }
}

fn placed_bounds(local: &Aabb, placement: &Placement) -> Aabb {
    let mut out = Aabb::empty();
    for i in 0..8 {
        let corner = [
            if i & 1 == 0 { local.min[0] } else { local.max[0] },
            if i & 2 == 0 { local.min[1] } else { local.max[1] },
            if i & 4 == 0 { local.min[2] } else { local.max[2] },
        ];
        out.include(placement.apply_point(corner));
    }
    out
}

fn node_bounds(node: &Node) -> Aabb {
    match node {
        Node::Cylinder {
            radius,
            height,
            placement,
        } => placed_bounds(
            &Aabb {
                min: [-radius, -radius, 0.0],
                max: [*radius, *radius, *height],
            },
            placement,
        ),
        Node::Cone {
            radius1,
            radius2,
            height,
            placement,
        } => {
            let r = radius1.max(*radius2);
            placed_bounds(
                &Aabb {
                    min: [-r, -r, 0.0],
                    max: [r, r, *height],
                },
                placement,
            )
        }
        Node::Sphere { radius, placement } => {
            let c = placement.apply_point([0.0; 3]);
            Aabb {
                min: [c[0] - radius, c[1] - radius, c[2] - radius],
                max: [c[0] + radius, c[1] + radius, c[2] + radius],
            }
        }
        Node::Cuboid { size, placement } => placed_bounds(
            &Aabb {
                min: [0.0; 3],
                max: *size,
            },
            placement,
        ),
        Node::Swept { radius, path } => {
            let mut out = Aabb::empty();
            for seg in &path.segments {
                for p in sample_segment(seg) {
                    out.include(sub(p, [*radius; 3]));
                    out.include(add(p, [*radius; 3]));
                }
            }
            out
        }
        Node::Union(children) => children
            .iter()
            .fold(Aabb::empty(), |acc, c| acc.union(&node_bounds(c))),
        Node::Intersection(children) => {
            let mut iter = children.iter().map(node_bounds);
            let first = iter.next().unwrap_or_else(Aabb::empty);
            iter.fold(first, |acc, b| acc.intersection(&b))
        }
        Node::Difference(a, _) => node_bounds(a),
        Node::Placed { inner, placement } => placed_bounds(&node_bounds(inner), placement),
    }
}

fn sample_segment(seg: &PathSegment) -> Vec<[f64; 3]> {
    match *seg {
        PathSegment::Line { start, end } => vec![start, end],
        PathSegment::Arc {
            center,
            axis,
            start,
            angle,
        } => {
            let steps = 64;
            (0..=steps)
                .map(|i| {
                    let a = angle * i as f64 / steps as f64;
                    add(center, rotate_about(sub(start, center), axis, a))
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitting_types::{Axis, Direction};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_cylinder_membership() {
        let mut k = MockKernel::new();
        let c = k.make_cylinder(2.0, 10.0, &Placement::identity()).unwrap();
        assert!(k.contains_point(&c, [0.0, 0.0, 5.0]).unwrap());
        assert!(k.contains_point(&c, [2.0, 0.0, 0.0]).unwrap());
        assert!(!k.contains_point(&c, [2.1, 0.0, 5.0]).unwrap());
        assert!(!k.contains_point(&c, [0.0, 0.0, 10.5]).unwrap());
    }

    #[test]
    fn test_placed_cylinder_along_x() {
        let mut k = MockKernel::new();
        let c = k
            .make_cylinder(1.0, 4.0, &Placement::along(Direction::PosX, [1.0, 0.0, 0.0]))
            .unwrap();
        assert!(k.contains_point(&c, [4.5, 0.0, 0.0]).unwrap());
        assert!(!k.contains_point(&c, [0.5, 0.0, 0.0]).unwrap());
        let bb = k.bounding_box(&c).unwrap();
        assert!((bb.min[0] - 1.0).abs() < 1e-9 && (bb.max[0] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_cut_is_lazy_until_recompute() {
        let mut k = MockKernel::new();
        let outer = k.make_cylinder(2.0, 10.0, &Placement::identity()).unwrap();
        let bore = k
            .make_cylinder(1.0, 12.0, &Placement::at([0.0, 0.0, -1.0]))
            .unwrap();
        let tube = k.cut(&outer, &bore).unwrap();

        assert!(!k.is_computed(&tube));
        assert!(matches!(
            k.make_solid(&tube),
            Err(KernelError::NullShape { .. })
        ));

        k.recompute().unwrap();
        assert!(!k.contains_point(&tube, [0.0, 0.0, 5.0]).unwrap());
        assert!(k.contains_point(&tube, [1.5, 0.0, 5.0]).unwrap());
        // Bore wall is part of the tube.
        assert!(k.contains_point(&tube, [1.0, 0.0, 5.0]).unwrap());

        let solid = k.make_solid(&tube).unwrap();
        assert_eq!(k.shape_kind(&solid), Some(ShapeKind::Solid));
    }

    #[test]
    fn test_boolean_snapshots_operands() {
        let mut k = MockKernel::new();
        let a = k.make_box(1.0, 1.0, 1.0, &Placement::identity()).unwrap();
        let b = k
            .make_box(1.0, 1.0, 1.0, &Placement::at([2.0, 0.0, 0.0]))
            .unwrap();
        let u = k.fuse(&[a.clone(), b.clone()]).unwrap();
        k.delete(&a).unwrap();
        k.delete(&b).unwrap();
        k.recompute().unwrap();
        assert!(k.contains_point(&u, [2.5, 0.5, 0.5]).unwrap());
        assert!(!k.contains_point(&u, [1.5, 0.5, 0.5]).unwrap());
        assert_eq!(k.shape_count(), 1);
    }

    #[test]
    fn test_delete_twice_reports_missing() {
        let mut k = MockKernel::new();
        let s = k.make_sphere(1.0, &Placement::identity()).unwrap();
        k.delete(&s).unwrap();
        assert!(matches!(k.delete(&s), Err(KernelError::ShapeNotFound { .. })));
        assert_eq!(k.deletion_log(), &[s.raw()]);
    }

    #[test]
    fn test_degenerate_primitives_rejected() {
        let mut k = MockKernel::new();
        let p = Placement::identity();
        assert!(k.make_cylinder(0.0, 1.0, &p).is_err());
        assert!(k.make_box(1.0, -1.0, 1.0, &p).is_err());
        assert!(k.make_cone(0.0, 0.0, 1.0, &p).is_err());
        assert!(k.make_cone(0.0, 1.0, 1.0, &p).is_ok());
        assert_eq!(k.shape_count(), 1);
    }

    #[test]
    fn test_common_of_rotated_boxes() {
        let mut k = MockKernel::new();
        let a = k
            .make_box(4.0, 2.0, 1.0, &Placement::at([-2.0, -1.0, 0.0]))
            .unwrap();
        let b = k
            .make_box(
                4.0,
                2.0,
                1.0,
                &Placement::at([0.0, 0.0, 0.0]).rotated(Axis::Z, FRAC_PI_2).compose(
                    &Placement::at([-2.0, -1.0, 0.0]),
                ),
            )
            .unwrap();
        let c = k.common(&[a, b]).unwrap();
        k.recompute().unwrap();
        assert!(k.contains_point(&c, [0.9, 0.9, 0.5]).unwrap());
        assert!(!k.contains_point(&c, [1.5, 0.0, 0.5]).unwrap());
    }

    #[test]
    fn test_sweep_line_arc_line() {
        let mut k = MockKernel::new();
        let arc = PathSegment::Arc {
            center: [5.0, 0.0, 0.0],
            axis: [0.0, 1.0, 0.0],
            start: [0.0, 0.0, 0.0],
            angle: FRAC_PI_2,
        };
        let path = SweepPath::new(vec![
            PathSegment::Line {
                start: [0.0, 0.0, -3.0],
                end: [0.0, 0.0, 0.0],
            },
            arc,
            PathSegment::Line {
                start: arc.end_point(),
                end: add(arc.end_point(), [3.0, 0.0, 0.0]),
            },
        ]);
        let tube = k.sweep(&Profile::Circle { radius: 1.0 }, &path).unwrap();
        k.recompute().unwrap();

        assert!(k.contains_point(&tube, [0.0, 0.0, -2.0]).unwrap());
        // Mid-arc point on the path.
        let mid = add([5.0, 0.0, 0.0], rotate_about([-5.0, 0.0, 0.0], [0.0, 1.0, 0.0], 0.7));
        assert!(k.contains_point(&tube, mid).unwrap());
        assert!(k.contains_point(&tube, [7.0, 0.0, 5.0]).unwrap());
        // Centre of the bend is outside the tube.
        assert!(!k.contains_point(&tube, [5.0, 0.0, 0.0]).unwrap());
    }

    #[test]
    fn test_disconnected_path_rejected() {
        let mut k = MockKernel::new();
        let path = SweepPath::new(vec![
            PathSegment::Line {
                start: [0.0; 3],
                end: [0.0, 0.0, 1.0],
            },
            PathSegment::Line {
                start: [0.0, 0.0, 2.0],
                end: [0.0, 0.0, 3.0],
            },
        ]);
        let err = k.sweep(&Profile::Circle { radius: 1.0 }, &path).unwrap_err();
        assert!(matches!(err, KernelError::SweepFailed { .. }));
    }

    #[test]
    fn test_injected_failure() {
        let mut k = MockKernel::with_failure(FailurePoint::Cut);
        let a = k.make_sphere(2.0, &Placement::identity()).unwrap();
        let b = k.make_sphere(1.0, &Placement::identity()).unwrap();
        assert!(matches!(
            k.cut(&a, &b),
            Err(KernelError::BooleanFailed { .. })
        ));
        k.set_failure(None);
        assert!(k.cut(&a, &b).is_ok());
    }

    #[test]
    fn test_clone_placed_moves_copy_only() {
        let mut k = MockKernel::new();
        let c = k.make_cylinder(1.0, 2.0, &Placement::identity()).unwrap();
        let moved = k
            .clone_placed(&c, &Placement::at([10.0, 0.0, 0.0]))
            .unwrap();
        k.recompute().unwrap();
        assert!(k.contains_point(&moved, [10.0, 0.0, 1.0]).unwrap());
        assert!(!k.contains_point(&moved, [0.0, 0.0, 1.0]).unwrap());
        assert!(k.contains_point(&c, [0.0, 0.0, 1.0]).unwrap());
        assert_eq!(k.shape_kind(&moved), Some(ShapeKind::Clone));
    }
}
