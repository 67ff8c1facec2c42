//! Higher-level primitive builders on top of truck's sweep API.
//!
//! truck has no built-in cylinder/cone/sphere, so everything is successive sweeps.

use crate::types::{KernelError, PathSegment};
use fitting_types::{Axis, Placement};
use std::f64::consts::PI;
use truck_modeling::builder;
use truck_modeling::topology::{Face, Solid, Wire};
use truck_modeling::{EuclideanSpace, InnerSpace, Point3, Rad, Vector3};

fn attach(wire: Wire, what: &str) -> Result<Face, KernelError> {
    builder::try_attach_plane(&[wire]).map_err(|e| KernelError::Other {
        message: format!("failed to create {} face: {}", what, e),
    })
}

/// Box with a corner at the origin, extending to (l, w, h).
pub fn make_box(l: f64, w: f64, h: f64) -> Solid {
    let v = builder::vertex(Point3::new(0.0, 0.0, 0.0));
    let edge = builder::tsweep(&v, Vector3::new(l, 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, w, 0.0));
    builder::tsweep(&face, Vector3::new(0.0, 0.0, h))
}

/// Disc of `radius` centred on the origin in the XY plane.
fn disc(radius: f64) -> Result<Face, KernelError> {
    let v = builder::vertex(Point3::new(radius, 0.0, 0.0));
    let wire = builder::rsweep(&v, Point3::origin(), Vector3::unit_z(), Rad(2.0 * PI));
    attach(wire, "circular")
}

/// Cylinder with its base centred on the origin, extending along +Z.
pub fn make_cylinder(radius: f64, height: f64) -> Result<Solid, KernelError> {
    let face = disc(radius)?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// Truncated cone along +Z: the XZ-plane outline revolved about the Z axis.
///
/// The outline runs from the top of the axis down to its base, which keeps
/// the faces of the revolved shell pointing outward.
pub fn make_cone(radius1: f64, radius2: f64, height: f64) -> Solid {
    let mut points = vec![Point3::new(0.0, 0.0, height)];
    if radius2 > 0.0 {
        points.push(Point3::new(radius2, 0.0, height));
    }
    if radius1 > 0.0 {
        points.push(Point3::new(radius1, 0.0, 0.0));
    }
    points.push(Point3::new(0.0, 0.0, 0.0));

    let vertices: Vec<_> = points.iter().map(|&p| builder::vertex(p)).collect();
    let wire: Wire = vertices
        .windows(2)
        .map(|pair| builder::line(&pair[0], &pair[1]))
        .collect();
    let shell = builder::cone(&wire, Vector3::unit_z(), Rad(2.0 * PI));
    Solid::new(vec![shell])
}

/// Sphere centred on the origin: a pole-to-pole meridian revolved about Z.
pub fn make_sphere(radius: f64) -> Solid {
    let north = builder::vertex(Point3::new(0.0, 0.0, radius));
    let meridian: Wire = builder::rsweep(&north, Point3::origin(), Vector3::unit_y(), Rad(PI));
    let shell = builder::cone(&meridian, Vector3::unit_z(), Rad(2.0 * PI));
    Solid::new(vec![shell])
}

/// Move a solid built in its local frame into place.
pub fn place(solid: &Solid, placement: &Placement) -> Solid {
    let mut out = solid.clone();
    for r in &placement.rotations {
        let axis = match r.axis {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        };
        out = builder::rotated(&out, Point3::origin(), axis, Rad(r.angle));
    }
    let [x, y, z] = placement.translation;
    builder::translated(&out, Vector3::new(x, y, z))
}

fn point(p: [f64; 3]) -> Point3 {
    Point3::new(p[0], p[1], p[2])
}

fn vector(v: [f64; 3]) -> Vector3 {
    Vector3::new(v[0], v[1], v[2])
}

/// Disc of `radius` centred at `center`, normal to `normal`.
fn disc_at(radius: f64, center: [f64; 3], normal: [f64; 3]) -> Result<Face, KernelError> {
    let n = vector(normal).normalize();
    let helper = if n.z.abs() < 0.9 {
        Vector3::unit_z()
    } else {
        Vector3::unit_x()
    };
    let u = n.cross(helper).normalize();
    let c = point(center);
    let v = builder::vertex(c + u * radius);
    let wire = builder::rsweep(&v, c, n, Rad(2.0 * PI));
    attach(wire, "profile")
}

/// One solid per path segment, each a disc swept along that segment.
pub fn sweep_segments(radius: f64, segments: &[PathSegment]) -> Result<Vec<Solid>, KernelError> {
    segments
        .iter()
        .map(|seg| {
            let face = disc_at(radius, seg.start_point(), seg.start_tangent())?;
            Ok(match *seg {
                PathSegment::Line { start, end } => builder::tsweep(
                    &face,
                    Vector3::new(end[0] - start[0], end[1] - start[1], end[2] - start[2]),
                ),
                PathSegment::Arc {
                    center,
                    axis,
                    angle,
                    ..
                } => builder::rsweep(&face, point(center), vector(axis).normalize(), Rad(angle)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use truck_modeling::topology::ShellCondition;

    fn bounds(solid: &Solid) -> ([f64; 3], [f64; 3]) {
        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for shell in solid.boundaries() {
            for v in shell.vertex_iter() {
                let p = v.point();
                for i in 0..3 {
                    min[i] = min[i].min(p[i]);
                    max[i] = max[i].max(p[i]);
                }
            }
        }
        (min, max)
    }

    #[test]
    fn test_make_box_dimensions() {
        let (min, max) = bounds(&make_box(2.0, 3.0, 4.0));
        let eps = 1e-10;
        assert!((max[0] - min[0] - 2.0).abs() < eps);
        assert!((max[1] - min[1] - 3.0).abs() < eps);
        assert!((max[2] - min[2] - 4.0).abs() < eps);
    }

    #[test]
    fn test_make_cylinder_topology() {
        let solid = make_cylinder(1.0, 2.0).unwrap();
        let boundaries = solid.boundaries();
        assert_eq!(boundaries.len(), 1, "cylinder should have 1 shell");
        assert!(boundaries[0].face_iter().count() >= 3);
    }

    #[test]
    fn test_make_sphere_is_closed_and_round() {
        let solid = make_sphere(5.0);
        let shell = &solid.boundaries()[0];
        assert_eq!(shell.shell_condition(), ShellCondition::Closed);
        let (min, max) = bounds(&solid);
        // Both poles are vertices of the meridian.
        assert!((max[2] - 5.0).abs() < 1e-9);
        assert!((min[2] + 5.0).abs() < 1e-9);
        for v in shell.vertex_iter() {
            assert!((v.point().to_vec().magnitude() - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_make_cone_apex_and_frustum_are_closed() {
        for (r1, r2) in [(2.0, 1.0), (2.0, 0.0), (0.0, 3.0)] {
            let solid = make_cone(r1, r2, 4.0);
            let shell = &solid.boundaries()[0];
            assert_eq!(shell.shell_condition(), ShellCondition::Closed, "{r1}/{r2}");
            let (min, max) = bounds(&solid);
            assert!((min[2]).abs() < 1e-9);
            assert!((max[2] - 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_place_rotates_then_translates() {
        let solid = make_box(1.0, 1.0, 4.0);
        let moved = place(
            &solid,
            &Placement::at([10.0, 0.0, 0.0]).rotated(Axis::Y, PI / 2.0),
        );
        let (min, max) = bounds(&moved);
        // +Z extent now lies along +X.
        assert!((max[0] - 14.0).abs() < 1e-9);
        assert!((min[0] - 10.0).abs() < 1e-9);
        assert!((min[2] + 1.0).abs() < 1e-9);
    }
}
