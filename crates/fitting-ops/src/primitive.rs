//! Kernel-independent descriptions of the volumes a fitting is made of.

use fitting_types::Placement;
use geom_kernel::{PathSegment, SweepPath};

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Along local +Z from z = 0.
    Cylinder { radius: f64, height: f64 },
    /// `radius1` at z = 0, `radius2` at z = height.
    Cone {
        radius1: f64,
        radius2: f64,
        height: f64,
    },
    Sphere { radius: f64 },
    /// Corner at the local origin.
    Cuboid {
        length: f64,
        width: f64,
        height: f64,
    },
    /// Circle swept along a world-space path; placement is ignored.
    Swept { radius: f64, path: SweepPath },
    Intersection(Vec<ConstructionPrimitive>),
}

/// Which axial ends of a tool open onto the outside of the fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overhang {
    pub start: bool,
    pub end: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructionPrimitive {
    pub shape: Shape,
    pub placement: Placement,
    pub overhang: Overhang,
}

impl ConstructionPrimitive {
    fn new(shape: Shape, placement: Placement) -> Self {
        Self {
            shape,
            placement,
            overhang: Overhang::default(),
        }
    }

    pub fn cylinder(radius: f64, height: f64, placement: Placement) -> Self {
        Self::new(Shape::Cylinder { radius, height }, placement)
    }

    pub fn cone(radius1: f64, radius2: f64, height: f64, placement: Placement) -> Self {
        Self::new(
            Shape::Cone {
                radius1,
                radius2,
                height,
            },
            placement,
        )
    }

    pub fn sphere(radius: f64, placement: Placement) -> Self {
        Self::new(Shape::Sphere { radius }, placement)
    }

    pub fn cuboid(length: f64, width: f64, height: f64, placement: Placement) -> Self {
        Self::new(
            Shape::Cuboid {
                length,
                width,
                height,
            },
            placement,
        )
    }

    pub fn swept(radius: f64, path: SweepPath) -> Self {
        Self::new(Shape::Swept { radius, path }, Placement::identity())
    }

    pub fn intersection(parts: Vec<ConstructionPrimitive>) -> Self {
        Self::new(Shape::Intersection(parts), Placement::identity())
    }

    pub fn open_start(mut self) -> Self {
        self.overhang.start = true;
        self
    }

    pub fn open_end(mut self) -> Self {
        self.overhang.end = true;
        self
    }

    pub fn open_both(self) -> Self {
        self.open_start().open_end()
    }

    /// Copy grown past its open ends by `margin` times its axial extent.
    ///
    /// Cones keep their slope, so the radius is extrapolated, at most up to
    /// the apex.
    /// Sweeps grow their first and last straight runs. Shapes without an axis
    /// are returned unchanged.
    pub fn with_margin(&self, margin: f64) -> Self {
        let Overhang { start, end } = self.overhang;
        if margin <= 0.0 || !(start || end) {
            return self.clone();
        }
        let grow = |extent: f64| {
            (
                if start { margin * extent } else { 0.0 },
                if end { margin * extent } else { 0.0 },
            )
        };
        let shifted = |e0: f64| self.placement.compose(&Placement::at([0.0, 0.0, -e0]));

        match &self.shape {
            Shape::Cylinder { radius, height } => {
                let (e0, e1) = grow(*height);
                Self {
                    shape: Shape::Cylinder {
                        radius: *radius,
                        height: height + e0 + e1,
                    },
                    placement: shifted(e0),
                    overhang: self.overhang,
                }
            }
            Shape::Cone {
                radius1,
                radius2,
                height,
            } => {
                let (mut e0, mut e1) = grow(*height);
                let slope = (radius2 - radius1) / height;
                // Growth past a narrowing end stops at the apex.
                if slope > 0.0 {
                    e0 = e0.min(radius1 / slope);
                }
                if slope < 0.0 {
                    e1 = e1.min(radius2 / -slope);
                }
                Self {
                    shape: Shape::Cone {
                        radius1: (radius1 - slope * e0).max(0.0),
                        radius2: (radius2 + slope * e1).max(0.0),
                        height: height + e0 + e1,
                    },
                    placement: shifted(e0),
                    overhang: self.overhang,
                }
            }
            Shape::Swept { radius, path } => Self {
                shape: Shape::Swept {
                    radius: *radius,
                    path: extend_path(path, margin, start, end),
                },
                placement: self.placement.clone(),
                overhang: self.overhang,
            },
            Shape::Sphere { .. } | Shape::Cuboid { .. } | Shape::Intersection(_) => self.clone(),
        }
    }
}

fn extend_line(seg: &mut PathSegment, margin: f64, at_start: bool) {
    if let PathSegment::Line { start, end } = seg {
        let d = [end[0] - start[0], end[1] - start[1], end[2] - start[2]];
        if at_start {
            for i in 0..3 {
                start[i] -= d[i] * margin;
            }
        } else {
            for i in 0..3 {
                end[i] += d[i] * margin;
            }
        }
    }
}

fn extend_path(path: &SweepPath, margin: f64, start: bool, end: bool) -> SweepPath {
    let mut out = path.clone();
    if start {
        if let Some(first) = out.segments.first_mut() {
            extend_line(first, margin, true);
        }
    }
    if end {
        if let Some(last) = out.segments.last_mut() {
            extend_line(last, margin, false);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fitting_types::Direction;

    #[test]
    fn margin_extends_both_open_ends_of_a_cylinder() {
        let bore = ConstructionPrimitive::cylinder(10.0, 1000.0, Placement::identity()).open_both();
        let grown = bore.with_margin(0.1);
        assert_eq!(
            grown.shape,
            Shape::Cylinder {
                radius: 10.0,
                height: 1200.0
            }
        );
        assert_abs_diff_eq!(grown.placement.apply_point([0.0; 3])[2], -100.0, epsilon = 1e-9);
    }

    #[test]
    fn margin_follows_placement_axis() {
        let socket = ConstructionPrimitive::cylinder(
            5.0,
            20.0,
            Placement::along(Direction::NegX, [-30.0, 0.0, 0.0]),
        )
        .open_end();
        let grown = socket.with_margin(0.1);
        // Closed start stays put; open end moves 2 mm further along -X.
        let start = grown.placement.apply_point([0.0; 3]);
        assert_abs_diff_eq!(start[0], -30.0, epsilon = 1e-9);
        let Shape::Cylinder { height, .. } = grown.shape else {
            panic!("still a cylinder");
        };
        let end = grown.placement.apply_point([0.0, 0.0, height]);
        assert_abs_diff_eq!(end[0], -52.0, epsilon = 1e-9);
    }

    #[test]
    fn cone_margin_keeps_slope() {
        let cone = ConstructionPrimitive::cone(10.0, 5.0, 10.0, Placement::identity()).open_end();
        let Shape::Cone {
            radius1,
            radius2,
            height,
        } = cone.with_margin(0.1).shape
        else {
            panic!("still a cone");
        };
        assert_abs_diff_eq!(radius1, 10.0);
        assert_abs_diff_eq!(radius2, 4.5, epsilon = 1e-12);
        assert_abs_diff_eq!(height, 11.0, epsilon = 1e-12);

    }

    #[test]
    fn cone_growth_stops_at_the_apex() {
        let steep = ConstructionPrimitive::cone(1.0, 0.1, 1.0, Placement::identity()).open_end();
        let Shape::Cone {
            radius1,
            radius2,
            height,
        } = steep.with_margin(0.5).shape
        else {
            panic!("still a cone");
        };
        // The original part of the tool is untouched.
        assert_abs_diff_eq!(radius1, 1.0);
        assert_abs_diff_eq!(radius2, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(height, 1.0 + 0.1 / 0.9, epsilon = 1e-12);
        assert_abs_diff_eq!((radius2 - radius1) / height, -0.9, epsilon = 1e-12);

        let widening = ConstructionPrimitive::cone(0.1, 1.0, 1.0, Placement::identity()).open_start();
        let grown = widening.with_margin(0.5);
        let Shape::Cone { radius1, radius2, height } = grown.shape else {
            panic!("still a cone");
        };
        assert_abs_diff_eq!(radius1, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(radius2, 1.0);
        assert_abs_diff_eq!(height, 1.0 + 0.1 / 0.9, epsilon = 1e-12);
        // The wide end stays where it was.
        assert_abs_diff_eq!(grown.placement.apply_point([0.0, 0.0, height])[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn closed_tools_are_unchanged() {
        let body = ConstructionPrimitive::cylinder(1.0, 2.0, Placement::identity());
        assert_eq!(body.with_margin(0.1), body);
    }
}
