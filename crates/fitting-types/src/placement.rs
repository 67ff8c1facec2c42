use serde::{Deserialize, Serialize};

/// Principal axis of the fitting frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> [f64; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }
}

/// Right-handed rotation about a principal axis through the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRotation {
    pub axis: Axis,
    /// Radians.
    pub angle: f64,
}

impl AxisRotation {
    pub fn apply(&self, p: [f64; 3]) -> [f64; 3] {
        let (s, c) = self.angle.sin_cos();
        let [x, y, z] = p;
        match self.axis {
            Axis::X => [x, y * c - z * s, y * s + z * c],
            Axis::Y => [x * c + z * s, y, -x * s + z * c],
            Axis::Z => [x * c - y * s, x * s + y * c, z],
        }
    }
}

/// Rigid placement of a primitive built in its local frame.
///
/// A local point `p` maps to `R·p + t`, where `R` applies `rotations` in
/// order (first entry first).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub translation: [f64; 3],
    pub rotations: Vec<AxisRotation>,
}

impl Placement {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn at(translation: [f64; 3]) -> Self {
        Self {
            translation,
            rotations: Vec::new(),
        }
    }

    /// Append a rotation applied after the existing ones.
    pub fn rotated(mut self, axis: Axis, angle: f64) -> Self {
        self.rotations.push(AxisRotation { axis, angle });
        self
    }

    /// Placement that maps the local +Z axis onto `dir`, starting at `origin`.
    pub fn along(dir: Direction, origin: [f64; 3]) -> Self {
        use std::f64::consts::{FRAC_PI_2, PI};
        let p = Self::at(origin);
        match dir {
            Direction::PosZ => p,
            Direction::NegZ => p.rotated(Axis::X, PI),
            Direction::PosX => p.rotated(Axis::Y, FRAC_PI_2),
            Direction::NegX => p.rotated(Axis::Y, -FRAC_PI_2),
            Direction::PosY => p.rotated(Axis::X, -FRAC_PI_2),
            Direction::NegY => p.rotated(Axis::X, FRAC_PI_2),
        }
    }

    pub fn rotate_vector(&self, v: [f64; 3]) -> [f64; 3] {
        self.rotations.iter().fold(v, |acc, r| r.apply(acc))
    }

    pub fn apply_point(&self, p: [f64; 3]) -> [f64; 3] {
        let r = self.rotate_vector(p);
        [
            r[0] + self.translation[0],
            r[1] + self.translation[1],
            r[2] + self.translation[2],
        ]
    }

    /// Inverse map from world to local coordinates.
    pub fn inverse_point(&self, p: [f64; 3]) -> [f64; 3] {
        let mut v = [
            p[0] - self.translation[0],
            p[1] - self.translation[1],
            p[2] - self.translation[2],
        ];
        for r in self.rotations.iter().rev() {
            v = AxisRotation {
                axis: r.axis,
                angle: -r.angle,
            }
            .apply(v);
        }
        v
    }

    /// `self` applied after `inner`: the combined map is `self(inner(p))`.
    pub fn compose(&self, inner: &Placement) -> Placement {
        let rotations = inner
            .rotations
            .iter()
            .chain(self.rotations.iter())
            .copied()
            .collect();
        let t = self.apply_point(inner.translation);
        Placement {
            translation: t,
            rotations,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.translation == [0.0; 3] && self.rotations.iter().all(|r| r.angle == 0.0)
    }
}

/// Signed principal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Direction {
    pub fn unit(self) -> [f64; 3] {
        match self {
            Direction::PosX => [1.0, 0.0, 0.0],
            Direction::NegX => [-1.0, 0.0, 0.0],
            Direction::PosY => [0.0, 1.0, 0.0],
            Direction::NegY => [0.0, -1.0, 0.0],
            Direction::PosZ => [0.0, 0.0, 1.0],
            Direction::NegZ => [0.0, 0.0, -1.0],
        }
    }
}
