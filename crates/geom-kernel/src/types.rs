use serde::{Deserialize, Serialize};

/// Opaque handle to a shape in the geometry kernel.
/// NEVER persisted. Valid only for the current kernel session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernelSolidHandle(pub(crate) u64);

impl KernelSolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }

    /// Raw id, for log fields only.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Errors from kernel operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("sweep failed: {reason}")]
    SweepFailed { reason: String },

    #[error("degenerate primitive: {reason}")]
    InvalidPrimitive { reason: String },

    #[error("shape {id} has no computed geometry (null shape)")]
    NullShape { id: u64 },

    #[error("shape not found: {id}")]
    ShapeNotFound { id: u64 },

    #[error("operation not supported: {operation}")]
    NotSupported { operation: String },

    #[error("kernel error: {message}")]
    Other { message: String },
}

impl KernelError {
    pub(crate) fn not_found(handle: &KernelSolidHandle) -> Self {
        KernelError::ShapeNotFound { id: handle.id() }
    }
}

/// What produced a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Primitive,
    Boolean,
    Swept,
    Clone,
    Solid,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: [f64::INFINITY; 3],
            max: [f64::NEG_INFINITY; 3],
        }
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    pub fn include(&mut self, p: [f64; 3]) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        let mut out = *self;
        if !other.is_empty() {
            out.include(other.min);
            out.include(other.max);
        }
        out
    }

    pub fn intersection(&self, other: &Aabb) -> Aabb {
        let mut out = Aabb::empty();
        for i in 0..3 {
            out.min[i] = self.min[i].max(other.min[i]);
            out.max[i] = self.max[i].min(other.max[i]);
        }
        out
    }
}

/// Cross-section swept along a [`SweepPath`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Profile {
    /// Disc normal to the path tangent at the path start.
    Circle { radius: f64 },
}

/// One tangent-continuous piece of a sweep path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    Line {
        start: [f64; 3],
        end: [f64; 3],
    },
    /// Rotation of `start` about the line through `center` along `axis`
    /// (unit) by `angle` radians, right-handed.
    Arc {
        center: [f64; 3],
        axis: [f64; 3],
        start: [f64; 3],
        angle: f64,
    },
}

impl PathSegment {
    pub fn start_point(&self) -> [f64; 3] {
        match *self {
            PathSegment::Line { start, .. } => start,
            PathSegment::Arc { start, .. } => start,
        }
    }

    pub fn end_point(&self) -> [f64; 3] {
        match *self {
            PathSegment::Line { end, .. } => end,
            PathSegment::Arc {
                center,
                axis,
                start,
                angle,
            } => add(center, rotate_about(sub(start, center), axis, angle)),
        }
    }

    /// Unit tangent at the start of the segment.
    pub fn start_tangent(&self) -> [f64; 3] {
        match *self {
            PathSegment::Line { start, end } => normalize(sub(end, start)),
            PathSegment::Arc {
                center, axis, start, ..
            } => normalize(cross(axis, sub(start, center))),
        }
    }
}

/// Ordered, connected list of path segments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SweepPath {
    pub segments: Vec<PathSegment>,
}

impl SweepPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Consecutive segments share endpoints within `tol`.
    pub fn is_connected(&self, tol: f64) -> bool {
        self.segments
            .windows(2)
            .all(|w| distance(w[0].end_point(), w[1].start_point()) <= tol)
    }
}

pub(crate) fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub(crate) fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn scale(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

pub(crate) fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

pub(crate) fn normalize(a: [f64; 3]) -> [f64; 3] {
    let n = norm(a);
    if n < 1e-15 {
        return [0.0; 3];
    }
    scale(a, 1.0 / n)
}

pub(crate) fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    norm(sub(a, b))
}

/// Rodrigues rotation of `v` about unit `axis`.
pub(crate) fn rotate_about(v: [f64; 3], axis: [f64; 3], angle: f64) -> [f64; 3] {
    let k = normalize(axis);
    let (s, c) = angle.sin_cos();
    let kxv = cross(k, v);
    let kdv = dot(k, v);
    [
        v[0] * c + kxv[0] * s + k[0] * kdv * (1.0 - c),
        v[1] * c + kxv[1] * s + k[1] * kdv * (1.0 - c),
        v[2] * c + kxv[2] * s + k[2] * kdv * (1.0 - c),
    ]
}
