pub mod assemble;
pub mod builder;
pub mod context;
pub mod fittings;
pub mod primitive;
pub mod solidify;
pub mod sweep_path;
pub mod taper;
pub mod types;
pub mod validate;

pub use assemble::assemble;
pub use builder::{builder_for, FittingBuilder};
pub use context::{ConstructionContext, KernelBundle};
pub use primitive::{ConstructionPrimitive, Overhang, Shape};
pub use solidify::{finish, purge, solidify};
pub use sweep_path::{elbow_path, ElbowPath};
pub use taper::taper_shift;
pub use types::*;
