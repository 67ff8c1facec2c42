pub mod defaults;
pub mod dims;
pub mod fitting;
pub mod placement;
pub mod quantity;

pub use dims::*;
pub use fitting::*;
pub use placement::*;
pub use quantity::*;
