pub mod commodity;
pub mod entities;
pub mod fields;

pub use commodity::*;
pub use entities::*;
