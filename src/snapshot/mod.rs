pub mod sink;
pub mod writer;

pub use sink::*;
pub use writer::*;
