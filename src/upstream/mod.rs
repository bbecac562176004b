pub mod client;
pub mod envelope;
pub mod memory;
pub mod transport;

pub use client::*;
pub use envelope::*;
pub use memory::*;
pub use transport::*;
