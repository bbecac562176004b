pub mod aggregate;
pub mod cli;
pub mod collector;
pub mod error;
pub mod filter;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod pipeline;
pub mod snapshot;
pub mod upstream;

pub use cli::{Cli, Commands};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineConfig};
