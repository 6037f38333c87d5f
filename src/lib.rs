//! Satisfaction prep - подготовка датасета удовлетворённости пассажиров

pub mod cleaning;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod preprocessing;
pub mod split;
pub mod types;
pub mod validation;

pub use config::{Args, PipelineConfig};
pub use error::{PrepError, Result};
pub use pipeline::{run, PipelineOutput};
pub use types::*;
