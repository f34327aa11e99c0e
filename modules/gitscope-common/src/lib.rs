pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, NarrativeProvider, ProjectListPolicy};
pub use error::{AnalyzeError, ConfigError};
pub use types::*;
