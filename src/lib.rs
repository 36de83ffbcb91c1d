pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{etl::OutreachEngine, pipeline::OutreachPipeline};
pub use crate::core::reply_parser::{parse_reply, sanitize_field};
pub use crate::domain::model::{Lead, OutputFormat, ParsedMessage, RetryPolicy};
pub use crate::utils::error::{OutreachError, Result};
