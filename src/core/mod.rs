pub mod etl;
pub mod gemini;
pub mod pipeline;
pub mod prompt;
pub mod reply_parser;
pub mod retry;
pub mod sheet;

pub use crate::domain::model::{LeadSheet, OutreachResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Sleeper, Storage};
pub use crate::utils::error::Result;
