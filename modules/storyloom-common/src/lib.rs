pub mod config;
pub mod error;
pub mod file_config;
pub mod quality;

pub use config::AppConfig;
pub use error::JudgeFailure;
pub use file_config::*;
pub use quality::*;
