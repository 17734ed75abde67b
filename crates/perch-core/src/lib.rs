pub mod config;
pub mod error;
pub mod result;

pub use config::AppConfig;
pub use error::PerchError;
pub use result::PerchResult;
