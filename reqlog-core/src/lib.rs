pub mod config;
pub mod entry;
pub mod error;
pub mod filter;
pub mod stats;

pub use config::ReqlogConfig;
pub use entry::{LogEntry, NewLogEntry};
pub use error::ReqlogError;
pub use filter::LogFilter;
pub use stats::StatsSnapshot;
