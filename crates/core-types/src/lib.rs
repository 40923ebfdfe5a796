// In crates/core-types/src/lib.rs

pub mod error;
pub mod overrides;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{ConfigError, Result};
pub use overrides::{FieldValue, Override};
pub use types::{AppliedPrice, ParseTimeframeError, RecordKind, Timeframe};
