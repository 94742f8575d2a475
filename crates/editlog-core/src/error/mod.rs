//! Error types for editlog
//!
//! Every fallible operation in the engine returns [`EditLogResult`]. Each
//! variant carries a stable error code (see [`EditLogError::error_code`]) so
//! callers can decide whether a failure is recoverable without matching on
//! message text.

mod constructors;
mod conversions;
mod types;

pub use types::{EditLogError, EditLogResult};
