//! Edit-burst logger
//!
//! Facade over [`editlog_core`]; see that crate for the engine itself.

pub use editlog_core::*;
