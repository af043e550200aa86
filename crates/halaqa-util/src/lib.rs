//! Shared utilities for halaqa
//!
//! This crate provides:
//! - ID types (SessionId, MeetingId)
//! - Time utilities (injectable clock, mock time, formatting)
//! - Error types
//! - Default config path

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
