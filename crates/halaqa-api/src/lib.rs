//! Shared types for halaqa
//!
//! This crate defines the types passed between the engine, the config
//! loader and anything that displays session cards:
//! - Administrative and meeting lifecycle statuses
//! - The status triple returned by the engine
//! - Payloads of the external meeting provider

mod events;
mod types;

pub use events::*;
pub use types::*;
