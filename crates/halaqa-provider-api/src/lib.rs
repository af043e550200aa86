//! Provider interfaces for halaqa
//!
//! This crate defines the contract between the status engine's world and
//! the external video-conferencing and cloud storage vendors:
//! - a meeting provider that turns a scheduled session into join links
//! - a recording store that receives finished recordings
//!
//! It ships a simulated provider for local use and a mock for tests. No
//! vendor integration lives here.

mod mock;
mod simulated;
mod traits;

pub use mock::*;
pub use simulated::*;
pub use traits::*;
