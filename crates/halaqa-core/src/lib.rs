//! Meeting status engine and session board for halaqa
//!
//! This crate contains:
//! - Meeting construction with fail-fast validation
//! - The status engine (Cancelled / Ended overrides, then
//!   Upcoming -> Ready -> Live -> Ended over the clock)
//! - The session board, re-evaluated by a caller-owned timer
//! - Link generation planning and recording archival against the
//!   provider contract

mod board;
mod engine;
mod events;
mod links;
mod meeting;
mod recording;

pub use board::*;
pub use engine::*;
pub use events::*;
pub use links::*;
pub use meeting::*;
pub use recording::*;
