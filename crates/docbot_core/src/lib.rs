//! Docbot core: pure controller state machines and view-model helpers.
//!
//! Nothing in this crate performs IO. Each controller is driven by
//! `update(state, msg) -> (state, effects)`; the caller executes the effects
//! and feeds results back in as messages.
pub mod chat;
pub mod contract;
mod notice;

pub use notice::{Notice, NoticeLevel};

/// Source of wall-clock time for message timestamps and file names.
pub type Clock = fn() -> chrono::DateTime<chrono::Utc>;

pub(crate) fn system_clock() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}
