//! Synchronizes a textual transcript with video playback.
//!
//! [`parser::parse`] turns raw SRT text into timed entries,
//! [`sync::active_entry_index`] picks the entry matching the current
//! playback position, and [`session::TranscriptSession`] wires both to a
//! source-tagged caption fetch so that stale results are dropped.

pub mod error;
pub mod parser;
pub mod serialiser;
pub mod session;
pub mod srt;
pub mod sync;
