//! Active-entry lookup and seek requests.

use crate::srt::{PlaybackSample, TimedEntry};

/// A request to move the video surface to a time offset and resume
/// playback. Produced on user entry-selection; carrying it out belongs
/// to the surface, not to this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekCommand {
    pub target_seconds: f64,
}

/// The black-box video surface. Implemented by whatever player the
/// surrounding shell drives; tests substitute a recorder.
pub trait PlaybackSurface {
    fn seek_and_play(&mut self, seconds: f64);
}

/// Returns the index of the entry whose time range contains the sample,
/// both ends inclusive. When ranges overlap, the lowest matching index
/// wins. `None` means the sample fell in a gap between cues, which is a
/// valid steady state.
///
/// A linear scan per sample is deliberate: transcripts are small and the
/// entry list only ever changes by wholesale replacement.
pub fn active_entry_index(entries: &[TimedEntry], sample: PlaybackSample) -> Option<usize> {
    entries.iter().position(|entry| {
        sample.time_seconds >= entry.start_seconds && sample.time_seconds <= entry.end_seconds
    })
}

/// Builds the seek command for a user-selected entry. Pure; ignores
/// whatever the playback position currently is.
pub fn on_entry_selected(entry: &TimedEntry) -> SeekCommand {
    SeekCommand {
        target_seconds: entry.start_seconds,
    }
}
