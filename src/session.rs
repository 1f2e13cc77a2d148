//! Event-driven glue between the caption fetch, the parser and the
//! synchronizer.
//!
//! The session is single-threaded: it reacts to a source change, to the
//! arrival of fetched caption text, and to playback-position samples.
//! Caption deliveries are tagged with the id of the source they were
//! fetched for, so a fetch that resolves after the user has switched to
//! another source is recognized as stale and dropped on arrival. The
//! last-issued fetch wins; no cancellation is needed.

use crate::error::SubsyncError;
use crate::parser;
use crate::srt::{MediaSource, PlaybackSample, TimedEntry};
use crate::sync::{self, SeekCommand};

use log::{debug, warn};

/// Proof of which source a caption fetch was issued for. Handed out by
/// [`TranscriptSession::change_source`] and presented back on delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    source_id: u32,
}

/// What happened to a delivered fetch result.
#[derive(Debug, PartialEq, Eq)]
pub enum DeliverOutcome {
    /// The text parsed and the transcript was replaced; carries the
    /// number of entries extracted.
    Installed(usize),
    /// The fetch failed; an empty transcript was installed. The player
    /// stays usable.
    FetchFailed,
    /// The ticket belongs to a superseded source; the result was
    /// discarded and the current transcript left untouched.
    Stale,
}

/// Holds the current transcript and the latest playback sample for one
/// player instance.
#[derive(Debug, Default)]
pub struct TranscriptSession {
    entries: Vec<TimedEntry>,
    current_source: Option<u32>,
    last_sample: Option<PlaybackSample>,
}

impl TranscriptSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches the session to a new media source. The previous
    /// transcript is discarded immediately; the returned ticket must
    /// accompany the caption text once its fetch completes.
    pub fn change_source(&mut self, source: &MediaSource) -> FetchTicket {
        self.current_source = Some(source.id);
        self.entries.clear();
        FetchTicket { source_id: source.id }
    }

    /// Accepts the result of a caption fetch. Stale tickets are dropped
    /// silently; fetch failures leave the player with an empty
    /// transcript rather than aborting.
    pub fn deliver(
        &mut self,
        ticket: FetchTicket,
        fetched: Result<String, SubsyncError>,
    ) -> DeliverOutcome {
        if self.current_source != Some(ticket.source_id) {
            debug!(
                "Discarding captions fetched for superseded source {}",
                ticket.source_id
            );
            return DeliverOutcome::Stale;
        }
        match fetched {
            Ok(raw) => {
                self.entries = parser::parse(&raw);
                DeliverOutcome::Installed(self.entries.len())
            }
            Err(err) => {
                warn!("Presenting an empty transcript: {}", err);
                self.entries.clear();
                DeliverOutcome::FetchFailed
            }
        }
    }

    /// The transcript to render, in file order.
    pub fn entries(&self) -> &[TimedEntry] {
        &self.entries
    }

    /// Records a playback-position notification and returns the index of
    /// the entry to highlight, if any.
    pub fn sample(&mut self, time_seconds: f64) -> Option<usize> {
        let sample = PlaybackSample { time_seconds };
        self.last_sample = Some(sample);
        sync::active_entry_index(&self.entries, sample)
    }

    /// The entry highlighted for the most recent sample.
    pub fn active_entry_index(&self) -> Option<usize> {
        let sample = self.last_sample?;
        sync::active_entry_index(&self.entries, sample)
    }

    /// Reacts to the user clicking entry `index`, producing the seek
    /// command for the video surface. `None` if the index is out of
    /// range (the rendered list no longer matches, e.g. mid-replacement).
    pub fn select(&self, index: usize) -> Option<SeekCommand> {
        self.entries.get(index).map(sync::on_entry_selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::PlaybackSurface;

    const CLIP_ONE_SRT: &str =
        "1\n00:00:01,000 --> 00:00:03,500\nHello world\n\n2\n00:00:04,000 --> 00:00:05,000\nSecond line\n";
    const CLIP_TWO_SRT: &str = "1\n00:00:10,000 --> 00:00:12,000\nOther clip\n";

    fn source(id: u32) -> MediaSource {
        MediaSource {
            id,
            title: format!("Clip {}", id),
            video_src: format!("/assets/video_{}/clip.mp4", id),
            captions_src: format!("/assets/video_{}/captions.srt", id),
        }
    }

    #[test]
    fn installs_captions_for_current_source() {
        let mut session = TranscriptSession::new();

        let ticket = session.change_source(&source(1));
        let outcome = session.deliver(ticket, Ok(CLIP_ONE_SRT.to_string()));

        assert_eq!(outcome, DeliverOutcome::Installed(2));
        assert_eq!(session.entries().len(), 2);
    }

    #[test]
    fn discards_fetch_for_superseded_source() {
        let mut session = TranscriptSession::new();

        let stale_ticket = session.change_source(&source(1));
        let fresh_ticket = session.change_source(&source(2));
        session.deliver(fresh_ticket, Ok(CLIP_TWO_SRT.to_string()));

        let outcome = session.deliver(stale_ticket, Ok(CLIP_ONE_SRT.to_string()));

        assert_eq!(outcome, DeliverOutcome::Stale);
        assert_eq!(session.entries().len(), 1);
        assert_eq!(session.entries()[0].text, "Other clip");
    }

    #[test]
    fn last_issued_fetch_wins_regardless_of_arrival_order() {
        let mut session = TranscriptSession::new();

        let first = session.change_source(&source(1));
        let second = session.change_source(&source(2));

        // Completions arrive out of order.
        assert_eq!(
            session.deliver(second, Ok(CLIP_TWO_SRT.to_string())),
            DeliverOutcome::Installed(1)
        );
        assert_eq!(
            session.deliver(first, Ok(CLIP_ONE_SRT.to_string())),
            DeliverOutcome::Stale
        );

        assert_eq!(session.entries()[0].text, "Other clip");
    }

    #[test]
    fn failed_fetch_leaves_an_empty_but_usable_transcript() {
        let mut session = TranscriptSession::new();

        let ticket = session.change_source(&source(1));
        let outcome = session.deliver(
            ticket,
            Err(SubsyncError::FetchFailure("404 Not Found".to_string())),
        );

        assert_eq!(outcome, DeliverOutcome::FetchFailed);
        assert!(session.entries().is_empty());
        assert_eq!(session.sample(2.0), None);
        assert_eq!(session.select(0), None);
    }

    #[test]
    fn changing_source_discards_previous_transcript() {
        let mut session = TranscriptSession::new();

        let ticket = session.change_source(&source(1));
        session.deliver(ticket, Ok(CLIP_ONE_SRT.to_string()));
        session.change_source(&source(2));

        assert!(session.entries().is_empty());
    }

    #[test]
    fn samples_drive_the_active_entry() {
        let mut session = TranscriptSession::new();
        let ticket = session.change_source(&source(1));
        session.deliver(ticket, Ok(CLIP_ONE_SRT.to_string()));

        assert_eq!(session.sample(2.0), Some(0));
        assert_eq!(session.active_entry_index(), Some(0));
        assert_eq!(session.sample(3.75), None);
        assert_eq!(session.active_entry_index(), None);
        assert_eq!(session.sample(4.5), Some(1));
    }

    #[test]
    fn selecting_an_entry_seeks_the_surface_to_its_start() {
        struct RecordingSurface {
            seeks: Vec<f64>,
        }
        impl PlaybackSurface for RecordingSurface {
            fn seek_and_play(&mut self, seconds: f64) {
                self.seeks.push(seconds);
            }
        }

        let mut session = TranscriptSession::new();
        let ticket = session.change_source(&source(1));
        session.deliver(ticket, Ok(CLIP_ONE_SRT.to_string()));

        let mut surface = RecordingSurface { seeks: Vec::new() };
        if let Some(command) = session.select(1) {
            surface.seek_and_play(command.target_seconds);
        }

        assert_eq!(surface.seeks, vec![4.0]);
    }
}
