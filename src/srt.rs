/// One parsed subtitle cue. Both offsets are inclusive and `end_seconds`
/// is never smaller than `start_seconds`; the parser filters violators.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEntry {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub text: String,
}

/// The latest playback position reported by the video surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSample {
    pub time_seconds: f64,
}

/// A playable media asset. The id tags caption fetches so that results
/// arriving for a superseded source can be recognized and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSource {
    pub id: u32,
    pub title: String,
    pub video_src: String,
    pub captions_src: String,
}
