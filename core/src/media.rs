use std::fmt;
use std::str::FromStr;

pub const PLAY_GLYPH: &str = "▶";
pub const PAUSE_GLYPH: &str = "❚❚";

/// What the player widgets need from a media element.
pub trait MediaElement {
    fn paused(&self) -> bool;
    fn ended(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
}

/// How the play/pause label follows the media element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LabelPolicy {
    /// Label always shows the action the button will perform next.
    #[default]
    Resync,
    /// Label is only written when pausing and never reset on play.
    Legacy,
}

impl FromStr for LabelPolicy {
    type Err = LabelPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "resync" => Ok(LabelPolicy::Resync),
            "legacy" => Ok(LabelPolicy::Legacy),
            _ => Err(LabelPolicyError {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPolicyError {
    pub value: String,
}

impl fmt::Display for LabelPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown label policy '{}' (expected resync or legacy)", self.value)
    }
}

impl std::error::Error for LabelPolicyError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackRequest {
    Play,
    Pause,
}

fn glyph_for<M: MediaElement + ?Sized>(media: &M) -> &'static str {
    if media.paused() || media.ended() {
        PLAY_GLYPH
    } else {
        PAUSE_GLYPH
    }
}

#[derive(Clone, Debug)]
pub struct PlaybackControl {
    policy: LabelPolicy,
    label: &'static str,
}

impl PlaybackControl {
    pub fn new(policy: LabelPolicy) -> Self {
        Self {
            policy,
            label: PLAY_GLYPH,
        }
    }

    pub fn policy(&self) -> LabelPolicy {
        self.policy
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Starts playback when paused or ended, pauses otherwise.
    pub fn play_pause<M: MediaElement + ?Sized>(&mut self, media: &mut M) -> PlaybackRequest {
        let request = if media.paused() || media.ended() {
            media.play();
            PlaybackRequest::Play
        } else {
            media.pause();
            self.label = PLAY_GLYPH;
            PlaybackRequest::Pause
        };
        if self.policy == LabelPolicy::Resync {
            self.label = glyph_for(media);
        }
        request
    }

    /// Re-derives the label from the element after a play/pause/ended
    /// notification. Returns `true` when the label changed.
    pub fn sync_label<M: MediaElement + ?Sized>(&mut self, media: &M) -> bool {
        if self.policy == LabelPolicy::Legacy {
            return false;
        }
        let next = glyph_for(media);
        let changed = next != self.label;
        self.label = next;
        changed
    }
}

impl Default for PlaybackControl {
    fn default() -> Self {
        Self::new(LabelPolicy::default())
    }
}

/// `current / duration` clamped to `[0, 1]`, or `None` while the duration is
/// unknown, zero or not finite.
pub fn timeline_ratio(current: f64, duration: f64) -> Option<f64> {
    if !duration.is_finite() || duration <= 0.0 || !current.is_finite() {
        return None;
    }
    Some((current / duration).clamp(0.0, 1.0))
}

/// Mirrors playback position into a timeline control and maps timeline
/// clicks back to a seek.
#[derive(Clone, Debug, Default)]
pub struct TimelineSync {
    value: f64,
}

impl TimelineSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn on_time_update<M: MediaElement + ?Sized>(&mut self, media: &M) -> Option<f64> {
        let ratio = timeline_ratio(media.current_time(), media.duration())?;
        self.value = ratio;
        Some(ratio)
    }

    pub fn seek<M: MediaElement + ?Sized>(&mut self, media: &mut M, ratio: f64) -> Option<f64> {
        let duration = media.duration();
        if !duration.is_finite() || duration <= 0.0 || ratio.is_nan() {
            return None;
        }
        let ratio = ratio.clamp(0.0, 1.0);
        media.set_current_time(ratio * duration);
        self.value = ratio;
        Some(ratio)
    }
}
