/// Transport state of the playback controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    /// A resource for the track is being attached.
    Loaded(i64),
    Playing(i64),
    Paused(i64),
}

impl PlaybackState {
    pub fn track_id(&self) -> Option<i64> {
        match self {
            PlaybackState::Idle => None,
            PlaybackState::Loaded(id) | PlaybackState::Playing(id) | PlaybackState::Paused(id) => {
                Some(*id)
            }
        }
    }
}

/// Observable snapshot of the single playback session.
///
/// `active_track_id == None` always comes with `is_playing == false` and a
/// zero position. A `duration_seconds` of zero means the length is unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    pub active_track_id: Option<i64>,
    pub is_playing: bool,
    pub position_seconds: f64,
    pub volume: f32,
    pub duration_seconds: f64,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self {
            active_track_id: None,
            is_playing: false,
            position_seconds: 0.0,
            volume: 1.0,
            duration_seconds: 0.0,
        }
    }
}

impl PlaybackSession {
    /// Whether `track_id` currently holds the audio resource.
    pub fn is_active(&self, track_id: i64) -> bool {
        self.active_track_id == Some(track_id)
    }

    /// Whether a row for `track_id` should offer "pause" rather than "play".
    pub fn is_playing_track(&self, track_id: i64) -> bool {
        self.is_playing && self.is_active(track_id)
    }

    pub(crate) fn reset(&mut self) {
        self.active_track_id = None;
        self.is_playing = false;
        self.position_seconds = 0.0;
        self.duration_seconds = 0.0;
    }
}

pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

/// Clamps a cursor position into `[0, duration]`; an unknown (zero) duration
/// only bounds the lower end.
pub fn clamp_position(seconds: f64, duration: f64) -> f64 {
    let seconds = if seconds.is_nan() { 0.0 } else { seconds.max(0.0) };
    if duration > 0.0 {
        seconds.min(duration)
    } else {
        seconds
    }
}
