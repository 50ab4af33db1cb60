use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tracing::debug;

use super::{
    backend::{AudioBackend, MediaHandle},
    session::{PlaybackSession, PlaybackState, clamp_position, clamp_volume},
};
use crate::types::Track;

/// Step used by the rewind/forward buttons.
pub const SKIP_SECONDS: f64 = 10.0;

/// The audio resource for a track could not be started. The controller is
/// back in `Idle` when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot play track {track_id}: {cause}")]
pub struct PlaybackError {
    pub track_id: i64,
    pub cause: String,
}

/// What a `play` request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Playing,
    Paused,
    /// A later `play` or `stop` took over while this request was attaching.
    Superseded,
}

struct Inner {
    state: PlaybackState,
    handle: Option<Box<dyn MediaHandle>>,
    session: PlaybackSession,
}

impl Inner {
    fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.teardown();
        }
    }

    fn go_idle(&mut self) {
        self.release();
        self.state = PlaybackState::Idle;
        self.session.reset();
    }
}

/// Owner of the single audio resource shared by every track row.
///
/// At most one track holds the resource at any time; starting another track
/// releases the previous one first. Rows never touch the resource: they
/// [`subscribe`](Self::subscribe) to the published [`PlaybackSession`] and
/// derive their own "am I active" flag from it.
///
/// Only the latest `play` (or `stop`) counts. A `play` whose resource
/// finishes attaching after a newer request was issued is torn down and
/// reported as [`PlayOutcome::Superseded`].
pub struct PlaybackController<B> {
    backend: B,
    inner: Mutex<Inner>,
    generation: AtomicU64,
    publisher: watch::Sender<PlaybackSession>,
}

impl<B: AudioBackend> PlaybackController<B> {
    pub fn new(backend: B) -> Self {
        let (publisher, _) = watch::channel(PlaybackSession::default());
        Self {
            backend,
            inner: Mutex::new(Inner {
                state: PlaybackState::Idle,
                handle: None,
                session: PlaybackSession::default(),
            }),
            generation: AtomicU64::new(0),
            publisher,
        }
    }

    /// Receiver that sees every change of the session.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSession> {
        self.publisher.subscribe()
    }

    pub async fn state(&self) -> PlaybackState {
        self.inner.lock().await.state
    }

    pub async fn session(&self) -> PlaybackSession {
        self.inner.lock().await.session.clone()
    }

    /// Plays `track`, or toggles it when it already holds the resource.
    ///
    /// # Behavior
    ///
    /// - `Playing(track)` pauses it
    /// - `Paused(track)` resumes it
    /// - anything else releases the current resource, attaches a new one for
    ///   `track.media_uri`, applies the session volume and starts it
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError`] if the resource cannot be attached or started;
    /// the controller is `Idle` afterwards.
    pub async fn play(&self, track: &Track) -> Result<PlayOutcome, PlaybackError> {
        let generation = {
            let mut inner = self.inner.lock().await;
            let current = inner.state;
            match current {
                PlaybackState::Playing(id) if id == track.id => {
                    self.pause_locked(&mut inner);
                    return Ok(PlayOutcome::Paused);
                }
                PlaybackState::Paused(id) if id == track.id => {
                    self.resume_locked(&mut inner);
                    return Ok(PlayOutcome::Playing);
                }
                _ => {}
            }

            // taken under the lock so generations follow lock order
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            inner.release();
            inner.state = PlaybackState::Loaded(track.id);
            inner.session = PlaybackSession {
                active_track_id: Some(track.id),
                is_playing: false,
                position_seconds: 0.0,
                volume: inner.session.volume,
                duration_seconds: track.duration_seconds.unwrap_or(0.0),
            };
            self.publish(&inner);
            generation
        };

        debug!(track = track.id, uri = %track.media_uri, "attaching media");
        let attached = self.backend.attach(&track.media_uri).await;

        let mut inner = self.inner.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            if let Ok(mut stale) = attached {
                stale.teardown();
            }
            debug!(track = track.id, "discarding superseded attach");
            return Ok(PlayOutcome::Superseded);
        }

        let started = match attached {
            Ok(mut handle) => match handle.start(inner.session.volume) {
                Ok(()) => Ok(handle),
                Err(cause) => {
                    handle.teardown();
                    Err(cause)
                }
            },
            Err(cause) => Err(cause),
        };

        match started {
            Ok(handle) => {
                if let Some(duration) = handle.duration() {
                    inner.session.duration_seconds = duration;
                }
                inner.handle = Some(handle);
                inner.state = PlaybackState::Playing(track.id);
                inner.session.active_track_id = Some(track.id);
                inner.session.is_playing = true;
                self.publish(&inner);
                Ok(PlayOutcome::Playing)
            }
            Err(cause) => {
                debug!(track = track.id, %cause, "media failed to start");
                inner.go_idle();
                self.publish(&inner);
                Err(PlaybackError {
                    track_id: track.id,
                    cause,
                })
            }
        }
    }

    /// Pauses the active track. No-op unless something is playing.
    pub async fn pause(&self) -> PlaybackState {
        let mut inner = self.inner.lock().await;
        self.pause_locked(&mut inner);
        inner.state
    }

    /// Resumes a paused track. No-op unless something is paused.
    pub async fn resume(&self) -> PlaybackState {
        let mut inner = self.inner.lock().await;
        self.resume_locked(&mut inner);
        inner.state
    }

    /// Moves the play cursor to `seconds`, clamped into `[0, duration]`.
    ///
    /// Returns the new position, or `None` when no track is playing or paused.
    pub async fn seek_to(&self, seconds: f64) -> Option<f64> {
        let mut inner = self.inner.lock().await;
        self.seek_locked(&mut inner, seconds)
    }

    /// Moves the play cursor by `delta` seconds without wrapping around.
    pub async fn seek_relative(&self, delta: f64) -> Option<f64> {
        let mut inner = self.inner.lock().await;
        let current = match &inner.handle {
            Some(handle) => handle.position(),
            None => inner.session.position_seconds,
        };
        self.seek_locked(&mut inner, current + delta)
    }

    /// Sets the volume, clamped into `[0, 1]`. Kept for the next `play` when
    /// no resource is attached.
    pub async fn set_volume(&self, volume: f32) -> f32 {
        let volume = clamp_volume(volume);
        let mut inner = self.inner.lock().await;
        inner.session.volume = volume;
        if let Some(handle) = inner.handle.as_mut() {
            handle.set_volume(volume);
        }
        self.publish(&inner);
        volume
    }

    /// Releases the resource and returns to `Idle`. Also cancels a pending `play`.
    pub async fn stop(&self) {
        let mut inner = self.inner.lock().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        inner.go_idle();
        self.publish(&inner);
    }

    /// Pulls the resource's play cursor into the session. A resource that has
    /// run to its end sends the controller back to `Idle`.
    pub async fn tick(&self) -> PlaybackSession {
        let mut inner = self.inner.lock().await;
        let Some(handle) = inner.handle.as_ref() else {
            return inner.session.clone();
        };

        let duration = inner.session.duration_seconds;
        let position = clamp_position(handle.position(), duration);
        let finished = handle.is_finished() || (duration > 0.0 && position >= duration);

        if finished {
            debug!(track = ?inner.state.track_id(), "media finished");
            inner.go_idle();
        } else {
            inner.session.position_seconds = position;
        }
        self.publish(&inner);
        inner.session.clone()
    }

    fn pause_locked(&self, inner: &mut Inner) {
        let PlaybackState::Playing(id) = inner.state else {
            return;
        };
        if let Some(handle) = inner.handle.as_mut() {
            handle.pause();
            let position = handle.position();
            inner.session.position_seconds =
                clamp_position(position, inner.session.duration_seconds);
        }
        inner.state = PlaybackState::Paused(id);
        inner.session.is_playing = false;
        self.publish(inner);
    }

    fn resume_locked(&self, inner: &mut Inner) {
        let PlaybackState::Paused(id) = inner.state else {
            return;
        };
        if let Some(handle) = inner.handle.as_mut() {
            handle.resume();
        }
        inner.state = PlaybackState::Playing(id);
        inner.session.is_playing = true;
        self.publish(inner);
    }

    fn seek_locked(&self, inner: &mut Inner, seconds: f64) -> Option<f64> {
        if !matches!(
            inner.state,
            PlaybackState::Playing(_) | PlaybackState::Paused(_)
        ) {
            return None;
        }

        let position = clamp_position(seconds, inner.session.duration_seconds);
        if let Some(handle) = inner.handle.as_mut() {
            handle.seek(position);
        }
        inner.session.position_seconds = position;
        self.publish(inner);
        Some(position)
    }

    fn publish(&self, inner: &Inner) {
        self.publisher.send_replace(inner.session.clone());
    }
}
