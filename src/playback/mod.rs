//! # Playback Module
//!
//! Single-active-track playback. One [`PlaybackController`] owns the only audio
//! resource of the process; list rows observe the published
//! [`PlaybackSession`] instead of holding a reference to the resource.
//! [`RodioBackend`] plays the decoded media on the default output device.
//!
//! ## State Machine
//!
//! ```text
//!            play(t)                 attach ok
//!   Idle ──────────────► Loaded(t) ───────────► Playing(t) ◄──┐
//!    ▲                       │ attach failed        │ pause     │ resume / play(t)
//!    │                       ▼                      ▼           │
//!    └──────────────────── Idle              Paused(t) ─────────┘
//!
//!   stop() from any state ──► Idle
//!   play(u), u ≠ t, from any state ──► release t, Loaded(u)
//! ```
//!
//! ## Concurrency
//!
//! The controller lock is never held while a resource is attaching, so a new
//! request can come in at any time. Each `play` that attaches, and each
//! `stop`, bumps a generation counter while holding the lock. Only the request
//! carrying the latest generation may move the session; earlier attaches are
//! torn down when they complete.

mod backend;
mod controller;
mod session;

pub use backend::{AudioBackend, MediaHandle, RodioBackend, RodioHandle};
pub use controller::{PlayOutcome, PlaybackController, PlaybackError, SKIP_SECONDS};
pub use session::{PlaybackSession, PlaybackState, clamp_position, clamp_volume};
