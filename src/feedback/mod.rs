//! User-facing feedback: sounds, toasts, shake, celebration.
//!
//! SYSTEM CONTEXT
//! ==============
//! `notify` reads the server message slot and decides the channel,
//! `emitter` owns the toast area and drives the [`Presenter`], and
//! `toast` defines the toast model. The presenter is the only seam to
//! whatever actually renders or plays things.

pub mod emitter;
pub mod notify;
pub mod presenter;
pub mod toast;

pub use emitter::FeedbackEmitter;
pub use presenter::{Presented, Presenter, Recorder};
pub use toast::{Toast, ToastId, ToastPhase, ToastStyle};

use std::fmt;

/// Named sound effect. The server may name any cue; the client itself only
/// ever asks for `place`, `remove` and `error`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Place,
    Remove,
    Error,
    Named(String),
}

impl SoundCue {
    /// Parse a `data-sound` value; blank means no cue.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw {
            "" => None,
            "place" => Some(Self::Place),
            "remove" => Some(Self::Remove),
            "error" => Some(Self::Error),
            other => Some(Self::Named(other.to_owned())),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Place => "place",
            Self::Remove => "remove",
            Self::Error => "error",
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
