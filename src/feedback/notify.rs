//! Notification channel reader.
//!
//! Consumes the region's message slot exactly once and routes it: an overlay
//! alert already on screen suppresses the toast, leaving only the sound and
//! the shake/celebration side effects.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use tokio::time::Instant;
use tracing::info;

use super::emitter::FeedbackEmitter;
use super::toast::ToastId;
use crate::dom::{MessageKind, Region};
use crate::timers::Scheduler;

/// What the reader did with the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Slot was empty or already consumed.
    Nothing,
    /// Overlay on screen; no toast was created.
    Overlay { shook: bool, celebrated: bool },
    Toast { id: ToastId, shook: bool },
}

/// Read and clear the message slot of `region`.
pub fn deliver_server_message(
    region: &mut Region,
    emitter: &mut FeedbackEmitter,
    scheduler: &mut Scheduler,
    now: Instant,
) -> Delivery {
    let Some(message) = region.message.take() else {
        return Delivery::Nothing;
    };
    info!(kind = ?message.kind, text = %message.text, "server message");

    if let Some(cue) = &message.sound {
        emitter.play(cue);
    }

    if region.has_overlay() {
        let shook = message.kind == MessageKind::Error;
        let celebrated = message.kind == MessageKind::Victory;
        if shook {
            emitter.shake();
        }
        if celebrated {
            emitter.celebrate();
        }
        return Delivery::Overlay { shook, celebrated };
    }

    let shook = message.kind == MessageKind::Error;
    if shook {
        emitter.shake();
    }
    let id = emitter.toast(&message.text, message.kind, scheduler, now);
    Delivery::Toast { id, shook }
}
