//! Feedback emitter: owns the presenter and the toast area.
//!
//! Toasts are scheduled for fade-out and removal on creation. Their timers
//! are never cancelled by a reconciliation (the toast area sits outside the
//! content region), so the handlers check the toast still exists.

#[cfg(test)]
#[path = "emitter_test.rs"]
mod emitter_test;

use tokio::time::Instant;
use tracing::debug;

use super::SoundCue;
use super::presenter::Presenter;
use super::toast::{NotificationArea, ToastId, ToastStyle};
use crate::config::Timings;
use crate::dom::MessageKind;
use crate::timers::{Scheduler, Timer};

pub struct FeedbackEmitter {
    presenter: Box<dyn Presenter>,
    area: Option<NotificationArea>,
    shake_seq: u64,
    timings: Timings,
}

impl FeedbackEmitter {
    #[must_use]
    pub fn new(presenter: Box<dyn Presenter>, timings: Timings) -> Self {
        Self { presenter, area: None, shake_seq: 0, timings }
    }

    pub fn presenter(&mut self) -> &mut dyn Presenter {
        self.presenter.as_mut()
    }

    pub fn play(&mut self, cue: &SoundCue) {
        debug!(cue = %cue, "play sound");
        self.presenter.play_sound(cue);
    }

    /// Restart the shake animation, even if one is still running.
    pub fn shake(&mut self) {
        self.shake_seq += 1;
        self.presenter.shake_board(self.shake_seq);
    }

    pub fn celebrate(&mut self) {
        self.presenter.celebrate();
    }

    /// Append a toast and schedule its fade-out.
    pub fn toast(&mut self, text: &str, kind: MessageKind, scheduler: &mut Scheduler, now: Instant) -> ToastId {
        let area = self.area.get_or_insert_with(NotificationArea::default);
        let toast = area.push(text, ToastStyle::for_kind(kind));
        let id = toast.id;
        debug!(%id, style = toast.style.css_class(), text, "toast shown");
        self.presenter.toast_shown(toast);
        scheduler.schedule_in(Timer::ToastFade(id), now, self.timings.toast_visible);
        id
    }

    /// Handle a toast timer. Other timers are ignored.
    pub fn on_timer(&mut self, timer: Timer, scheduler: &mut Scheduler, now: Instant) {
        let Some(area) = self.area.as_mut() else {
            return;
        };
        match timer {
            Timer::ToastFade(id) => {
                if area.start_fade(id) {
                    self.presenter.toast_fading(id);
                    scheduler.schedule_in(Timer::ToastRemove(id), now, self.timings.toast_fade);
                }
            }
            Timer::ToastRemove(id) => {
                if area.remove(id) {
                    self.presenter.toast_removed(id);
                }
            }
            Timer::OverlayFade { .. } | Timer::OverlayRemove { .. } | Timer::ComputerMove { .. } => {}
        }
    }

    /// Live toasts; empty until the first toast creates the area.
    #[must_use]
    pub fn toasts(&self) -> &[super::Toast] {
        self.area.as_ref().map(NotificationArea::toasts).unwrap_or_default()
    }
}
