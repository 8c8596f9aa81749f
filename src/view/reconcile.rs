//! Page reconciler.
//!
//! Swaps the content region for the one in a server response and re-derives
//! everything local that belonged to the old region: selections, bindings,
//! region timers, the thinking indicator and the placement toggles. The
//! shell around the region (token, load-time flags) is left alone.

use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::bindings::Bindings;
use super::dispatch::Action;
use super::{View, ViewKind};
use crate::dom::OverlayPhase;
use crate::feedback::SoundCue;
use crate::state::prefs::PlacementMode;
use crate::timers::Timer;

impl View {
    /// Apply a server page. A response without a content region leaves the
    /// live page untouched.
    pub(super) fn reconcile(&mut self, html: &str, action: &Action, now: Instant) {
        if !self.page.swap_region(&self.selectors, html) {
            warn!(?action, "response has no content region; page unchanged");
            return;
        }
        let generation = self.page.generation();
        info!(generation, ?action, "region replaced");

        self.cancel_region_timers();
        self.selections.clear_all();
        self.gate.set_thinking(false);
        self.bindings = Bindings::for_region(generation, &self.page.region().controls);
        if self.kind == ViewKind::Placement {
            self.apply_preferences();
        }
        self.feedback.presenter().region_replaced(self.page.region(), generation);

        if self.page.region().has_overlay() {
            let key =
                self.scheduler.schedule_in(Timer::OverlayFade { generation }, now, self.timings.overlay_visible);
            self.region_timers.push(key);
        }

        let silent = self.page.region().message.is_empty();
        let delivery = self.deliver_message(now);
        debug!(?delivery, "message slot read");
        if silent && matches!(action, Action::Move { .. }) {
            self.feedback.play(&SoundCue::Place);
        }

        self.evaluate_turn_flag(now);
        self.publish_indicators();
    }

    pub(super) fn fade_overlay(&mut self, generation: u64, now: Instant) {
        let Some(overlay) = self.page.region_mut().overlay.as_mut() else {
            return;
        };
        overlay.phase = OverlayPhase::Fading;
        self.feedback.presenter().overlay_fading();
        let key = self.scheduler.schedule_in(Timer::OverlayRemove { generation }, now, self.timings.overlay_fade);
        self.region_timers.push(key);
    }

    pub(super) fn remove_overlay(&mut self, generation: u64) {
        if self.page.region_mut().overlay.take().is_some() {
            debug!(generation, "overlay removed");
            self.feedback.presenter().overlay_removed();
        }
    }

    /// Mark the placement toggles from the stored preferences.
    pub(super) fn apply_preferences(&mut self) {
        let prefs = &self.prefs;
        let controls = &mut self.page.region_mut().controls;
        for button in &mut controls.piece_buttons {
            button.selected = button.value.eq_ignore_ascii_case(&prefs.piece);
        }
        let color = if prefs.white { "true" } else { "false" };
        for button in &mut controls.color_buttons {
            button.selected = button.value == color;
        }
        if controls.mode_place.is_some() && controls.mode_remove.is_some() {
            controls.mode_place = Some(prefs.mode == PlacementMode::Place);
            controls.mode_remove = Some(prefs.mode == PlacementMode::Remove);
        }
        self.feedback.presenter().preferences_applied(&self.prefs);
    }
}
