//! Turn-chaining supervisor.
//!
//! When a reconciled region says the computer moves next, show "thinking"
//! and send the computer move after a fixed delay. The pending move is a
//! region timer, so a newer region cancels it before it can fire.

use tokio::time::Instant;
use tracing::{info, warn};

use super::dispatch::Action;
use super::{Effect, View};
use crate::timers::Timer;

impl View {
    pub(super) fn evaluate_turn_flag(&mut self, now: Instant) {
        if self.page.region().computer_turn {
            self.schedule_computer_move(now);
        }
    }

    pub(super) fn schedule_computer_move(&mut self, now: Instant) {
        let generation = self.page.generation();
        self.gate.set_thinking(true);
        let delay = self.timings.computer_move_delay;
        let key = self.scheduler.schedule_in(Timer::ComputerMove { generation }, now, delay);
        self.region_timers.push(key);
        info!(generation, delay_ms = delay.as_millis(), "computer to move");
        self.publish_indicators();
    }

    pub(super) fn computer_move_due(&mut self, generation: u64) -> Effect {
        if self.gate.is_busy() {
            warn!(generation, "request in flight; computer move dropped");
            self.gate.set_thinking(false);
            self.publish_indicators();
            return Effect::Idle;
        }
        self.begin(Action::ComputerMove)
    }
}
