//! In-flight gate and the busy/loader/thinking indicators.
//!
//! A [`Ticket`] is handed out when a dispatch starts and must be given back
//! to [`DispatchGate::release`]; release is the one place indicators are
//! cleared, whatever the outcome of the round trip.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Indicators {
    /// A mutating request is in flight.
    pub busy: bool,
    /// Full-board loader shown for heavy endpoints.
    pub loader: bool,
    /// "Computer is thinking" indicator; blocks cell clicks.
    pub thinking: bool,
}

/// Proof that a dispatch holds the gate.
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket {
    heavy: bool,
    computer: bool,
}

#[derive(Debug, Default)]
pub struct DispatchGate {
    indicators: Indicators,
}

impl DispatchGate {
    #[must_use]
    pub fn indicators(&self) -> Indicators {
        self.indicators
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.indicators.busy
    }

    #[must_use]
    pub fn is_thinking(&self) -> bool {
        self.indicators.thinking
    }

    /// Take the gate. Returns `None` while another dispatch holds it.
    pub fn begin(&mut self, heavy: bool, computer: bool) -> Option<Ticket> {
        if self.indicators.busy {
            return None;
        }
        self.indicators.busy = true;
        if heavy {
            self.indicators.loader = true;
        }
        Some(Ticket { heavy, computer })
    }

    /// Give the gate back and hide everything the dispatch showed. A computer
    /// move also hides the thinking indicator, whether it succeeded or not.
    pub fn release(&mut self, ticket: Ticket) {
        self.indicators.busy = false;
        if ticket.heavy {
            self.indicators.loader = false;
        }
        if ticket.computer {
            self.indicators.thinking = false;
        }
    }

    pub fn set_thinking(&mut self, thinking: bool) {
        self.indicators.thinking = thinking;
    }
}
