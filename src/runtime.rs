//! Event loop driving one [`View`].
//!
//! SYSTEM CONTEXT
//! ==============
//! The view is pure state; this loop owns the clock, the transport and the
//! user event channel. It waits on three sources at once: the next user
//! event, the single in-flight round trip, and the earliest timer deadline.
//!
//! DESIGN
//! ======
//! Only one round trip can exist because the view hands out at most one
//! [`Dispatch`] per gate ticket. The in-flight future is stored outside
//! `select!` so losing a race to a timer or a user event never drops it.

#[cfg(test)]
#[path = "runtime_test.rs"]
mod runtime_test;

use std::future::{Future, pending};
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

use crate::net::transport::Transport;
use crate::view::{Dispatch, Effect, Navigation, Outcome, UiEvent, View};

type InFlight = Pin<Box<dyn Future<Output = (Dispatch, Outcome)> + Send>>;

/// Why [`run`] returned.
#[derive(Debug, PartialEq, Eq)]
pub enum Exit {
    /// The view asked to leave the page.
    Navigated(Navigation),
    /// The event channel closed and no work was left.
    Closed,
}

/// Drive `view` until it navigates away, or until `events` closes and every
/// pending request and timer has run. The receiver is borrowed so a caller
/// can keep feeding the next page's view after a navigation.
pub async fn run(mut view: View, transport: Arc<dyn Transport>, events: &mut mpsc::Receiver<UiEvent>) -> Exit {
    view.start(Instant::now());
    let mut in_flight: Option<InFlight> = None;
    let mut events_open = true;

    loop {
        let deadline = view.next_deadline();
        if !events_open && in_flight.is_none() && deadline.is_none() {
            info!("event channel closed; view idle");
            return Exit::Closed;
        }

        let effect = tokio::select! {
            event = events.recv(), if events_open => match event {
                Some(event) => {
                    debug!(?event, "ui event");
                    view.handle(event)
                }
                None => {
                    events_open = false;
                    Effect::Idle
                }
            },
            (dispatch, outcome) = settle(&mut in_flight) => {
                in_flight = None;
                view.complete(dispatch, outcome, Instant::now())
            }
            () = sleep_to(deadline) => view.fire_due(Instant::now()),
        };

        match effect {
            Effect::Idle => {}
            Effect::Send(dispatch) => in_flight = Some(send(Arc::clone(&transport), dispatch)),
            Effect::Navigate(navigation) => return Exit::Navigated(navigation),
        }
    }
}

fn send(transport: Arc<dyn Transport>, dispatch: Dispatch) -> InFlight {
    Box::pin(async move {
        let outcome = transport.send(dispatch.request()).await;
        (dispatch, outcome)
    })
}

async fn settle(in_flight: &mut Option<InFlight>) -> (Dispatch, Outcome) {
    match in_flight {
        Some(future) => future.await,
        None => pending().await,
    }
}

async fn sleep_to(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => pending().await,
    }
}
