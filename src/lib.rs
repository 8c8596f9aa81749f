//! Headless client engine for a server-rendered chess puzzle and placement UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server owns the game and renders HTML. This crate keeps a typed model
//! of the live page and reproduces the browser-side protocol around it:
//! two-click move selection, one mutating request at a time, content-region
//! reconciliation, the single-slot server message channel, and the computer
//! move that follows a human move.
//!
//! LAYOUT
//! ======
//! - `dom`: page model and the HTML contract.
//! - `state`: selection machine, dispatch gate, persisted preferences.
//! - `feedback`: message slot reader, toasts, sounds, presenter seam.
//! - `net`: endpoints, request/response types, HTTP transport.
//! - `timers`: cancellable deadline queue.
//! - `view`: the per-page controller tying the above together.
//! - `runtime`: async loop that drives a view against a transport.

pub mod config;
pub mod dom;
pub mod feedback;
pub mod net;
pub mod runtime;
pub mod state;
pub mod timers;
pub mod view;

pub use config::ClientConfig;
pub use runtime::{Exit, run};
pub use view::{Effect, Navigation, UiEvent, View, ViewKind};
