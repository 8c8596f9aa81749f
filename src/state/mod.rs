//! Client-local state owned by one view.
//!
//! DESIGN
//! ======
//! Each concern has exactly one writer: `selection` is mutated only by the
//! move-selection machine, `gate` only by the dispatcher (plus the turn
//! chain for the thinking indicator), and `prefs` only by explicit user
//! choices. None of it is authoritative; the next reconciliation wins.

pub mod gate;
pub mod prefs;
pub mod selection;
