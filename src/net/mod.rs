//! Networking modules for the HTTP round trips.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` names the server endpoints, `transport` performs requests, and
//! `types` defines the request/response shapes shared with the view.

pub mod api;
pub mod transport;
pub mod types;
