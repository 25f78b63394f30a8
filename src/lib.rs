//! samvaad — two-peer WebRTC signaling and shared-canvas relay server.
//!
//! The library target exposes the router and state so integration tests can
//! run the full server in-process; the binary in `main.rs` is a thin shell
//! around [`routes::app`].

pub mod history;
pub mod presence;
pub mod protocol;
pub mod routes;
pub mod services;
pub mod state;
