//! Domain services used by the websocket and HTTP routes.
//!
//! Service modules own the relay/registry and attachment logic so route
//! handlers can stay focused on protocol translation.

pub mod attachment;
pub mod relay;
