//! Canvas presence — who is hovering the shared canvas.
//!
//! A single process-wide counter bumped by pointer enter/leave events. The
//! derived indicator is binary: red while anyone hovers, green otherwise.
//! Leave is deliberately unguarded (no floor), so out-of-order events can
//! drive the count negative; the indicator still reads green in that case.
//! Disconnect-while-hovering is compensated by the registry, not here.

use serde::{Deserialize, Serialize};

/// Indicator color broadcast to every peer after each pointer change.
/// Serializes as the bare string literal `"red"` / `"green"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorColor {
    Red,
    Green,
}

/// Count of peers with an active pointer over the canvas.
#[derive(Debug, Default)]
pub struct PointerCounter {
    count: i64,
}

impl PointerCounter {
    #[must_use]
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn enter(&mut self) {
        self.count += 1;
    }

    pub fn leave(&mut self) {
        self.count -= 1;
    }

    #[must_use]
    pub fn color(&self) -> IndicatorColor {
        if self.count > 0 { IndicatorColor::Red } else { IndicatorColor::Green }
    }

    #[must_use]
    pub fn count(&self) -> i64 {
        self.count
    }
}

#[cfg(test)]
#[path = "presence_test.rs"]
mod tests;
