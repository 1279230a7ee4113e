//! Transient "recently hit" glow
//!
//! A plain value with pure transitions. Components compare the state before
//! and after a transition to decide which visual events to emit.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlowState {
    pub active: bool,
    /// Seconds until the glow switches off
    pub remaining: f32,
}

impl GlowState {
    pub const OFF: GlowState = GlowState {
        active: false,
        remaining: 0.0,
    };

    /// Start (or restart) glowing for `duration` seconds
    #[inline]
    pub fn trigger(self, duration: f32) -> Self {
        Self {
            active: true,
            remaining: duration,
        }
    }

    /// Advance the countdown; the glow ends once it reaches zero
    #[inline]
    pub fn tick(self, dt: f32) -> Self {
        if !self.active {
            return self;
        }
        let remaining = self.remaining - dt;
        if remaining <= 0.0 {
            Self::OFF
        } else {
            Self {
                active: true,
                remaining,
            }
        }
    }

    /// True when `self -> next` switched the glow off
    #[inline]
    pub fn ended(self, next: GlowState) -> bool {
        self.active && !next.active
    }

    /// Emissive strength for fading glows, capped at 1
    #[inline]
    pub fn intensity(self) -> f32 {
        if self.active {
            self.remaining.min(1.0)
        } else {
            0.0
        }
    }
}
