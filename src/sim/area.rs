//! Arena bounds
//!
//! The play area is an axis-aligned box centred on the origin. Ball and mover
//! derive their own usable ranges from it by insetting with their extents.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::events::{GameEvent, SceneObject};
use super::glow::GlowState;
use crate::Axis;

/// Closed interval on one axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Range of a box of `size` centred on zero
    #[inline]
    pub fn from_size(size: f32) -> Self {
        Self::new(-size / 2.0, size / 2.0)
    }

    /// Shrink both ends by `amount`; an object wider than the range is
    /// pinned to its centre
    pub fn inset(self, amount: f32) -> Self {
        let min = self.min + amount;
        let max = self.max - amount;
        if min <= max {
            Self::new(min, max)
        } else {
            let mid = (self.min + self.max) / 2.0;
            Self::new(mid, mid)
        }
    }

    #[inline]
    pub fn clamp(self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    #[inline]
    pub fn contains(self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Per-axis ranges of `area` inset by half of `extent`
pub fn inset_ranges(area: &[AxisRange; 3], extent: Vec3) -> [AxisRange; 3] {
    Axis::ALL.map(|axis| area[axis.index()].inset(axis.of(extent) / 2.0))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayArea {
    ranges: [AxisRange; 3],
    glow: GlowState,
    glow_time: f32,
}

impl PlayArea {
    pub fn new(size: Vec3, glow_time: f32) -> Self {
        Self {
            ranges: Axis::ALL.map(|axis| AxisRange::from_size(axis.of(size))),
            glow: GlowState::OFF,
            glow_time,
        }
    }

    #[inline]
    pub fn ranges(&self) -> &[AxisRange; 3] {
        &self.ranges
    }

    #[inline]
    pub fn range(&self, axis: Axis) -> AxisRange {
        self.ranges[axis.index()]
    }

    #[inline]
    pub fn glow(&self) -> GlowState {
        self.glow
    }

    pub fn update(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        let next = self.glow.tick(dt);
        if self.glow.ended(next) {
            events.push(GameEvent::Glow {
                object: SceneObject::PlayArea,
                intensity: 0.0,
            });
        }
        self.glow = next;
    }

    /// Flash the arena walls
    pub fn on_hit(&mut self, events: &mut Vec<GameEvent>) {
        self.glow = self.glow.trigger(self.glow_time);
        events.push(GameEvent::Glow {
            object: SceneObject::PlayArea,
            intensity: 1.0,
        });
    }
}
