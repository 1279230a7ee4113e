//! The player-controlled paddle
//!
//! The mover slides on the X/Z plane at a fixed Y. Held keys keep commands
//! active across ticks; every update clamps the position into the movement
//! envelope, which shrinks and grows with the mover's scale.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::area::{AxisRange, PlayArea, inset_ranges};
use super::events::{GameEvent, SceneObject, VisibilityGroup};
use super::glow::GlowState;
use crate::Axis;
use crate::audio::{SoundCue, SoundRequest};
use crate::consts::MOVER_HIT_DISTANCE_REF;
use crate::platform::ObjectBinding;
use crate::settings::Settings;

/// Discrete movement commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoverCommand {
    Up,
    Down,
    Left,
    Right,
}

impl MoverCommand {
    pub const ALL: [MoverCommand; 4] = [
        MoverCommand::Up,
        MoverCommand::Down,
        MoverCommand::Left,
        MoverCommand::Right,
    ];

    /// Axis the command moves along
    pub fn axis(self) -> Axis {
        match self {
            MoverCommand::Up | MoverCommand::Down => Axis::Z,
            MoverCommand::Left | MoverCommand::Right => Axis::X,
        }
    }

    /// Direction along [`Self::axis`]
    pub fn sign(self) -> f32 {
        match self {
            MoverCommand::Up | MoverCommand::Right => 1.0,
            MoverCommand::Down | MoverCommand::Left => -1.0,
        }
    }

    fn bit(self) -> u8 {
        match self {
            MoverCommand::Up => 1,
            MoverCommand::Down => 1 << 1,
            MoverCommand::Left => 1 << 2,
            MoverCommand::Right => 1 << 3,
        }
    }
}

/// Set of currently held commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandSet(u8);

impl CommandSet {
    /// Returns false if the command was already active
    pub fn insert(&mut self, cmd: MoverCommand) -> bool {
        let was = self.contains(cmd);
        self.0 |= cmd.bit();
        !was
    }

    /// Returns false if the command was not active
    pub fn remove(&mut self, cmd: MoverCommand) -> bool {
        let was = self.contains(cmd);
        self.0 &= !cmd.bit();
        was
    }

    #[inline]
    pub fn contains(&self, cmd: MoverCommand) -> bool {
        self.0 & cmd.bit() != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = MoverCommand> + '_ {
        MoverCommand::ALL.into_iter().filter(|&cmd| self.contains(cmd))
    }
}

/// Axes the mover travels on
const MOVEMENT_AXES: [Axis; 2] = [Axis::X, Axis::Z];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mover {
    pub position: Vec3,
    /// Extent at scale 1
    base_extent: Vec3,
    /// Uniform scale on X and Z
    size: f32,
    area_ranges: [AxisRange; 3],
    ranges: [AxisRange; 3],
    speed: f32,
    speed_axes: Vec3,
    commands: CommandSet,
    visible: bool,
    glow: GlowState,
    glow_time: f32,
    shrink: f32,
}

impl Mover {
    pub fn new(binding: &ObjectBinding, settings: &Settings) -> Self {
        Self {
            position: Vec3::new(0.0, binding.position.y, 0.0),
            base_extent: binding.extent,
            size: 1.0,
            area_ranges: [AxisRange::default(); 3],
            ranges: [AxisRange::default(); 3],
            speed: settings.initial_mover_speed,
            speed_axes: settings.mover_speed_axes,
            commands: CommandSet::default(),
            visible: true,
            glow: GlowState::OFF,
            glow_time: settings.mover_glow_time,
            shrink: settings.mover_shrink,
        }
    }

    /// Current extent (scaled on X and Z only)
    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.base_extent * self.scale()
    }

    #[inline]
    pub fn scale(&self) -> Vec3 {
        Vec3::new(self.size, 1.0, self.size)
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Per-axis speed vector
    #[inline]
    pub fn speeds(&self) -> Vec3 {
        self.speed_axes * self.speed
    }

    #[inline]
    pub fn range(&self, axis: Axis) -> AxisRange {
        self.ranges[axis.index()]
    }

    #[inline]
    pub fn commands(&self) -> CommandSet {
        self.commands
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn glow(&self) -> GlowState {
        self.glow
    }

    /// Remember the arena and derive the movement envelope from it
    pub fn apply_movement_range_from_area(
        &mut self,
        area: &PlayArea,
        events: &mut Vec<GameEvent>,
    ) {
        self.area_ranges = *area.ranges();
        self.refresh_range(events);
    }

    /// Multiply the X/Z scale by `factor`
    pub fn resize(&mut self, factor: f32, events: &mut Vec<GameEvent>) {
        self.set_size(self.size * factor, events);
    }

    /// Set the absolute X/Z scale
    pub fn set_size(&mut self, value: f32, events: &mut Vec<GameEvent>) {
        self.size = value;
        events.push(GameEvent::Scaled {
            object: SceneObject::Mover,
            scale: self.scale(),
        });
        self.refresh_range(events);
    }

    pub fn start_command(&mut self, cmd: MoverCommand) {
        if self.commands.insert(cmd) {
            log::trace!("mover command {cmd:?} started");
        }
    }

    /// Stopping an inactive command is a no-op
    pub fn stop_command(&mut self, cmd: MoverCommand) {
        if self.commands.remove(cmd) {
            log::trace!("mover command {cmd:?} stopped");
        }
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn set_visible(&mut self, visible: bool, events: &mut Vec<GameEvent>) {
        self.visible = visible;
        events.push(GameEvent::Visibility {
            group: VisibilityGroup::Mover,
            visible,
        });
    }

    pub fn trigger_glow(&mut self, events: &mut Vec<GameEvent>) {
        self.glow = self.glow.trigger(self.glow_time);
        events.push(GameEvent::Glow {
            object: SceneObject::Mover,
            intensity: 1.0,
        });
    }

    pub fn update(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        let next = self.glow.tick(dt);
        if self.glow.ended(next) {
            events.push(GameEvent::Glow {
                object: SceneObject::Mover,
                intensity: 0.0,
            });
        }
        self.glow = next;

        if self.commands.is_empty() {
            return;
        }

        let speeds = self.speeds();
        for cmd in self.commands.iter() {
            let axis = cmd.axis();
            let moved = axis.of(self.position) + cmd.sign() * axis.of(speeds) * dt;
            axis.set(&mut self.position, moved);
        }
        self.clamp_position();
        events.push(GameEvent::Moved {
            object: SceneObject::Mover,
            position: self.position,
        });
    }

    /// The ball bounced off the mover: shrink and flash
    pub fn on_hit(&mut self, events: &mut Vec<GameEvent>) {
        self.resize(self.shrink, events);
        events.push(GameEvent::Sound(SoundRequest::new(
            SoundCue::Spawn,
            self.position,
            MOVER_HIT_DISTANCE_REF,
        )));
        self.trigger_glow(events);
    }

    fn refresh_range(&mut self, events: &mut Vec<GameEvent>) {
        self.ranges = inset_ranges(&self.area_ranges, self.extent());
        let before = self.position;
        self.clamp_position();
        if self.position != before {
            events.push(GameEvent::Moved {
                object: SceneObject::Mover,
                position: self.position,
            });
        }
    }

    fn clamp_position(&mut self) {
        for axis in MOVEMENT_AXES {
            let clamped = self.range(axis).clamp(axis.of(self.position));
            axis.set(&mut self.position, clamped);
        }
    }
}
