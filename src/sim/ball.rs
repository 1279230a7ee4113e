//! The ball
//!
//! Each update resolves wall and mover contacts on the pre-integration
//! position, then integrates. Contacts are returned to the game, which owns
//! the reactions (arena flash, mover shrink, scoring, misses).

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::area::{AxisRange, PlayArea, inset_ranges};
use super::collision::{Side, collide_wall, in_mover_slab, is_past_mover, reflect_axis, within_cross_section};
use super::events::{GameEvent, SceneObject, VisibilityGroup};
use super::glow::GlowState;
use super::mover::Mover;
use crate::audio::{SoundCue, SoundRequest};
use crate::consts::{HIT_DISTANCE_REF, SPAWN_DIAGONAL, SPAWN_DISTANCE_REF};
use crate::platform::ObjectBinding;
use crate::settings::{Settings, SpawnDirection};
use crate::{Axis, scaled_direction};

/// Something the ball ran into during one update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallContact {
    /// Reflected off an arena wall
    Wall { axis: Axis, side: Side },
    /// Reached the far Y wall opposite the mover
    Goal,
    /// Bounced off the mover
    Mover,
    /// Fell past the mover
    Missed,
}

/// Walls checked each tick, in order. The near Y wall is left to the mover.
const WALLS: [(Axis, Side); 5] = [
    (Axis::X, Side::Max),
    (Axis::X, Side::Min),
    (Axis::Y, Side::Max),
    (Axis::Z, Side::Max),
    (Axis::Z, Side::Min),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Speed the ball was last served at
    pub speed: f32,
    extent: Vec3,
    ranges: [AxisRange; 3],
    glow: GlowState,
    glow_time: f32,
    spawn_base: Vec3,
    spawn_jitter: Vec3,
    spawn_direction: SpawnDirection,
    depth_tolerance: f32,
    miss_margin: f32,
    lasers_follow_glow: bool,
}

impl Ball {
    pub fn new(binding: &ObjectBinding, settings: &Settings) -> Self {
        Self {
            position: binding.position,
            velocity: Vec3::ZERO,
            speed: settings.initial_ball_speed,
            extent: binding.extent,
            ranges: [AxisRange::default(); 3],
            glow: GlowState::OFF,
            glow_time: settings.ball_glow_time,
            spawn_base: settings.spawn_base,
            spawn_jitter: settings.spawn_jitter,
            spawn_direction: settings.spawn_direction,
            depth_tolerance: settings.depth_tolerance,
            miss_margin: settings.miss_margin,
            lasers_follow_glow: settings.lasers_follow_glow,
        }
    }

    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.extent
    }

    #[inline]
    pub fn range(&self, axis: Axis) -> AxisRange {
        self.ranges[axis.index()]
    }

    #[inline]
    pub fn glow(&self) -> GlowState {
        self.glow
    }

    pub fn apply_movement_range_from_area(&mut self, area: &PlayArea) {
        self.ranges = inset_ranges(area.ranges(), self.extent);
    }

    /// Serve from the spawn point toward the mover at `speed`
    pub fn spawn<R: Rng>(&mut self, speed: f32, rng: &mut R, events: &mut Vec<GameEvent>) {
        self.speed = speed;

        let jitter = Vec3::new(
            self.spawn_jitter.x * (rng.random::<f32>() - 0.5),
            0.0,
            self.spawn_jitter.z * (rng.random::<f32>() - 0.5),
        );
        self.position = self.spawn_base + jitter;

        // Y is fixed at -1 so the direction is never zero
        let direction = Vec3::new(self.lateral(rng), -1.0, self.lateral(rng));
        self.velocity = scaled_direction(direction, speed);

        log::debug!("ball served at {:?} with velocity {:?}", self.position, self.velocity);

        events.push(GameEvent::Sound(SoundRequest::new(
            SoundCue::Spawn,
            self.position,
            SPAWN_DISTANCE_REF,
        )));
        events.push(GameEvent::Moved {
            object: SceneObject::Ball,
            position: self.position,
        });
        self.trigger_glow(events);
    }

    fn lateral<R: Rng>(&self, rng: &mut R) -> f32 {
        match self.spawn_direction {
            SpawnDirection::Diagonal => {
                if rng.random_bool(0.5) {
                    SPAWN_DIAGONAL
                } else {
                    -SPAWN_DIAGONAL
                }
            }
            SpawnDirection::Uniform => rng.random_range(-SPAWN_DIAGONAL..=SPAWN_DIAGONAL),
        }
    }

    fn trigger_glow(&mut self, events: &mut Vec<GameEvent>) {
        self.glow = self.glow.trigger(self.glow_time);
        events.push(GameEvent::Glow {
            object: SceneObject::Ball,
            intensity: 1.0,
        });
        if self.lasers_follow_glow {
            events.push(GameEvent::Visibility {
                group: VisibilityGroup::BallLasers,
                visible: true,
            });
        }
    }

    /// Advance one tick against the arena walls and `mover`
    pub fn update(&mut self, dt: f32, mover: &Mover, events: &mut Vec<GameEvent>) -> Vec<BallContact> {
        self.update_glow(dt, events);

        let mut contacts = Vec::new();
        for (axis, side) in WALLS {
            if let Some(hit) = collide_wall(self.position, self.velocity, axis, side, self.range(axis)) {
                self.position = hit.position;
                self.velocity = hit.velocity;
                self.push_hit_sound(events);
                contacts.push(BallContact::Wall { axis, side });
                if axis == Axis::Y {
                    contacts.push(BallContact::Goal);
                }
            }
        }

        if let Some(contact) = self.check_mover(mover, events) {
            contacts.push(contact);
        }

        self.position += self.velocity * dt;
        events.push(GameEvent::Moved {
            object: SceneObject::Ball,
            position: self.position,
        });

        contacts
    }

    fn update_glow(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        if !self.glow.active {
            return;
        }
        let next = self.glow.tick(dt);
        events.push(GameEvent::Glow {
            object: SceneObject::Ball,
            intensity: next.intensity(),
        });
        if self.glow.ended(next) && self.lasers_follow_glow {
            events.push(GameEvent::Visibility {
                group: VisibilityGroup::BallLasers,
                visible: false,
            });
        }
        self.glow = next;
    }

    fn check_mover(&mut self, mover: &Mover, events: &mut Vec<GameEvent>) -> Option<BallContact> {
        let depth = self.depth_tolerance * self.speed;
        let mover_y = mover.position.y;

        if in_mover_slab(self.position.y, mover_y, depth) {
            let overlaps = [Axis::X, Axis::Z].into_iter().all(|axis| {
                within_cross_section(self.position, self.extent, mover.position, mover.extent(), axis)
            });
            if overlaps {
                self.position.y = mover_y;
                self.velocity = reflect_axis(self.velocity, Axis::Y);
                self.push_hit_sound(events);
                return Some(BallContact::Mover);
            }
            None
        } else if is_past_mover(self.position.y, mover_y, self.miss_margin) {
            Some(BallContact::Missed)
        } else {
            None
        }
    }

    fn push_hit_sound(&self, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::Sound(SoundRequest::new(
            SoundCue::Hit,
            self.position,
            HIT_DISTANCE_REF,
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::area::PlayArea;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup(settings: &Settings) -> (Ball, Mover, Vec<GameEvent>) {
        let area = PlayArea::new(settings.arena_size, settings.area_glow_time);
        let mut events = Vec::new();

        let mut ball = Ball::new(&ObjectBinding::new(settings.spawn_base, Vec3::ONE), settings);
        ball.apply_movement_range_from_area(&area);

        let binding = ObjectBinding::new(Vec3::new(0.0, -28.0, 0.0), Vec3::new(6.0, 0.0, 2.0));
        let mut mover = Mover::new(&binding, settings);
        mover.apply_movement_range_from_area(&area, &mut events);
        (ball, mover, events)
    }

    #[test]
    fn test_spawn_speed_and_direction() {
        let settings = Settings::default();
        let (mut ball, _, mut events) = setup(&settings);
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..20 {
            ball.spawn(8.0, &mut rng, &mut events);
            assert!((ball.velocity.length() - 8.0).abs() < 1e-4);
            assert!(ball.velocity.y < 0.0);
            // Diagonal serves: |x| == |z|
            assert!((ball.velocity.x.abs() - ball.velocity.z.abs()).abs() < 1e-4);
            assert!(ball.velocity.x.abs() > 0.0);
            // Jitter stays within ±1.5 on X/Z, Y is fixed
            assert!(ball.position.x.abs() <= 1.5);
            assert!(ball.position.z.abs() <= 1.5);
            assert_eq!(ball.position.y, 20.0);
        }
        assert!(ball.glow().active);
    }

    #[test]
    fn test_uniform_spawn_never_zero() {
        let settings = Settings::from_variant(crate::Variant::Classic);
        let (mut ball, _, mut events) = setup(&settings);
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            ball.spawn(6.0, &mut rng, &mut events);
            assert!(ball.velocity.is_finite());
            assert!((ball.velocity.length() - 6.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_side_wall_reflects_and_clamps() {
        let settings = Settings::default();
        let (mut ball, mover, mut events) = setup(&settings);
        ball.position = Vec3::new(25.0, 0.0, 0.0);
        ball.velocity = Vec3::new(4.0, -4.0, 0.0);

        let contacts = ball.update(0.0, &mover, &mut events);
        assert_eq!(contacts, vec![BallContact::Wall { axis: Axis::X, side: Side::Max }]);
        assert_eq!(ball.position.x, 19.5);
        assert_eq!(ball.velocity, Vec3::new(-4.0, -4.0, 0.0));
    }

    #[test]
    fn test_far_wall_is_goal() {
        let settings = Settings::default();
        let (mut ball, mover, mut events) = setup(&settings);
        ball.position = Vec3::new(0.0, 31.0, 0.0);
        ball.velocity = Vec3::new(0.0, 8.0, 0.0);

        let contacts = ball.update(1.0 / 30.0, &mover, &mut events);
        assert_eq!(
            contacts,
            vec![BallContact::Wall { axis: Axis::Y, side: Side::Max }, BallContact::Goal]
        );
        assert!(ball.velocity.y < 0.0);
    }

    #[test]
    fn test_near_y_bound_is_not_a_wall() {
        let settings = Settings::default();
        let (mut ball, mover, mut events) = setup(&settings);
        // Below the arena floor but off to the side of the mover
        ball.position = Vec3::new(15.0, -29.9, 0.0);
        ball.velocity = Vec3::new(0.0, -8.0, 0.0);
        let contacts = ball.update(1.0 / 30.0, &mover, &mut events);
        assert!(contacts.is_empty());
        assert!(ball.velocity.y < 0.0);
    }

    #[test]
    fn test_mover_bounce() {
        let settings = Settings::default();
        let (mut ball, mover, mut events) = setup(&settings);
        ball.speed = 8.0;
        ball.position = Vec3::new(1.0, -28.5, 0.5);
        ball.velocity = Vec3::new(0.0, -8.0, 0.0);

        let contacts = ball.update(0.0, &mover, &mut events);
        assert_eq!(contacts, vec![BallContact::Mover]);
        assert_eq!(ball.position.y, -28.0);
        assert_eq!(ball.velocity.y, 8.0);
    }

    #[test]
    fn test_slab_outside_cross_section_is_not_missed_yet() {
        let settings = Settings::default();
        let (mut ball, mover, mut events) = setup(&settings);
        ball.speed = 8.0;
        ball.position = Vec3::new(10.0, -28.5, 0.0);
        ball.velocity = Vec3::new(0.0, -8.0, 0.0);

        assert!(ball.update(0.0, &mover, &mut events).is_empty());
        assert_eq!(ball.velocity.y, -8.0);
    }

    #[test]
    fn test_miss_needs_margin() {
        let settings = Settings::default();
        let (mut ball, mover, mut events) = setup(&settings);
        ball.velocity = Vec3::new(0.0, -8.0, 0.0);

        ball.position = Vec3::new(10.0, -60.0, 0.0);
        assert!(ball.update(0.0, &mover, &mut events).is_empty());

        ball.position = Vec3::new(10.0, -70.5, 0.0);
        assert_eq!(ball.update(0.0, &mover, &mut events), vec![BallContact::Missed]);
    }

    #[test]
    fn test_glow_fades_and_hides_lasers() {
        let settings = Settings::default();
        let (mut ball, mover, mut events) = setup(&settings);
        let mut rng = Pcg32::seed_from_u64(1);
        ball.spawn(8.0, &mut rng, &mut events);
        events.clear();

        for _ in 0..31 {
            ball.update(1.0 / 30.0, &mover, &mut events);
        }
        assert!(!ball.glow().active);
        assert!(events.contains(&GameEvent::Visibility {
            group: VisibilityGroup::BallLasers,
            visible: false,
        }));
    }

    proptest! {
        #[test]
        fn prop_wall_reflection_preserves_speed(
            x in -40.0f32..40.0,
            y in -20.0f32..40.0,
            z in -20.0f32..20.0,
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
            vz in -10.0f32..10.0,
        ) {
            let settings = Settings::default();
            let (mut ball, mover, mut events) = setup(&settings);
            ball.position = Vec3::new(x, y, z);
            ball.velocity = Vec3::new(vx, vy, vz);
            let before = ball.velocity.length();
            ball.update(1.0 / 30.0, &mover, &mut events);
            prop_assert!((ball.velocity.length() - before).abs() < 1e-3);
        }
    }
}
