//! Collision detection and response for axis-aligned boxes
//!
//! Collisions are discrete: they are resolved on the position before the
//! tick's integration step, by clamping into range and flipping the velocity
//! component on the colliding axis. All functions take and return values.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::area::AxisRange;
use crate::Axis;

/// Which end of a range was crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Min,
    Max,
}

/// Position and velocity after a reflection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflection {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Negate the velocity component on `axis`; speed is unchanged
#[inline]
pub fn reflect_axis(velocity: Vec3, axis: Axis) -> Vec3 {
    let mut reflected = velocity;
    axis.set(&mut reflected, -axis.of(velocity));
    reflected
}

/// Check one side of `range` on `axis`
///
/// Returns the clamped position and reflected velocity when `position` lies
/// strictly beyond the bound.
pub fn collide_wall(
    position: Vec3,
    velocity: Vec3,
    axis: Axis,
    side: Side,
    range: AxisRange,
) -> Option<Reflection> {
    let value = axis.of(position);
    let bound = match side {
        Side::Min if value < range.min => range.min,
        Side::Max if value > range.max => range.max,
        _ => return None,
    };

    let mut position = position;
    axis.set(&mut position, bound);
    Some(Reflection {
        position,
        velocity: reflect_axis(velocity, axis),
    })
}

/// AABB overlap on one axis: is the ball centre strictly within the target's
/// extent grown by half the ball's own extent?
#[inline]
pub fn within_cross_section(
    ball_pos: Vec3,
    ball_extent: Vec3,
    target_pos: Vec3,
    target_extent: Vec3,
    axis: Axis,
) -> bool {
    let reach = axis.of(target_extent) / 2.0 + axis.of(ball_extent) / 2.0;
    let centre = axis.of(target_pos);
    let value = axis.of(ball_pos);
    centre - reach < value && value < centre + reach
}

/// Is `ball_y` inside the thin slab of `depth` that ends at the mover plane?
#[inline]
pub fn in_mover_slab(ball_y: f32, mover_y: f32, depth: f32) -> bool {
    mover_y - depth < ball_y && ball_y < mover_y
}

/// Has the ball fallen more than `margin` past the mover plane?
#[inline]
pub fn is_past_mover(ball_y: f32, mover_y: f32, margin: f32) -> bool {
    ball_y < mover_y - margin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_axis_preserves_speed() {
        let v = Vec3::new(3.0, -4.0, 1.5);
        let r = reflect_axis(v, Axis::Y);
        assert_eq!(r, Vec3::new(3.0, 4.0, 1.5));
        assert!((r.length() - v.length()).abs() < 1e-6);
    }

    #[test]
    fn test_collide_wall_max() {
        let range = AxisRange::new(-5.0, 5.0);
        let hit = collide_wall(
            Vec3::new(5.5, 0.0, 0.0),
            Vec3::new(2.0, -1.0, 0.0),
            Axis::X,
            Side::Max,
            range,
        )
        .expect("should collide");
        assert_eq!(hit.position.x, 5.0);
        assert_eq!(hit.velocity, Vec3::new(-2.0, -1.0, 0.0));

        // The other side of the same axis is not touched
        assert!(
            collide_wall(
                Vec3::new(5.5, 0.0, 0.0),
                Vec3::X,
                Axis::X,
                Side::Min,
                range
            )
            .is_none()
        );
    }

    #[test]
    fn test_collide_wall_on_bound_is_not_a_hit() {
        let range = AxisRange::new(-5.0, 5.0);
        assert!(collide_wall(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Axis::Z, Side::Min, range).is_none());
    }

    #[test]
    fn test_cross_section_grows_by_ball_extent() {
        let mover_pos = Vec3::new(0.0, -28.0, 0.0);
        let mover_extent = Vec3::new(6.0, 0.0, 2.0);
        let ball_extent = Vec3::ONE;

        // 3 + 0.5 = 3.5 reach on X
        let inside = Vec3::new(3.4, -28.5, 0.0);
        let outside = Vec3::new(3.6, -28.5, 0.0);
        assert!(within_cross_section(inside, ball_extent, mover_pos, mover_extent, Axis::X));
        assert!(!within_cross_section(outside, ball_extent, mover_pos, mover_extent, Axis::X));

        // 1 + 0.5 = 1.5 reach on Z, strict
        let edge = Vec3::new(0.0, -28.5, 1.5);
        assert!(!within_cross_section(edge, ball_extent, mover_pos, mover_extent, Axis::Z));
    }

    #[test]
    fn test_slab_and_miss() {
        assert!(in_mover_slab(-28.5, -28.0, 1.6));
        assert!(!in_mover_slab(-28.0, -28.0, 1.6));
        assert!(!in_mover_slab(-30.0, -28.0, 1.6));

        assert!(is_past_mover(-70.5, -28.0, 42.0));
        assert!(!is_past_mover(-69.0, -28.0, 42.0));
        assert!(is_past_mover(-28.1, -28.0, 0.0));
    }
}
