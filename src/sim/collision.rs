//! Collision tests and bounds clamping
//!
//! Everything here is squared-distance arithmetic; no square roots in the
//! hot path.

use glam::Vec2;

/// Check whether two circles overlap (touching counts as overlap)
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let sum = a_radius + b_radius;
    a_pos.distance_squared(b_pos) <= sum * sum
}

/// Clamp a circle center so the circle stays fully inside the
/// `[0, width] x [0, height]` rectangle
#[inline]
pub fn clamp_to_bounds(pos: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, width - radius),
        pos.y.clamp(radius, height - radius),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap_apart() {
        assert!(!circles_overlap(
            Vec2::new(0.0, 0.0),
            24.0,
            Vec2::new(100.0, 0.0),
            18.0
        ));
    }

    #[test]
    fn test_circles_overlap_intersecting() {
        assert!(circles_overlap(
            Vec2::new(0.0, 0.0),
            24.0,
            Vec2::new(30.0, 0.0),
            18.0
        ));
    }

    #[test]
    fn test_circles_touching_counts_as_hit() {
        // Centers exactly radius-sum apart
        assert!(circles_overlap(
            Vec2::new(0.0, 0.0),
            24.0,
            Vec2::new(42.0, 0.0),
            18.0
        ));
    }

    #[test]
    fn test_clamp_inside_is_identity() {
        let pos = Vec2::new(400.0, 300.0);
        assert_eq!(clamp_to_bounds(pos, 24.0, 800.0, 600.0), pos);
    }

    #[test]
    fn test_clamp_pulls_back_into_bounds() {
        let pos = Vec2::new(-10.0, 700.0);
        let clamped = clamp_to_bounds(pos, 24.0, 800.0, 600.0);
        assert_eq!(clamped, Vec2::new(24.0, 576.0));
    }
}
