//! Collision detection
//!
//! Every entity is treated as a point and two entities touch when their centres
//! are closer than a single threshold. Obstacle shape and size play no part.

use glam::Vec3;

/// True when the two centres are strictly closer than `threshold`
#[inline]
pub fn check_collision(a: Vec3, b: Vec3, threshold: f32) -> bool {
    a.distance_squared(b) < threshold * threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_inside_threshold() {
        let ball = Vec3::new(0.0, 0.3, 0.0);
        assert!(check_collision(ball, Vec3::new(0.0, 0.3, -0.69), 0.7));
        assert!(check_collision(ball, Vec3::new(0.4, 0.3, 0.4), 0.7));
    }

    #[test]
    fn test_miss_at_or_past_threshold() {
        let ball = Vec3::new(0.0, 0.3, 0.0);
        assert!(!check_collision(ball, Vec3::new(0.0, 0.3, -0.7), 0.7));
        assert!(!check_collision(ball, Vec3::new(1.0, 0.3, 0.0), 0.7));
        // Lifted obstacle passes over a grounded ball
        assert!(!check_collision(ball, Vec3::new(0.0, 1.3, 0.0), 0.7));
    }
}
