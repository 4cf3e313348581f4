//! Batch construction of same-colored balls

use glam::Vec2;
use rand::Rng;

use super::body::{Body, BodyId};
use super::state::{Arena, ColorGroup};
use crate::color::Color;
use crate::consts::*;

/// Makes groups of balls sharing one color
#[derive(Debug, Clone, Copy)]
pub struct BodyFactory {
    pub arena: Arena,
    pub color: Color,
    pub radius: f32,
}

impl BodyFactory {
    pub fn new(arena: Arena, color: Color, radius: f32) -> Self {
        Self {
            arena,
            color,
            radius,
        }
    }

    /// Make `count` balls. Ids are taken from `next_id`, which is advanced.
    ///
    /// Spawn positions are `dimension / U[1, 5)`, which clusters balls toward
    /// the top-left; velocities are `U[-5, 5)` per axis.
    pub fn make<R: Rng + ?Sized>(&self, count: u32, next_id: &mut u32, rng: &mut R) -> ColorGroup {
        let mut group = ColorGroup::new(self.color);
        group.bodies.reserve(count as usize);

        for _ in 0..count {
            let id = BodyId(*next_id);
            *next_id += 1;

            let pos = Vec2::new(
                self.arena.width / rng.random_range(SPAWN_DIVISOR_MIN..SPAWN_DIVISOR_MAX),
                self.arena.height / rng.random_range(SPAWN_DIVISOR_MIN..SPAWN_DIVISOR_MAX),
            );
            let vel = Vec2::new(
                rng.random_range(-SPAWN_SPEED..SPAWN_SPEED),
                rng.random_range(-SPAWN_SPEED..SPAWN_SPEED),
            );
            group.insert(Body::new(id, pos, vel, self.radius, self.color));
        }

        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_make_count_and_ranges() {
        let arena = Arena::new(800.0, 600.0);
        let factory = BodyFactory::new(arena, Color::GREEN, BALL_RADIUS);
        let mut rng = Pcg32::seed_from_u64(21);
        let mut next_id = 1;

        let group = factory.make(50, &mut next_id, &mut rng);
        assert_eq!(group.len(), 50);
        assert_eq!(group.color, Color::GREEN);
        assert_eq!(next_id, 51);

        for body in &group.bodies {
            assert_eq!(body.radius, 10.0);
            assert_eq!(body.color, Color::GREEN);
            assert!(!body.is_frozen());
            assert!(body.pos.x > 160.0 && body.pos.x <= 800.0);
            assert!(body.pos.y > 120.0 && body.pos.y <= 600.0);
            assert!(body.vel.x >= -5.0 && body.vel.x < 5.0);
            assert!(body.vel.y >= -5.0 && body.vel.y < 5.0);
        }
    }

    #[test]
    fn test_make_zero() {
        let factory = BodyFactory::new(Arena::new(10.0, 10.0), Color::RED, 3.0);
        let mut rng = Pcg32::seed_from_u64(0);
        let mut next_id = 7;
        let group = factory.make(0, &mut next_id, &mut rng);
        assert!(group.is_empty());
        assert_eq!(next_id, 7);
    }
}
