//! A single ball and its motion rules

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Arena;
use crate::color::Color;
use crate::config::OverlapTest;
use crate::consts::*;
use crate::snap_min_speed;

/// Stable ball identity, unique within one simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Strict overlap; boxes that only share an edge do not touch
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    /// Center position
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Center as drawn last frame. Contacts are tested here, not at `pos`.
    rest: Vec2,
    frozen: bool,
}

impl Body {
    pub fn new(id: BodyId, pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            color,
            rest: pos,
            frozen: false,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Stop integrating. A frozen ball still collides.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    pub fn bounds(&self) -> Bounds {
        bounds_around(self.pos, self.radius)
    }

    /// Center before the current tick's move
    pub fn rest(&self) -> Vec2 {
        self.rest
    }

    pub fn rest_bounds(&self) -> Bounds {
        bounds_around(self.rest, self.radius)
    }

    /// Contact test against another ball, at both balls' resting centers
    pub fn overlaps(&self, other: &Body, test: OverlapTest) -> bool {
        match test {
            OverlapTest::BoundingBox => self.rest_bounds().intersects(&other.rest_bounds()),
            OverlapTest::Circle => {
                let reach = self.radius + other.radius;
                self.rest.distance_squared(other.rest) < reach * reach
            }
        }
    }

    /// Advance one tick: reflect off any wall the ball has crossed, enforce
    /// the per-axis speed floor, then move.
    pub fn integrate<R: Rng + ?Sized>(&mut self, arena: &Arena, rng: &mut R) {
        self.rest = self.pos;
        if self.frozen {
            return;
        }

        self.pos.x = reflect_axis(self.pos.x, &mut self.vel.x, self.radius, arena.width, rng);
        self.pos.y = reflect_axis(self.pos.y, &mut self.vel.y, self.radius, arena.height, rng);

        self.pos += self.vel;
    }

    /// Ball-ball bounce: reverse both axes with a random kick, capped
    pub fn bounce<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.vel.x = (-self.vel.x + jitter(rng)).clamp(-MAX_BOUNCE_SPEED, MAX_BOUNCE_SPEED);
        self.vel.y = (-self.vel.y + jitter(rng)).clamp(-MAX_BOUNCE_SPEED, MAX_BOUNCE_SPEED);
    }

    /// Double the radius around the same center
    pub fn grow(&mut self) {
        self.radius *= 2.0;
    }
}

fn bounds_around(center: Vec2, radius: f32) -> Bounds {
    let half = Vec2::splat(radius);
    Bounds {
        min: center - half,
        max: center + half,
    }
}

#[inline]
fn jitter<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(-BOUNCE_JITTER..=BOUNCE_JITTER)
}

/// Wall handling for one axis. Returns the corrected position.
///
/// After a wall hit the speed points back into the arena with magnitude at
/// least `MIN_AXIS_SPEED`, so the following move cannot leave the arena.
fn reflect_axis<R: Rng + ?Sized>(
    pos: f32,
    vel: &mut f32,
    radius: f32,
    extent: f32,
    rng: &mut R,
) -> f32 {
    if pos - radius < 0.0 {
        *vel = (vel.abs() + jitter(rng)).max(MIN_AXIS_SPEED);
        radius
    } else if pos + radius > extent {
        *vel = (-vel.abs() + jitter(rng)).min(-MIN_AXIS_SPEED);
        extent - radius
    } else {
        *vel = snap_min_speed(*vel, MIN_AXIS_SPEED);
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> Arena {
        Arena::new(800.0, 600.0)
    }

    fn ball(pos: Vec2, vel: Vec2) -> Body {
        Body::new(BodyId(1), pos, vel, 10.0, Color::BLUE)
    }

    #[test]
    fn test_integrate_moves_by_velocity() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut b = ball(Vec2::new(100.0, 100.0), Vec2::new(3.0, -2.0));
        b.integrate(&arena(), &mut rng);
        assert_eq!(b.pos, Vec2::new(103.0, 98.0));
        assert_eq!(b.vel, Vec2::new(3.0, -2.0));
        assert_eq!(b.rest(), Vec2::new(100.0, 100.0));
        assert_eq!(b.rest_bounds().min, Vec2::new(90.0, 90.0));
    }

    #[test]
    fn test_integrate_left_wall() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut b = ball(Vec2::new(0.0, 300.0), Vec2::new(-3.0, 2.0));
        b.integrate(&arena(), &mut rng);
        assert!(b.vel.x >= 1.0);
        assert!(b.pos.x - b.radius >= 0.0);
    }

    #[test]
    fn test_integrate_bottom_right_corner() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut b = ball(Vec2::new(805.0, 610.0), Vec2::new(4.0, 0.5));
        b.integrate(&arena(), &mut rng);
        assert!(b.vel.x <= -1.0);
        assert!(b.vel.y <= -1.0);
        assert!(b.pos.x + b.radius <= 800.0);
        assert!(b.pos.y + b.radius <= 600.0);
    }

    #[test]
    fn test_integrate_snaps_slow_axes() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut b = ball(Vec2::new(400.0, 300.0), Vec2::new(0.0, -0.25));
        b.integrate(&arena(), &mut rng);
        assert_eq!(b.vel, Vec2::new(1.0, -1.0));
        assert_eq!(b.pos, Vec2::new(401.0, 299.0));
    }

    #[test]
    fn test_frozen_does_not_integrate() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut b = ball(Vec2::new(-50.0, 300.0), Vec2::new(0.1, 0.1));
        b.freeze();
        b.integrate(&arena(), &mut rng);
        assert_eq!(b.pos, Vec2::new(-50.0, 300.0));
        assert_eq!(b.vel, Vec2::new(0.1, 0.1));

        b.unfreeze();
        assert!(!b.is_frozen());
        b.integrate(&arena(), &mut rng);
        assert!(b.pos.x - b.radius >= 0.0);
    }

    #[test]
    fn test_bounce_is_seeded() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut replay = rng.clone();
        let mut b = ball(Vec2::new(400.0, 300.0), Vec2::new(3.0, -4.0));
        b.bounce(&mut rng);

        let jx: f32 = replay.random_range(-1.0..=1.0);
        let jy: f32 = replay.random_range(-1.0..=1.0);
        assert_eq!(b.vel, Vec2::new(-3.0 + jx, 4.0 + jy));
    }

    #[test]
    fn test_bounce_clamps() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut b = ball(Vec2::new(400.0, 300.0), Vec2::new(-30.0, 30.0));
        b.bounce(&mut rng);
        assert_eq!(b.vel, Vec2::new(7.0, -7.0));
    }

    #[test]
    fn test_grow_keeps_center() {
        let mut b = ball(Vec2::new(120.0, 80.0), Vec2::ONE);
        b.grow();
        assert_eq!(b.radius, 20.0);
        assert_eq!(b.pos, Vec2::new(120.0, 80.0));
        assert_eq!(b.bounds().min, Vec2::new(100.0, 60.0));
    }

    #[test]
    fn test_overlap_tests() {
        let a = ball(Vec2::new(100.0, 100.0), Vec2::ONE);
        // Diagonal neighbour: boxes overlap, circles do not
        let b = ball(Vec2::new(115.0, 115.0), Vec2::ONE);
        assert!(a.overlaps(&b, OverlapTest::BoundingBox));
        assert!(!a.overlaps(&b, OverlapTest::Circle));

        // Touching edges do not count
        let c = ball(Vec2::new(120.0, 100.0), Vec2::ONE);
        assert!(!a.overlaps(&c, OverlapTest::BoundingBox));
        assert!(!a.overlaps(&c, OverlapTest::Circle));
    }

    #[test]
    fn test_overlap_uses_resting_center() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut a = ball(Vec2::new(100.0, 100.0), Vec2::new(-6.0, 1.0));
        let mut b = ball(Vec2::new(115.0, 100.0), Vec2::new(6.0, 1.0));
        a.integrate(&arena(), &mut rng);
        b.integrate(&arena(), &mut rng);

        // Apart after the move, still touching where they were drawn
        assert!(!a.bounds().intersects(&b.bounds()));
        assert!(a.overlaps(&b, OverlapTest::BoundingBox));
        assert!(a.overlaps(&b, OverlapTest::Circle));

        // The next move rests them apart
        a.integrate(&arena(), &mut rng);
        b.integrate(&arena(), &mut rng);
        assert!(!a.overlaps(&b, OverlapTest::BoundingBox));
    }

    #[test]
    fn test_frozen_ball_rests_in_place() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut b = ball(Vec2::new(200.0, 200.0), Vec2::new(3.0, 3.0));
        b.integrate(&arena(), &mut rng);
        b.freeze();
        b.integrate(&arena(), &mut rng);
        assert_eq!(b.rest(), b.pos);
    }

    proptest! {
        #[test]
        fn prop_integrate_speed_floor(
            seed in any::<u64>(),
            x in -50.0f32..850.0,
            y in -50.0f32..650.0,
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut b = ball(Vec2::new(x, y), Vec2::new(vx, vy));
            b.integrate(&arena(), &mut rng);
            prop_assert!(b.vel.x.abs() >= 1.0);
            prop_assert!(b.vel.y.abs() >= 1.0);
        }

        #[test]
        fn prop_wall_correction_contains(
            seed in any::<u64>(),
            x in -50.0f32..850.0,
            y in -50.0f32..650.0,
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut b = ball(Vec2::new(x, y), Vec2::new(vx, vy));
            let crossed_x = x - 10.0 < 0.0 || x + 10.0 > 800.0;
            let crossed_y = y - 10.0 < 0.0 || y + 10.0 > 600.0;
            b.integrate(&arena(), &mut rng);
            if crossed_x {
                prop_assert!(b.pos.x - b.radius >= 0.0 && b.pos.x + b.radius <= 800.0);
            }
            if crossed_y {
                prop_assert!(b.pos.y - b.radius >= 0.0 && b.pos.y + b.radius <= 600.0);
            }
        }

        #[test]
        fn prop_bounce_speed_cap(
            seed in any::<u64>(),
            vx in -100.0f32..100.0,
            vy in -100.0f32..100.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut b = ball(Vec2::new(400.0, 300.0), Vec2::new(vx, vy));
            b.bounce(&mut rng);
            prop_assert!(b.vel.x.abs() <= 7.0);
            prop_assert!(b.vel.y.abs() <= 7.0);
        }
    }
}
