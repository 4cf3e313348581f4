//! Simulation state
//!
//! Everything a tick reads or writes lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId};
use super::factory::BodyFactory;
use crate::color::Color;
use crate::config::{OverlapTest, SimConfig};

/// Walled play area. The origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// All balls of one color, in insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorGroup {
    pub color: Color,
    pub bodies: Vec<Body>,
}

impl ColorGroup {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            bodies: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.iter().any(|b| b.id == id)
    }

    /// Add a ball. Ignored if a ball with the same id is already here.
    pub fn insert(&mut self, body: Body) -> bool {
        if self.contains(body.id) {
            return false;
        }
        self.bodies.push(body);
        true
    }

    /// Remove a ball by id
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let idx = self.bodies.iter().position(|b| b.id == id)?;
        Some(self.bodies.remove(idx))
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub arena: Arena,
    pub overlap: OverlapTest,
    /// Groups in iteration order
    pub groups: Vec<ColorGroup>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next ball id
    next_id: u32,
}

impl SimState {
    /// Empty arena with a seeded RNG
    pub fn new(arena: Arena, overlap: OverlapTest, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            overlap,
            groups: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Build the initial scene described by `config`
    pub fn from_config(config: &SimConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut state = Self::new(config.arena(), config.overlap, seed);

        for group in &config.groups {
            let factory = BodyFactory::new(state.arena, group.color, config.ball_radius);
            let made = factory.make(group.count, &mut state.next_id, &mut state.rng);
            log::info!("Spawned {} {} balls", made.len(), group.color);
            state.groups.push(made);
        }

        state
    }

    /// Allocate a new ball id
    pub fn next_body_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Place a ball in the group of its color, creating the group if needed
    pub fn add_body(&mut self, body: Body) -> bool {
        if self.contains(body.id) {
            return false;
        }
        match self.groups.iter_mut().find(|g| g.color == body.color) {
            Some(group) => group.insert(body),
            None => {
                let mut group = ColorGroup::new(body.color);
                group.insert(body);
                self.groups.push(group);
                true
            }
        }
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.groups.iter().any(|g| g.contains(id))
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.groups.iter().flat_map(|g| g.bodies.iter())
    }

    pub fn body_count(&self) -> usize {
        self.groups.iter().map(ColorGroup::len).sum()
    }
}
