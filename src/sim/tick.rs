//! Fixed-rate simulation tick
//!
//! One tick: move every ball, resolve contacts, then drop the balls that
//! were swallowed. Contacts are found where the balls were last drawn.
//! Nothing is removed until the collision pass is done.

use super::collision::{CollisionReport, CollisionResolver, apply_removals};
use super::state::SimState;

/// Summary of a single tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// Tick number just completed (1-based)
    pub tick: u64,
    pub collisions: CollisionReport,
    /// Balls removed at the end of the tick
    pub removed: usize,
}

/// Advance the simulation by one tick
pub fn tick(state: &mut SimState, resolver: &mut CollisionResolver) -> TickReport {
    state.time_ticks += 1;

    let arena = state.arena;
    for group in &mut state.groups {
        for body in &mut group.bodies {
            body.integrate(&arena, &mut state.rng);
        }
    }

    let collisions = resolver.resolve(&mut state.groups, &mut state.rng);
    let removed = apply_removals(&mut state.groups, &collisions.removed);

    if removed > 0 {
        log::debug!(
            "Tick {}: {} merged, {} balls left",
            state.time_ticks,
            removed,
            state.body_count()
        );
    }

    TickReport {
        tick: state.time_ticks,
        collisions,
        removed,
    }
}
