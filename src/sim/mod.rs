//! Simulation module
//!
//! All ball behavior lives here. Nothing in this module draws, sleeps or
//! polls input:
//! - Seeded RNG only
//! - Stable iteration order (group order, then insertion order)
//! - Removals applied only between collision passes

pub mod body;
pub mod collision;
pub mod factory;
pub mod state;
pub mod tick;

pub use body::{Body, BodyId, Bounds};
pub use collision::{CollisionReport, CollisionResolver, apply_removals, find_overlaps};
pub use factory::BodyFactory;
pub use state::{Arena, ColorGroup, SimState};
pub use tick::{TickReport, tick};
