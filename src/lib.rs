//! Bouncing Balls - colored balls in a walled arena
//!
//! Core modules:
//! - `sim`: Simulation state (bodies, groups, collisions, tick)
//! - `renderer`: Render feed handed to the external drawing collaborator
//! - `platform`: Frame pacing
//! - `config`: Construction-time configuration
//! - `runner`: The fixed-rate simulation loop

pub mod color;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod sim;

pub use color::Color;
pub use config::{ConfigError, GroupConfig, OverlapTest, SimConfig};
pub use renderer::{CircleInstance, Frontend, RenderFrame};
pub use runner::{RunState, RunSummary, SimulationLoop};

/// Simulation constants
pub mod consts {
    /// Default arena dimensions (pixels)
    pub const ARENA_WIDTH: u32 = 800;
    pub const ARENA_HEIGHT: u32 = 600;

    /// Radius of a freshly made ball
    pub const BALL_RADIUS: f32 = 10.0;
    /// Balls per color in the stock scene
    pub const BALLS_PER_GROUP: u32 = 4;

    /// Target tick rate (Hz)
    pub const TICK_RATE: f32 = 60.0;

    /// Per-axis speed floor after integration (pixels/tick)
    pub const MIN_AXIS_SPEED: f32 = 1.0;
    /// Per-axis speed cap after a ball-ball bounce (pixels/tick)
    pub const MAX_BOUNCE_SPEED: f32 = 7.0;
    /// Half-width of the random kick added on every bounce
    pub const BOUNCE_JITTER: f32 = 1.0;

    /// Initial velocity range per axis: [-SPAWN_SPEED, SPAWN_SPEED)
    pub const SPAWN_SPEED: f32 = 5.0;
    /// Spawn position is `dimension / U[SPAWN_DIVISOR_MIN, SPAWN_DIVISOR_MAX)`
    pub const SPAWN_DIVISOR_MIN: f32 = 1.0;
    pub const SPAWN_DIVISOR_MAX: f32 = 5.0;
}

/// Snap a per-axis speed whose magnitude fell below `floor` to `±floor`.
/// Zero snaps to the positive side.
#[inline]
pub fn snap_min_speed(speed: f32, floor: f32) -> f32 {
    if speed.abs() < floor {
        if speed >= 0.0 { floor } else { -floor }
    } else {
        speed
    }
}
