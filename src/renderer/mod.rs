//! Render feed
//!
//! The simulation never draws. Each tick it hands a fresh [`RenderFrame`] to
//! a [`Frontend`], which clears and redraws the whole scene.

pub mod instance;

pub use instance::{CircleInstance, RenderFrame};

/// The window/input side of the program
pub trait Frontend {
    /// Polled once per tick, before the tick runs
    fn poll_quit(&mut self) -> bool;

    /// Draw one complete frame
    fn present(&mut self, frame: &RenderFrame);
}
