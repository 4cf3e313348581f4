//! Per-circle instance data for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::{Body, SimState};

/// One filled circle
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
}

impl From<&Body> for CircleInstance {
    fn from(body: &Body) -> Self {
        Self {
            center: body.pos.to_array(),
            radius: body.radius,
            color: body.color.to_rgba_f32(),
        }
    }
}

/// Everything drawn in one frame, ordered by group
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    /// Tick this frame shows
    pub tick: u64,
    pub circles: Vec<CircleInstance>,
}

impl RenderFrame {
    /// Snapshot the surviving balls
    pub fn capture(state: &SimState) -> Self {
        Self {
            tick: state.time_ticks,
            circles: state.bodies().map(CircleInstance::from).collect(),
        }
    }

    /// Instance buffer contents, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.circles)
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }
}
