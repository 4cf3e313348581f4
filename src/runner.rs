//! Fixed-rate simulation loop
//!
//! Each tick: poll quit, advance the simulation, present a frame, then wait
//! for the pacer. Quit is only seen between ticks.

use std::time::Duration;

use crate::config::{ConfigError, SimConfig};
use crate::platform::FramePacer;
use crate::renderer::{Frontend, RenderFrame};
use crate::sim::{CollisionResolver, SimState, TickReport, tick};

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub merges: usize,
    pub balls_left: usize,
}

/// Owns the simulation and drives it at a fixed rate
#[derive(Debug)]
pub struct SimulationLoop {
    state: SimState,
    resolver: CollisionResolver,
    period: Duration,
    run_state: RunState,
    merges: usize,
}

impl SimulationLoop {
    /// Build the scene described by `config`. Fails if the config is invalid.
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_state(
            SimState::from_config(config),
            config.tick_period(),
        ))
    }

    pub fn from_state(state: SimState, period: Duration) -> Self {
        let resolver = CollisionResolver::new(state.overlap);
        Self {
            state,
            resolver,
            period,
            run_state: RunState::Running,
            merges: 0,
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn stop(&mut self) {
        if self.run_state == RunState::Running {
            log::info!("Stopping after {} ticks", self.state.time_ticks);
        }
        self.run_state = RunState::Stopped;
    }

    /// Run a single tick without pacing. Does nothing once stopped.
    pub fn step(&mut self) -> Option<TickReport> {
        if self.run_state == RunState::Stopped {
            return None;
        }
        let report = tick(&mut self.state, &mut self.resolver);
        self.merges += report.removed;
        log::trace!("Tick {}: {} balls", report.tick, self.state.body_count());
        Some(report)
    }

    /// Current scene for drawing
    pub fn frame(&self) -> RenderFrame {
        RenderFrame::capture(&self.state)
    }

    /// Drive the loop until the frontend asks to quit
    pub fn run<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> RunSummary {
        log::info!(
            "Running {} balls in {} groups at {:.1} Hz (seed {})",
            self.state.body_count(),
            self.state.groups.len(),
            1.0 / self.period.as_secs_f32(),
            self.state.seed
        );

        let mut pacer = FramePacer::new(self.period);
        while self.run_state == RunState::Running {
            if frontend.poll_quit() {
                self.stop();
                break;
            }
            self.step();
            frontend.present(&self.frame());
            pacer.wait();
        }

        self.summary()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.state.time_ticks,
            merges: self.merges,
            balls_left: self.state.body_count(),
        }
    }
}
