//! Bouncing Balls entry point
//!
//! Runs the simulation headless: frames are summarized to the log instead of
//! drawn. Usage: `bouncing-balls [CONFIG.json] [TICKS]`

use std::process::ExitCode;

use bouncing_balls::{Frontend, RenderFrame, SimConfig, SimulationLoop};

/// Default run length (ten seconds at the stock rate)
const DEFAULT_TICKS: u64 = 600;

/// Logs a frame summary once per second of simulated time
struct LogFrontend {
    max_ticks: u64,
    log_every: u64,
    last_tick: u64,
}

impl Frontend for LogFrontend {
    fn poll_quit(&mut self) -> bool {
        self.last_tick >= self.max_ticks
    }

    fn present(&mut self, frame: &RenderFrame) {
        self.last_tick = frame.tick;
        if frame.tick % self.log_every == 0 {
            let largest = frame
                .circles
                .iter()
                .map(|c| c.radius)
                .fold(0.0f32, f32::max);
            log::info!(
                "Tick {}: {} balls, largest radius {}, {} bytes of instances",
                frame.tick,
                frame.len(),
                largest,
                frame.as_bytes().len()
            );
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Bouncing Balls (headless) starting...");

    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };

    let max_ticks = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(ticks)) => ticks,
        Some(Err(err)) => {
            log::error!("TICKS must be a whole number: {err}");
            return ExitCode::FAILURE;
        }
        None => DEFAULT_TICKS,
    };

    let mut frontend = LogFrontend {
        max_ticks,
        log_every: (config.tick_rate.round() as u64).max(1),
        last_tick: 0,
    };
    let mut sim = match SimulationLoop::new(&config) {
        Ok(sim) => sim,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let summary = sim.run(&mut frontend);

    log::info!(
        "Done: {} ticks, {} merges, {} balls left",
        summary.ticks,
        summary.merges,
        summary.balls_left
    );
    ExitCode::SUCCESS
}
