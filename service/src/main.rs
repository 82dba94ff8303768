//! Lighthaus service
//!
//! Runs the gradient controller on the main thread, refreshes the daily
//! schedule on a background thread and accepts user gradients over HTTP.

mod clock;
mod config;
mod driver;
mod error;
mod listener;
mod refresh;
mod request;
mod sun;

use std::env;
use std::io;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use lighthaus_composer::{
    ControlChannel, Controller, FrameScheduler, Instant, ScheduleInterpolator,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::clock::WallClock;
use crate::config::{CONFIG_ENV, MAX_LEDS, OutputKind, ServiceConfig};
use crate::driver::{NullDriver, Output, TerminalDriver};
use crate::error::ServiceError;
use crate::refresh::ScheduleRefresher;
use crate::sun::SunSource;

/// Control inbox size
const INBOX_SIZE: usize = 16;

/// Draw every n-th frame on the terminal
const TERMINAL_FRAME_INTERVAL: u32 = 5;

/// Static inbox shared by the producers and the control loop
static INBOX: ControlChannel<ScheduleInterpolator, INBOX_SIZE> =
    ControlChannel::<ScheduleInterpolator, INBOX_SIZE>::new();

fn main() -> ExitCode {
    let config_path = env::args_os()
        .nth(1)
        .or_else(|| env::var_os(CONFIG_ENV))
        .map(PathBuf::from);
    let config = ServiceConfig::load(config_path.as_deref());

    let level = config
        .as_ref()
        .map_or("info", |config| config.log_level.as_str());
    init_tracing(level);

    let result = config
        .map_err(ServiceError::from)
        .and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "lighthaus stopped");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(config: ServiceConfig) -> Result<(), ServiceError> {
    let clock = WallClock::new(config.zone()?);
    let sun = SunSource::from_config(&config, clock)?;
    let controller_config = config.controller_config(Instant::now())?;

    let refresher = ScheduleRefresher::new(config.schedule_file.clone(), sun, clock);
    let refresh_interval = config.refresh_interval();
    thread::Builder::new()
        .name(String::from("schedule-refresh"))
        .spawn(move || refresher.run(INBOX.sender(), refresh_interval))
        .map_err(|source| ServiceError::Spawn {
            name: "schedule-refresh",
            source,
        })?;

    let listener = TcpListener::bind(&config.listen_addr).map_err(|source| ServiceError::Bind {
        addr: config.listen_addr.clone(),
        source,
    })?;
    info!(addr = %config.listen_addr, "listening for gradients over HTTP");
    thread::Builder::new()
        .name(String::from("listener"))
        .spawn(move || {
            if let Err(error) = listener::serve(listener, INBOX.sender()) {
                error!(%error, "request listener stopped");
            }
        })
        .map_err(|source| ServiceError::Spawn {
            name: "listener",
            source,
        })?;

    let output = match config.output {
        OutputKind::Terminal => Output::Terminal(TerminalDriver::new(
            io::stdout(),
            config.pixel_count,
            TERMINAL_FRAME_INTERVAL,
        )),
        OutputKind::None => Output::Null(NullDriver),
    };

    let controller = Controller::<ScheduleInterpolator, MAX_LEDS, INBOX_SIZE>::new(
        INBOX.receiver(),
        &controller_config,
    );
    let mut scheduler =
        FrameScheduler::with_frame_duration(controller, output, config.tick_duration());
    info!(
        pixels = config.pixel_count,
        tick_ms = config.tick_ms,
        "control loop started"
    );

    loop {
        let result = scheduler.tick(Instant::now());
        if let Some(fast_mode) = result.inbox.fast_mode {
            info!(fast_mode, "fast mode changed");
        }
        thread::sleep(std::time::Duration::from_micros(
            result.sleep_duration.as_micros(),
        ));
    }
}
