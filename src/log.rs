//! Logging setup for the CLI
//!
//! Diagnostics go to stderr through `fern`, with colourised levels when the
//! terminal supports it. Quote output itself is program output and stays on
//! stdout. The level can be raised with the `RIG_LOG_LEVEL` environment
//! variable (`error`, `warn`, `info`, `debug`, `trace`).

use std::env;
use std::io::IsTerminal;

use anyhow::{Result, bail};
use chrono::Local;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Default level keeps quote output free of log noise
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Initialise the program logger.
pub fn init() -> Result<()> {
    let log_level = env::var("RIG_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    let log_level = match log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {}", unknown),
    };

    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    let use_colour = std::io::stderr().is_terminal();

    Dispatch::new()
        .format(move |out, message, record| {
            let timestamp = Local::now().format("%H:%M:%S");
            if use_colour {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    timestamp,
                    colours.color(record.level()),
                    record.target(),
                    message
                ));
            } else {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    timestamp,
                    record.level(),
                    record.target(),
                    message
                ));
            }
        })
        .level(log_level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}
