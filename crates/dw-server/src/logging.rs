use clap::ValueEnum;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{Result, ServerError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// `--log` wins over `--quiet`, which wins over the `-v` count.
pub fn log_filter(verbose: u8, quiet: bool, log_level: Option<LogLevel>) -> &'static str {
    if let Some(level) = log_level {
        return match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
    }
    if quiet {
        return "error";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

pub fn setup_logging(
    verbose: u8,
    quiet: bool,
    log_level: Option<LogLevel>,
    log_format: LogFormat,
) -> Result<()> {
    let filter = EnvFilter::new(log_filter(verbose, quiet, log_level));

    let formatter = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .with_level(true);

    let installed = match log_format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(formatter)
            .with(filter)
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(formatter.json())
            .with(filter)
            .try_init(),
    };

    installed.map_err(|e| ServerError::Config(format!("Failed to set up logging: {}", e)))
}
