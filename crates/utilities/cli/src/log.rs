//! Logging arguments and subscriber setup.

use clap::{ArgAction, Args, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

/// Output format of log lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event with all fields and span context.
    #[default]
    Full,
    /// Shorter lines, span fields appended at the end.
    Compact,
}

/// Logging CLI arguments.
#[derive(Debug, Default, Clone, PartialEq, Eq, Args)]
pub struct LogArgs {
    /// Verbosity: none for `info`, `-v` for `debug`, `-vv` for `trace`.
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(short = 'v', long = "verbosity", action = ArgAction::Count, global = true)]
    pub level: u8,
    /// Log line format.
    #[arg(long = "log.format", value_enum, default_value_t, global = true, env = "BLOCKDEX_LOG_FORMAT")]
    pub format: LogFormat,
}

impl LogArgs {
    /// Installs the global subscriber for these arguments.
    pub fn init_tracing_subscriber(&self) -> Result<(), TryInitError> {
        init_tracing_subscriber(self.level, self.format, None::<EnvFilter>)
    }
}

const fn verbosity_to_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs a global `fmt` subscriber.
///
/// Without an explicit `env_filter`, the filter is read from `RUST_LOG` and
/// falls back to the level selected by `verbosity`.
pub fn init_tracing_subscriber(
    verbosity: u8,
    format: LogFormat,
    env_filter: Option<impl Into<EnvFilter>>,
) -> Result<(), TryInitError> {
    let filter = env_filter.map(Into::into).unwrap_or_else(|| {
        EnvFilter::builder()
            .with_default_directive(verbosity_to_level(verbosity).into())
            .from_env_lossy()
    });

    let layer = match format {
        LogFormat::Full => fmt::layer().boxed(),
        LogFormat::Compact => fmt::layer().compact().boxed(),
    };
    tracing_subscriber::registry().with(layer.with_filter(filter)).try_init()
}
