//! Tracing setup for deltascope.
//!
//! Log events can be written to stdout, journald and a rolling log file, each through its own
//! layer with an independent format and filter.
//!
//! ```no_run
//! use deltascope_tracing::{DeltascopeTracer, LayerInfo, LogFormat, Tracer};
//!
//! let stdout = LayerInfo::new(LogFormat::Terminal, "info".to_string(), String::new(), None);
//! let _guard = DeltascopeTracer::new().with_stdout(stdout).init();
//! ```

use std::path::PathBuf;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod formatter;
mod layers;

pub use formatter::LogFormat;
// Re-export so callers can build [`tracing_subscriber::filter::Directive`]s
pub use tracing_subscriber;

/// Keeps the non-blocking file writer alive. Dropping it flushes and stops file logging.
pub type FileWorkerGuard = tracing_appender::non_blocking::WorkerGuard;

/// Configuration for a single log layer.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    /// Creates a new [`LayerInfo`].
    ///
    /// `default_directive` applies when `RUST_LOG` is unset, and `filters` is a comma separated
    /// list of extra directives. `color` is `None` for layers that never emit ANSI codes.
    pub fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: LevelFilter::INFO.to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// Something that installs itself as the global tracing subscriber.
pub trait Tracer {
    /// Installs the subscriber. Returns a guard when logging to a file, which must be held for as
    /// long as logs should be written.
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>>;
}

/// The deltascope [`Tracer`]. Logs to stdout by default.
#[derive(Debug, Clone, Default)]
pub struct DeltascopeTracer {
    stdout: LayerInfo,
    journald: Option<String>,
    file: Option<(LayerInfo, PathBuf)>,
}

impl DeltascopeTracer {
    /// Creates a tracer that logs to stdout only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stdout layer configuration.
    pub fn with_stdout(mut self, config: LayerInfo) -> Self {
        self.stdout = config;
        self
    }

    /// Enables journald logging with the given filter.
    pub fn with_journald(mut self, filter: String) -> Self {
        self.journald = Some(filter);
        self
    }

    /// Enables logging to a daily rolling file in `directory`.
    pub fn with_file(mut self, config: LayerInfo, directory: PathBuf) -> Self {
        self.file = Some((config, directory));
        self
    }
}

impl Tracer for DeltascopeTracer {
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>> {
        let mut layers = layers::Layers::default();

        layers.stdout(
            self.stdout.format,
            self.stdout.default_directive.parse()?,
            &self.stdout.filters,
            self.stdout.color,
        )?;

        if let Some(filter) = &self.journald {
            layers.journald(filter)?;
        }

        let guard = match self.file {
            Some((config, directory)) => {
                Some(layers.file(config.format, &config.filters, directory)?)
            }
            None => None,
        };

        tracing_subscriber::registry().with(layers.into_inner()).try_init()?;

        Ok(guard)
    }
}

/// Installs a plain stdout subscriber for tests. Safe to call more than once.
pub fn init_test_tracing() {
    let _ = DeltascopeTracer::new()
        .with_stdout(LayerInfo::new(
            LogFormat::Terminal,
            LevelFilter::DEBUG.to_string(),
            String::new(),
            None,
        ))
        .init();
}
