use crate::layers::BoxedLayer;
use clap::ValueEnum;
use std::{fmt, fmt::Display};
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// The output format of a log layer.
#[derive(Debug, Copy, Clone, ValueEnum, Eq, PartialEq)]
#[clap(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    Json,

    /// `key=value` pairs, see <https://brandur.org/logfmt>.
    LogFmt,

    /// Human readable output, optionally colored.
    Terminal,
}

impl LogFormat {
    /// Build a layer in this format, filtered by `filter`.
    ///
    /// `color` is one of `always`, `auto` or `never`, and `RUST_LOG_STYLE` takes precedence over
    /// it. Events are written to `file_writer` when one is given, stdout otherwise.
    pub fn apply(
        &self,
        filter: EnvFilter,
        color: Option<String>,
        file_writer: Option<NonBlocking>,
    ) -> BoxedLayer<Registry> {
        let ansi = match color {
            Some(color) => std::env::var("RUST_LOG_STYLE")
                .map(|style| style != "never")
                .unwrap_or(color != "never"),
            None => false,
        };
        let target = std::env::var("RUST_LOG_TARGET").map(|val| val != "0").unwrap_or(true);

        match self {
            LogFormat::Json => {
                let layer =
                    tracing_subscriber::fmt::layer().json().with_ansi(ansi).with_target(target);

                match file_writer {
                    Some(writer) => layer.with_writer(writer).with_filter(filter).boxed(),
                    None => layer.with_filter(filter).boxed(),
                }
            }
            LogFormat::LogFmt => tracing_logfmt::layer().with_filter(filter).boxed(),
            LogFormat::Terminal => {
                let layer = tracing_subscriber::fmt::layer().with_ansi(ansi).with_target(target);

                match file_writer {
                    Some(writer) => layer.with_writer(writer).with_filter(filter).boxed(),
                    None => layer.with_filter(filter).boxed(),
                }
            }
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::LogFmt => write!(f, "logfmt"),
            LogFormat::Terminal => write!(f, "terminal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_value_names() {
        for format in [LogFormat::Json, LogFormat::LogFmt, LogFormat::Terminal] {
            let parsed = LogFormat::from_str(&format.to_string(), false)
                .expect("display output should parse back");
            assert_eq!(parsed, format);
        }
    }
}
