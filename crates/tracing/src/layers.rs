use std::path::PathBuf;

use tracing_subscriber::{filter::Directive, EnvFilter, Layer, Registry};

use crate::{formatter::LogFormat, FileWorkerGuard};

/// A boxed tracing [Layer].
pub(crate) type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Name of the rolling log file written by the file layer.
const LOG_FILE_NAME: &str = "deltascope.log";

/// Directives applied to every layer, silencing transport internals that are noisy at debug and
/// trace levels.
const DEFAULT_ENV_FILTER_DIRECTIVES: [&str; 2] = ["hyper=off", "hyper_util=off"];

/// The layers making up the global subscriber.
#[derive(Default)]
pub(crate) struct Layers {
    inner: Vec<BoxedLayer<Registry>>,
}

impl Layers {
    pub(crate) fn into_inner(self) -> Vec<BoxedLayer<Registry>> {
        self.inner
    }

    pub(crate) fn stdout(
        &mut self,
        format: LogFormat,
        default_directive: Directive,
        filters: &str,
        color: Option<String>,
    ) -> eyre::Result<()> {
        let filter = build_env_filter(Some(default_directive), filters)?;
        self.inner.push(format.apply(filter, color, None));
        Ok(())
    }

    pub(crate) fn journald(&mut self, filter: &str) -> eyre::Result<()> {
        let layer = tracing_journald::layer()?.with_filter(build_env_filter(None, filter)?).boxed();
        self.inner.push(layer);
        Ok(())
    }

    /// Adds a layer writing to a daily rolling file in `directory`. The returned guard must be
    /// held until shutdown so buffered events get flushed.
    pub(crate) fn file(
        &mut self,
        format: LogFormat,
        filter: &str,
        directory: PathBuf,
    ) -> eyre::Result<FileWorkerGuard> {
        std::fs::create_dir_all(&directory)?;
        let appender = tracing_appender::rolling::daily(directory, LOG_FILE_NAME);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let layer = format.apply(build_env_filter(None, filter)?, None, Some(writer));
        self.inner.push(layer);
        Ok(guard)
    }
}

/// Builds an [EnvFilter] from `RUST_LOG`, the default noise directives and a comma separated list
/// of extra `directives`.
pub(crate) fn build_env_filter(
    default_directive: Option<Directive>,
    directives: &str,
) -> eyre::Result<EnvFilter> {
    let env_filter = match default_directive {
        Some(directive) => EnvFilter::builder().with_default_directive(directive).from_env_lossy(),
        None => EnvFilter::builder().from_env_lossy(),
    };

    DEFAULT_ENV_FILTER_DIRECTIVES
        .into_iter()
        .chain(directives.split(',').map(str::trim).filter(|d| !d.is_empty()))
        .try_fold(env_filter, |env_filter, directive| {
            Ok(env_filter.add_directive(directive.parse()?))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_build_env_filter_accepts_directives() {
        let filter = build_env_filter(Some(Level::INFO.into()), "deltascope_inspect=debug,warn");
        assert!(filter.is_ok());
    }

    #[test]
    fn test_build_env_filter_empty() {
        assert!(build_env_filter(None, "").is_ok());
    }

    #[test]
    fn test_build_env_filter_rejects_garbage() {
        assert!(build_env_filter(None, "deltascope=loud").is_err());
    }
}
