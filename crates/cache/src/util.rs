use std::path::PathBuf;

use crate::error::Error;

/// Overrides the cache location. Mostly useful for tests and sandboxed environments.
pub(crate) const CACHE_DIR_ENV: &str = "DELTASCOPE_CACHE_DIR";

/// The directory cached objects are stored in, `~/.deltascope/cache` unless overridden by
/// `DELTASCOPE_CACHE_DIR`.
#[allow(deprecated)]
pub(crate) fn cache_dir() -> Result<PathBuf, Error> {
    if let Some(dir) = std::env::var_os(CACHE_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let home = std::env::home_dir().ok_or_else(|| {
        Error::Generic(
            "failed to get home directory. does your os support `std::env::home_dir()`?"
                .to_string(),
        )
    })?;
    Ok(home.join(".deltascope").join("cache"))
}

/// The file a cache key is stored in
pub(crate) fn cache_file(key: &str) -> Result<PathBuf, Error> {
    Ok(cache_dir()?.join(format!("{key}.bin")))
}

/// Current unix timestamp, in seconds
pub(crate) fn now() -> Result<u64, Error> {
    Ok(std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_err(|e| Error::Generic(format!("failed to get current time: {e:?}")))?
        .as_secs())
}

/// Prettify bytes into a human-readable format
pub(crate) fn prettify_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        let kb = bytes / 1024;
        format!("{kb} KB")
    } else if bytes < 1024 * 1024 * 1024 {
        let mb = bytes / (1024 * 1024);
        format!("{mb} MB")
    } else {
        let gb = bytes / (1024 * 1024 * 1024);
        format!("{gb} GB")
    }
}
