//! A simple on-disk cache for deltascope.
//!
//! Objects are stored in `~/.deltascope/cache` as bincode serialized files, each with an expiry
//! time. Expired objects are deleted the next time they are read.

use clap::Parser;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use error::Error;
use util::*;

pub mod error;
pub(crate) mod util;

/// Objects stored without an explicit expiry live for 90 days
pub const DEFAULT_EXPIRY_SECS: u64 = 60 * 60 * 24 * 90;

/// Clap argument parser for the cache subcommand
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Manage deltascope's cached objects",
    override_usage = "deltascope cache <SUBCOMMAND>"
)]
pub struct CacheArgs {
    /// Cache subcommand
    #[clap(subcommand)]
    pub sub: Subcommands,
}

/// A simple clap subcommand with no arguments
#[derive(Debug, Clone, Parser)]
pub struct NoArguments {}

/// Clap subcommand parser for cache subcommands
#[derive(Debug, Clone, Parser)]
#[clap(about = "Manage deltascope's cached objects")]
pub enum Subcommands {
    /// Clear the cache, removing all objects
    #[clap(name = "clean", about = "Removes all cached objects in ~/.deltascope/cache")]
    Clean(NoArguments),

    /// List all cached objects
    #[clap(name = "ls", about = "Lists all cached objects in ~/.deltascope/cache")]
    Ls(NoArguments),

    /// Print the size of the cache
    #[clap(name = "size", about = "Prints the size of the cache in ~/.deltascope/cache")]
    Size(NoArguments),
}

/// A cached value along with the unix timestamp it expires at
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Cache<T> {
    /// The value stored in the cache
    pub value: T,
    /// The expiry time of the cache object
    pub expiry: u64,
}

/// Clear the cache, removing all objects
pub fn clear_cache() -> Result<(), Error> {
    let dir = cache_dir()?;
    if !dir.exists() {
        return Ok(());
    }

    for entry in dir.read_dir()? {
        let path = entry?.path();
        if path.is_dir() {
            std::fs::remove_dir_all(path)?;
        } else {
            std::fs::remove_file(path)?;
        }
    }

    Ok(())
}

/// Check if a cached object exists
pub fn exists(key: &str) -> Result<bool, Error> {
    Ok(cache_file(key)?.exists())
}

/// List all cached keys containing `pattern`, sorted alphabetically. Wildcards are ignored, so
/// `*` lists everything.
pub fn keys(pattern: &str) -> Result<Vec<String>, Error> {
    let dir = cache_dir()?;
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let pattern = pattern.replace('*', "");
    let mut keys = Vec::new();

    for entry in dir.read_dir()? {
        let path = entry?.path();
        let Some(key) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(".bin"))
        else {
            continue;
        };

        if pattern.is_empty() || key.contains(&pattern) {
            keys.push(key.to_string());
        }
    }

    keys.sort();

    Ok(keys)
}

/// Delete a cached object
pub fn delete_cache(key: &str) -> Result<(), Error> {
    let file = cache_file(key)?;

    if file.exists() {
        std::fs::remove_file(file)?;
    }

    Ok(())
}

/// Read a cached object. Returns `Ok(None)` if the key is missing or has expired.
pub fn read_cache<T>(key: &str) -> Result<Option<T>, Error>
where
    T: 'static + DeserializeOwned, {
    let bytes = match std::fs::read(cache_file(key)?) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let cache: Cache<T> = bincode::deserialize(&bytes)?;

    if cache.expiry < now()? {
        delete_cache(key)?;
        return Ok(None);
    }

    Ok(Some(cache.value))
}

/// Store a value in the cache with an optional unix expiry timestamp. Objects stored without one
/// expire after [`DEFAULT_EXPIRY_SECS`].
pub fn store_cache<T>(key: &str, value: T, expiry: Option<u64>) -> Result<(), Error>
where
    T: Serialize, {
    let file = cache_file(key)?;
    let expiry = match expiry {
        Some(expiry) => expiry,
        None => now()? + DEFAULT_EXPIRY_SECS,
    };

    let encoded = bincode::serialize(&Cache { value, expiry })?;

    if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file, encoded)?;

    Ok(())
}

/// Returns the cached value for `key` if there is one, otherwise awaits `func` and caches its
/// result.
///
/// The cache never fails a lookup on its own: unreadable entries are treated as misses and
/// failures to store are logged and ignored.
pub async fn with_cache<T, F, Fut>(key: &str, func: F) -> eyre::Result<T>
where
    T: 'static + Serialize + DeserializeOwned + Send + Sync,
    F: FnOnce() -> Fut + Send,
    Fut: std::future::Future<Output = Result<T, eyre::Report>> + Send, {
    match read_cache::<T>(key) {
        Ok(Some(cached_value)) => {
            tracing::debug!("cache hit for key: '{}'", key);
            return Ok(cached_value);
        }
        Ok(None) => tracing::debug!("cache miss for key: '{}'", key),
        Err(e) => tracing::debug!("unreadable cache entry for key '{}': {}", key, e),
    }

    let value = func().await?;

    if let Err(e) = store_cache(key, &value, None) {
        tracing::warn!("failed to cache value for key '{}': {}", key, e);
    }

    Ok(value)
}

/// Cache subcommand handler
pub fn cache(args: CacheArgs) -> Result<(), Error> {
    match args.sub {
        Subcommands::Clean(_) => {
            clear_cache()?;
            println!("Cache cleared.")
        }
        Subcommands::Ls(_) => {
            let keys = keys("*")?;
            println!("Displaying {} cached objects:", keys.len());

            for (i, key) in keys.iter().enumerate() {
                println!("{i:>5} : {key}");
            }
        }
        Subcommands::Size(_) => {
            let dir = cache_dir()?;
            let mut size = 0;

            if dir.exists() {
                for entry in dir.read_dir()? {
                    size += entry?.metadata()?.len();
                }
            }

            println!("Cached objects: {}", keys("*")?.len());
            println!("Cache size: {}", prettify_bytes(size));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn use_temp_cache(name: &str) {
        let dir = std::env::temp_dir().join(format!("deltascope_cache_test_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::env::set_var(util::CACHE_DIR_ENV, dir);
    }

    #[test]
    #[serial]
    fn test_store_and_read_cache() {
        use_temp_cache("store_and_read");

        store_cache("key", "value".to_string(), None).expect("failed to store");
        assert!(exists("key").expect("failed to check key"));

        let value: String = read_cache("key").expect("failed to read").expect("missing value");
        assert_eq!(value, "value");
    }

    #[test]
    #[serial]
    fn test_store_struct() {
        use_temp_cache("store_struct");

        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Receipt {
            hash: String,
            gas_used: u64,
        }

        let receipt = Receipt { hash: "0xabc".to_string(), gas_used: 21000 };
        store_cache("receipt", &receipt, None).expect("failed to store");

        let value: Receipt = read_cache("receipt").expect("failed to read").expect("missing");
        assert_eq!(value, receipt);
    }

    #[test]
    #[serial]
    fn test_expired_entry_is_deleted() {
        use_temp_cache("expired");

        store_cache("stale", 1u64, Some(1)).expect("failed to store");
        assert!(read_cache::<u64>("stale").expect("failed to read").is_none());
        assert!(!exists("stale").expect("failed to check key"));
    }

    #[test]
    #[serial]
    fn test_missing_key_reads_none() {
        use_temp_cache("missing");
        assert!(read_cache::<String>("nothing_here").expect("failed to read").is_none());
    }

    #[test]
    #[serial]
    fn test_keys_and_clear() {
        use_temp_cache("keys");

        store_cache("some_key", "v", None).expect("failed to store");
        store_cache("some_other_key", "v", None).expect("failed to store");
        store_cache("not_a_key", "v", None).expect("failed to store");

        assert_eq!(keys("some_").expect("failed to get keys"), vec!["some_key", "some_other_key"]);
        assert_eq!(keys("*").expect("failed to get keys").len(), 3);

        clear_cache().expect("failed to clear");
        assert!(keys("*").expect("failed to get keys").is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn test_with_cache_only_computes_once() {
        use_temp_cache("with_cache");

        let first = with_cache("answer", || async { Ok(42u64) }).await.expect("failed");
        let second: u64 = with_cache("answer", || async { Err(eyre::eyre!("should be cached")) })
            .await
            .expect("failed");

        assert_eq!(first, 42);
        assert_eq!(second, 42);
    }

    #[tokio::test]
    #[serial]
    async fn test_with_cache_propagates_errors() {
        use_temp_cache("with_cache_error");

        let result: eyre::Result<u64> =
            with_cache("broken", || async { Err(eyre::eyre!("rpc down")) }).await;
        assert!(result.is_err());
        assert!(!exists("broken").expect("failed to check key"));
    }
}
