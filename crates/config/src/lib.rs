//! Configuration management for deltascope
//!
//! The configuration lives in `~/.deltascope/config.toml` and is created with default values the
//! first time it is loaded. When MESC is enabled, its default endpoint overrides `rpc_url`.

/// Error types for the configuration module
pub mod error;

use std::path::PathBuf;

use crate::error::Error;
use clap::Parser;
use deltascope_common::utils::io::file::{delete_path, read_file, write_file};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Overrides the location of the configuration file.
pub const CONFIG_PATH_ENV: &str = "DELTASCOPE_CONFIG";

/// Command line arguments for the configuration command
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Display and edit the current configuration",
    override_usage = "deltascope config [KEY] [VALUE]"
)]
pub struct ConfigArgs {
    /// The target key to update.
    #[clap(required = false, default_value = "")]
    key: String,

    /// The value to set the key to.
    #[clap(required = false, default_value = "")]
    value: String,
}

/// The [`Configuration`] of the CLI. Missing keys fall back to their defaults, so older config
/// files keep loading as keys are added.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    /// The URL for the Ethereum RPC endpoint
    pub rpc_url: String,

    /// Seconds to wait on a single token metadata call before giving up
    pub call_timeout: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration { rpc_url: "https://cloudflare-eth.com".to_string(), call_timeout: 30 }
    }
}

#[allow(deprecated)]
fn config_path() -> Result<PathBuf, Error> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let home = std::env::home_dir().ok_or_else(|| {
        Error::Generic(
            "failed to get home directory. does your os support `std::env::home_dir()`?"
                .to_string(),
        )
    })?;
    Ok(home.join(".deltascope").join("config.toml"))
}

fn path_str(path: &std::path::Path) -> Result<&str, Error> {
    path.to_str().ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))
}

impl Configuration {
    /// Returns the current configuration, writing the defaults to disk if no file exists yet.
    pub fn load() -> Result<Self, Error> {
        let path = config_path()?;

        if !path.exists() {
            Configuration::default().save()?;
        }

        let contents = read_file(path_str(&path)?)
            .map_err(|e| Error::Generic(format!("failed to read config file: {e}")))?;

        let mut config: Configuration = toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))?;

        if !mesc::is_mesc_enabled() {
            return Ok(config);
        }

        if let Some(endpoint) = mesc::get_default_endpoint(Some("deltascope"))? {
            debug!("overriding rpc_url with mesc endpoint");
            config.rpc_url = endpoint.url;
        }

        Ok(config)
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> Result<(), Error> {
        let path = config_path()?;

        write_file(
            path_str(&path)?,
            &toml::to_string(&self)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?,
        )
        .map_err(|e| Error::Generic(format!("failed to write config file: {e}")))?;

        Ok(())
    }

    /// Deletes the configuration file.
    pub fn delete() -> Result<(), Error> {
        let path = config_path()?;

        if !delete_path(path_str(&path)?) {
            return Err(Error::Generic("failed to delete config file".to_string()));
        }

        Ok(())
    }

    /// Update a single key/value pair in the configuration and persist it.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "rpc_url" => {
                self.rpc_url = value.to_string();
            }
            "call_timeout" => {
                self.call_timeout = value.parse::<u64>().map_err(|_| {
                    Error::InvalidKey(format!(
                        "'call_timeout' must be a whole number of seconds, got '{value}'"
                    ))
                })?;
            }
            _ => {
                return Err(Error::InvalidKey(format!(
                    "'{key}' is not a valid configuration key."
                )))
            }
        }

        self.save()?;

        Ok(())
    }
}

/// The `config` command is used to display and edit the current configuration.
pub fn config(args: ConfigArgs) -> Result<(), Error> {
    if !args.key.is_empty() {
        if !args.value.is_empty() {
            let mut config = Configuration::load()?;
            config.update(&args.key, &args.value)?;
            info!("updated configuration! Set '{}' = '{}' .", &args.key, &args.value);
        } else {
            error!("found key but no value to set. Please specify a value to set, use `deltascope config --help` for more information.");
        }
    } else {
        println!("{:#?}", Configuration::load()?);
        info!("use `deltascope config <KEY> <VALUE>` to set a key/value pair.");
    }

    Ok(())
}

/// Parse user input --rpc-url into a full url, resolving MESC endpoint names and aliases
pub fn parse_url_arg(url: &str) -> Result<String, String> {
    if mesc::is_mesc_enabled() {
        if let Ok(Some(endpoint)) = mesc::get_endpoint_by_query(url, Some("deltascope")) {
            return Ok(endpoint.url);
        }
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn use_temp_config(name: &str) {
        let path = std::env::temp_dir().join(format!("deltascope_config_test_{name}.toml"));
        let _ = std::fs::remove_file(&path);
        std::env::set_var(CONFIG_PATH_ENV, path);
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.rpc_url, "https://cloudflare-eth.com");
        assert_eq!(config.call_timeout, 30);
    }

    #[test]
    #[serial]
    fn test_load_creates_default_file() {
        use_temp_config("load");

        let config = Configuration::load().expect("failed to load config file");
        assert_eq!(config.call_timeout, 30);
        assert!(config_path().expect("no config path").exists());
    }

    #[test]
    #[serial]
    fn test_update_persists() {
        use_temp_config("update");

        let mut config = Configuration::load().expect("failed to load config file");
        config.update("rpc_url", "http://localhost:8545").expect("failed to update rpc_url");
        config.update("call_timeout", "5").expect("failed to update call_timeout");

        let loaded = Configuration::load().expect("failed to load config file");
        assert_eq!(loaded.call_timeout, 5);
        if !mesc::is_mesc_enabled() {
            assert_eq!(loaded.rpc_url, "http://localhost:8545");
        }
    }

    #[test]
    #[serial]
    fn test_update_rejects_bad_values() {
        use_temp_config("invalid");

        let mut config = Configuration::load().expect("failed to load config file");
        assert!(matches!(config.update("etherscan_api_key", "x"), Err(Error::InvalidKey(_))));
        assert!(matches!(config.update("call_timeout", "soon"), Err(Error::InvalidKey(_))));
        assert_eq!(config.call_timeout, 30);
    }

    #[test]
    #[serial]
    fn test_partial_file_uses_defaults() {
        use_temp_config("partial");

        let path = config_path().expect("no config path");
        write_file(path_str(&path).expect("bad path"), "call_timeout = 12\n")
            .expect("failed to write config");

        let config = Configuration::load().expect("failed to load config file");
        assert_eq!(config.call_timeout, 12);
        if !mesc::is_mesc_enabled() {
            assert_eq!(config.rpc_url, "https://cloudflare-eth.com");
        }
    }

    #[test]
    #[serial]
    fn test_delete_configuration() {
        use_temp_config("delete");

        let mut config = Configuration::load().expect("failed to load config file");
        config.update("call_timeout", "99").expect("failed to update");

        Configuration::delete().expect("failed to delete config file");
        let config = Configuration::load().expect("failed to load config file");
        assert_eq!(config.call_timeout, 30);
    }

    #[test]
    fn test_parse_url_arg_passthrough() {
        if mesc::is_mesc_enabled() {
            return;
        }
        assert_eq!(
            parse_url_arg("https://eth.llamarpc.com").expect("failed to parse"),
            "https://eth.llamarpc.com"
        );
    }
}
