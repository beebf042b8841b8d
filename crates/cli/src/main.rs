pub(crate) mod error;
pub(crate) mod log_args;
pub(crate) mod output;

use clap::{Parser, Subcommand};
use error::Error;
use log_args::LogArgs;
use output::{render_failure, render_summary};
use tracing::info;

use deltascope_cache::{cache, CacheArgs};
use deltascope_common::utils::io::file::{short_path, write_file};
use deltascope_config::{config, ConfigArgs, Configuration};
use deltascope_inspect::{inspect, InspectArgs, TransactionOutcome};

#[derive(Debug, Parser)]
#[clap(name = "deltascope", version)]
pub(crate) struct Arguments {
    #[clap(subcommand)]
    pub(crate) sub: Subcommands,

    #[clap(flatten)]
    logs: LogArgs,
}

#[derive(Debug, Subcommand)]
#[clap(
    about = "deltascope decodes the token transfers, approvals and fees of Ethereum transactions."
)]
pub(crate) enum Subcommands {
    #[clap(name = "inspect", about = "Decode the token movements of one or more transactions")]
    Inspect(InspectArgs),

    #[clap(name = "config", about = "Display and edit the current configuration")]
    Config(ConfigArgs),

    #[clap(name = "cache", about = "Manage deltascope's cached files")]
    Cache(CacheArgs),
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Arguments::parse();

    // setup logging, keeping the file writer alive until exit
    let _guard = args
        .logs
        .init_tracing()
        .map_err(|e| Error::Generic(format!("failed to initialize logging: {}", e)))?;

    match args.sub {
        Subcommands::Inspect(mut cmd) => {
            // fill in whatever the user didn't specify from the configuration
            if cmd.rpc_url.is_empty() || cmd.call_timeout.is_none() {
                apply_configuration(&mut cmd, &Configuration::load()?);
            }

            let watch = cmd.watch.clone();
            let json_path = cmd.json.clone();

            let result = inspect(cmd).await?;

            for outcome in &result.outcomes {
                match outcome {
                    TransactionOutcome::Decoded(summary) => {
                        println!("{}", render_summary(summary, &watch))
                    }
                    TransactionOutcome::Failed(failure) => println!("{}", render_failure(failure)),
                }
            }

            if let Some(path) = json_path {
                let summaries = result.summaries().collect::<Vec<_>>();
                write_file(&path, &serde_json::to_string_pretty(&summaries)?)
                    .map_err(|e| Error::Generic(format!("failed to write JSON: {}", e)))?;

                info!("wrote {} transactions to '{}'", summaries.len(), path);
                println!("\nJSON saved to: {}", short_path(&path));
            }
        }

        Subcommands::Config(cmd) => {
            config(cmd)?;
        }

        Subcommands::Cache(cmd) => {
            cache(cmd)?;
        }
    }

    Ok(())
}

/// Use the configured rpc url and call timeout where `cmd` leaves them unset.
fn apply_configuration(cmd: &mut InspectArgs, configuration: &Configuration) {
    if cmd.rpc_url.is_empty() {
        cmd.rpc_url = configuration.rpc_url.clone();
    }

    if cmd.call_timeout.is_none() {
        cmd.call_timeout = Some(configuration.call_timeout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deltascope_inspect::InspectArgsBuilder;

    fn configuration() -> Configuration {
        Configuration { rpc_url: "http://localhost:8545".to_string(), call_timeout: 12 }
    }

    #[test]
    fn test_apply_configuration_fills_unset_args() {
        let mut cmd = InspectArgsBuilder::new().build().expect("failed to build args");
        apply_configuration(&mut cmd, &configuration());

        assert_eq!(cmd.rpc_url, "http://localhost:8545");
        assert_eq!(cmd.call_timeout, Some(12));
    }

    #[test]
    fn test_apply_configuration_keeps_explicit_args() {
        let mut cmd = InspectArgsBuilder::new()
            .rpc_url("https://eth.llamarpc.com".to_string())
            .call_timeout(Some(3))
            .build()
            .expect("failed to build args");
        apply_configuration(&mut cmd, &configuration());

        assert_eq!(cmd.rpc_url, "https://eth.llamarpc.com");
        assert_eq!(cmd.call_timeout, Some(3));
    }
}
