use clap::Parser;
use deltascope_common::constants::ADDRESS_REGEX;
use deltascope_config::parse_url_arg;
use derive_builder::Builder;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Decode the token transfers, approvals and fees of one or more transactions",
    override_usage = "deltascope inspect <TX>... [OPTIONS]"
)]
/// Arguments for the inspect operation
pub struct InspectArgs {
    /// The transaction hashes to inspect.
    #[clap(required = true, num_args = 1.., value_name = "TX")]
    pub targets: Vec<String>,

    /// The RPC provider to use for fetching transactions and token metadata.
    /// This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// Write the decoded transactions to this file as a JSON array.
    #[clap(long, value_name = "PATH")]
    pub json: Option<String>,

    /// Addresses to highlight when they send or receive tokens.
    #[clap(long, short, num_args = 1.., value_name = "ADDRESS", value_parser = parse_watch_address)]
    pub watch: Vec<String>,

    /// Seconds to wait on each token metadata call. Defaults to 30 seconds.
    #[clap(long = "call-timeout", value_name = "SECONDS")]
    pub call_timeout: Option<u64>,
}

impl InspectArgsBuilder {
    /// Creates a new InspectArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            targets: Some(Vec::new()),
            rpc_url: Some(String::new()),
            json: Some(None),
            watch: Some(Vec::new()),
            call_timeout: Some(None),
        }
    }
}

/// Accept a 20-byte hex address, with or without the `0x` prefix.
fn parse_watch_address(address: &str) -> Result<String, String> {
    match ADDRESS_REGEX.is_match(address) {
        Ok(true) if address.starts_with("0x") => Ok(address.to_string()),
        Ok(true) => Ok(format!("0x{address}")),
        _ => Err(format!("'{address}' is not a valid address")),
    }
}
