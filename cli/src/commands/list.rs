//! `hammertime list` — list microvms.

use anyhow::Result;
use clap::Args;

use crate::application::ports::ClientFactory;
use crate::application::services::microvm;
use crate::commands::ConnectionArgs;
use crate::domain::ClientConfig;
use crate::domain::microvm::ListFilter;
use crate::output::json;

/// Arguments for the list command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only microvms with this name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Only microvms in this namespace
    #[arg(long, visible_alias = "ns")]
    pub namespace: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Run `hammertime list` and print the matching microvms.
///
/// # Errors
///
/// Returns an error if the service call fails.
pub async fn run(args: ListArgs, factory: &impl ClientFactory, config: &ClientConfig) -> Result<()> {
    let filter = ListFilter::new(args.name, args.namespace);
    let microvms = microvm::list(factory, config, &filter).await?;
    json::print_json(&microvms)
}
