//! `hammertime get` — show one microvm.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::application::ports::{ClientFactory, LocalFs};
use crate::application::services::microvm;
use crate::commands::ConnectionArgs;
use crate::domain::ClientConfig;
use crate::domain::microvm::GetOptions;
use crate::output::{self, json};

/// Arguments for the get command.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Uid of the microvm
    #[arg(short, long)]
    pub id: Option<String>,

    /// JSON spec holding the uid; wins over --id
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print only the state
    #[arg(short, long)]
    pub state: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Run `hammertime get`.
///
/// # Errors
///
/// Returns an error if no uid can be resolved or the service call fails.
pub async fn run(
    args: GetArgs,
    factory: &impl ClientFactory,
    fs: &impl LocalFs,
    config: &ClientConfig,
) -> Result<()> {
    let opts = GetOptions {
        id: args.id,
        file: args.file,
    };
    let found = microvm::get(factory, fs, config, &opts).await?;
    if args.state {
        output::print_state(&found);
        Ok(())
    } else {
        json::print_json(&found)
    }
}
