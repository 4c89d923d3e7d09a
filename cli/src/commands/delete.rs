//! `hammertime delete` — delete one microvm, or many with `--all`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::application::ports::{ClientFactory, LocalFs};
use crate::application::services::microvm::{self, DeleteOutcome};
use crate::commands::{ConnectionArgs, ServerArgs};
use crate::domain::ClientConfig;
use crate::domain::microvm::DeleteOptions;
use crate::output::json;

/// Arguments for the delete command.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Uid of the microvm
    #[arg(short, long)]
    pub id: Option<String>,

    /// JSON spec holding the uid; wins over --id
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// With --all, only microvms with this name (requires --namespace)
    #[arg(short, long)]
    pub name: Option<String>,

    /// With --all, only microvms in this namespace
    #[arg(long, visible_alias = "ns")]
    pub namespace: Option<String>,

    /// Delete every microvm matching --name/--namespace
    #[arg(short, long)]
    pub all: bool,

    /// flintlock server address (`-a` is `--all` here)
    #[arg(long)]
    pub grpc_address: Option<String>,

    #[command(flatten)]
    pub server: ServerArgs,
}

impl DeleteArgs {
    /// Connection flags given after `delete`.
    #[must_use]
    pub fn connection(&self) -> ConnectionArgs {
        ConnectionArgs {
            grpc_address: self.grpc_address.clone(),
            server: self.server.clone(),
        }
    }
}

impl From<DeleteArgs> for DeleteOptions {
    fn from(args: DeleteArgs) -> Self {
        Self {
            id: args.id,
            file: args.file,
            name: args.name,
            namespace: args.namespace,
            all: args.all,
        }
    }
}

/// Run `hammertime delete`.
///
/// A single delete prints the empty response; a bulk delete prints nothing.
///
/// # Errors
///
/// Returns an error if the flags are inconsistent, the uid cannot be
/// resolved, or any deletion fails.
pub async fn run(
    args: DeleteArgs,
    factory: &impl ClientFactory,
    fs: &impl LocalFs,
    config: &ClientConfig,
) -> Result<()> {
    match microvm::delete(factory, fs, config, &args.into()).await? {
        DeleteOutcome::Single { .. } => json::print_json(&serde_json::json!({})),
        DeleteOutcome::Bulk { deleted } => {
            tracing::debug!(count = deleted.len(), "bulk delete complete");
            Ok(())
        }
    }
}
