//! `hammertime create` — create a microvm.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::application::ports::{ClientFactory, LocalFs};
use crate::application::services::microvm;
use crate::commands::ConnectionArgs;
use crate::domain::ClientConfig;
use crate::domain::microvm::CreateOptions;
use crate::domain::spec::{DEFAULT_MICROVM_NAME, DEFAULT_MICROVM_NAMESPACE};
use crate::output::json;

/// Arguments for the create command.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the microvm
    #[arg(short, long, default_value = DEFAULT_MICROVM_NAME)]
    pub name: String,

    /// Namespace of the microvm
    #[arg(long, visible_alias = "ns", default_value = DEFAULT_MICROVM_NAMESPACE)]
    pub namespace: String,

    /// JSON spec to create from; name, namespace and key are ignored
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Public key to authorize for the root user
    #[arg(short = 'k', long)]
    pub public_key_path: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl From<CreateArgs> for CreateOptions {
    fn from(args: CreateArgs) -> Self {
        Self {
            name: args.name,
            namespace: args.namespace,
            file: args.file,
            public_key_path: args.public_key_path,
        }
    }
}

/// Run `hammertime create` and print the created microvm.
///
/// # Errors
///
/// Returns an error if the spec cannot be built or the service call fails.
pub async fn run(
    args: CreateArgs,
    factory: &impl ClientFactory,
    fs: &impl LocalFs,
    config: &ClientConfig,
) -> Result<()> {
    let created = microvm::create(factory, fs, config, &args.into()).await?;
    json::print_json(&created)
}
