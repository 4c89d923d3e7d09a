//! Command implementations

use clap::Args;

pub mod create;
pub mod delete;
pub mod get;
pub mod list;

/// Connection flags given after the subcommand. They take precedence over the
/// same flags given before it.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct ConnectionArgs {
    /// flintlock server address
    #[arg(short = 'a', long)]
    pub grpc_address: Option<String>,

    #[command(flatten)]
    pub server: ServerArgs,
}

/// Port and token flags, shared by every subcommand.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct ServerArgs {
    /// flintlock server port
    #[arg(short = 'p', long)]
    pub grpc_port: Option<u16>,

    /// Token for basic authentication
    #[arg(short = 't', long)]
    pub basic_auth_token: Option<String>,
}
