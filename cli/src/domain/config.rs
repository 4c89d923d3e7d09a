//! Domain types and validators for hammertime configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_GRPC_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_GRPC_PORT: u16 = 9090;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.hammertime/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HammertimeConfig {
    /// Connection defaults for the flintlock server.
    #[serde(default)]
    pub grpc: GrpcConfig,
}

/// Connection defaults. Every field can be overridden per invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GrpcConfig {
    /// flintlock server host.
    pub address: String,
    /// flintlock server port.
    pub port: u16,
    /// Upper bound on establishing the connection.
    pub connect_timeout_secs: u64,
    /// Upper bound on each RPC.
    pub request_timeout_secs: u64,
}

impl Default for GrpcConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_GRPC_ADDRESS.to_string(),
            port: DEFAULT_GRPC_PORT,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Connection settings for one command invocation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `host:port` of the flintlock server.
    pub address: String,
    /// Basic auth token; `None` means no authorization header is sent.
    pub auth_token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl GrpcConfig {
    /// Resolve the per-invocation client settings. Flag values win over the
    /// configured defaults; an empty token counts as no token.
    ///
    /// # Errors
    ///
    /// Returns an error if the port is zero or either timeout is zero.
    pub fn client_config(
        &self,
        address: Option<String>,
        port: Option<u16>,
        auth_token: Option<String>,
    ) -> Result<ClientConfig, ConfigError> {
        let host = address
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| self.address.clone());
        let port = port.unwrap_or(self.port);
        if port == 0 {
            return Err(ConfigError::InvalidPort(port));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "connect_timeout_secs",
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "request_timeout_secs",
            });
        }

        Ok(ClientConfig {
            address: format!("{host}:{port}"),
            auth_token: auth_token.filter(|t| !t.is_empty()),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        })
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
