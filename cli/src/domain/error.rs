//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

// ── Configuration errors ──────────────────────────────────────────────────────

/// Invalid or ambiguous flag combinations. Always raised before any
/// connection is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required: --all")]
    FilterWithoutAll,

    #[error("required: --namespace")]
    NameWithoutNamespace,

    #[error("--all cannot be combined with --id or --file")]
    ConflictingTargets,

    #[error("required: --id or --file")]
    MissingTarget,

    #[error("invalid grpc port: {0} (must be 1-65535)")]
    InvalidPort(u16),

    #[error("invalid {field}: must be greater than zero")]
    ZeroTimeout { field: &'static str },
}

// ── Transport errors ──────────────────────────────────────────────────────────

/// Failures establishing the connection to the flintlock server.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid grpc address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid basic auth token: {reason}")]
    InvalidToken { reason: String },

    #[error("failed to connect to {address}: {reason}")]
    Connect { address: String, reason: String },

    #[error("timed out connecting to {address} after {}s", after.as_secs())]
    ConnectTimeout { address: String, after: Duration },
}

// ── Spec errors ───────────────────────────────────────────────────────────────

/// Failures reading or producing a microvm spec.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse spec {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("spec {} does not contain a uid", path.display())]
    MissingUid { path: PathBuf },

    #[error("failed to encode cloud-init document: {0}")]
    Encode(#[from] serde_yaml::Error),
}

// ── Service errors ────────────────────────────────────────────────────────────

/// Failures reported by, or while waiting on, the flintlock service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("microvm {uid} not found: {message}")]
    NotFound { uid: String, message: String },

    #[error("{operation} failed: {message} (code: {code})")]
    Rpc {
        operation: &'static str,
        code: String,
        message: String,
    },

    #[error("{operation} timed out after {}s", after.as_secs())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("{operation} returned no microvm")]
    EmptyResponse { operation: &'static str },

    #[error("service returned a microvm without a uid")]
    MissingUid,
}

// ── Bulk delete errors ────────────────────────────────────────────────────────

/// A bulk delete that stopped part-way. Microvms deleted before the failure
/// stay deleted.
#[derive(Debug, Error)]
#[error(
    "bulk delete stopped after {deleted} of {total} microvms: failed to delete {uid}: {source}"
)]
pub struct BulkDeleteError {
    /// Number of microvms deleted before the failure.
    pub deleted: usize,
    /// Number of microvms matched by the filter.
    pub total: usize,
    /// Uid of the microvm whose deletion failed, or its id when it has no uid.
    pub uid: String,
    pub source: ServiceError,
}
