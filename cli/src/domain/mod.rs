//! Domain layer — pure types, spec construction, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod cloudinit;
pub mod config;
pub mod error;
pub mod microvm;
pub mod spec;

pub use config::{ClientConfig, GrpcConfig, HammertimeConfig};
pub use error::{BulkDeleteError, ConfigError, ServiceError, SpecError, TransportError};
pub use microvm::{
    CreateOptions, DeleteOptions, DeleteTarget, GetOptions, ListFilter, Target,
};
