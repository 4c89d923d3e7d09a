//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: the gRPC dialer and stub,
//! credentials, filesystem access, and the config file.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod auth;
pub mod config;
pub mod dialer;
pub mod fs;
pub mod grpc;
