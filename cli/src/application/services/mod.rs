//! Application services — use-case orchestration.
//!
//! Services import only from `crate::domain` and `crate::application::ports`,
//! never from `crate::infra`, `crate::commands`, or `crate::output`.

pub mod client;
pub mod microvm;
pub mod spec_builder;
