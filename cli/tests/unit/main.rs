//! Unit tests for hammertime CLI
//!
//! These tests run the use-cases against an in-memory flintlock fake and
//! make no network calls.

mod cli_args;
mod client_facade;
mod fakes;
