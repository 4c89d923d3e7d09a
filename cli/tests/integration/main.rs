//! Integration tests for hammertime CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! None of them needs a flintlock server: every command either fails before
//! dialing or dials a port nothing listens on.
