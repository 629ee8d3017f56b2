//! Integration test crate for the honeypot token engine.
//!
//! This crate exists solely to run scenario and property tests against the
//! public surface of `pixiu-token`. It has no public API - all functionality
//! is in the test modules.

#![forbid(unsafe_code)]
