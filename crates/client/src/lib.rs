//! `advisor-client` library crate.
//!
//! HTTP client for the external evaluation backend.

pub mod submission;
