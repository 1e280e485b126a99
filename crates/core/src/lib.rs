//! Domain logic for the Real Estate Advisor form.
//!
//! Everything in this crate is pure: field parsing and validation, payload
//! normalization, the form reducer, and the results model. HTTP lives in
//! `advisor-client` (outgoing) and `advisor-api` (incoming).

pub mod error;
pub mod form;
pub mod payload;
pub mod results;
pub mod types;
pub mod validation;
