//! AWS-oriented adapters and handlers for point-in-time table exports.
//!
//! This crate owns runtime integration details (the Lambda handler and the
//! DynamoDB-facing adapter seams). Prefix derivation and configuration live in
//! `export_core`.

pub mod adapters;
pub mod handlers;
