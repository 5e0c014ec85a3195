//! Shared table export primitives.
//!
//! This crate owns configuration parsing, destination prefix derivation and
//! the request/receipt contracts for point-in-time table exports. It
//! excludes AWS SDK and Lambda runtime concerns.

pub mod config;
pub mod contract;
pub mod destination;
