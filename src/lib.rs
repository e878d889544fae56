//! Agnostic payment platform.
//!
//! Payments are processed by delegating to third-party providers described
//! declaratively (base URL, auth header, per-action endpoint templates)
//! instead of provider-specific code. Each payment's lifecycle is recorded
//! as an append-only event stream replayable into read projections, next to
//! a materialized current-state record.

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod eventstore;
pub mod integrations;
pub mod payments;

pub use error::{AppResult, Error};
