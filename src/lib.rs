//! CareerAgent AI inference server.
//!
//! HTTP stub serving the CareerAgent platform's prediction endpoint. The
//! `/predict` route accepts any JSON document and returns a fixed placeholder
//! until a real model is integrated; the remaining routes are operational
//! plumbing (health, readiness, status, Prometheus metrics).
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServerError};
