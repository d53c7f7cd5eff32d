//! Shared building blocks for the ScrapBee native backend.
//!
//! Every error enum in the workspace carries an [`ErrorLocation`] so a log
//! line points at the call site that produced the failure, not just at the
//! place it was finally reported.

pub mod error;

pub use error::error_location::ErrorLocation;
