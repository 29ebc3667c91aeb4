//! Review service for identity-verification (KYC) submissions.
//!
//! The library is organized around three cooperating parts: pure verdict
//! derivation over the backend's moderation payload, the reviewer-facing
//! session state machine, and the guarded status-update workflow. The HTTP
//! surface in [`review::router`] hands the rendering layer plain data and
//! leaves layout entirely to it.

pub mod config;
pub mod error;
pub mod review;
pub mod telemetry;
