//! Core domain concepts shared across all subdomains.
//!
//! - [`task::Task`] — a validated task or document submitted for analysis
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod task;
