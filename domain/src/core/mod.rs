//! Core domain concepts shared across all subdomains.
//!
//! - [`rater::RaterName`]: a validated, self-reported rater name
//! - [`score::Score`] / [`score::ScoreScale`]: bounded integer ratings
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod rater;
pub mod score;
