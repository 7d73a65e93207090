//! Domain layer for ttseval
//!
//! This crate contains the rating workflow, its entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Catalog
//!
//! A read-only snapshot of every audio rendering (a [`Subject`]) that may be
//! rated, grouped by model and optionally by version.
//!
//! ## Session
//!
//! One rater's walk through `Identify → SelectSubject → Rate → BlindCompare → Done`:
//!
//! - **Single**: absolute 0-100 scores for one model
//! - **Paired / Blind**: two models on the same utterances, optionally followed
//!   by a blind A/B preference whose agreement with the scores is recorded
//! - **Calibration**: 0-10 scores on reference samples, checked against
//!   known expected scores

pub mod catalog;
pub mod core;
pub mod rating;
pub mod session;

// Re-export commonly used types
pub use catalog::{
    asset::AssetResolver,
    catalog::Catalog,
    pairs::{ModelPair, PairGenerator, SubjectPair},
    subject::Subject,
};
pub use core::{
    error::DomainError,
    rater::RaterName,
    score::{Score, ScoreScale},
};
pub use rating::{
    CalibrationPolicy, CalibrationReport, Preference, RatingRecord, RecordKey,
    criteria::{CriteriaBand, legend},
    evaluate_consistency,
};
pub use session::{
    blind::{BlindPresentation, Side, VisibleChoice},
    phase::Phase,
    selection::Selection,
    state::SessionState,
    variant::WorkflowVariant,
    warning::WorkflowWarning,
};
