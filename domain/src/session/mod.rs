//! Evaluation session domain.
//!
//! A session walks one rater through
//! `Identify → SelectSubject → Rate → BlindCompare → Done`, looping from
//! `Done` back to `SelectSubject` while more subject sets remain.
//!
//! - [`state::SessionState`]: owned, in-memory workflow instance (never persisted)
//! - [`variant::WorkflowVariant`]: which front-end flavour the session runs
//! - [`blind::BlindPresentation`]: randomized left/right mapping for a pair
//! - [`warning::WorkflowWarning`]: recoverable rejections of an action

pub mod blind;
pub mod phase;
pub mod selection;
pub mod state;
pub mod variant;
pub mod warning;
