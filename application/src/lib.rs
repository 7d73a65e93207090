//! Application layer for ttseval
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::EvalConfig;
pub use ports::{
    catalog_source::{CatalogError, CatalogSource},
    result_store::{InMemoryResultStore, ResultStore, StoreError},
    side_picker::{FixedSidePicker, SidePicker},
};
pub use use_cases::run_session::{RunSessionError, RunSessionUseCase, StepReport};
pub use use_cases::workflow_controller::{Action, Effect, Transition, WorkflowController};
