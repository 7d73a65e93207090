//! Run Session use case.
//!
//! Drives one rater's [`SessionState`] through the
//! [`WorkflowController`], executing the effects each transition asks for.
//!
//! A step is all-or-nothing: the caller's state is replaced only when every
//! effect succeeded. A failed write leaves the rater exactly where they were,
//! so the same action can simply be retried.

use crate::ports::result_store::{ResultStore, StoreError};
use crate::use_cases::workflow_controller::{Action, Effect, WorkflowController};
use chrono::SecondsFormat;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use ttseval_domain::{CalibrationReport, RaterName, SessionState, WorkflowWarning};

/// Errors that can occur while running a session step
#[derive(Error, Debug)]
pub enum RunSessionError {
    #[error("Result store error: {0}")]
    Store(#[from] StoreError),
}

/// Outcome of one dispatched action
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Why the action was rejected, if it was
    pub warning: Option<WorkflowWarning>,
    /// Number of records written
    pub persisted: usize,
    /// Number of saved records loaded for pre-fill
    pub loaded: usize,
}

/// Use case for running an evaluation session against a result store
#[derive(Clone)]
pub struct RunSessionUseCase {
    controller: WorkflowController,
    store: Arc<dyn ResultStore>,
}

impl RunSessionUseCase {
    pub fn new(controller: WorkflowController, store: Arc<dyn ResultStore>) -> Self {
        Self { controller, store }
    }

    pub fn controller(&self) -> &WorkflowController {
        &self.controller
    }

    /// A fresh session waiting for the rater's name
    pub fn start(&self) -> SessionState {
        self.controller.start()
    }

    /// Apply `action` to `state`, committing only if every effect succeeds
    pub fn dispatch(
        &self,
        state: &mut SessionState,
        action: Action,
    ) -> Result<StepReport, RunSessionError> {
        let transition = self.controller.handle(state.clone(), action);
        let mut next = transition.state;
        let mut report = StepReport {
            warning: transition.warning,
            ..StepReport::default()
        };

        if let Some(warning) = &report.warning {
            debug!("Action rejected: {}", warning);
        }

        for effect in transition.effects {
            match effect {
                Effect::LoadPrior(rater) => {
                    let records = self.store.load_for_rater(rater.as_str())?;
                    info!("Loaded {} saved records for {}", records.len(), rater);
                    report.loaded = records.len();
                    next.remember_saved(records);
                }
                Effect::Persist(records) => {
                    let timestamp =
                        chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
                    let stamped: Vec<_> = records
                        .into_iter()
                        .map(|r| r.with_timestamp(timestamp.as_str()))
                        .collect();

                    if let Err(e) = self.store.upsert_batch(&stamped) {
                        warn!("Failed to persist {} records: {}", stamped.len(), e);
                        return Err(e.into());
                    }
                    debug!("Persisted {} records", stamped.len());
                    report.persisted += stamped.len();
                    for record in stamped {
                        next.record_draft(record);
                    }
                }
            }
        }

        *state = next;
        Ok(report)
    }

    /// Accuracy of `rater` on every reference sample they have rated
    pub fn calibration_report(
        &self,
        rater: &RaterName,
    ) -> Result<Option<CalibrationReport>, RunSessionError> {
        let records = self.store.load_for_rater(rater.as_str())?;
        Ok(CalibrationReport::from_records(
            &records,
            &self.controller.config().calibration,
        ))
    }
}
