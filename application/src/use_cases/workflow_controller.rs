//! Workflow Controller
//!
//! The evaluation state machine. [`WorkflowController::handle`] takes the
//! current [`SessionState`] and a rater [`Action`] and returns a
//! [`Transition`]: the next state, the side effects the boundary must run,
//! and an optional recoverable warning.
//!
//! The controller never touches the store. Effects are values, executed by
//! [`RunSessionUseCase`](super::run_session::RunSessionUseCase), which keeps
//! the old state if any of them fails.

use crate::config::EvalConfig;
use crate::ports::side_picker::SidePicker;
use std::sync::Arc;
use tracing::debug;
use ttseval_domain::{
    AssetResolver, BlindPresentation, Catalog, ModelPair, PairGenerator, Phase, RaterName,
    RatingRecord, Score, Selection, SessionState, Subject, SubjectPair, VisibleChoice,
    WorkflowVariant, WorkflowWarning, evaluate_consistency,
};

/// Something the rater did
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SubmitName(String),
    Confirm(Selection),
    SubmitScore { score: i64, remark: Option<String> },
    SubmitPreference(VisibleChoice),
    GoBack,
    Restart,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SubmitName(_) => "submit name",
            Action::Confirm(_) => "confirm selection",
            Action::SubmitScore { .. } => "submit score",
            Action::SubmitPreference(_) => "submit preference",
            Action::GoBack => "back",
            Action::Restart => "restart",
        }
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Pre-fill the session with the rater's saved records
    LoadPrior(RaterName),
    /// Upsert these records as one write
    Persist(Vec<RatingRecord>),
}

/// Result of handling one action
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
    pub warning: Option<WorkflowWarning>,
}

impl Transition {
    fn to(state: SessionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
            warning: None,
        }
    }

    fn rejected(state: SessionState, warning: WorkflowWarning) -> Self {
        Self {
            state,
            effects: Vec::new(),
            warning: Some(warning),
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn is_rejected(&self) -> bool {
        self.warning.is_some()
    }
}

/// Pure state machine over [`SessionState`]
#[derive(Clone)]
pub struct WorkflowController {
    catalog: Arc<Catalog>,
    assets: Arc<dyn AssetResolver>,
    picker: Arc<dyn SidePicker>,
    config: EvalConfig,
}

impl WorkflowController {
    pub fn new(
        catalog: Arc<Catalog>,
        assets: Arc<dyn AssetResolver>,
        picker: Arc<dyn SidePicker>,
        config: EvalConfig,
    ) -> Self {
        Self {
            catalog,
            assets,
            picker,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn assets(&self) -> &dyn AssetResolver {
        self.assets.as_ref()
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// A fresh session waiting for the rater's name
    pub fn start(&self) -> SessionState {
        SessionState::new(self.config.variant)
    }

    /// Compute the transition for `action` applied to `state`
    pub fn handle(&self, state: SessionState, action: Action) -> Transition {
        debug!("{} during {}", action.name(), state.phase());

        match (state.phase(), action) {
            (Phase::Identify, Action::SubmitName(name)) => self.submit_name(state, &name),
            (Phase::SelectSubject, Action::Confirm(selection)) => self.confirm(state, selection),
            (Phase::Rate, Action::SubmitScore { score, remark }) => {
                self.submit_score(state, score, remark)
            }
            (Phase::BlindCompare, Action::SubmitPreference(choice)) => {
                self.submit_preference(state, choice)
            }
            (Phase::Rate | Phase::BlindCompare, Action::GoBack) => self.go_back(state),
            (Phase::Rate | Phase::BlindCompare | Phase::Done, Action::Restart) => {
                let mut next = state;
                next.restart();
                Transition::to(next)
            }
            (phase, action) => Transition::rejected(
                state,
                WorkflowWarning::UnexpectedAction {
                    action: action.name(),
                    phase,
                },
            ),
        }
    }

    /// Score to show for the current subject before the rater types one
    ///
    /// This traversal's draft wins over the saved record; with neither, the
    /// scale's midpoint is offered.
    pub fn prefill_score(&self, state: &SessionState) -> Option<Score> {
        let subject = state.current_subject()?;
        let known = state
            .rater()
            .and_then(|rater| state.known_score(&subject.key_for(rater)));
        Some(known.unwrap_or_else(|| Score::default_for(state.variant().scale())))
    }

    /// Model pairs this session has not completed yet and that have
    /// at least one item valid on both sides
    pub fn remaining_pairs(&self, state: &SessionState) -> Vec<ModelPair> {
        state
            .remaining_pairs(&self.catalog)
            .into_iter()
            .filter(|pair| {
                !PairGenerator::subjects_for_pair(
                    &self.catalog,
                    &pair.baseline,
                    &pair.experimental,
                    self.assets.as_ref(),
                )
                .is_empty()
            })
            .collect()
    }

    /// The first selection of the variant not completed yet in this session
    ///
    /// Sets without any valid subject are skipped.
    pub fn next_selection(&self, state: &SessionState) -> Option<Selection> {
        let completed = state.completed();
        match state.variant() {
            WorkflowVariant::Single => self
                .catalog
                .models()
                .iter()
                .filter(|model| {
                    !self
                        .catalog
                        .filter_valid_subjects(model, None, self.assets.as_ref())
                        .is_empty()
                })
                .map(|model| Selection::model(model.as_str()))
                .find(|selection| !completed.contains(selection)),
            WorkflowVariant::Paired | WorkflowVariant::Blind => self
                .remaining_pairs(state)
                .into_iter()
                .next()
                .map(Selection::Pair),
            WorkflowVariant::Calibration => {
                let available = !self
                    .catalog
                    .calibration_subjects(self.assets.as_ref())
                    .is_empty();
                (available && !completed.contains(&Selection::Calibration))
                    .then_some(Selection::Calibration)
            }
        }
    }

    // ==================== Transitions ====================

    fn submit_name(&self, state: SessionState, name: &str) -> Transition {
        let Some(rater) = RaterName::try_new(name) else {
            return Transition::rejected(state, WorkflowWarning::InvalidName);
        };

        let mut next = state;
        next.identify(rater.clone());
        Transition::to(next).with_effect(Effect::LoadPrior(rater))
    }

    fn confirm(&self, state: SessionState, selection: Selection) -> Transition {
        let variant = state.variant();
        let (subjects, pairs) = match (&selection, variant) {
            (Selection::Model { model_id, version }, WorkflowVariant::Single) => {
                let subjects = self.catalog.filter_valid_subjects(
                    model_id,
                    version.as_deref(),
                    self.assets.as_ref(),
                );
                (subjects, Vec::new())
            }
            (Selection::Pair(pair), WorkflowVariant::Paired | WorkflowVariant::Blind) => {
                let pairs = PairGenerator::subjects_for_pair(
                    &self.catalog,
                    &pair.baseline,
                    &pair.experimental,
                    self.assets.as_ref(),
                );
                (interleave(&pairs), pairs)
            }
            (Selection::Calibration, WorkflowVariant::Calibration) => {
                let mut subjects = self.catalog.calibration_subjects(self.assets.as_ref());
                self.picker.shuffle(&mut subjects);
                (subjects, Vec::new())
            }
            _ => {
                return Transition::rejected(
                    state,
                    WorkflowWarning::SelectionMismatch {
                        variant,
                        selection: selection.to_string(),
                    },
                );
            }
        };

        if subjects.is_empty() {
            return Transition::rejected(
                state,
                WorkflowWarning::EmptySelection(selection.to_string()),
            );
        }

        debug!(
            "{}: {} subjects, {} pairs",
            selection,
            subjects.len(),
            pairs.len()
        );
        let mut next = state;
        next.begin(selection, subjects, pairs);
        Transition::to(next)
    }

    fn submit_score(&self, state: SessionState, value: i64, remark: Option<String>) -> Transition {
        let scale = state.variant().scale();
        let score = match Score::new(value, scale) {
            Ok(score) => score,
            Err(_) => {
                return Transition::rejected(
                    state,
                    WorkflowWarning::ScoreOutOfRange { value, scale },
                );
            }
        };

        let record = match (state.rater(), state.current_subject()) {
            (Some(rater), Some(subject)) => {
                RatingRecord::new(rater, subject, score).with_remarks(remark)
            }
            (None, _) => {
                return Transition::rejected(
                    state,
                    WorkflowWarning::InvalidKey("no rater identified".to_string()),
                );
            }
            (_, None) => {
                return Transition::rejected(
                    state,
                    WorkflowWarning::UnexpectedAction {
                        action: "submit score",
                        phase: Phase::Rate,
                    },
                );
            }
        };
        if let Err(e) = record.key().validate() {
            return Transition::rejected(state, WorkflowWarning::InvalidKey(e.to_string()));
        }

        let mut next = state;
        next.record_draft(record.clone());
        next.advance();

        if next.is_phase_complete() {
            if next.variant().has_blind_phase() && !next.pairs().is_empty() {
                next.enter_blind(self.present());
            } else {
                next.finish();
            }
        }
        Transition::to(next).with_effect(Effect::Persist(vec![record]))
    }

    fn submit_preference(&self, state: SessionState, choice: VisibleChoice) -> Transition {
        let (Some(rater), Some(pair), Some(presentation)) = (
            state.rater(),
            state.current_pair(),
            state.blind_presentation(),
        ) else {
            return Transition::rejected(
                state,
                WorkflowWarning::UnexpectedAction {
                    action: "submit preference",
                    phase: Phase::BlindCompare,
                },
            );
        };

        let preference = presentation.resolve(choice);
        let baseline = state.known_record(&pair.baseline.key_for(rater));
        let experimental = state.known_record(&pair.experimental.key_for(rater));
        let consistent = evaluate_consistency(
            baseline.map(|r| r.score),
            experimental.map(|r| r.score),
            preference,
        );

        // a side without a saved score has no record to carry the preference
        let records: Vec<RatingRecord> = [baseline, experimental]
            .into_iter()
            .flatten()
            .map(|r| r.clone().with_preference(preference, consistent))
            .collect();
        debug!(
            "item {}: {} (consistent: {:?})",
            pair.item(),
            preference,
            consistent
        );

        let mut next = state;
        for record in &records {
            next.record_draft(record.clone());
        }
        next.advance();
        if next.is_phase_complete() {
            next.finish();
        } else {
            next.set_blind_presentation(Some(self.present()));
        }
        if records.is_empty() {
            return Transition::to(next);
        }
        Transition::to(next).with_effect(Effect::Persist(records))
    }

    fn go_back(&self, state: SessionState) -> Transition {
        let mut next = state;
        next.go_back();
        if next.phase() == Phase::BlindCompare {
            next.set_blind_presentation(Some(self.present()));
        }
        Transition::to(next)
    }

    fn present(&self) -> BlindPresentation {
        BlindPresentation::new(self.picker.baseline_side())
    }
}

/// Rate sequence for a pair selection: baseline then experimental, per item
fn interleave(pairs: &[SubjectPair]) -> Vec<Subject> {
    pairs
        .iter()
        .flat_map(|pair| [pair.baseline.clone(), pair.experimental.clone()])
        .collect()
}
