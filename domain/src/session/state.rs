//! Session state entity

use super::blind::BlindPresentation;
use super::phase::Phase;
use super::selection::Selection;
use super::variant::WorkflowVariant;
use crate::catalog::catalog::Catalog;
use crate::catalog::pairs::{ModelPair, PairGenerator, SubjectPair};
use crate::catalog::subject::Subject;
use crate::core::rater::RaterName;
use crate::core::score::Score;
use crate::rating::record::{RatingRecord, RecordKey};
use std::collections::HashMap;

/// One rater's in-progress workflow (Entity)
///
/// Owned by the boundary layer and replaced wholesale on every transition.
/// It is never persisted: abandoning it loses only unsaved drafts.
///
/// `cursor` walks `subjects` during `Rate` and `pairs` during
/// `BlindCompare`; `cursor == len` means the phase is complete.
#[derive(Debug, Clone)]
pub struct SessionState {
    rater: Option<RaterName>,
    variant: WorkflowVariant,
    phase: Phase,
    selection: Option<Selection>,
    subjects: Vec<Subject>,
    pairs: Vec<SubjectPair>,
    cursor: usize,
    /// Records submitted during the current traversal
    drafts: HashMap<RecordKey, RatingRecord>,
    /// Records known to be persisted (from the store or earlier traversals)
    saved: HashMap<RecordKey, RatingRecord>,
    blind: Option<BlindPresentation>,
    history: Vec<(Phase, usize)>,
    completed: Vec<Selection>,
}

impl SessionState {
    pub fn new(variant: WorkflowVariant) -> Self {
        Self {
            rater: None,
            variant,
            phase: Phase::Identify,
            selection: None,
            subjects: Vec::new(),
            pairs: Vec::new(),
            cursor: 0,
            drafts: HashMap::new(),
            saved: HashMap::new(),
            blind: None,
            history: Vec::new(),
            completed: Vec::new(),
        }
    }

    // ==================== Accessors ====================

    pub fn rater(&self) -> Option<&RaterName> {
        self.rater.as_ref()
    }

    pub fn variant(&self) -> WorkflowVariant {
        self.variant
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn pairs(&self) -> &[SubjectPair] {
        &self.pairs
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn blind_presentation(&self) -> Option<&BlindPresentation> {
        self.blind.as_ref()
    }

    /// Prior `(phase, cursor)` positions, oldest first
    pub fn history(&self) -> &[(Phase, usize)] {
        &self.history
    }

    /// Selections fully traversed in this session
    pub fn completed(&self) -> &[Selection] {
        &self.completed
    }

    /// Length of the sequence the cursor currently walks
    pub fn sequence_len(&self) -> usize {
        match self.phase {
            Phase::Rate => self.subjects.len(),
            Phase::BlindCompare => self.pairs.len(),
            _ => 0,
        }
    }

    pub fn is_phase_complete(&self) -> bool {
        self.phase.has_cursor() && self.cursor >= self.sequence_len()
    }

    /// `(position, total)` for display, 1-based while in progress
    pub fn progress(&self) -> (usize, usize) {
        let total = self.sequence_len();
        ((self.cursor + 1).min(total), total)
    }

    /// Subject under the cursor during `Rate`
    pub fn current_subject(&self) -> Option<&Subject> {
        match self.phase {
            Phase::Rate => self.subjects.get(self.cursor),
            _ => None,
        }
    }

    /// Pair under the cursor during `BlindCompare`
    pub fn current_pair(&self) -> Option<&SubjectPair> {
        match self.phase {
            Phase::BlindCompare => self.pairs.get(self.cursor),
            _ => None,
        }
    }

    /// Latest record for `key`: this traversal's draft, then the saved copy
    pub fn known_record(&self, key: &RecordKey) -> Option<&RatingRecord> {
        self.drafts.get(key).or_else(|| self.saved.get(key))
    }

    pub fn known_score(&self, key: &RecordKey) -> Option<Score> {
        self.known_record(key).map(|r| r.score)
    }

    /// Model pairs of `catalog` not completed yet in this session
    pub fn remaining_pairs(&self, catalog: &Catalog) -> Vec<ModelPair> {
        PairGenerator::all_model_pairs(catalog)
            .into_iter()
            .filter(|pair| {
                !self
                    .completed
                    .iter()
                    .any(|done| matches!(done, Selection::Pair(p) if p == pair))
            })
            .collect()
    }

    // ==================== Transitions ====================

    /// Record the rater and move to `SelectSubject`
    pub fn identify(&mut self, rater: RaterName) {
        self.rater = Some(rater);
        self.phase = Phase::SelectSubject;
    }

    /// Absorb previously persisted records of this rater
    pub fn remember_saved(&mut self, records: impl IntoIterator<Item = RatingRecord>) {
        let rater = self.rater.as_ref().map(|r| r.as_str().to_string());
        for record in records {
            if rater.as_deref() == Some(record.rater_id.as_str()) {
                self.saved.insert(record.key(), record);
            }
        }
    }

    /// Start a fresh traversal of `subjects` (and `pairs` for pair variants)
    pub fn begin(&mut self, selection: Selection, subjects: Vec<Subject>, pairs: Vec<SubjectPair>) {
        self.selection = Some(selection);
        self.subjects = subjects;
        self.pairs = pairs;
        self.cursor = 0;
        self.drafts.clear();
        self.history.clear();
        self.blind = None;
        self.phase = Phase::Rate;
    }

    /// Keep a submitted record as this traversal's draft
    pub fn record_draft(&mut self, record: RatingRecord) {
        self.drafts.insert(record.key(), record);
    }

    /// Move the cursor forward, never past the sequence end
    pub fn advance(&mut self) {
        self.history.push((self.phase, self.cursor));
        self.cursor = (self.cursor + 1).min(self.sequence_len());
    }

    /// Move the cursor back, never below zero
    pub fn go_back(&mut self) {
        self.history.push((self.phase, self.cursor));
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Switch from `Rate` to `BlindCompare` over `pairs`
    pub fn enter_blind(&mut self, presentation: BlindPresentation) {
        self.history.push((self.phase, self.cursor));
        self.phase = Phase::BlindCompare;
        self.cursor = 0;
        self.blind = Some(presentation);
    }

    pub fn set_blind_presentation(&mut self, presentation: Option<BlindPresentation>) {
        self.blind = presentation;
    }

    /// Close the traversal and move to `Done`
    pub fn finish(&mut self) {
        self.history.push((self.phase, self.cursor));
        self.phase = Phase::Done;
        self.blind = None;
        if let Some(selection) = self.selection.clone() {
            self.completed.push(selection);
        }
    }

    /// Back to `SelectSubject` with an empty traversal
    ///
    /// Drafts were persisted before this traversal finished, so they become
    /// saved records for pre-filling later traversals.
    pub fn restart(&mut self) {
        self.saved.extend(self.drafts.drain());
        self.selection = None;
        self.subjects.clear();
        self.pairs.clear();
        self.cursor = 0;
        self.history.clear();
        self.blind = None;
        self.phase = Phase::SelectSubject;
    }
}
