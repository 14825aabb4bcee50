use nalgebra::Vector2;

use crate::dynamics::state::{Actuation, State};
use crate::error::SimError;

// ---------------------------------------------------------------------------
// Recorded history
// ---------------------------------------------------------------------------

/// Snapshot taken at the start of a step, before any update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRecord {
    pub step: usize,
    pub time: f64,                        // s, step · dt
    pub state: State,
    pub end_effector_error: Vector2<f64>, // m, tip minus target
}

/// Step-ordered records plus the actuation applied after each one.
///
/// `actuations[i]` moved the system from `records[i]` to `records[i + 1]`.
/// A converged or failed run has one fewer actuation than records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    records: Vec<HistoryRecord>,
    actuations: Vec<Actuation>,
}

impl History {
    pub fn with_capacity(steps: usize) -> Self {
        Self {
            records: Vec::with_capacity(steps),
            actuations: Vec::with_capacity(steps),
        }
    }

    pub(crate) fn push_record(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    pub(crate) fn push_actuation(&mut self, act: Actuation) {
        self.actuations.push(act);
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn actuations(&self) -> &[Actuation] {
        &self.actuations
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    /// Fresh pass over the records. Call again to restart.
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryRecord> {
        self.records.iter()
    }

    /// Tip error magnitude per record.
    pub fn error_norms(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.end_effector_error.norm())
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryRecord;
    type IntoIter = std::slice::Iter<'a, HistoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Terminal states and run outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// Tip came within the goal tolerance.
    Converged,
    /// `max_steps` ran out first.
    Exhausted,
    /// Mass matrix degenerated; the run stopped at the last valid state.
    Error(SimError),
}

impl Termination {
    pub fn label(&self) -> &'static str {
        match self {
            Termination::Converged => "CONVERGED",
            Termination::Exhausted => "EXHAUSTED",
            Termination::Error(_) => "ERROR",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimOutcome {
    pub termination: Termination,
    pub history: History,
    /// Steps taken at termination (equals the number of records).
    pub steps: usize,
}

impl SimOutcome {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    pub fn final_state(&self) -> Option<&State> {
        self.history.last().map(|r| &r.state)
    }

    pub fn final_error(&self) -> Option<f64> {
        self.history.last().map(|r| r.end_effector_error.norm())
    }

    pub fn min_error(&self) -> Option<f64> {
        self.history.error_norms().reduce(f64::min)
    }
}
