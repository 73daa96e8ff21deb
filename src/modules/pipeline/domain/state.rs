use std::fmt;

use serde::Serialize;

use crate::shared::errors::{AppError, AppResult};

/// Phases of one collection run
///
/// `Aborted` is only reachable from `Scanning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineState {
    Idle,
    Loading,
    Scanning,
    Filtering,
    Enriching(usize),
    Publishing(usize),
    Done,
    Aborted,
}

impl PipelineState {
    pub fn can_transition_to(&self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Idle, Loading)
                | (Loading, Scanning)
                | (Scanning, Filtering)
                | (Scanning, Aborted)
                | (Scanning, Done)
                | (Filtering, Enriching(_))
                | (Filtering, Done)
                | (Enriching(_), Publishing(_))
                | (Publishing(_), Enriching(_))
                | (Publishing(_), Done)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Aborted)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Enriching(i) => write!(f, "Enriching({})", i),
            PipelineState::Publishing(i) => write!(f, "Publishing({})", i),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Inclusive range of external catalog IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    start: i64,
    end: i64,
}

impl IdRange {
    pub fn new(start: i64, end: i64) -> AppResult<Self> {
        if start > end {
            return Err(AppError::InvalidInput(format!(
                "start ID {} is greater than end ID {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn len(&self) -> u64 {
        self.end.abs_diff(self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<i64> {
        self.start..=self.end
    }
}

/// Summary handed back to the trigger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Records in the collection after scanning (resumed + fetched)
    pub collected: usize,
    /// Fetched during this run
    pub fetched: usize,
    /// Skipped because a resumed checkpoint already held them
    pub resumed: usize,
    /// Records that passed the filter; this is the "processed" count
    pub processed: usize,
    pub published: usize,
    pub failed: usize,
}
