//! The front end's view controller: owns what is on screen and turns user
//! actions (submit, replay, clear) into analyzer calls and history writes.

pub mod render;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::{
    normalize, radar_series, AnalysisError, AnalysisPayload, Analyzer, NormalizedCategory,
    RadarPoint,
};
use crate::history::{HistoryEntry, HistoryStore, KeyValueStore, StoreError};

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("no history entry at position {index} (history has {len})")]
    NoSuchEntry { index: usize, len: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probabilities {
    pub beaten_up: u8,
    pub cancelled: u8,
}

/// Everything the screen shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    pub input: String,
    pub categories: Vec<NormalizedCategory>,
    /// Fixed-category axes; empty when no result is shown.
    pub radar: Vec<RadarPoint>,
    /// Only set when the line is non-empty.
    pub shaming_line: Option<String>,
    /// Only set when both probabilities are present.
    pub probabilities: Option<Probabilities>,
    pub error: Option<String>,
    pub results_visible: bool,
    pub loading: bool,
}

/// A submission waiting for its analysis. `seq` identifies it; only the
/// latest submission may update the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnalysis {
    pub seq: u64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Nothing to analyze.
    Ignored,
    Rendered,
    Failed,
    /// A newer submission superseded this one; its outcome was dropped.
    Stale,
}

pub struct ViewController<A, S> {
    analyzer: A,
    history: HistoryStore<S>,
    display: DisplayState,
    current: Option<AnalysisPayload>,
    latest_seq: u64,
}

impl<A: Analyzer, S: KeyValueStore> ViewController<A, S> {
    pub fn new(analyzer: A, history: HistoryStore<S>) -> Self {
        Self {
            analyzer,
            history,
            display: DisplayState::default(),
            current: None,
            latest_seq: 0,
        }
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// The payload on screen, if any.
    pub fn current(&self) -> Option<&AnalysisPayload> {
        self.current.as_ref()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.list()
    }

    /// Analyzes `text`, records the result and renders it.
    pub async fn submit(&mut self, text: &str) -> Result<Completion, ViewError> {
        let Some(pending) = self.begin(text) else {
            return Ok(Completion::Ignored);
        };
        let outcome = self.analyzer.analyze(&pending.text).await;
        self.complete(pending, outcome)
    }

    /// First half of `submit`: clears the screen and issues a sequence token.
    /// Returns `None` for blank input.
    pub fn begin(&mut self, text: &str) -> Option<PendingAnalysis> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.display.input = text.to_string();
        self.reset();
        self.display.loading = true;
        self.latest_seq += 1;
        debug!(seq = self.latest_seq, "Analysis started");

        Some(PendingAnalysis {
            seq: self.latest_seq,
            text: trimmed.to_string(),
        })
    }

    /// Second half of `submit`. Outcomes of superseded submissions are
    /// dropped: not rendered and not recorded.
    pub fn complete(
        &mut self,
        pending: PendingAnalysis,
        outcome: Result<AnalysisPayload, AnalysisError>,
    ) -> Result<Completion, ViewError> {
        if pending.seq != self.latest_seq {
            debug!(
                seq = pending.seq,
                latest = self.latest_seq,
                "Dropping stale analysis"
            );
            return Ok(Completion::Stale);
        }
        self.display.loading = false;

        match outcome {
            Ok(payload) => {
                self.show(payload.clone());
                self.history.record(pending.text, payload)?;
                Ok(Completion::Rendered)
            }
            Err(e) => {
                warn!("Analysis failed: {e}");
                self.show_error(e.to_string());
                Ok(Completion::Failed)
            }
        }
    }

    /// Re-renders a stored entry without calling the analyzer. History is
    /// left untouched.
    pub fn replay(&mut self, index: usize) -> Result<(), ViewError> {
        let entry = self
            .history
            .get(index)
            .ok_or_else(|| ViewError::NoSuchEntry {
                index,
                len: self.history.list().len(),
            })?;

        info!(index, "Replaying history entry");
        self.display.input = entry.text;
        self.reset();
        self.show(entry.data);
        Ok(())
    }

    pub fn clear_history(&mut self) -> Result<(), ViewError> {
        Ok(self.history.clear()?)
    }

    /// Clears results and errors; the input text stays.
    fn reset(&mut self) {
        self.display.categories.clear();
        self.display.radar.clear();
        self.display.shaming_line = None;
        self.display.probabilities = None;
        self.display.error = None;
        self.display.results_visible = false;
        self.current = None;
    }

    fn show(&mut self, payload: AnalysisPayload) {
        self.display.categories = normalize(&payload);
        self.display.radar = radar_series(&payload).to_vec();
        self.display.shaming_line = payload
            .shaming_line()
            .filter(|line| !line.is_empty())
            .map(str::to_string);
        self.display.probabilities = payload
            .probability_beaten_up()
            .zip(payload.probability_cancelled())
            .map(|(beaten_up, cancelled)| Probabilities {
                beaten_up,
                cancelled,
            });
        self.display.error = None;
        self.display.results_visible = true;
        self.current = Some(payload);
    }

    fn show_error(&mut self, message: String) {
        self.display.categories.clear();
        self.display.radar.clear();
        self.display.shaming_line = None;
        self.display.error = Some(message);
        self.display.results_visible = true;
    }
}
