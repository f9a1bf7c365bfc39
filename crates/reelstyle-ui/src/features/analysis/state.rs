//! Analysis page state.
//!
//! # Design
//! - Analyze-by-URL and load-by-id share one result slot; the latest issued
//!   request wins regardless of which action issued it.
//! - The URL input keeps raw text; it is trimmed only when submitted.

use reelstyle_api_models::AnalysisResult;

use crate::core::request::{RequestId, RequestTicket, Tracked};

/// Which action produced the in-flight request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisKind {
    /// Fresh analysis of a URL.
    Analyze,
    /// Stored analysis loaded by video id.
    Stored,
}

/// State owned by the analysis page.
#[derive(Debug, Default)]
pub struct AnalysisState {
    /// Raw URL input.
    pub input_url: String,
    result: Tracked<AnalysisResult>,
    kind: Option<AnalysisKind>,
}

impl AnalysisState {
    /// Start analysing the current input. `None` when the input is blank.
    pub fn begin_analyze(&mut self) -> Option<(RequestTicket, String)> {
        let url = self.input_url.trim().to_string();
        if url.is_empty() {
            return None;
        }
        self.kind = Some(AnalysisKind::Analyze);
        Some((self.result.begin(), url))
    }

    /// Start loading a stored analysis.
    pub fn begin_load(&mut self) -> RequestTicket {
        self.kind = Some(AnalysisKind::Stored);
        self.result.begin()
    }

    /// Apply a completion.
    ///
    /// Returns the author to remember when a fresh analysis was applied.
    pub fn complete(
        &mut self,
        id: RequestId,
        outcome: Result<AnalysisResult, String>,
    ) -> Option<String> {
        let kind = self.kind;
        let author = outcome.as_ref().ok().map(|result| result.username.clone());
        if !self.result.complete(id, outcome) {
            return None;
        }
        self.kind = None;
        match (kind, author) {
            (Some(AnalysisKind::Analyze), Some(author)) => {
                self.input_url.clear();
                Some(author)
            }
            _ => None,
        }
    }

    /// Abort whatever is in flight.
    pub fn cancel(&mut self) {
        self.kind = None;
        self.result.cancel();
    }

    /// Result slot.
    #[must_use]
    pub const fn result(&self) -> &Tracked<AnalysisResult> {
        &self.result
    }

    /// Whether a fresh analysis is running.
    #[must_use]
    pub fn is_analyzing(&self) -> bool {
        self.result.is_pending() && self.kind == Some(AnalysisKind::Analyze)
    }

    /// Whether a stored analysis is loading.
    #[must_use]
    pub fn is_loading_stored(&self) -> bool {
        self.result.is_pending() && self.kind == Some(AnalysisKind::Stored)
    }
}
