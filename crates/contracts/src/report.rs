//! DispatchReport - Dispatcher output
//!
//! Ordered per-destination outcome of one dispatch.

use crate::SendError;

/// Outcome of sending one message to one destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    /// Position in the destination list
    pub index: usize,
    /// Destination label
    pub destination: String,
    pub ok: bool,
    pub error: Option<SendError>,
}

impl DispatchResult {
    pub fn from_outcome(
        index: usize,
        destination: impl Into<String>,
        outcome: Result<(), SendError>,
    ) -> Self {
        let error = outcome.err();
        Self {
            index,
            destination: destination.into(),
            ok: error.is_none(),
            error,
        }
    }
}

/// One result per destination, in destination-list order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    results: Vec<DispatchResult>,
}

impl DispatchReport {
    pub fn new(results: Vec<DispatchResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &[DispatchResult] {
        &self.results
    }

    pub fn iter(&self) -> impl Iterator<Item = &DispatchResult> {
        self.results.iter()
    }

    /// Number of successful deliveries
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.ok).count()
    }

    /// Number of failed deliveries
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// True when there was at least one destination and none succeeded
    pub fn all_failed(&self) -> bool {
        !self.results.is_empty() && self.succeeded() == 0
    }
}

impl IntoIterator for DispatchReport {
    type Item = DispatchResult;
    type IntoIter = std::vec::IntoIter<DispatchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
