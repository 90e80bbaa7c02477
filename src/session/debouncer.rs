use std::time::{Duration, Instant};

use super::markers::SessionMarkers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellState {
    Idle,
    Pending { since: Instant },
    Fired,
}

/// A view increment that is due to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewIncrement {
    pub article_id: String,
    pub current_count: u64,
}

/// Counts one view per article per session, and only after the reader has
/// stayed on the page for the dwell threshold.
///
/// Driven by the UI tick: `activate` when the page is shown, `deactivate`
/// when it goes away, `poll` on every tick.
#[derive(Debug)]
pub struct ViewCountDebouncer {
    article_id: String,
    current_count: u64,
    dwell: Duration,
    state: DwellState,
}

impl ViewCountDebouncer {
    pub fn new(article_id: impl Into<String>, current_count: u64, dwell: Duration) -> Self {
        Self {
            article_id: article_id.into(),
            current_count,
            dwell,
            state: DwellState::Idle,
        }
    }

    pub fn state(&self) -> DwellState {
        self.state
    }

    pub fn article_id(&self) -> &str {
        &self.article_id
    }

    /// Start the dwell window unless this article was already counted.
    pub fn activate(&mut self, markers: &SessionMarkers, now: Instant) {
        if self.article_id.is_empty() || self.state != DwellState::Idle {
            return;
        }
        if markers.contains(&self.article_id) {
            tracing::debug!("View for {} already counted this session", self.article_id);
            return;
        }
        self.state = DwellState::Pending { since: now };
    }

    /// Cancel a pending window. Nothing is recorded.
    pub fn deactivate(&mut self) {
        if let DwellState::Pending { .. } = self.state {
            tracing::debug!("Left {} before the view counted", self.article_id);
            self.state = DwellState::Idle;
        }
    }

    /// Fire once the window has elapsed: marks the session and returns the
    /// increment to send. Returns `None` on every other call.
    pub fn poll(&mut self, markers: &mut SessionMarkers, now: Instant) -> Option<ViewIncrement> {
        let DwellState::Pending { since } = self.state else {
            return None;
        };
        if now.saturating_duration_since(since) < self.dwell {
            return None;
        }

        self.state = DwellState::Fired;
        markers.mark(&self.article_id);

        Some(ViewIncrement {
            article_id: self.article_id.clone(),
            current_count: self.current_count,
        })
    }
}
