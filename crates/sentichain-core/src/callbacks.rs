//! Run tracking
//!
//! Advisory progress notifications emitted while a chain runs. Trackers
//! observe; nothing they do feeds back into chain results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Display hint attached to a text event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    Green,
    Yellow,
}

/// Sink for chain progress events
pub trait RunTracker: Send + Sync {
    /// Receive a text notification
    fn on_text(&self, text: &str, style: Option<TextStyle>);
}

/// Tracker that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracker;

impl RunTracker for NoopTracker {
    fn on_text(&self, _text: &str, _style: Option<TextStyle>) {}
}

/// Tracker that forwards events to `tracing` at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTracker;

impl RunTracker for TracingTracker {
    fn on_text(&self, text: &str, style: Option<TextStyle>) {
        match style {
            Some(style) => tracing::debug!(?style, "{}", text),
            None => tracing::debug!("{}", text),
        }
    }
}

/// A recorded tracker event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub text: String,
    pub style: Option<TextStyle>,
    pub at: DateTime<Utc>,
}

/// Tracker that keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingTracker {
    events: Mutex<Vec<RunEvent>>,
}

impl RecordingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of events received so far
    pub fn events(&self) -> Vec<RunEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Texts received so far, in order
    pub fn texts(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.text).collect()
    }
}

impl RunTracker for RecordingTracker {
    fn on_text(&self, text: &str, style: Option<TextStyle>) {
        if let Ok(mut events) = self.events.lock() {
            events.push(RunEvent {
                text: text.to_string(),
                style,
                at: Utc::now(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_tracker_keeps_order() {
        let tracker = RecordingTracker::new();
        tracker.on_text("first", None);
        tracker.on_text("second", Some(TextStyle::Green));

        let events = tracker.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].text, "first");
        assert_eq!(events[1].style, Some(TextStyle::Green));
        assert!(events[0].at <= events[1].at);
    }
}
