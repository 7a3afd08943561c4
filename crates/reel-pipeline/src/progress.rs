//! Progress events for production runs.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

/// Phase of a production run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProducePhase {
    Reading,
    Avatars,
    Voiceovers,
    Assets,
    Planning,
    Rendering,
    Done,
}

impl ProducePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProducePhase::Reading => "reading",
            ProducePhase::Avatars => "avatars",
            ProducePhase::Voiceovers => "voiceovers",
            ProducePhase::Assets => "assets",
            ProducePhase::Planning => "planning",
            ProducePhase::Rendering => "rendering",
            ProducePhase::Done => "done",
        }
    }
}

impl fmt::Display for ProducePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress event emitted during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub slug: String,
    pub phase: ProducePhase,
    pub detail: String,
    pub warning: bool,
}

/// Reports progress to the log and, when attached, a channel.
#[derive(Clone, Default)]
pub struct ProgressReporter {
    tx: Option<UnboundedSender<ProgressEvent>>,
}

impl ProgressReporter {
    /// Reporter that only logs.
    pub fn new() -> Self {
        Self { tx: None }
    }

    /// Reporter that also forwards events over a channel.
    pub fn with_channel(tx: UnboundedSender<ProgressEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Report a progress update.
    pub fn update(&self, slug: &str, phase: ProducePhase, detail: impl Into<String>) {
        self.emit(ProgressEvent {
            slug: slug.to_string(),
            phase,
            detail: detail.into(),
            warning: false,
        });
    }

    /// Report a non-fatal problem.
    pub fn warn(&self, slug: &str, phase: ProducePhase, detail: impl Into<String>) {
        self.emit(ProgressEvent {
            slug: slug.to_string(),
            phase,
            detail: detail.into(),
            warning: true,
        });
    }

    fn emit(&self, event: ProgressEvent) {
        if event.warning {
            warn!(slug = %event.slug, phase = %event.phase, "{}", event.detail);
        } else {
            info!(slug = %event.slug, phase = %event.phase, "{}", event.detail);
        }
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_flow_through_the_channel() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let reporter = ProgressReporter::with_channel(tx);

        reporter.update("launch", ProducePhase::Avatars, "Synthesizing 2 avatar clips");
        reporter.warn("launch", ProducePhase::Assets, "Asset demo.png not found");

        let first = rx.try_recv().unwrap();
        assert_eq!(first.phase, ProducePhase::Avatars);
        assert!(!first.warning);

        let second = rx.try_recv().unwrap();
        assert!(second.warning);
        assert!(second.detail.contains("demo.png"));
    }
}
