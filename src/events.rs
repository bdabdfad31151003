//! Payloads the engine hands to its host, and the sinks that receive them.

use strum_macros::{AsRefStr, Display};
use tracing::info;

/// Severity of a user-facing feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Warning,
    Error,
    Info,
}

/// A discrete notification for the player, e.g. "Start from dot 3".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn new(kind: FeedbackKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The single terminal result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    pub score: u32,
    /// Whole seconds spent in the active state.
    pub time_used: u32,
    pub success: bool,
}

/// Receives the terminal score report, at most once per started session.
pub trait ScoreSink {
    fn submit(&mut self, report: ScoreReport);
}

impl<F: FnMut(ScoreReport)> ScoreSink for F {
    fn submit(&mut self, report: ScoreReport) {
        self(report)
    }
}

/// Receives feedback records. The engine never waits on or inspects the outcome.
pub trait FeedbackSink {
    fn notify(&mut self, feedback: Feedback);
}

impl<F: FnMut(Feedback)> FeedbackSink for F {
    fn notify(&mut self, feedback: Feedback) {
        self(feedback)
    }
}

/// Default sink used when the host attaches nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ScoreSink for LogSink {
    fn submit(&mut self, report: ScoreReport) {
        info!(score = report.score, time_used = report.time_used, success = report.success, "Score submitted");
    }
}

impl FeedbackSink for LogSink {
    fn notify(&mut self, feedback: Feedback) {
        info!(kind = feedback.kind.as_ref(), "{}", feedback.message);
    }
}
