//! Error types
//!
//! Typed failures surfaced by hint generation, worksheet analysis and the
//! walkthrough flow. None of them are retried inside the crate.

use thiserror::Error;

use crate::flow::ScreenKind;

/// Failures while turning a problem into hint frames
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HintError {
    /// Operand data is missing, out of range, or cannot be laid out
    #[error("invalid problem: {0}")]
    InvalidProblem(String),
    /// The operation kind is not addition or subtraction
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl HintError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        HintError::InvalidProblem(reason.into())
    }
}

/// Failures of the extraction boundary
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No image provided")]
    MissingImage,
    /// The external collaborator failed; its message is surfaced as-is
    #[error("failed to analyze image: {0}")]
    Extraction(#[source] anyhow::Error),
    #[error("model reply is not valid problem JSON: {0}")]
    MalformedReply(#[source] serde_json::Error),
    #[error("problem {index}: {source}")]
    InvalidProblem {
        /// 1-based position of the problem in the reply
        index: usize,
        #[source]
        source: HintError,
    },
}

/// Rejected walkthrough transitions. The flow is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("cannot {event} while on the {from} screen")]
    InvalidTransition { from: ScreenKind, event: &'static str },
    #[error("no problem with id {0}")]
    UnknownProblem(usize),
    #[error("problem {0} has no hints")]
    NoHints(usize),
}
