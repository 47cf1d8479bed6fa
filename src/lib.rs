//! Worksheet Hints
//!
//! Step-by-step visual hints for photographed arithmetic worksheets:
//! - Emoji walkthroughs for addition and subtraction problems
//! - Validation and reshaping of image-model replies
//! - An explicit state machine for the review flow

pub mod analysis;
pub mod config;
pub mod error;
pub mod flow;
pub mod hints;

// Re-exports for convenience
pub use analysis::{ProblemExtractor, Worksheet, WorksheetAnalyzer};
pub use error::{AnalysisError, FlowError, HintError};
pub use flow::WalkthroughFlow;
pub use hints::{generate_hints, ArithmeticProblem, HintFrame, Operation};
