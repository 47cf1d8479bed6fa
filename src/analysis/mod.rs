//! Worksheet Analysis
//!
//! The boundary between a photographed worksheet and the hint generator:
//! ask the image model for problems, reshape its reply, validate each
//! problem, and attach hints.

mod description;
mod extractor;
mod prompt;
mod reply;
mod worksheet;

pub use description::ProblemDescription;
pub use extractor::{ExtractionRequest, ImageUpload, InlineData, ProblemExtractor, ReplayExtractor};
pub use prompt::{response_schema, DEFAULT_MODEL, DEFAULT_PROMPT};
pub use reply::{parse_reply, unwrap_fences};
pub use worksheet::{Worksheet, WorksheetAnalyzer, WorksheetProblem};
