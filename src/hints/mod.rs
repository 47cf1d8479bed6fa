//! Hint Module
//!
//! Visual, emoji-based walkthroughs for addition and subtraction problems.

mod catalog;
mod generator;
mod types;

pub use catalog::{counter_for, icon_for, DEFAULT_COUNTER, DEFAULT_ICON};
pub use generator::{generate_hints, MAX_TOKENS_PER_FRAME};
pub use types::{ArithmeticProblem, HintFrame, Icon, Operation, TokenState, VisualToken};
