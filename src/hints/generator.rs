//! Hint Generator
//!
//! Turns an [`ArithmeticProblem`] into three frames that walk a child from
//! the starting quantity, through the change, to the question.

use std::iter;

use tracing::debug;

use super::catalog::{counter_for, icon_for};
use super::types::{ArithmeticProblem, HintFrame, Icon, Operation, VisualToken};
use crate::error::HintError;

/// Upper bound on tokens drawn in a single frame
pub const MAX_TOKENS_PER_FRAME: u32 = 1000;

const REMAINDER_QUESTION: &str = "のこりはいくつかな？";
const TOTAL_QUESTION: &str = "ぜんぶでいくつかな？";

/// Build the walkthrough for `problem`.
///
/// Only the first two operands are used. Pure: the same input always yields
/// the same frames.
pub fn generate_hints(problem: &ArithmeticProblem) -> Result<Vec<HintFrame>, HintError> {
    let (initial, change) = problem.operand_pair()?;
    let subject = problem.subject();
    let icon = icon_for(subject);
    let counter = counter_for(subject);

    debug!(
        operation = %problem.operation(),
        initial,
        change,
        icon = %icon,
        "generating hints"
    );

    let widest = match problem.operation() {
        Operation::Subtraction => {
            if change > initial {
                return Err(HintError::invalid(format!(
                    "cannot take {change} away from {initial}"
                )));
            }
            initial
        }
        Operation::Addition => initial.checked_add(change).ok_or_else(|| {
            HintError::invalid(format!("{initial} + {change} is too large"))
        })?,
    };
    ensure_drawable(widest)?;

    let opening = HintFrame {
        step: 1,
        caption: format!("{subject}が{initial}{counter}"),
        tokens: row(icon, initial, VisualToken::normal),
    };

    let frames = match problem.operation() {
        Operation::Subtraction => {
            let remaining = initial - change;

            // Removed items stay in the row so the survivors keep their places.
            let layout: Vec<VisualToken> = row(icon, remaining, VisualToken::normal)
                .into_iter()
                .chain(row(icon, change, VisualToken::removed))
                .collect();

            vec![
                opening,
                HintFrame {
                    step: 2,
                    caption: format!("{change}{counter}へりました"),
                    tokens: layout.clone(),
                },
                HintFrame {
                    step: 3,
                    caption: REMAINDER_QUESTION.to_string(),
                    tokens: layout,
                },
            ]
        }
        Operation::Addition => {
            let grown: Vec<VisualToken> = row(icon, initial, VisualToken::normal)
                .into_iter()
                .chain(row(icon, change, VisualToken::added))
                .collect();

            vec![
                opening,
                HintFrame {
                    step: 2,
                    caption: format!("{change}{counter}ふえました"),
                    tokens: grown,
                },
                HintFrame {
                    step: 3,
                    caption: TOTAL_QUESTION.to_string(),
                    tokens: row(icon, widest, VisualToken::normal),
                },
            ]
        }
    };

    Ok(frames)
}

fn row(icon: Icon, count: u32, make: fn(Icon) -> VisualToken) -> Vec<VisualToken> {
    iter::repeat(make(icon)).take(count as usize).collect()
}

fn ensure_drawable(count: u32) -> Result<(), HintError> {
    if count > MAX_TOKENS_PER_FRAME {
        return Err(HintError::invalid(format!(
            "{count} items cannot be drawn (limit {MAX_TOKENS_PER_FRAME})"
        )));
    }
    Ok(())
}
