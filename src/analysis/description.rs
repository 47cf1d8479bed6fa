use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use tracing::debug;

use crate::error::HintError;
use crate::hints::{generate_hints, ArithmeticProblem, HintFrame, Operation};

/// One problem as described by the image-understanding model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProblemDescription {
    /// The problem sentence, transcribed as printed.
    #[serde(default)]
    pub text: String,
    /// "addition" or "subtraction".
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: String,
    /// Every number that appears in the problem, in reading order.
    #[serde(deserialize_with = "whole_numbers")]
    pub numbers: Vec<i64>,
    /// The thing or person being counted (e.g. いちご, こども, りんご).
    #[serde(default)]
    pub subject: String,
}

impl ProblemDescription {
    /// Check the description and narrow it to an [`ArithmeticProblem`].
    ///
    /// The operation is checked first, so an unknown kind reports
    /// `UnsupportedOperation` even when its numbers are also bad.
    pub fn validate(&self) -> Result<ArithmeticProblem, HintError> {
        let operation: Operation = self.kind.parse()?;

        if self.numbers.len() < 2 {
            return Err(HintError::invalid(format!(
                "expected at least two numbers, got {}",
                self.numbers.len()
            )));
        }

        let operands = self
            .numbers
            .iter()
            .map(|&n| {
                u32::try_from(n).map_err(|_| HintError::invalid(format!("{n} is not a countable quantity")))
            })
            .collect::<Result<Vec<u32>, HintError>>()?;

        Ok(ArithmeticProblem::new(operation, operands, self.subject.as_str()))
    }

    /// Hints for this description. Unsupported operations produce no hints
    /// rather than an error.
    pub fn hints(&self) -> Result<Vec<HintFrame>, HintError> {
        match self.validate() {
            Ok(problem) => generate_hints(&problem),
            Err(HintError::UnsupportedOperation(kind)) => {
                debug!(kind = %kind, "no hints for unsupported operation");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// A missing, null or non-string `type` reads as an empty kind, which
/// `validate` reports as an unsupported operation.
fn lenient_kind<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(kind)) => kind,
        _ => String::new(),
    })
}

/// Integers, plus floats with no fractional part (`2.0`).
fn whole_numbers<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Number>::deserialize(deserializer)?
        .iter()
        .map(|n| whole_number(n).ok_or_else(|| D::Error::custom(format!("{n} is not a whole number"))))
        .collect()
}

fn whole_number(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn description(kind: &str, numbers: Vec<i64>, subject: &str) -> ProblemDescription {
        ProblemDescription {
            text: String::new(),
            kind: kind.to_string(),
            numbers,
            subject: subject.to_string(),
        }
    }

    #[test]
    fn test_reads_model_shape() {
        let parsed: ProblemDescription = serde_json::from_value(json!({
            "text": "いちごが2つあり、1つたべました。",
            "type": "subtraction",
            "numbers": [2, 1],
            "subject": "いちご"
        }))
        .unwrap();

        let problem = parsed.validate().unwrap();
        assert_eq!(problem.operation(), Operation::Subtraction);
        assert_eq!(problem.operands(), &[2, 1]);
        assert_eq!(problem.subject(), "いちご");
    }

    #[test]
    fn test_unknown_operation_yields_no_hints() {
        let d = description("multiplication", vec![2, 3], "りんご");
        assert!(matches!(d.validate(), Err(HintError::UnsupportedOperation(_))));
        assert!(d.hints().unwrap().is_empty());

        // Checked before the numbers
        let d = description("division", vec![], "りんご");
        assert!(d.hints().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(
            description("addition", vec![2], "りんご").hints(),
            Err(HintError::InvalidProblem(_))
        ));
        assert!(matches!(
            description("addition", vec![-1, 2], "りんご").validate(),
            Err(HintError::InvalidProblem(_))
        ));
        assert!(matches!(
            description("addition", vec![1, i64::from(u32::MAX) + 1], "りんご").validate(),
            Err(HintError::InvalidProblem(_))
        ));
        assert!(matches!(
            description("subtraction", vec![1, 2], "x").hints(),
            Err(HintError::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_missing_or_null_type_yields_no_hints() {
        for entry in [
            json!({ "text": "a", "numbers": [2, 1], "subject": "いちご" }),
            json!({ "text": "a", "type": null, "numbers": [2, 1], "subject": "いちご" }),
            json!({ "text": "a", "type": 7, "numbers": [2, 1], "subject": "いちご" }),
        ] {
            let d: ProblemDescription = serde_json::from_value(entry).unwrap();
            assert_eq!(d.kind, "");
            assert!(matches!(d.validate(), Err(HintError::UnsupportedOperation(_))));
            assert!(d.hints().unwrap().is_empty());
        }
    }

    #[test]
    fn test_whole_floats_are_counts() {
        let d: ProblemDescription = serde_json::from_value(json!({
            "type": "addition", "numbers": [2.0, 1], "subject": "りんご"
        }))
        .unwrap();
        assert_eq!(d.numbers, vec![2, 1]);
        assert_eq!(d.hints().unwrap()[2].tokens.len(), 3);

        let fractional = serde_json::from_value::<ProblemDescription>(json!({
            "type": "addition", "numbers": [2.5, 1], "subject": "りんご"
        }));
        assert!(fractional.unwrap_err().to_string().contains("2.5 is not a whole number"));
    }

    #[test]
    fn test_subject_is_trimmed() {
        let problem = description("addition", vec![2, 1], " りんご ").validate().unwrap();
        assert_eq!(problem.subject(), "りんご");
    }

    #[test]
    fn test_missing_numbers_fail_to_deserialize() {
        let result = serde_json::from_value::<ProblemDescription>(json!({
            "text": "?", "type": "addition", "subject": "りんご"
        }));
        assert!(result.is_err());

        let result = serde_json::from_value::<ProblemDescription>(json!({
            "type": "addition", "numbers": ["2", "1"]
        }));
        assert!(result.is_err());
    }
}
