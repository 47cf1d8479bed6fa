use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::description::ProblemDescription;
use super::extractor::{ExtractionRequest, ImageUpload, ProblemExtractor};
use super::prompt::{response_schema, DEFAULT_MODEL, DEFAULT_PROMPT};
use super::reply::parse_reply;
use crate::error::AnalysisError;
use crate::hints::HintFrame;

/// A problem found on the worksheet, with its walkthrough
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetProblem {
    /// 1-based position on the worksheet
    pub id: usize,
    pub text: String,
    /// Empty when the operation is not supported
    pub hints: Vec<HintFrame>,
}

/// Every problem read from one photo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worksheet {
    pub problems: Vec<WorksheetProblem>,
}

impl Worksheet {
    pub fn from_descriptions(descriptions: &[ProblemDescription]) -> Result<Self, AnalysisError> {
        let problems = descriptions
            .iter()
            .enumerate()
            .map(|(i, description)| {
                let id = i + 1;
                let hints = description
                    .hints()
                    .map_err(|source| AnalysisError::InvalidProblem { index: id, source })?;
                Ok(WorksheetProblem {
                    id,
                    text: description.text.clone(),
                    hints,
                })
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        Ok(Self { problems })
    }

    /// Reshape a raw model reply into a worksheet
    pub fn from_reply(reply: &str) -> Result<Self, AnalysisError> {
        Self::from_descriptions(&parse_reply(reply)?)
    }

    pub fn problem(&self, id: usize) -> Option<&WorksheetProblem> {
        self.problems.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Photo in, worksheet with hints out
pub struct WorksheetAnalyzer {
    extractor: Arc<dyn ProblemExtractor>,
    model: String,
    prompt: String,
}

impl WorksheetAnalyzer {
    pub fn new(extractor: Arc<dyn ProblemExtractor>) -> Self {
        Self {
            extractor,
            model: DEFAULT_MODEL.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the extractor once and build the worksheet from its reply.
    pub async fn analyze(&self, image: ImageUpload) -> Result<Worksheet, AnalysisError> {
        let started = Instant::now();
        let request = ExtractionRequest {
            model: self.model.clone(),
            prompt: self.prompt.clone(),
            image,
            response_schema: response_schema(),
        };

        let reply = self.extractor.extract(&request).await.map_err(|e| {
            warn!("Extraction failed: {:#}", e);
            AnalysisError::Extraction(e)
        })?;

        let worksheet = Worksheet::from_reply(&reply).inspect_err(|e| {
            warn!("Could not use model reply: {}", e);
        })?;

        info!(
            model = %self.model,
            problems = worksheet.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Worksheet analyzed"
        );
        Ok(worksheet)
    }
}
