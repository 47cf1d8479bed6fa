//! Walkthrough Flow
//!
//! The screens a child moves through for one worksheet, as an explicit state
//! machine. State lives in memory only; retaking the photo drops the worksheet.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::analysis::{ImageUpload, Worksheet};
use crate::error::FlowError;
use crate::hints::HintFrame;

/// Screen identity without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Camera,
    Preview,
    Loading,
    Problems,
    Hints,
    Complete,
    Error,
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenKind::Camera => "camera",
            ScreenKind::Preview => "preview",
            ScreenKind::Loading => "loading",
            ScreenKind::Problems => "problems",
            ScreenKind::Hints => "hints",
            ScreenKind::Complete => "complete",
            ScreenKind::Error => "error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Camera,
    Preview { image: ImageUpload },
    Loading { image: ImageUpload },
    Problems { worksheet: Arc<Worksheet> },
    Hints { worksheet: Arc<Worksheet>, problem_id: usize, step: usize },
    Complete { worksheet: Arc<Worksheet>, problem_id: usize },
    Error { message: String },
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Camera => ScreenKind::Camera,
            Screen::Preview { .. } => ScreenKind::Preview,
            Screen::Loading { .. } => ScreenKind::Loading,
            Screen::Problems { .. } => ScreenKind::Problems,
            Screen::Hints { .. } => ScreenKind::Hints,
            Screen::Complete { .. } => ScreenKind::Complete,
            Screen::Error { .. } => ScreenKind::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub enum FlowEvent {
    ImageSelected(ImageUpload),
    Confirm,
    Retake,
    AnalysisSucceeded(Worksheet),
    AnalysisFailed(String),
    SelectProblem(usize),
    Next,
    BackToProblems,
    Retry,
}

impl FlowEvent {
    fn name(&self) -> &'static str {
        match self {
            FlowEvent::ImageSelected(_) => "select an image",
            FlowEvent::Confirm => "confirm",
            FlowEvent::Retake => "retake",
            FlowEvent::AnalysisSucceeded(_) => "show results",
            FlowEvent::AnalysisFailed(_) => "report a failure",
            FlowEvent::SelectProblem(_) => "select a problem",
            FlowEvent::Next => "advance",
            FlowEvent::BackToProblems => "go back to problems",
            FlowEvent::Retry => "retry",
        }
    }
}

/// One worksheet-review session
#[derive(Debug, Clone, PartialEq)]
pub struct WalkthroughFlow {
    screen: Screen,
}

impl Default for WalkthroughFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl WalkthroughFlow {
    pub fn new() -> Self {
        Self { screen: Screen::Camera }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The frame on screen while walking through hints
    pub fn current_hint(&self) -> Option<&HintFrame> {
        match &self.screen {
            Screen::Hints { worksheet, problem_id, step } => worksheet
                .problem(*problem_id)
                .and_then(|p| p.hints.get(*step)),
            _ => None,
        }
    }

    /// Apply `event`. On error the current screen is kept.
    pub fn handle(&mut self, event: FlowEvent) -> Result<&Screen, FlowError> {
        let from = self.screen.kind();
        let label = event.name();

        let next = match (&self.screen, event) {
            (Screen::Camera, FlowEvent::ImageSelected(image)) => Screen::Preview { image },
            (Screen::Preview { image }, FlowEvent::Confirm) => Screen::Loading { image: image.clone() },
            (Screen::Preview { .. }, FlowEvent::Retake) => Screen::Camera,
            (Screen::Loading { .. }, FlowEvent::AnalysisSucceeded(worksheet)) => Screen::Problems {
                worksheet: Arc::new(worksheet),
            },
            (Screen::Loading { .. }, FlowEvent::AnalysisFailed(message)) => Screen::Error { message },
            (Screen::Problems { worksheet }, FlowEvent::SelectProblem(id)) => {
                let problem = worksheet.problem(id).ok_or(FlowError::UnknownProblem(id))?;
                if problem.hints.is_empty() {
                    return Err(FlowError::NoHints(id));
                }
                Screen::Hints { worksheet: Arc::clone(worksheet), problem_id: id, step: 0 }
            }
            (Screen::Problems { .. }, FlowEvent::Retake) => {
                info!("Worksheet discarded for retake");
                Screen::Camera
            }
            (Screen::Hints { worksheet, problem_id, step }, FlowEvent::Next) => {
                let total = worksheet
                    .problem(*problem_id)
                    .map(|p| p.hints.len())
                    .unwrap_or(0);
                if step + 1 < total {
                    Screen::Hints {
                        worksheet: Arc::clone(worksheet),
                        problem_id: *problem_id,
                        step: step + 1,
                    }
                } else {
                    Screen::Complete { worksheet: Arc::clone(worksheet), problem_id: *problem_id }
                }
            }
            (Screen::Complete { worksheet, .. }, FlowEvent::BackToProblems) => Screen::Problems {
                worksheet: Arc::clone(worksheet),
            },
            (Screen::Error { .. }, FlowEvent::Retry) => Screen::Camera,
            _ => return Err(FlowError::InvalidTransition { from, event: label }),
        };

        debug!(from = %from, to = %next.kind(), "screen transition");
        self.screen = next;
        Ok(&self.screen)
    }
}
