use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HintError;

/// Arithmetic operations a worksheet problem can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Addition,
    Subtraction,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = HintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "addition" => Ok(Operation::Addition),
            "subtraction" => Ok(Operation::Subtraction),
            other => Err(HintError::UnsupportedOperation(other.to_string())),
        }
    }
}

/// A problem read off the worksheet, ready for hint generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArithmeticProblem {
    operation: Operation,
    operands: Vec<u32>,
    subject: String,
}

impl ArithmeticProblem {
    /// The subject is stored trimmed, so captions and lookups agree.
    pub fn new(operation: Operation, operands: Vec<u32>, subject: impl Into<String>) -> Self {
        Self {
            operation,
            operands,
            subject: subject.into().trim().to_string(),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn operands(&self) -> &[u32] {
        &self.operands
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The first two operands. Anything after them is ignored.
    pub fn operand_pair(&self) -> Result<(u32, u32), HintError> {
        match self.operands.as_slice() {
            [first, second, ..] => Ok((*first, *second)),
            other => Err(HintError::invalid(format!(
                "expected at least two numbers, got {}",
                other.len()
            ))),
        }
    }
}

/// Symbol drawn for each counted item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Icon {
    Strawberry,
    Child,
    Apple,
    Orange,
    Banana,
    Ball,
    Dog,
    Cat,
    Car,
    /// Neutral fallback for anything unmapped
    Circle,
}

impl Icon {
    pub const ALL: [Icon; 10] = [
        Icon::Strawberry,
        Icon::Child,
        Icon::Apple,
        Icon::Orange,
        Icon::Banana,
        Icon::Ball,
        Icon::Dog,
        Icon::Cat,
        Icon::Car,
        Icon::Circle,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Icon::Strawberry => "strawberry",
            Icon::Child => "child",
            Icon::Apple => "apple",
            Icon::Orange => "orange",
            Icon::Banana => "banana",
            Icon::Ball => "ball",
            Icon::Dog => "dog",
            Icon::Cat => "cat",
            Icon::Car => "car",
            Icon::Circle => "circle",
        }
    }

    /// Resolve a wire id. Unknown ids fall back to `Circle`.
    pub fn from_id(id: &str) -> Icon {
        Icon::ALL
            .into_iter()
            .find(|icon| icon.id() == id)
            .unwrap_or(Icon::Circle)
    }

    /// Emoji rendered by the presentation layer
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Strawberry => "🍓",
            Icon::Child => "🧒",
            Icon::Apple => "🍎",
            Icon::Orange => "🍊",
            Icon::Banana => "🍌",
            Icon::Ball => "⚽",
            Icon::Dog => "🐶",
            Icon::Cat => "🐱",
            Icon::Car => "🚗",
            Icon::Circle => "⚪",
        }
    }
}

impl From<String> for Icon {
    fn from(id: String) -> Self {
        Icon::from_id(&id)
    }
}

impl From<Icon> for String {
    fn from(icon: Icon) -> Self {
        icon.id().to_string()
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// How a token is drawn within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenState {
    #[serde(rename = "normal")]
    Normal,
    /// Taken away; kept in place and greyed out
    #[serde(rename = "eaten")]
    Removed,
    #[serde(rename = "new")]
    Added,
}

/// One countable item on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualToken {
    #[serde(rename = "src")]
    pub icon: Icon,
    pub state: TokenState,
    #[serde(rename = "sparkle", default, skip_serializing_if = "std::ops::Not::not")]
    pub emphasize: bool,
}

impl VisualToken {
    pub fn normal(icon: Icon) -> Self {
        Self { icon, state: TokenState::Normal, emphasize: false }
    }

    pub fn removed(icon: Icon) -> Self {
        Self { icon, state: TokenState::Removed, emphasize: false }
    }

    /// Newly arrived items are always emphasized
    pub fn added(icon: Icon) -> Self {
        Self { icon, state: TokenState::Added, emphasize: true }
    }
}

/// One step of the walkthrough: a caption over a row of tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FrameWire", into = "FrameWire")]
pub struct HintFrame {
    pub step: u32,
    pub caption: String,
    pub tokens: Vec<VisualToken>,
}

impl HintFrame {
    pub fn count(&self, state: TokenState) -> usize {
        self.tokens.iter().filter(|t| t.state == state).count()
    }
}

#[derive(Serialize, Deserialize)]
struct FrameWire {
    step: u32,
    visual: VisualWire,
    text: String,
}

#[derive(Serialize, Deserialize)]
struct VisualWire {
    #[serde(rename = "type")]
    kind: VisualKind,
    items: Vec<VisualToken>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum VisualKind {
    Images,
}

impl From<HintFrame> for FrameWire {
    fn from(frame: HintFrame) -> Self {
        FrameWire {
            step: frame.step,
            visual: VisualWire { kind: VisualKind::Images, items: frame.tokens },
            text: frame.caption,
        }
    }
}

impl From<FrameWire> for HintFrame {
    fn from(wire: FrameWire) -> Self {
        HintFrame {
            step: wire.step,
            caption: wire.text,
            tokens: wire.visual.items,
        }
    }
}
