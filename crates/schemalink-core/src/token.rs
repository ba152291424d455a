//! Text tokens as reported by the host document reader.

use crate::geometry::BBox;

/// A literal text token with its bounding box, as reported by the host
/// document reader. No layout inference is performed on top of these.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The token's literal text.
    pub text: String,
    /// Bounding box in top-left-origin page space.
    pub bbox: BBox,
}

impl Token {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// One page's extractable content: dimensions, running text, and positioned
/// tokens. Tokens are expected in reading order; occurrence disambiguation
/// during extraction relies on that order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageContent {
    /// Page width in page units.
    pub width: f64,
    /// Page height in page units.
    pub height: f64,
    /// Full page text, used for pattern matching and context windows.
    pub text: String,
    /// Positioned tokens, used to resolve matches to rectangles.
    pub tokens: Vec<Token>,
}

impl PageContent {
    pub fn new(width: f64, height: f64, text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            width,
            height,
            text: text.into(),
            tokens,
        }
    }
}
