//! The style-processor seam.
//!
//! Rendering a style definition is delegated to an external processor. It
//! receives normalized [`VariableMap`]s whose values are markup-safe, inserts
//! the values verbatim, and emits HTML-like markup: one fragment for a citation, one fragment per item
//! for a bibliography. The output formatter turns that markup into the
//! caller's encoding.

use crate::types::RenderMode;
use crate::variable::VariableMap;

/// The style definition could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse citation style: {message}")]
pub struct StyleParseError {
    pub message: String,
}

impl StyleParseError {
    pub fn new(message: impl Into<String>) -> Self {
        StyleParseError {
            message: message.into(),
        }
    }
}

/// Renders items with a style definition.
pub trait StyleProcessor {
    /// Render `items` in order. In [`RenderMode::Bibliography`] the result
    /// has one fragment per item; in [`RenderMode::Citation`] it has exactly
    /// one fragment.
    fn render(
        &self,
        items: &[VariableMap],
        style_source: &str,
        mode: RenderMode,
    ) -> Result<Vec<String>, StyleParseError>;
}

impl<T: StyleProcessor + ?Sized> StyleProcessor for &T {
    fn render(
        &self,
        items: &[VariableMap],
        style_source: &str,
        mode: RenderMode,
    ) -> Result<Vec<String>, StyleParseError> {
        (**self).render(items, style_source, mode)
    }
}

impl<T: StyleProcessor + ?Sized> StyleProcessor for Box<T> {
    fn render(
        &self,
        items: &[VariableMap],
        style_source: &str,
        mode: RenderMode,
    ) -> Result<Vec<String>, StyleParseError> {
        (**self).render(items, style_source, mode)
    }
}
