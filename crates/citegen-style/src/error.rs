//! Error types for style metadata parsing and loading.

use thiserror::Error;

/// Result type alias for citegen-style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a style definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The source is not well-formed XML.
    #[error("XML syntax error at byte {position}: {message}")]
    XmlSyntax { message: String, position: u64 },

    /// The source contains no root element at all.
    #[error("no root element found; expected <style>")]
    MissingRoot,

    /// The root element is something other than `<style>`.
    #[error("root element must be <style>, found <{found}>")]
    InvalidRootElement { found: String },

    /// A required attribute is missing.
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// An attribute has a value outside its closed vocabulary.
    #[error("<{element}> attribute '{attribute}' has invalid value '{value}' (expected {expected})")]
    InvalidAttributeValue {
        element: String,
        attribute: String,
        value: String,
        expected: String,
    },

    /// A required child element is missing.
    #[error("<{parent}> is missing required element <{element}>")]
    MissingElement { parent: String, element: String },

    /// A caller-supplied loader failed to produce a style source.
    #[error("failed to load style '{name}': {message}")]
    Load { name: String, message: String },
}

impl Error {
    /// Stable error code for log correlation.
    ///
    /// Style errors use CG-1-* codes (subsystem 1).
    pub fn code(&self) -> &'static str {
        match self {
            Error::XmlSyntax { .. } => "CG-1-1",
            Error::MissingRoot => "CG-1-2",
            Error::InvalidRootElement { .. } => "CG-1-3",
            Error::MissingAttribute { .. } => "CG-1-4",
            Error::InvalidAttributeValue { .. } => "CG-1-5",
            Error::MissingElement { .. } => "CG-1-6",
            Error::Load { .. } => "CG-1-7",
        }
    }

    pub(crate) fn xml(err: impl std::fmt::Display, position: u64) -> Self {
        Error::XmlSyntax {
            message: err.to_string(),
            position,
        }
    }
}
