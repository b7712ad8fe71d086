//! Error types for citation generation.

use thiserror::Error;

use crate::processor::StyleParseError;
use crate::types::RenderMode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    StyleParse(#[from] StyleParseError),

    #[error("style processor returned {found} {mode} fragments for {expected} items")]
    EntryCountMismatch {
        mode: RenderMode,
        expected: usize,
        found: usize,
    },
}

impl Error {
    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::StyleParse(_) => "CG-2-1",
            Error::EntryCountMismatch { .. } => "CG-2-2",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
