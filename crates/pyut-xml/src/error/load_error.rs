//! Errors raised while loading a project.

use thiserror::Error;

use pyut_core::{canvas::CanvasError, identifier::EntityId};

use crate::error::ErrorCode;

/// A fatal problem found while reading a project file.
///
/// Tolerated defaults for optional attributes never produce a `LoadError`;
/// only required ids, type discriminators and structure do.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("malformed XML: {0}")]
    Syntax(String),

    #[error("missing <{child}> element in <{parent}>")]
    MissingElement { parent: String, child: &'static str },

    #[error("this is version {expected} and the file version is {found}")]
    FormatVersion { expected: u32, found: String },

    #[error("attribute `{attribute}` of <{element}> references id {id}, which is not a loaded {expected}")]
    ReferenceResolution {
        element: &'static str,
        attribute: &'static str,
        id: EntityId,
        expected: &'static str,
    },

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error("attribute `{attribute}` of <{element}> has malformed value {value:?}")]
    MalformedAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },
}

impl LoadError {
    /// The [`ErrorCode`] classifying this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Syntax(_) => ErrorCode::E001,
            Self::MissingElement { .. } => ErrorCode::E002,
            Self::FormatVersion { .. } => ErrorCode::E100,
            Self::ReferenceResolution { .. } => ErrorCode::E200,
            Self::Canvas(_) => ErrorCode::E201,
            Self::MalformedAttribute { .. } => ErrorCode::E300,
            Self::MissingAttribute { .. } => ErrorCode::E301,
        }
    }
}
