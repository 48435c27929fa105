//! Errors raised while saving a project.

use thiserror::Error;

use pyut_core::{identifier::EntityId, shape::ShapeKind};

use crate::error::ErrorCode;

/// A failure that aborts a save. The partially built document is dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaveError {
    #[error("{kind} {id} in document {document} references entity {target}, which is not in the document")]
    DanglingReference {
        document: usize,
        id: EntityId,
        kind: ShapeKind,
        target: EntityId,
    },

    #[error("failed to write XML: {0}")]
    Write(String),
}

impl SaveError {
    /// The [`ErrorCode`] classifying this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DanglingReference { .. } => ErrorCode::E400,
            Self::Write(_) => ErrorCode::E401,
        }
    }
}
