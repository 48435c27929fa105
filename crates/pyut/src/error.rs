//! Error types for PyUT project files.
//!
//! [`PyutError`] wraps everything that can go wrong when saving or loading
//! a project through [`ProjectStore`](crate::ProjectStore).

use std::io;

use thiserror::Error;

use pyut_xml::error::{ErrorCode, LoadError, SaveError};

/// The main error type for PyUT operations.
#[derive(Debug, Error)]
pub enum PyutError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PyutError {
    /// The persistence [`ErrorCode`], if this error comes from the XML layer.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Load(err) => Some(err.code()),
            Self::Save(err) => Some(err.code()),
            Self::Io(_) | Self::Config(_) => None,
        }
    }
}
