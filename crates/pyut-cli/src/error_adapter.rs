//! Error adapter for converting PyutError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Load and save
//! errors carry a persistence [`ErrorCode`](pyut::ErrorCode) which becomes the
//! diagnostic code; its description becomes the help text.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use pyut::PyutError;

/// Adapter for a [`PyutError`].
pub struct ErrorAdapter<'a>(pub &'a PyutError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if let Some(code) = self.0.code() {
            return Some(Box::new(code));
        }
        let code = match &self.0 {
            PyutError::Io(_) => "pyut::io",
            PyutError::Config(_) => "pyut::config",
            PyutError::Load(_) | PyutError::Save(_) => return None,
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0
            .code()
            .map(|code| Box::new(code.description()) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use pyut::{FORMAT_VERSION, identifier::EntityId, shape::ShapeKind};
    use pyut_xml::error::{LoadError, SaveError};

    use super::*;

    #[test]
    fn test_load_error_uses_error_code() {
        let err = PyutError::Load(LoadError::FormatVersion {
            expected: FORMAT_VERSION,
            found: "7".to_string(),
        });
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "E100");
        assert!(adapter.help().is_some());
        assert_eq!(
            adapter.to_string(),
            "this is version 8 and the file version is 7"
        );
    }

    #[test]
    fn test_save_error_uses_error_code() {
        let err = PyutError::Save(SaveError::DanglingReference {
            document: 0,
            id: EntityId::new(3),
            kind: ShapeKind::Link,
            target: EntityId::new(9),
        });
        assert_eq!(ErrorAdapter(&err).code().unwrap().to_string(), "E400");
    }

    #[test]
    fn test_io_error_has_namespace_code() {
        let err = PyutError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "pyut::io");
        assert!(adapter.help().is_none());
        assert_eq!(adapter.to_string(), "I/O error: gone");
    }

    #[test]
    fn test_config_error_has_namespace_code() {
        let err = PyutError::Config("bad".to_string());
        assert_eq!(ErrorAdapter(&err).code().unwrap().to_string(), "pyut::config");
    }
}
