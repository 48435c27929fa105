//! Error codes for the PyUT persistence layer.
//!
//! Error codes are organized by phase:
//! - `E0xx` - XML syntax errors
//! - `E1xx` - File format errors
//! - `E2xx` - Reference resolution errors
//! - `E3xx` - Attribute errors
//! - `E4xx` - Save errors

use std::fmt;

/// Error codes for categorizing load and save failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // XML Errors (E0xx)
    // =========================================================================
    /// Malformed XML.
    ///
    /// The input is not well-formed XML: unclosed or mismatched tags, bad
    /// escapes, or no root element.
    E001,

    /// Missing element.
    ///
    /// An element required by the file format is absent, such as the data
    /// element nested in a `Graphic*` element.
    E002,

    // =========================================================================
    // Format Errors (E1xx)
    // =========================================================================
    /// Unsupported format version.
    ///
    /// The `version` attribute of `PyutProject` differs from the version this
    /// loader writes. Files are not migrated between versions.
    E100,

    // =========================================================================
    // Reference Errors (E2xx)
    // =========================================================================
    /// Unresolved reference.
    ///
    /// A link or message refers to an id that was not loaded before it.
    E200,

    /// Canvas rejected an entity.
    ///
    /// The canvas refused a placement, usually because of a duplicate id.
    E201,

    // =========================================================================
    // Attribute Errors (E3xx)
    // =========================================================================
    /// Malformed required attribute.
    ///
    /// An id or type discriminator could not be parsed.
    E300,

    /// Missing required attribute.
    E301,

    // =========================================================================
    // Save Errors (E4xx)
    // =========================================================================
    /// Dangling reference.
    ///
    /// A link or message in memory refers to an entity that is not part of
    /// its document.
    E400,

    /// XML write failure.
    E401,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E400 => "E400",
            ErrorCode::E401 => "E401",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed XML",
            ErrorCode::E002 => "missing element",
            ErrorCode::E100 => "unsupported format version",
            ErrorCode::E200 => "unresolved reference",
            ErrorCode::E201 => "canvas rejected entity",
            ErrorCode::E300 => "malformed attribute",
            ErrorCode::E301 => "missing attribute",
            ErrorCode::E400 => "dangling reference",
            ErrorCode::E401 => "XML write failure",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
