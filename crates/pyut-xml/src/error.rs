//! Error types for the PyUT persistence layer.
//!
//! - [`LoadError`] covers reading: XML syntax, format version, references
//!   and required attributes.
//! - [`SaveError`] covers writing: dangling in-memory references and XML
//!   output failures.
//!
//! Both classify themselves with an [`ErrorCode`] so that front ends can
//! report a stable code next to the message.
//!
//! # Example
//!
//! ```
//! # use pyut_xml::error::{ErrorCode, LoadError};
//! let err = LoadError::FormatVersion { expected: 8, found: "5".to_string() };
//! assert_eq!(err.code(), ErrorCode::E100);
//! ```

mod error_code;
mod load_error;
mod save_error;

pub use error_code::ErrorCode;
pub use load_error::LoadError;
pub use save_error::SaveError;
