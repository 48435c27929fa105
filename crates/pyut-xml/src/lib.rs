//! PyUT XML - versioned persistence for PyUT projects.
//!
//! A [`Project`](pyut_core::project::Project) is written as a single XML
//! document rooted at `PyutProject` and read back through the
//! [`Canvas`](pyut_core::canvas::Canvas) interface.
//!
//! - [`serialize`] walks a project into an [`XmlDocument`]. Entity ids are
//!   renumbered from 1 with a fresh registry on every call.
//! - [`deserialize`] checks the format version and rebuilds each document,
//!   resolving link and message endpoints against entities already loaded.
//! - [`attr`] holds the lenient decoding rules for optional attributes.
//!
//! # Example
//!
//! ```
//! use pyut_core::{document::DiagramType, project::Project};
//! use pyut_xml::{WriteOptions, XmlDocument};
//!
//! let mut project = Project::new("/src");
//! project.new_document(DiagramType::Class);
//!
//! let text = pyut_xml::serialize(&project)?.to_xml_string(&WriteOptions::default())?;
//!
//! let mut loaded = Project::default();
//! pyut_xml::deserialize(&XmlDocument::parse(&text)?, &mut loaded)?;
//! assert_eq!(loaded.code_path(), "/src");
//! assert_eq!(loaded.documents().len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod attr;
pub mod error;
pub mod schema;

mod deserialize;
mod serialize;
mod tree;

pub use deserialize::{deserialize, load_document};
pub use serialize::serialize;
pub use tree::{Element, WriteOptions, XmlDocument};

/// Version written to, and required from, the root `version` attribute.
pub const FORMAT_VERSION: u32 = 8;
