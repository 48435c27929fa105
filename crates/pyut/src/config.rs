//! Configuration types for saving PyUT projects.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as a TOML file. Every field is optional.
//!
//! # Example
//!
//! ```
//! # use pyut::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.writer().indent(), 2);
//! assert!(config.writer().xml_declaration());
//! assert_eq!(config.project().default_filename(), "Untitled.put");
//! ```

use serde::Deserialize;

use pyut_xml::WriteOptions;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// XML output section.
    #[serde(default)]
    writer: WriterConfig,

    /// Project file section.
    #[serde(default)]
    project: ProjectConfig,
}

impl AppConfig {
    pub fn new(writer: WriterConfig) -> Self {
        Self {
            writer,
            project: ProjectConfig::default(),
        }
    }

    /// Returns the XML output configuration.
    pub fn writer(&self) -> &WriterConfig {
        &self.writer
    }

    /// Returns the project file configuration.
    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }
}

/// Settings for project files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// File name used when a project is saved without an explicit path.
    default_filename: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            default_filename: "Untitled.put".to_string(),
        }
    }
}

impl ProjectConfig {
    pub fn default_filename(&self) -> &str {
        &self.default_filename
    }
}

/// How saved XML text is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Spaces per nesting level. 0 writes the document on one line.
    indent: usize,

    /// Whether the `<?xml ...?>` declaration is written.
    xml_declaration: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            xml_declaration: true,
        }
    }
}

impl WriterConfig {
    pub fn new(indent: usize, xml_declaration: bool) -> Self {
        Self {
            indent,
            xml_declaration,
        }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn xml_declaration(&self) -> bool {
        self.xml_declaration
    }

    /// Options for [`XmlDocument::write_to`](pyut_xml::XmlDocument::write_to).
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            indent: self.indent,
            declaration: self.xml_declaration,
        }
    }
}
