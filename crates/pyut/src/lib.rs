//! PyUT - saving and loading UML diagram projects.
//!
//! A project holds class, use-case and sequence diagrams. This crate ties
//! the in-memory model of [`pyut_core`] to the versioned XML format of
//! [`pyut_xml`] behind a single [`ProjectStore`].

pub mod config;

mod error;
mod notifier;

pub use pyut_core::{canvas, document, geometry, history, identifier, model, project, shape};
pub use pyut_xml::{FORMAT_VERSION, error::ErrorCode};

pub use error::PyutError;
pub use notifier::{LogNotifier, Notifier};

use std::{fs, path::Path};

use log::{debug, error, info};

use pyut_xml::XmlDocument;

use config::AppConfig;
use project::Project;

/// Saves projects to XML and loads them back.
///
/// Every failure is logged, reported once through the [`Notifier`] and
/// then returned. A load either yields a complete project or an error.
///
/// # Examples
///
/// ```rust
/// use pyut::{ProjectStore, document::DiagramType, project::Project};
///
/// let mut project = Project::new("/src");
/// project.new_document(DiagramType::Sequence);
///
/// let store = ProjectStore::default();
/// let text = store.save(&project).expect("Failed to save");
/// let loaded = store.load(&text).expect("Failed to load");
/// assert_eq!(loaded.documents().len(), 1);
/// ```
pub struct ProjectStore {
    config: AppConfig,
    notifier: Box<dyn Notifier>,
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl ProjectStore {
    /// Create a store that writes XML as described by `config`.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            notifier: Box::new(LogNotifier),
        }
    }

    /// Replace the default [`LogNotifier`].
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render `project` as XML text.
    ///
    /// # Errors
    ///
    /// Returns [`PyutError::Save`] if the project holds a dangling link or
    /// message, or if the XML cannot be written.
    pub fn save(&self, project: &Project) -> Result<String, PyutError> {
        info!(documents = project.documents().len(); "Saving project");

        let text = pyut_xml::serialize(project)
            .and_then(|xml| xml.to_xml_string(&self.config.writer().write_options()))
            .map_err(|err| self.save_failed(err.into()))?;

        debug!(bytes = text.len(); "Project saved");
        Ok(text)
    }

    /// Save `project` to the file at `path`.
    ///
    /// Nothing is written unless the whole project serialized.
    ///
    /// # Errors
    ///
    /// Same as [`ProjectStore::save`], plus [`PyutError::Io`].
    pub fn save_to_path(&self, project: &Project, path: impl AsRef<Path>) -> Result<(), PyutError> {
        let path = path.as_ref();
        let text = self.save(project)?;
        fs::write(path, text).map_err(|err| self.save_failed(err.into()))?;
        info!(path:? = path; "Project written");
        Ok(())
    }

    /// Load a project from XML text.
    ///
    /// # Errors
    ///
    /// Returns [`PyutError::Load`] for malformed XML, an unsupported format
    /// version, an unresolved reference or a missing required attribute.
    pub fn load(&self, text: &str) -> Result<Project, PyutError> {
        info!(bytes = text.len(); "Loading project");

        let mut project = Project::default();
        XmlDocument::parse(text)
            .and_then(|xml| pyut_xml::deserialize(&xml, &mut project))
            .map_err(|err| self.load_failed(err.into()))?;

        Ok(project)
    }

    /// Load a project from the file at `path`.
    ///
    /// # Errors
    ///
    /// Same as [`ProjectStore::load`], plus [`PyutError::Io`].
    pub fn load_from_path(&self, path: impl AsRef<Path>) -> Result<Project, PyutError> {
        let path = path.as_ref();
        info!(path:? = path; "Reading project file");
        let text = fs::read_to_string(path).map_err(|err| self.load_failed(err.into()))?;
        self.load(&text)
    }

    fn save_failed(&self, err: PyutError) -> PyutError {
        error!(err:% = err; "Cannot save project");
        self.notifier.notify("Can't save file");
        err
    }

    fn load_failed(&self, err: PyutError) -> PyutError {
        error!(err:% = err; "Cannot load project");
        self.notifier.notify(&format!("Can't load file {err}"));
        err
    }
}
