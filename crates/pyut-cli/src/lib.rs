//! CLI logic for the PyUT project tool.
//!
//! This module contains the core CLI logic: inspecting a project file and
//! re-saving it in the current format.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::fmt;

use log::info;

use pyut::{ProjectStore, PyutError, project::Project, shape::ShapeKind};

/// Kinds listed by [`summarize`], in display order.
const SUMMARY_KINDS: [ShapeKind; 7] = [
    ShapeKind::Class,
    ShapeKind::Note,
    ShapeKind::Actor,
    ShapeKind::UseCase,
    ShapeKind::Link,
    ShapeKind::SdInstance,
    ShapeKind::SdMessage,
];

/// Run the PyUT CLI application
///
/// # Errors
///
/// Returns `PyutError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Load errors (malformed XML, version mismatch, unresolved references)
/// - Save errors
pub fn run(args: &Args) -> Result<(), PyutError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let store = ProjectStore::new(app_config);

    match &args.command {
        Command::Inspect { file } => {
            info!(input_path = file; "Inspecting project");
            let project = store.load_from_path(file)?;
            print!("{}", Summary(&project));
        }
        Command::Resave { input, output } => {
            let output = output
                .as_deref()
                .unwrap_or_else(|| store.config().project().default_filename());
            info!(input_path = input, output_path = output; "Re-saving project");
            let project = store.load_from_path(input)?;
            store.save_to_path(&project, output)?;
            info!(output_file = output; "Project saved successfully");
        }
    }

    Ok(())
}

/// Human-readable overview of a project: one block per document with the
/// number of entities of each kind.
pub fn summarize(project: &Project) -> String {
    Summary(project).to_string()
}

struct Summary<'a>(&'a Project);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Code path: {}", self.0.code_path())?;

        for (index, document) in self.0.documents().iter().enumerate() {
            writeln!(
                f,
                "Document {}: {} ({} entities)",
                index + 1,
                document.diagram_type().label(),
                document.len()
            )?;
            for kind in SUMMARY_KINDS {
                let count = document.count(kind);
                if count > 0 {
                    writeln!(f, "  {kind}: {count}")?;
                }
            }
        }

        Ok(())
    }
}
