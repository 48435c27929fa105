//! The top-level persisted container.

use crate::document::{DiagramType, Document};

/// A source-code path plus an ordered list of documents.
///
/// # Examples
///
/// ```
/// use pyut_core::{document::DiagramType, project::Project};
///
/// let mut project = Project::new("/src/zoo");
/// project.new_document(DiagramType::Class);
/// project.new_document(DiagramType::Sequence);
///
/// assert_eq!(project.documents().len(), 2);
/// assert_eq!(project.documents()[1].diagram_type(), DiagramType::Sequence);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Project {
    code_path: String,
    documents: Vec<Document>,
}

impl Project {
    pub fn new(code_path: impl Into<String>) -> Self {
        Self {
            code_path: code_path.into(),
            documents: Vec::new(),
        }
    }

    pub fn code_path(&self) -> &str {
        &self.code_path
    }

    pub fn set_code_path(&mut self, code_path: impl Into<String>) {
        self.code_path = code_path.into();
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Appends an empty document of `diagram_type` and returns it.
    pub fn new_document(&mut self, diagram_type: DiagramType) -> &mut Document {
        self.documents.push(Document::new(diagram_type));
        let last = self.documents.len() - 1;
        &mut self.documents[last]
    }

    pub fn document_mut(&mut self, index: usize) -> Option<&mut Document> {
        self.documents.get_mut(index)
    }
}
