//! Notes, actors and use cases.
//!
//! These three entities share the same shape: an id, a name and the source
//! file they were created from.

use crate::identifier::EntityId;

/// A free-text note. The name may span several lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    id: EntityId,
    name: String,
    filename: String,
}

impl Note {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            filename: String::new(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// A use-case diagram actor.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    id: EntityId,
    name: String,
    filename: String,
}

impl Actor {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            filename: String::new(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// A use case.
#[derive(Debug, Clone, PartialEq)]
pub struct UseCase {
    id: EntityId,
    name: String,
    filename: String,
}

impl UseCase {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            filename: String::new(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}
