//! The narrow canvas interface used when rebuilding a diagram.
//!
//! A loader never touches rendering. It places shapes and connects them
//! through [`Canvas`], then asks the canvas to refresh once at the end.
//! [`Document`](crate::document::Document) is the in-memory implementation.

use thiserror::Error;

use crate::{
    geometry::Point,
    identifier::EntityId,
    model::LinkType,
    shape::{LinkShape, ShapeKind, VisualEntity},
};

/// Reasons a canvas refuses an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("an entity with id {0} is already on the canvas")]
    DuplicateId(EntityId),

    #[error("no entity with id {0} is on the canvas")]
    UnknownEntity(EntityId),

    #[error("cannot connect a {connector} to {kind} {id}")]
    NotConnectable {
        id: EntityId,
        kind: ShapeKind,
        connector: ShapeKind,
    },

    #[error("entity {id} is a {kind}, expected a {expected}")]
    UnexpectedKind {
        id: EntityId,
        kind: ShapeKind,
        expected: &'static str,
    },

    #[error("no free entity id left on the canvas")]
    IdSpaceExhausted,
}

/// Operations a diagram surface offers to the persistence layer.
pub trait Canvas {
    /// Places `entity` with its top-left corner at `position`.
    ///
    /// Links and messages are attached to both of their endpoints, which
    /// must already be on the canvas; their own position is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::DuplicateId`] if the id is taken, or an
    /// endpoint error for links and messages. Links connect classes, notes,
    /// actors and use cases; messages connect sequence instances.
    fn add_shape(&mut self, entity: VisualEntity, position: Point) -> Result<EntityId, CanvasError>;

    /// Creates a link of `link_type` from `source` to `destination` with
    /// default geometry and returns it for further adjustment.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is missing or cannot take links
    /// (links, messages and sequence instances), or if no id is left.
    fn create_new_link(
        &mut self,
        source: EntityId,
        destination: EntityId,
        link_type: LinkType,
    ) -> Result<&mut LinkShape, CanvasError>;

    /// Creates an inheritance link from `child` to `parent`.
    ///
    /// # Errors
    ///
    /// Same as [`Canvas::create_new_link`].
    fn create_inheritance_link(
        &mut self,
        child: EntityId,
        parent: EntityId,
    ) -> Result<&mut LinkShape, CanvasError> {
        self.create_new_link(child, parent, LinkType::Inheritance)
    }

    /// Marks `id` as taken by an entity that will be added later, so that
    /// links created in the meantime do not claim it.
    fn reserve_id(&mut self, id: EntityId) {
        let _ = id;
    }

    /// Removes the entity with `id` together with every link and message
    /// attached to it. The entity itself is the first element returned,
    /// followed by the removed connectors in attachment order.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnknownEntity`] if nothing has that id.
    fn remove_shape(&mut self, id: EntityId) -> Result<Vec<VisualEntity>, CanvasError>;

    /// Looks up a placed entity by its permanent id.
    fn uml_object_by_id(&self, id: EntityId) -> Option<&VisualEntity>;

    /// Redraws the canvas.
    fn refresh(&mut self);
}
