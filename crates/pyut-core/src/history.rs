//! Undoable edits of a canvas.
//!
//! A [`Command`] records what it removed when it runs so that `undo` can put
//! the same entities back with their original ids. [`History`] keeps the
//! undo and redo stacks and refreshes the canvas after every step.
//!
//! # Example
//!
//! ```
//! # use pyut_core::{
//! #     canvas::Canvas,
//! #     document::{DiagramType, Document},
//! #     geometry::{Point, Size},
//! #     history::{DeleteNode, History},
//! #     identifier::EntityId,
//! #     model::Class,
//! #     shape::{Node, ShapeKind, VisualEntity},
//! # };
//! let mut document = Document::new(DiagramType::Class);
//! for (id, name) in [(1, "Animal"), (2, "Dog")] {
//!     let class = Node::new(Class::new(EntityId::new(id), name), Size::new(80.0, 40.0));
//!     document.add_shape(VisualEntity::Class(class), Point::default()).unwrap();
//! }
//! document.create_inheritance_link(EntityId::new(2), EntityId::new(1)).unwrap();
//!
//! let mut history = History::default();
//! history.execute(&mut document, DeleteNode::new(EntityId::new(1))).unwrap();
//! assert_eq!(document.count(ShapeKind::Link), 0);
//!
//! history.undo(&mut document).unwrap();
//! assert_eq!(document.count(ShapeKind::Class), 2);
//! assert_eq!(document.count(ShapeKind::Link), 1);
//! ```

use std::fmt;

use log::{debug, warn};

use crate::{
    canvas::{Canvas, CanvasError},
    identifier::EntityId,
    shape::VisualEntity,
};

/// An edit that can be applied to a canvas and reverted.
pub trait Command: fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Applies the edit.
    ///
    /// # Errors
    ///
    /// Returns the [`CanvasError`] that stopped the edit. The canvas is
    /// left unchanged in that case.
    fn execute(&mut self, canvas: &mut dyn Canvas) -> Result<(), CanvasError>;

    /// Reverts the last [`Command::execute`].
    ///
    /// # Errors
    ///
    /// Returns the [`CanvasError`] that stopped the restore.
    fn undo(&mut self, canvas: &mut dyn Canvas) -> Result<(), CanvasError>;
}

/// Deletes one link or message.
///
/// Undo puts the connector back between the same endpoints with its id,
/// anchors, control points and labels.
#[derive(Debug)]
pub struct DeleteLink {
    link: EntityId,
    removed: Option<VisualEntity>,
}

impl DeleteLink {
    pub fn new(link: EntityId) -> Self {
        Self {
            link,
            removed: None,
        }
    }
}

impl Command for DeleteLink {
    fn name(&self) -> &'static str {
        "delete link"
    }

    fn execute(&mut self, canvas: &mut dyn Canvas) -> Result<(), CanvasError> {
        let shape = canvas
            .uml_object_by_id(self.link)
            .ok_or(CanvasError::UnknownEntity(self.link))?;
        if shape.endpoints().is_none() {
            return Err(CanvasError::UnexpectedKind {
                id: self.link,
                kind: shape.kind(),
                expected: "link or message",
            });
        }

        self.removed = canvas.remove_shape(self.link)?.into_iter().next();
        Ok(())
    }

    fn undo(&mut self, canvas: &mut dyn Canvas) -> Result<(), CanvasError> {
        let Some(shape) = self.removed.take() else {
            warn!(id:% = self.link; "Nothing to restore");
            return Ok(());
        };
        restore(canvas, vec![shape]).map_err(|(err, rest)| {
            self.removed = rest.into_iter().next();
            err
        })
    }
}

/// Deletes a node together with the links and messages attached to it.
///
/// Undo puts the node back at its old position, then every removed
/// connector. Restored entities are drawn last.
#[derive(Debug)]
pub struct DeleteNode {
    node: EntityId,
    removed: Vec<VisualEntity>,
}

impl DeleteNode {
    pub fn new(node: EntityId) -> Self {
        Self {
            node,
            removed: Vec::new(),
        }
    }
}

impl Command for DeleteNode {
    fn name(&self) -> &'static str {
        "delete node"
    }

    fn execute(&mut self, canvas: &mut dyn Canvas) -> Result<(), CanvasError> {
        let shape = canvas
            .uml_object_by_id(self.node)
            .ok_or(CanvasError::UnknownEntity(self.node))?;
        if shape.endpoints().is_some() {
            return Err(CanvasError::UnexpectedKind {
                id: self.node,
                kind: shape.kind(),
                expected: "node",
            });
        }

        self.removed = canvas.remove_shape(self.node)?;
        debug!(id:% = self.node, connectors = self.removed.len().saturating_sub(1); "Node deleted");
        Ok(())
    }

    fn undo(&mut self, canvas: &mut dyn Canvas) -> Result<(), CanvasError> {
        let removed = std::mem::take(&mut self.removed);
        if removed.is_empty() {
            warn!(id:% = self.node; "Nothing to restore");
            return Ok(());
        }
        restore(canvas, removed).map_err(|(err, rest)| {
            self.removed = rest;
            err
        })
    }
}

/// Places `shapes` back in order. On failure the shapes not yet placed
/// are handed back with the error so a later undo can retry.
fn restore(
    canvas: &mut dyn Canvas,
    shapes: Vec<VisualEntity>,
) -> Result<(), (CanvasError, Vec<VisualEntity>)> {
    let mut shapes = shapes.into_iter();
    while let Some(shape) = shapes.next() {
        if let Err(err) = restorable(&*canvas, &shape) {
            let mut rest = vec![shape];
            rest.extend(shapes);
            return Err((err, rest));
        }
        let position = shape.position().unwrap_or_default();
        canvas
            .add_shape(shape, position)
            .map_err(|err| (err, shapes.by_ref().collect()))?;
    }
    Ok(())
}

/// A shape can go back if its id is free and, for a connector, both
/// endpoints are on the canvas again.
fn restorable(canvas: &dyn Canvas, shape: &VisualEntity) -> Result<(), CanvasError> {
    if canvas.uml_object_by_id(shape.id()).is_some() {
        return Err(CanvasError::DuplicateId(shape.id()));
    }
    if let Some((source, destination)) = shape.endpoints() {
        for endpoint in [source, destination] {
            if canvas.uml_object_by_id(endpoint).is_none() {
                return Err(CanvasError::UnknownEntity(endpoint));
            }
        }
    }
    Ok(())
}

/// Undo and redo stacks of executed commands.
#[derive(Debug, Default)]
pub struct History {
    done: Vec<Box<dyn Command>>,
    undone: Vec<Box<dyn Command>>,
}

impl History {
    /// Runs `command` and records it for undo. Clears the redo stack.
    ///
    /// # Errors
    ///
    /// Returns the command's error; nothing is recorded then.
    pub fn execute(
        &mut self,
        canvas: &mut dyn Canvas,
        command: impl Command + 'static,
    ) -> Result<(), CanvasError> {
        let mut command: Box<dyn Command> = Box::new(command);
        command.execute(canvas)?;
        debug!(command = command.name(); "Command executed");
        self.done.push(command);
        self.undone.clear();
        canvas.refresh();
        Ok(())
    }

    /// Reverts the most recent command. Returns `false` if there is none.
    ///
    /// # Errors
    ///
    /// Returns the command's error; the command stays on the undo stack.
    pub fn undo(&mut self, canvas: &mut dyn Canvas) -> Result<bool, CanvasError> {
        let Some(mut command) = self.done.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.undo(canvas) {
            self.done.push(command);
            return Err(err);
        }
        debug!(command = command.name(); "Command undone");
        self.undone.push(command);
        canvas.refresh();
        Ok(true)
    }

    /// Runs the most recently undone command again. Returns `false` if
    /// there is none.
    ///
    /// # Errors
    ///
    /// Returns the command's error; the command stays on the redo stack.
    pub fn redo(&mut self, canvas: &mut dyn Canvas) -> Result<bool, CanvasError> {
        let Some(mut command) = self.undone.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.execute(canvas) {
            self.undone.push(command);
            return Err(err);
        }
        debug!(command = command.name(); "Command redone");
        self.done.push(command);
        canvas.refresh();
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }
}
