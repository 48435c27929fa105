//! Diagrams ("documents") and their entity arena.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use log::{debug, trace};

use crate::{
    canvas::{Canvas, CanvasError},
    geometry::Point,
    identifier::EntityId,
    model::{Link, LinkType},
    shape::{LinkShape, ShapeKind, VisualEntity},
};

/// The kind of diagram a document holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DiagramType {
    Class,
    Sequence,
    UseCase,
    #[default]
    Unknown,
}

impl DiagramType {
    /// Title shown to users, e.g. `Class Diagram`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Class => "Class Diagram",
            Self::Sequence => "Sequence Diagram",
            Self::UseCase => "Use-Case Diagram",
            Self::Unknown => "Unknown Diagram",
        }
    }
}

impl FromStr for DiagramType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLASS_DIAGRAM" => Ok(Self::Class),
            "SEQUENCE_DIAGRAM" => Ok(Self::Sequence),
            "USECASE_DIAGRAM" => Ok(Self::UseCase),
            "UNKNOWN_DIAGRAM" => Ok(Self::Unknown),
            _ => Err("Unsupported diagram type"),
        }
    }
}

impl From<DiagramType> for &'static str {
    fn from(val: DiagramType) -> Self {
        match val {
            DiagramType::Class => "CLASS_DIAGRAM",
            DiagramType::Sequence => "SEQUENCE_DIAGRAM",
            DiagramType::UseCase => "USECASE_DIAGRAM",
            DiagramType::Unknown => "UNKNOWN_DIAGRAM",
        }
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).into())
    }
}

/// One diagram: a typed, ordered arena of visual entities keyed by id.
///
/// Insertion order is drawing order and is preserved by save/load.
#[derive(Debug, Clone)]
pub struct Document {
    diagram_type: DiagramType,
    shapes: IndexMap<EntityId, VisualEntity>,
    /// `None` once `u32::MAX` is taken.
    next_id: Option<u32>,
    refresh_count: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DiagramType::default())
    }
}

impl Document {
    pub fn new(diagram_type: DiagramType) -> Self {
        Self {
            diagram_type,
            shapes: IndexMap::new(),
            next_id: Some(1),
            refresh_count: 0,
        }
    }

    pub fn diagram_type(&self) -> DiagramType {
        self.diagram_type
    }

    /// Reserves a fresh id for an entity created interactively.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::IdSpaceExhausted`] once the largest id is taken.
    pub fn allocate_id(&mut self) -> Result<EntityId, CanvasError> {
        let next = self.next_id.ok_or(CanvasError::IdSpaceExhausted)?;
        self.next_id = next.checked_add(1);
        Ok(EntityId::new(next))
    }

    /// Visual entities in drawing order.
    pub fn shapes(&self) -> impl Iterator<Item = &VisualEntity> {
        self.shapes.values()
    }

    pub fn get(&self, id: EntityId) -> Option<&VisualEntity> {
        self.shapes.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.shapes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of entities of the given kind.
    pub fn count(&self, kind: ShapeKind) -> usize {
        self.shapes.values().filter(|shape| shape.kind() == kind).count()
    }

    /// How many times the document was asked to refresh.
    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }

    /// Checks that `id` is a node a connector of kind `connector` can attach to.
    fn endpoint(&self, id: EntityId, connector: ShapeKind) -> Result<&VisualEntity, CanvasError> {
        let shape = self.shapes.get(&id).ok_or(CanvasError::UnknownEntity(id))?;
        let accepted = match connector {
            ShapeKind::SdMessage => shape.kind().accepts_messages(),
            _ => shape.kind().accepts_links(),
        };
        if accepted {
            Ok(shape)
        } else {
            Err(CanvasError::NotConnectable {
                id,
                kind: shape.kind(),
                connector,
            })
        }
    }

    fn attach(&mut self, endpoint: EntityId, link: EntityId) {
        if let Some(shape) = self.shapes.get_mut(&endpoint) {
            shape.attach_link(link);
        }
    }

    fn detach(&mut self, endpoint: EntityId, link: EntityId) {
        if let Some(shape) = self.shapes.get_mut(&endpoint) {
            shape.detach_link(link);
        }
    }

    /// Takes an entity out of the arena. A link or message is also taken
    /// off both of its endpoints.
    fn take(&mut self, id: EntityId) -> Option<VisualEntity> {
        let shape = self.shapes.shift_remove(&id)?;
        if let Some((source, destination)) = shape.endpoints() {
            self.detach(source, id);
            self.detach(destination, id);
        }
        Some(shape)
    }

    fn reserve(&mut self, id: EntityId) {
        if self.next_id.is_some_and(|next| id.get() >= next) {
            self.next_id = id.get().checked_add(1);
        }
    }
}

impl Canvas for Document {
    fn add_shape(&mut self, mut entity: VisualEntity, position: Point) -> Result<EntityId, CanvasError> {
        let id = entity.id();
        if self.shapes.contains_key(&id) {
            return Err(CanvasError::DuplicateId(id));
        }

        if let Some((source, destination)) = entity.endpoints() {
            self.endpoint(source, entity.kind())?;
            self.endpoint(destination, entity.kind())?;
            self.attach(source, id);
            self.attach(destination, id);
        } else {
            entity.set_position(position);
        }

        trace!(id:% = id, kind:% = entity.kind(); "Shape added");
        self.reserve(id);
        self.shapes.insert(id, entity);
        Ok(id)
    }

    fn create_new_link(
        &mut self,
        source: EntityId,
        destination: EntityId,
        link_type: LinkType,
    ) -> Result<&mut LinkShape, CanvasError> {
        let source_anchor = self
            .endpoint(source, ShapeKind::Link)?
            .center()
            .unwrap_or_default();
        let destination_anchor = self
            .endpoint(destination, ShapeKind::Link)?
            .center()
            .unwrap_or_default();

        let id = self.allocate_id()?;
        if self.shapes.contains_key(&id) {
            return Err(CanvasError::DuplicateId(id));
        }

        let link = Link::new(id, link_type, source, destination);
        self.attach(source, id);
        self.attach(destination, id);
        self.shapes.insert(
            id,
            VisualEntity::Link(LinkShape::new(link, source_anchor, destination_anchor)),
        );
        debug!(id:% = id, link_type:% = link_type; "Link created");

        self.shapes
            .get_mut(&id)
            .and_then(VisualEntity::as_link_mut)
            .ok_or(CanvasError::UnknownEntity(id))
    }

    fn remove_shape(&mut self, id: EntityId) -> Result<Vec<VisualEntity>, CanvasError> {
        let mut shape = self.take(id).ok_or(CanvasError::UnknownEntity(id))?;
        let connectors = shape.attached_links().to_vec();
        for link in &connectors {
            shape.detach_link(*link);
        }

        let mut removed = vec![shape];
        removed.extend(connectors.into_iter().filter_map(|link| self.take(link)));

        debug!(id:% = id, cascaded = removed.len().saturating_sub(1); "Shape removed");
        Ok(removed)
    }

    fn reserve_id(&mut self, id: EntityId) {
        self.reserve(id);
    }

    fn uml_object_by_id(&self, id: EntityId) -> Option<&VisualEntity> {
        self.shapes.get(&id)
    }

    fn refresh(&mut self) {
        self.refresh_count += 1;
        trace!(shapes = self.shapes.len(); "Document refreshed");
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        geometry::Size,
        model::{Class, MessageEnd, Note, SdInstance, SdMessage},
        shape::{MessageShape, Node},
    };

    fn class(id: u32, name: &str) -> VisualEntity {
        VisualEntity::Class(Node::new(
            Class::new(EntityId::new(id), name),
            Size::new(80.0, 40.0),
        ))
    }

    #[test]
    fn test_diagram_type_tokens() {
        for diagram_type in [
            DiagramType::Class,
            DiagramType::Sequence,
            DiagramType::UseCase,
            DiagramType::Unknown,
        ] {
            let token: &'static str = diagram_type.into();
            assert_eq!(token.parse::<DiagramType>(), Ok(diagram_type));
        }
        assert!("2".parse::<DiagramType>().is_err());
    }

    #[test]
    fn test_add_shape_sets_position() {
        let mut document = Document::new(DiagramType::Class);
        let id = document
            .add_shape(class(1, "Animal"), Point::new(10.0, 10.0))
            .expect("shape should be placed");

        let position = document.get(id).and_then(VisualEntity::position).unwrap();
        assert_approx_eq!(f64, position.x(), 10.0);
        assert_approx_eq!(f64, position.y(), 10.0);
    }

    #[test]
    fn test_add_shape_rejects_duplicate_id() {
        let mut document = Document::new(DiagramType::Class);
        document.add_shape(class(1, "Animal"), Point::default()).unwrap();
        let err = document
            .add_shape(class(1, "Dog"), Point::default())
            .unwrap_err();
        assert_eq!(err, CanvasError::DuplicateId(EntityId::new(1)));
    }

    #[test]
    fn test_allocate_id_skips_loaded_ids() {
        let mut document = Document::new(DiagramType::Class);
        document.add_shape(class(7, "Animal"), Point::default()).unwrap();
        assert_eq!(document.allocate_id(), Ok(EntityId::new(8)));
        assert_eq!(document.allocate_id(), Ok(EntityId::new(9)));
    }

    #[test]
    fn test_create_new_link_attaches_endpoints() {
        let mut document = Document::new(DiagramType::Class);
        document.add_shape(class(1, "Animal"), Point::new(10.0, 10.0)).unwrap();
        document.add_shape(class(2, "Dog"), Point::new(10.0, 120.0)).unwrap();

        let link_id = {
            let link = document
                .create_inheritance_link(EntityId::new(2), EntityId::new(1))
                .expect("link should be created");
            assert_eq!(link.model().link_type(), LinkType::Inheritance);
            assert_approx_eq!(f64, link.source_anchor().y(), 140.0);
            assert_approx_eq!(f64, link.destination_anchor().y(), 30.0);
            link.model().id()
        };

        assert_eq!(document.count(ShapeKind::Link), 1);
        let dog = document.get(EntityId::new(2)).unwrap();
        assert_eq!(dog.attached_links(), &[link_id]);
    }

    #[test]
    fn test_create_new_link_unknown_endpoint() {
        let mut document = Document::new(DiagramType::Class);
        document.add_shape(class(1, "Animal"), Point::default()).unwrap();
        let err = document
            .create_new_link(EntityId::new(1), EntityId::new(99), LinkType::Association)
            .unwrap_err();
        assert_eq!(err, CanvasError::UnknownEntity(EntityId::new(99)));
    }

    #[test]
    fn test_message_attaches_to_instances() {
        let mut document = Document::new(DiagramType::Sequence);
        for id in [1, 2] {
            document.add_shape(instance(id), Point::default()).unwrap();
        }
        let message = VisualEntity::SdMessage(MessageShape::new(SdMessage::new(
            EntityId::new(3),
            "ping()",
            MessageEnd::new(EntityId::new(1), 50),
            MessageEnd::new(EntityId::new(2), 60),
        )));
        document.add_shape(message, Point::default()).unwrap();

        assert_eq!(
            document.get(EntityId::new(1)).unwrap().attached_links(),
            &[EntityId::new(3)]
        );
        assert_eq!(
            document.get(EntityId::new(2)).unwrap().attached_links(),
            &[EntityId::new(3)]
        );
    }

    #[test]
    fn test_link_cannot_target_link() {
        let mut document = Document::new(DiagramType::Class);
        document.add_shape(class(1, "Animal"), Point::default()).unwrap();
        let note = VisualEntity::Note(Node::new(
            Note::new(EntityId::new(2), "remember"),
            Size::new(50.0, 50.0),
        ));
        document.add_shape(note, Point::default()).unwrap();
        let link_id = document
            .create_new_link(EntityId::new(2), EntityId::new(1), LinkType::NoteLink)
            .unwrap()
            .model()
            .id();

        let err = document
            .create_new_link(EntityId::new(1), link_id, LinkType::Association)
            .unwrap_err();
        assert_eq!(
            err,
            CanvasError::NotConnectable {
                id: link_id,
                kind: ShapeKind::Link,
                connector: ShapeKind::Link,
            }
        );
    }

    fn instance(id: u32) -> VisualEntity {
        VisualEntity::SdInstance(Node::new(
            SdInstance::new(EntityId::new(id), format!("obj{id}")),
            Size::new(100.0, 400.0),
        ))
    }

    #[test]
    fn test_link_cannot_connect_instances() {
        let mut document = Document::new(DiagramType::Sequence);
        document.add_shape(instance(1), Point::default()).unwrap();
        document.add_shape(instance(2), Point::default()).unwrap();

        let err = document
            .create_new_link(EntityId::new(1), EntityId::new(2), LinkType::Association)
            .unwrap_err();
        assert_eq!(
            err,
            CanvasError::NotConnectable {
                id: EntityId::new(1),
                kind: ShapeKind::SdInstance,
                connector: ShapeKind::Link,
            }
        );
        assert_eq!(document.count(ShapeKind::Link), 0);
        assert!(document.get(EntityId::new(1)).unwrap().attached_links().is_empty());
    }

    #[test]
    fn test_message_cannot_connect_classes() {
        let mut document = Document::new(DiagramType::Class);
        document.add_shape(class(1, "Animal"), Point::default()).unwrap();
        document.add_shape(class(2, "Dog"), Point::default()).unwrap();
        let message = VisualEntity::SdMessage(MessageShape::new(SdMessage::new(
            EntityId::new(3),
            "bark()",
            MessageEnd::new(EntityId::new(1), 10),
            MessageEnd::new(EntityId::new(2), 20),
        )));

        let err = document.add_shape(message, Point::default()).unwrap_err();
        assert_eq!(
            err,
            CanvasError::NotConnectable {
                id: EntityId::new(1),
                kind: ShapeKind::Class,
                connector: ShapeKind::SdMessage,
            }
        );
        assert_eq!(document.len(), 2);
    }

    #[test]
    fn test_largest_id_exhausts_allocation() {
        let mut document = Document::new(DiagramType::Class);
        document.add_shape(class(1, "Animal"), Point::default()).unwrap();
        document.add_shape(class(u32::MAX, "Dog"), Point::default()).unwrap();

        let err = document
            .create_new_link(EntityId::new(1), EntityId::new(u32::MAX), LinkType::Association)
            .unwrap_err();
        assert_eq!(err, CanvasError::IdSpaceExhausted);
        assert_eq!(document.count(ShapeKind::Class), 2);
        assert_eq!(document.allocate_id(), Err(CanvasError::IdSpaceExhausted));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut document = Document::new(DiagramType::Class);
        for (id, name) in [(1, "A"), (2, "B"), (3, "C")] {
            document.add_shape(class(id, name), Point::default()).unwrap();
        }
        let removed = document.remove_shape(EntityId::new(2)).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(
            document.remove_shape(EntityId::new(2)),
            Err(CanvasError::UnknownEntity(EntityId::new(2)))
        );

        let labels: Vec<_> = document.shapes().map(VisualEntity::label).collect();
        assert_eq!(labels, ["A", "C"]);
    }

    #[test]
    fn test_remove_node_takes_its_links() {
        let mut document = Document::new(DiagramType::Class);
        for (id, name) in [(1, "Animal"), (2, "Dog"), (3, "Cat")] {
            document.add_shape(class(id, name), Point::default()).unwrap();
        }
        let dog_link = document
            .create_inheritance_link(EntityId::new(2), EntityId::new(1))
            .unwrap()
            .model()
            .id();
        let cat_link = document
            .create_inheritance_link(EntityId::new(3), EntityId::new(1))
            .unwrap()
            .model()
            .id();

        let removed = document.remove_shape(EntityId::new(2)).unwrap();
        let ids: Vec<_> = removed.iter().map(VisualEntity::id).collect();
        assert_eq!(ids, [EntityId::new(2), dog_link]);
        assert!(removed[0].attached_links().is_empty());

        assert_eq!(document.count(ShapeKind::Link), 1);
        assert_eq!(
            document.get(EntityId::new(1)).unwrap().attached_links(),
            &[cat_link]
        );
    }

    #[test]
    fn test_remove_link_detaches_endpoints() {
        let mut document = Document::new(DiagramType::Class);
        document.add_shape(class(1, "Animal"), Point::default()).unwrap();
        document.add_shape(class(2, "Dog"), Point::default()).unwrap();
        let link_id = document
            .create_new_link(EntityId::new(1), EntityId::new(2), LinkType::Association)
            .unwrap()
            .model()
            .id();

        let removed = document.remove_shape(link_id).unwrap();
        assert_eq!(removed.len(), 1);
        for id in [1, 2] {
            assert!(document.get(EntityId::new(id)).unwrap().attached_links().is_empty());
        }
    }

    #[test]
    fn test_reserved_ids_are_not_allocated() {
        let mut document = Document::new(DiagramType::Class);
        document.reserve_id(EntityId::new(5));
        assert_eq!(document.allocate_id(), Ok(EntityId::new(6)));
        document.reserve_id(EntityId::new(2));
        assert_eq!(document.allocate_id(), Ok(EntityId::new(7)));
    }

    #[test]
    fn test_refresh_counts() {
        let mut document = Document::new(DiagramType::Unknown);
        document.refresh();
        document.refresh();
        assert_eq!(document.refresh_count(), 2);
    }
}
