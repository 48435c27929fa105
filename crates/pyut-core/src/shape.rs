//! Visual entities: model entities paired with their canvas geometry.
//!
//! [`VisualEntity`] is a closed set of variants. Code that walks a document
//! matches on it exhaustively, so adding a variant is a compile-time change
//! everywhere shapes are saved or loaded.

use std::fmt;

use crate::{
    geometry::{Point, Size},
    identifier::EntityId,
    model::{Actor, Class, Link, Note, SdInstance, SdMessage, UseCase},
};

/// Discriminant of a [`VisualEntity`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Class,
    Note,
    Actor,
    UseCase,
    Link,
    SdInstance,
    SdMessage,
}

impl ShapeKind {
    /// Kinds a [`Link`] may connect: classes, notes, actors and use cases.
    pub fn accepts_links(self) -> bool {
        matches!(self, Self::Class | Self::Note | Self::Actor | Self::UseCase)
    }

    /// Only sequence instances take messages.
    pub fn accepts_messages(self) -> bool {
        self == Self::SdInstance
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Class => "class",
            Self::Note => "note",
            Self::Actor => "actor",
            Self::UseCase => "use case",
            Self::Link => "link",
            Self::SdInstance => "sequence instance",
            Self::SdMessage => "sequence message",
        };
        f.write_str(name)
    }
}

/// A box-shaped entity on the canvas: a model plus position and size.
///
/// The position is the top-left corner. `links` records the links and
/// messages attached to this node, in attachment order.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<M> {
    model: M,
    position: Point,
    size: Size,
    links: Vec<EntityId>,
}

impl<M> Node<M> {
    /// Creates a node at the origin. The canvas sets the final position.
    pub fn new(model: M, size: Size) -> Self {
        Self {
            model,
            position: Point::default(),
            size,
            links: Vec::new(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn center(&self) -> Point {
        self.size.center_from(self.position)
    }

    /// Ids of links and messages attached to this node.
    pub fn links(&self) -> &[EntityId] {
        &self.links
    }

    fn attach(&mut self, link: EntityId) {
        if !self.links.contains(&link) {
            self.links.push(link);
        }
    }

    fn detach(&mut self, link: EntityId) {
        self.links.retain(|attached| *attached != link);
    }
}

/// Positions of the three text labels of an association-family link.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AssociationLabels {
    pub center: Point,
    pub source_cardinality: Point,
    pub destination_cardinality: Point,
}

impl AssociationLabels {
    /// Places all three labels at `point`.
    pub fn at(point: Point) -> Self {
        Self {
            center: point,
            source_cardinality: point,
            destination_cardinality: point,
        }
    }
}

/// The drawn form of a [`Link`].
///
/// Anchors are where the line meets its source and destination shapes.
/// Control points are the bends in between, anchors excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkShape {
    model: Link,
    source_anchor: Point,
    destination_anchor: Point,
    spline: bool,
    control_points: Vec<Point>,
    labels: Option<AssociationLabels>,
}

impl LinkShape {
    /// Creates a straight link between two anchors.
    ///
    /// Association-family links get their labels placed at the midpoint.
    pub fn new(model: Link, source_anchor: Point, destination_anchor: Point) -> Self {
        let labels = model
            .link_type()
            .is_association()
            .then(|| AssociationLabels::at(source_anchor.midpoint(destination_anchor)));
        Self {
            model,
            source_anchor,
            destination_anchor,
            spline: false,
            control_points: Vec::new(),
            labels,
        }
    }

    pub fn model(&self) -> &Link {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Link {
        &mut self.model
    }

    pub fn source_anchor(&self) -> Point {
        self.source_anchor
    }

    pub fn destination_anchor(&self) -> Point {
        self.destination_anchor
    }

    pub fn set_anchors(&mut self, source_anchor: Point, destination_anchor: Point) {
        self.source_anchor = source_anchor;
        self.destination_anchor = destination_anchor;
    }

    pub fn is_spline(&self) -> bool {
        self.spline
    }

    pub fn set_spline(&mut self, spline: bool) {
        self.spline = spline;
    }

    pub fn control_points(&self) -> &[Point] {
        &self.control_points
    }

    pub fn add_control_point(&mut self, point: Point) {
        self.control_points.push(point);
    }

    /// Label positions; `None` unless the link is an association.
    pub fn labels(&self) -> Option<&AssociationLabels> {
        self.labels.as_ref()
    }

    pub fn labels_mut(&mut self) -> Option<&mut AssociationLabels> {
        self.labels.as_mut()
    }
}

/// The drawn form of an [`SdMessage`]. Its geometry follows its endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageShape {
    model: SdMessage,
}

impl MessageShape {
    pub fn new(model: SdMessage) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &SdMessage {
        &self.model
    }
}

/// Any entity that can be placed on a diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualEntity {
    Class(Node<Class>),
    Note(Node<Note>),
    Actor(Node<Actor>),
    UseCase(Node<UseCase>),
    SdInstance(Node<SdInstance>),
    Link(LinkShape),
    SdMessage(MessageShape),
}

impl VisualEntity {
    /// Permanent id of the wrapped model entity.
    pub fn id(&self) -> EntityId {
        match self {
            Self::Class(node) => node.model().id(),
            Self::Note(node) => node.model().id(),
            Self::Actor(node) => node.model().id(),
            Self::UseCase(node) => node.model().id(),
            Self::SdInstance(node) => node.model().id(),
            Self::Link(link) => link.model().id(),
            Self::SdMessage(message) => message.model().id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Class(_) => ShapeKind::Class,
            Self::Note(_) => ShapeKind::Note,
            Self::Actor(_) => ShapeKind::Actor,
            Self::UseCase(_) => ShapeKind::UseCase,
            Self::SdInstance(_) => ShapeKind::SdInstance,
            Self::Link(_) => ShapeKind::Link,
            Self::SdMessage(_) => ShapeKind::SdMessage,
        }
    }

    /// Human-readable label: the entity name, instance name or message text.
    pub fn label(&self) -> &str {
        match self {
            Self::Class(node) => node.model().name(),
            Self::Note(node) => node.model().name(),
            Self::Actor(node) => node.model().name(),
            Self::UseCase(node) => node.model().name(),
            Self::SdInstance(node) => node.model().instance_name(),
            Self::Link(link) => link.model().name(),
            Self::SdMessage(message) => message.model().message(),
        }
    }

    /// Top-left position for node shapes; `None` for links and messages.
    pub fn position(&self) -> Option<Point> {
        self.map_node(|position, _| position)
    }

    /// Size for node shapes; `None` for links and messages.
    pub fn size(&self) -> Option<Size> {
        self.map_node(|_, size| size)
    }

    /// Source and destination ids for links and messages.
    pub fn endpoints(&self) -> Option<(EntityId, EntityId)> {
        match self {
            Self::Link(link) => Some((link.model().source(), link.model().destination())),
            Self::SdMessage(message) => Some((
                message.model().source().instance(),
                message.model().destination().instance(),
            )),
            Self::Class(_)
            | Self::Note(_)
            | Self::Actor(_)
            | Self::UseCase(_)
            | Self::SdInstance(_) => None,
        }
    }

    /// Moves a node shape. Links and messages have no own position.
    pub fn set_position(&mut self, position: Point) {
        match self {
            Self::Class(node) => node.set_position(position),
            Self::Note(node) => node.set_position(position),
            Self::Actor(node) => node.set_position(position),
            Self::UseCase(node) => node.set_position(position),
            Self::SdInstance(node) => node.set_position(position),
            Self::Link(_) | Self::SdMessage(_) => {}
        }
    }

    /// Records `link` as attached to this node. Returns `false` for
    /// links and messages, which cannot have links attached.
    pub fn attach_link(&mut self, link: EntityId) -> bool {
        match self {
            Self::Class(node) => node.attach(link),
            Self::Note(node) => node.attach(link),
            Self::Actor(node) => node.attach(link),
            Self::UseCase(node) => node.attach(link),
            Self::SdInstance(node) => node.attach(link),
            Self::Link(_) | Self::SdMessage(_) => return false,
        }
        true
    }

    /// Forgets that `link` is attached to this node.
    pub fn detach_link(&mut self, link: EntityId) {
        match self {
            Self::Class(node) => node.detach(link),
            Self::Note(node) => node.detach(link),
            Self::Actor(node) => node.detach(link),
            Self::UseCase(node) => node.detach(link),
            Self::SdInstance(node) => node.detach(link),
            Self::Link(_) | Self::SdMessage(_) => {}
        }
    }

    /// Ids of the links and messages attached to a node shape.
    pub fn attached_links(&self) -> &[EntityId] {
        match self {
            Self::Class(node) => node.links(),
            Self::Note(node) => node.links(),
            Self::Actor(node) => node.links(),
            Self::UseCase(node) => node.links(),
            Self::SdInstance(node) => node.links(),
            Self::Link(_) | Self::SdMessage(_) => &[],
        }
    }

    /// Center of a node shape, used as the default link anchor.
    pub fn center(&self) -> Option<Point> {
        self.map_node(|position, size| size.center_from(position))
    }

    pub fn as_class(&self) -> Option<&Node<Class>> {
        match self {
            Self::Class(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_note(&self) -> Option<&Node<Note>> {
        match self {
            Self::Note(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_sd_instance(&self) -> Option<&Node<SdInstance>> {
        match self {
            Self::SdInstance(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&LinkShape> {
        match self {
            Self::Link(link) => Some(link),
            _ => None,
        }
    }

    pub fn as_link_mut(&mut self) -> Option<&mut LinkShape> {
        match self {
            Self::Link(link) => Some(link),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&MessageShape> {
        match self {
            Self::SdMessage(message) => Some(message),
            _ => None,
        }
    }

    fn map_node<T>(&self, f: impl FnOnce(Point, Size) -> T) -> Option<T> {
        match self {
            Self::Class(node) => Some(f(node.position(), node.size())),
            Self::Note(node) => Some(f(node.position(), node.size())),
            Self::Actor(node) => Some(f(node.position(), node.size())),
            Self::UseCase(node) => Some(f(node.position(), node.size())),
            Self::SdInstance(node) => Some(f(node.position(), node.size())),
            Self::Link(_) | Self::SdMessage(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::model::{LinkType, MessageEnd};

    fn link(link_type: LinkType) -> Link {
        Link::new(
            EntityId::new(10),
            link_type,
            EntityId::new(1),
            EntityId::new(2),
        )
    }

    #[test]
    fn test_association_link_has_labels_at_midpoint() {
        let shape = LinkShape::new(
            link(LinkType::Composition),
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
        );
        let labels = shape.labels().expect("composition carries labels");
        assert_approx_eq!(f64, labels.center.x(), 50.0);
        assert_approx_eq!(f64, labels.center.y(), 25.0);
    }

    #[test]
    fn test_inheritance_link_has_no_labels() {
        let shape = LinkShape::new(
            link(LinkType::Inheritance),
            Point::default(),
            Point::default(),
        );
        assert!(shape.labels().is_none());
    }

    #[test]
    fn test_control_points_keep_order() {
        let mut shape = LinkShape::new(
            link(LinkType::Interface),
            Point::new(1.0, 1.0),
            Point::new(9.0, 9.0),
        );
        shape.add_control_point(Point::new(5.0, 1.0));
        shape.add_control_point(Point::new(5.0, 9.0));
        assert_eq!(
            shape.control_points(),
            &[Point::new(5.0, 1.0), Point::new(5.0, 9.0)]
        );
    }

    #[test]
    fn test_endpoint_kinds() {
        assert!(ShapeKind::Class.accepts_links());
        assert!(ShapeKind::UseCase.accepts_links());
        assert!(!ShapeKind::SdInstance.accepts_links());
        assert!(!ShapeKind::Link.accepts_links());
        assert!(ShapeKind::SdInstance.accepts_messages());
        assert!(!ShapeKind::Class.accepts_messages());
    }

    #[test]
    fn test_node_attach_is_idempotent() {
        let mut entity = VisualEntity::Class(Node::new(
            Class::new(EntityId::new(1), "Animal"),
            Size::new(80.0, 40.0),
        ));
        assert!(entity.attach_link(EntityId::new(5)));
        assert!(entity.attach_link(EntityId::new(5)));
        assert_eq!(entity.attached_links(), &[EntityId::new(5)]);

        entity.detach_link(EntityId::new(5));
        assert!(entity.attached_links().is_empty());
    }

    #[test]
    fn test_message_endpoints() {
        let entity = VisualEntity::SdMessage(MessageShape::new(SdMessage::new(
            EntityId::new(9),
            "call()",
            MessageEnd::new(EntityId::new(1), 10),
            MessageEnd::new(EntityId::new(2), 20),
        )));
        assert_eq!(
            entity.endpoints(),
            Some((EntityId::new(1), EntityId::new(2)))
        );
        assert_eq!(entity.position(), None);
        assert_eq!(entity.kind(), ShapeKind::SdMessage);
    }
}
