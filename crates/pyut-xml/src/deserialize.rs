//! XML to project.

use std::collections::HashMap;

use log::{debug, error, info, trace, warn};

use pyut_core::{
    canvas::Canvas,
    document::DiagramType,
    geometry::{Point, Size},
    identifier::EntityId,
    model::{
        Actor, Class, Field, LinkType, MessageEnd, Method, Modifier, Note, Parameter, SdInstance,
        SdMessage, UseCase, Visibility,
    },
    project::Project,
    shape::{MessageShape, Node, ShapeKind, VisualEntity},
};

use crate::{
    FORMAT_VERSION,
    attr::{secure_bool, secure_float, secure_int, unescape_note},
    error::LoadError,
    schema,
    tree::{Element, XmlDocument},
};

/// Version assumed for files that do not declare one.
const IMPLICIT_VERSION: &str = "1";

/// Rebuilds the documents of `xml` into `project`.
///
/// Each document is created in `project`, loaded through the [`Canvas`]
/// interface and then refreshed, whether or not loading succeeded.
///
/// # Errors
///
/// Fails on a version mismatch, a structural problem, an unresolved
/// reference or a missing required attribute. `project` may then hold a
/// partially loaded document and should be discarded.
pub fn deserialize(xml: &XmlDocument, project: &mut Project) -> Result<(), LoadError> {
    let root = xml.root();
    if root.name() != schema::PROJECT {
        return Err(LoadError::MissingElement {
            parent: "document".to_string(),
            child: schema::PROJECT,
        });
    }

    // Compared as text: " 8", "08" and "+8" are other versions.
    let version = root.attribute("version").unwrap_or(IMPLICIT_VERSION);
    if version != FORMAT_VERSION.to_string() {
        error!(expected = FORMAT_VERSION, found = version; "Unsupported file version");
        return Err(LoadError::FormatVersion {
            expected: FORMAT_VERSION,
            found: version.to_string(),
        });
    }

    project.set_code_path(root.attribute("CodePath").unwrap_or_default());

    for (index, element) in root.children_named(schema::DOCUMENT).enumerate() {
        let document = project.new_document(diagram_type(element));
        let result = load_document(element, document);
        document.refresh();
        result.inspect_err(|err| {
            error!(document = index, err:% = err; "Cannot load document");
        })?;
        debug!(document = index, shapes = document.len(); "Document loaded");
    }

    info!(documents = project.documents().len(); "Project loaded");
    Ok(())
}

/// Loads the entities of one `PyutDocument` element onto `canvas`.
///
/// Children are read in a fixed order regardless of their order in the
/// file: classes, notes, actors and use cases first, then links, then
/// sequence instances and finally messages. A link can therefore only
/// reference entities of the first group and a message only instances.
///
/// The canvas is not refreshed.
///
/// # Errors
///
/// See [`deserialize`]. Entities placed before the error stay on the
/// canvas.
pub fn load_document<C: Canvas + ?Sized>(element: &Element, canvas: &mut C) -> Result<(), LoadError> {
    DocumentLoader::new(canvas).load(element)
}

fn diagram_type(element: &Element) -> DiagramType {
    match element.attribute("type") {
        Some(token) => token.parse().unwrap_or_else(|_| {
            warn!(token = token; "Unknown diagram type, using UNKNOWN_DIAGRAM");
            DiagramType::Unknown
        }),
        None => DiagramType::Unknown,
    }
}

struct DocumentLoader<'a, C: ?Sized> {
    canvas: &'a mut C,
    /// Entities placed so far, by the id they carry in the file.
    shapes: HashMap<EntityId, ShapeKind>,
}

impl<'a, C: Canvas + ?Sized> DocumentLoader<'a, C> {
    fn new(canvas: &'a mut C) -> Self {
        Self {
            canvas,
            shapes: HashMap::new(),
        }
    }

    fn load(mut self, element: &Element) -> Result<(), LoadError> {
        self.reserve_ids(element);

        for graphic in element.children_named(schema::GRAPHIC_CLASS) {
            self.class(graphic)?;
        }
        for graphic in element.children_named(schema::GRAPHIC_NOTE) {
            self.note(graphic)?;
        }
        for graphic in element.children_named(schema::GRAPHIC_ACTOR) {
            self.actor(graphic)?;
        }
        for graphic in element.children_named(schema::GRAPHIC_USE_CASE) {
            self.use_case(graphic)?;
        }
        for graphic in element.children_named(schema::GRAPHIC_LINK) {
            self.link(graphic)?;
        }
        for graphic in element.children_named(schema::GRAPHIC_SD_INSTANCE) {
            self.sd_instance(graphic)?;
        }
        for graphic in element.children_named(schema::GRAPHIC_SD_MESSAGE) {
            self.sd_message(graphic)?;
        }

        Ok(())
    }

    /// Links get fresh ids from the canvas; keep them clear of file ids.
    fn reserve_ids(&mut self, element: &Element) {
        element
            .children()
            .iter()
            .flat_map(Element::children)
            .filter_map(|model| model.attribute("id"))
            .filter_map(|id| id.trim().parse::<u32>().ok())
            .for_each(|id| self.canvas.reserve_id(EntityId::new(id)));
    }

    fn place(&mut self, entity: VisualEntity, position: Point) -> Result<(), LoadError> {
        let kind = entity.kind();
        let id = self.canvas.add_shape(entity, position)?;
        trace!(id:% = id, kind:% = kind; "Entity loaded");
        self.shapes.insert(id, kind);
        Ok(())
    }

    fn class(&mut self, graphic: &Element) -> Result<(), LoadError> {
        let data = required_child(graphic, schema::CLASS)?;
        let mut class = Class::new(required_id(data, "id")?, text(data, "name"))
            .with_description(text(data, "description"))
            .with_filename(text(data, "filename"))
            .with_display(
                secure_bool(data.attribute("showMethods")),
                secure_bool(data.attribute("showFields")),
                secure_bool(data.attribute("showStereotype")),
            );
        if let Some(stereotype) = data.attribute("stereotype").filter(|s| !s.is_empty()) {
            class = class.with_stereotype(stereotype);
        }

        let methods = data.children_named(schema::METHOD).map(method).collect();
        let fields = data
            .children_named(schema::FIELD)
            .map(field)
            .collect::<Result<Vec<_>, _>>()?;
        let class = class.with_methods(methods).with_fields(fields);

        self.place(
            VisualEntity::Class(Node::new(class, size(graphic))),
            point(graphic, "x", "y"),
        )
    }

    fn note(&mut self, graphic: &Element) -> Result<(), LoadError> {
        let data = required_child(graphic, schema::NOTE)?;
        let note = Note::new(required_id(data, "id")?, unescape_note(&text(data, "name")))
            .with_filename(text(data, "filename"));
        self.place(
            VisualEntity::Note(Node::new(note, size(graphic))),
            point(graphic, "x", "y"),
        )
    }

    fn actor(&mut self, graphic: &Element) -> Result<(), LoadError> {
        let data = required_child(graphic, schema::ACTOR)?;
        let actor = Actor::new(required_id(data, "id")?, text(data, "name"))
            .with_filename(text(data, "filename"));
        self.place(
            VisualEntity::Actor(Node::new(actor, size(graphic))),
            point(graphic, "x", "y"),
        )
    }

    fn use_case(&mut self, graphic: &Element) -> Result<(), LoadError> {
        let data = required_child(graphic, schema::USE_CASE)?;
        let use_case = UseCase::new(required_id(data, "id")?, text(data, "name"))
            .with_filename(text(data, "filename"));
        self.place(
            VisualEntity::UseCase(Node::new(use_case, size(graphic))),
            point(graphic, "x", "y"),
        )
    }

    fn sd_instance(&mut self, graphic: &Element) -> Result<(), LoadError> {
        let data = required_child(graphic, schema::SD_INSTANCE)?;
        let instance = SdInstance::new(required_id(data, "id")?, text(data, "instanceName"))
            .with_life_line_length(secure_int(data.attribute("lifeLineLength")));
        self.place(
            VisualEntity::SdInstance(Node::new(instance, size(graphic))),
            point(graphic, "x", "y"),
        )
    }

    fn link(&mut self, graphic: &Element) -> Result<(), LoadError> {
        let data = required_child(graphic, schema::LINK)?;
        let link_type = link_type(data)?;
        let source = self.resolve_node(data, "sourceId")?;
        let destination = self.resolve_node(data, "destId")?;

        let shape = if link_type == LinkType::Inheritance {
            self.canvas.create_inheritance_link(source, destination)?
        } else {
            self.canvas.create_new_link(source, destination, link_type)?
        };

        let model = shape.model_mut();
        model.set_name(text(data, "name"));
        model.set_cardinalities(text(data, "cardSrc"), text(data, "cardDestination"));
        model.set_bidirectional(secure_bool(data.attribute("bidir")));

        shape.set_anchors(
            point(graphic, "srcX", "srcY"),
            point(graphic, "dstX", "dstY"),
        );
        shape.set_spline(secure_bool(graphic.attribute("spline")));
        for control_point in graphic.children_named(schema::CONTROL_POINT) {
            shape.add_control_point(point(control_point, "x", "y"));
        }

        if let Some(labels) = shape.labels_mut() {
            if let Some(label) = graphic.child(schema::LABEL_CENTER) {
                labels.center = point(label, "x", "y");
            }
            if let Some(label) = graphic.child(schema::LABEL_SRC) {
                labels.source_cardinality = point(label, "x", "y");
            }
            if let Some(label) = graphic.child(schema::LABEL_DST) {
                labels.destination_cardinality = point(label, "x", "y");
            }
        }

        trace!(
            id:% = shape.model().id(),
            link_type:% = link_type,
            source:% = source,
            destination:% = destination;
            "Link loaded"
        );
        Ok(())
    }

    fn sd_message(&mut self, graphic: &Element) -> Result<(), LoadError> {
        let data = required_child(graphic, schema::SD_MESSAGE)?;
        let id = required_id(data, "id")?;
        let source = self.resolve_instance(data, "srcID")?;
        let destination = self.resolve_instance(data, "dstID")?;

        let message = SdMessage::new(
            id,
            text(data, "message"),
            MessageEnd::new(source, secure_int(data.attribute("srcTime"))),
            MessageEnd::new(destination, secure_int(data.attribute("dstTime"))),
        );
        self.place(
            VisualEntity::SdMessage(MessageShape::new(message)),
            Point::default(),
        )
    }

    /// Resolves a link endpoint: a class, note, actor or use case.
    fn resolve_node(&self, data: &Element, attribute: &'static str) -> Result<EntityId, LoadError> {
        self.resolve(data, schema::LINK, attribute, "entity", ShapeKind::accepts_links)
    }

    fn resolve_instance(
        &self,
        data: &Element,
        attribute: &'static str,
    ) -> Result<EntityId, LoadError> {
        self.resolve(
            data,
            schema::SD_MESSAGE,
            attribute,
            "sequence instance",
            ShapeKind::accepts_messages,
        )
    }

    fn resolve(
        &self,
        data: &Element,
        element: &'static str,
        attribute: &'static str,
        expected: &'static str,
        accepts: impl Fn(ShapeKind) -> bool,
    ) -> Result<EntityId, LoadError> {
        let id = required_id(data, attribute)?;
        match self.shapes.get(&id) {
            Some(kind) if accepts(*kind) => Ok(id),
            _ => Err(LoadError::ReferenceResolution {
                element,
                attribute,
                id,
                expected,
            }),
        }
    }
}

fn required_child<'e>(parent: &'e Element, child: &'static str) -> Result<&'e Element, LoadError> {
    parent.child(child).ok_or_else(|| LoadError::MissingElement {
        parent: parent.name().to_string(),
        child,
    })
}

fn required_attribute<'e>(element: &'e Element, attribute: &'static str) -> Result<&'e str, LoadError> {
    element
        .attribute(attribute)
        .ok_or_else(|| LoadError::MissingAttribute {
            element: element.name().to_string(),
            attribute,
        })
}

/// Ids are positive integers.
fn required_id(element: &Element, attribute: &'static str) -> Result<EntityId, LoadError> {
    let value = required_attribute(element, attribute)?;
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|id| *id > 0)
        .map(EntityId::new)
        .ok_or_else(|| LoadError::MalformedAttribute {
            element: element.name().to_string(),
            attribute,
            value: value.to_string(),
        })
}

/// Accepts a type token or a legacy integer code.
fn link_type(data: &Element) -> Result<LinkType, LoadError> {
    let value = required_attribute(data, "type")?;
    value
        .parse::<LinkType>()
        .ok()
        .or_else(|| value.trim().parse::<u8>().ok().and_then(LinkType::from_code))
        .ok_or_else(|| LoadError::MalformedAttribute {
            element: data.name().to_string(),
            attribute: "type",
            value: value.to_string(),
        })
}

fn text(element: &Element, attribute: &str) -> String {
    element.attribute(attribute).unwrap_or_default().to_string()
}

fn visibility(element: &Element) -> Visibility {
    element
        .attribute("visibility")
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

fn point(element: &Element, x: &str, y: &str) -> Point {
    Point::new(
        secure_float(element.attribute(x)),
        secure_float(element.attribute(y)),
    )
}

fn size(graphic: &Element) -> Size {
    Size::new(
        secure_float(graphic.attribute("width")),
        secure_float(graphic.attribute("height")),
    )
}

fn parameter(element: &Element) -> Parameter {
    let parameter = Parameter::new(text(element, "name"), text(element, "type"));
    match element.attribute("defaultValue") {
        Some(default_value) => parameter.with_default_value(default_value),
        None => parameter,
    }
}

fn method(element: &Element) -> Method {
    let mut method = Method::new(text(element, "name")).with_visibility(visibility(element));
    for modifier in element.children_named(schema::MODIFIER) {
        method = method.with_modifier(Modifier::new(text(modifier, "name")));
    }
    if let Some(return_type) = element
        .child(schema::RETURN)
        .and_then(|ret| ret.attribute("type"))
    {
        method = method.with_return_type(return_type);
    }
    element
        .children_named(schema::PARAM)
        .map(parameter)
        .fold(method, Method::with_parameter)
}

fn field(element: &Element) -> Result<Field, LoadError> {
    let parameter = parameter(required_child(element, schema::PARAM)?);
    Ok(Field::new(parameter, visibility(element)))
}
