//! Project to XML.

use log::{debug, error, info};

use pyut_core::{
    document::Document,
    geometry::Point,
    identifier::{EntityId, IdRegistry},
    model::{Actor, Class, Field, Method, Note, Parameter, SdInstance, UseCase},
    project::Project,
    shape::{LinkShape, MessageShape, Node, ShapeKind, VisualEntity},
};

use crate::{
    FORMAT_VERSION,
    attr::{escape_note, format_bool, format_float},
    error::SaveError,
    schema,
    tree::{Element, XmlDocument},
};

/// Serializes `project` into a versioned XML tree.
///
/// Every entity and every cross-reference is written with an id from a
/// fresh [`IdRegistry`], keyed by document index and permanent id.
///
/// # Errors
///
/// Returns [`SaveError::DanglingReference`] if a link or message points at
/// an entity that is not in its document. Nothing is returned in that case.
/// A [`Document`] removes connectors together with their endpoints, so a
/// project built through it never trips this check.
pub fn serialize(project: &Project) -> Result<XmlDocument, SaveError> {
    info!(documents = project.documents().len(); "Serializing project");
    Serializer::default().project(project).inspect_err(|err| {
        error!(err:% = err; "Cannot save project");
    })
}

#[derive(Default)]
struct Serializer {
    registry: IdRegistry<(usize, EntityId)>,
}

impl Serializer {
    fn project(mut self, project: &Project) -> Result<XmlDocument, SaveError> {
        let mut root = Element::new(schema::PROJECT)
            .with_attribute("version", FORMAT_VERSION.to_string())
            .with_attribute("CodePath", project.code_path());

        for (index, document) in project.documents().iter().enumerate() {
            root.push(self.document(index, document)?);
        }

        debug!(ids = self.registry.len(); "Project serialized");
        Ok(XmlDocument::new(root))
    }

    fn document(&mut self, index: usize, document: &Document) -> Result<Element, SaveError> {
        let diagram_type: &'static str = document.diagram_type().into();
        let mut element = Element::new(schema::DOCUMENT).with_attribute("type", diagram_type);

        for shape in document.shapes() {
            let child = match shape {
                VisualEntity::Class(node) => {
                    let model = self.class(index, node.model());
                    graphic_node(schema::GRAPHIC_CLASS, node, model)
                }
                VisualEntity::Note(node) => {
                    let model = self.note(index, node.model());
                    graphic_node(schema::GRAPHIC_NOTE, node, model)
                }
                VisualEntity::Actor(node) => {
                    let model = self.actor(index, node.model());
                    graphic_node(schema::GRAPHIC_ACTOR, node, model)
                }
                VisualEntity::UseCase(node) => {
                    let model = self.use_case(index, node.model());
                    graphic_node(schema::GRAPHIC_USE_CASE, node, model)
                }
                VisualEntity::SdInstance(node) => {
                    let model = self.sd_instance(index, node.model());
                    graphic_node(schema::GRAPHIC_SD_INSTANCE, node, model)
                }
                VisualEntity::Link(link) => self.graphic_link(index, document, link)?,
                VisualEntity::SdMessage(message) => {
                    self.graphic_message(index, document, message)?
                }
            };
            element.push(child);
        }

        Ok(element)
    }

    fn id(&mut self, index: usize, id: EntityId) -> String {
        self.registry.id_for((index, id)).to_string()
    }

    /// Registry id of `target`, which `source` refers to.
    fn reference(
        &mut self,
        index: usize,
        document: &Document,
        source: (EntityId, ShapeKind),
        target: EntityId,
    ) -> Result<String, SaveError> {
        if !document.contains(target) {
            let (id, kind) = source;
            return Err(SaveError::DanglingReference {
                document: index,
                id,
                kind,
                target,
            });
        }
        Ok(self.id(index, target))
    }

    fn class(&mut self, index: usize, class: &Class) -> Element {
        let mut element = Element::new(schema::CLASS)
            .with_attribute("id", self.id(index, class.id()))
            .with_attribute("name", class.name());
        if let Some(stereotype) = class.stereotype() {
            element.set_attribute("stereotype", stereotype);
        }
        element.set_attribute("description", class.description());
        element.set_attribute("filename", class.filename());
        element.set_attribute("showMethods", format_bool(class.show_methods()));
        element.set_attribute("showFields", format_bool(class.show_fields()));
        element.set_attribute("showStereotype", format_bool(class.show_stereotype()));

        for method in class.methods() {
            element.push(method_element(method));
        }
        for field in class.fields() {
            element.push(field_element(field));
        }
        element
    }

    fn note(&mut self, index: usize, note: &Note) -> Element {
        Element::new(schema::NOTE)
            .with_attribute("id", self.id(index, note.id()))
            .with_attribute("name", escape_note(note.name()))
            .with_attribute("filename", note.filename())
    }

    fn actor(&mut self, index: usize, actor: &Actor) -> Element {
        Element::new(schema::ACTOR)
            .with_attribute("id", self.id(index, actor.id()))
            .with_attribute("name", actor.name())
            .with_attribute("filename", actor.filename())
    }

    fn use_case(&mut self, index: usize, use_case: &UseCase) -> Element {
        Element::new(schema::USE_CASE)
            .with_attribute("id", self.id(index, use_case.id()))
            .with_attribute("name", use_case.name())
            .with_attribute("filename", use_case.filename())
    }

    fn sd_instance(&mut self, index: usize, instance: &SdInstance) -> Element {
        Element::new(schema::SD_INSTANCE)
            .with_attribute("id", self.id(index, instance.id()))
            .with_attribute("instanceName", instance.instance_name())
            .with_attribute("lifeLineLength", instance.life_line_length().to_string())
    }

    fn graphic_link(
        &mut self,
        index: usize,
        document: &Document,
        shape: &LinkShape,
    ) -> Result<Element, SaveError> {
        let source = shape.source_anchor();
        let destination = shape.destination_anchor();
        let mut element = Element::new(schema::GRAPHIC_LINK)
            .with_attribute("srcX", format_float(source.x()))
            .with_attribute("srcY", format_float(source.y()))
            .with_attribute("dstX", format_float(destination.x()))
            .with_attribute("dstY", format_float(destination.y()))
            .with_attribute("spline", format_bool(shape.is_spline()));

        if let Some(labels) = shape.labels() {
            element.push(point_element(schema::LABEL_CENTER, labels.center));
            element.push(point_element(schema::LABEL_SRC, labels.source_cardinality));
            element.push(point_element(
                schema::LABEL_DST,
                labels.destination_cardinality,
            ));
        }

        for point in shape.control_points() {
            element.push(point_element(schema::CONTROL_POINT, *point));
        }

        let link = shape.model();
        let entity = (link.id(), ShapeKind::Link);
        let source_id = self.reference(index, document, entity, link.source())?;
        let destination_id = self.reference(index, document, entity, link.destination())?;
        let link_type: &'static str = link.link_type().into();

        element.push(
            Element::new(schema::LINK)
                .with_attribute("name", link.name())
                .with_attribute("type", link_type)
                .with_attribute("cardSrc", link.source_cardinality())
                .with_attribute("cardDestination", link.destination_cardinality())
                .with_attribute("bidir", format_bool(link.is_bidirectional()))
                .with_attribute("sourceId", source_id)
                .with_attribute("destId", destination_id),
        );
        Ok(element)
    }

    fn graphic_message(
        &mut self,
        index: usize,
        document: &Document,
        shape: &MessageShape,
    ) -> Result<Element, SaveError> {
        let message = shape.model();
        let entity = (message.id(), ShapeKind::SdMessage);
        let source = message.source();
        let destination = message.destination();
        let source_id = self.reference(index, document, entity, source.instance())?;
        let destination_id = self.reference(index, document, entity, destination.instance())?;

        let data = Element::new(schema::SD_MESSAGE)
            .with_attribute("id", self.id(index, message.id()))
            .with_attribute("message", message.message())
            .with_attribute("srcTime", source.time().to_string())
            .with_attribute("dstTime", destination.time().to_string())
            .with_attribute("srcID", source_id)
            .with_attribute("dstID", destination_id);

        Ok(Element::new(schema::GRAPHIC_SD_MESSAGE).with_child(data))
    }
}

/// Wraps a model element with the node's size and position.
fn graphic_node<M>(tag: &str, node: &Node<M>, model: Element) -> Element {
    let size = node.size();
    let position = node.position();
    Element::new(tag)
        .with_attribute("width", format_float(size.width()))
        .with_attribute("height", format_float(size.height()))
        .with_attribute("x", format_float(position.x()))
        .with_attribute("y", format_float(position.y()))
        .with_child(model)
}

fn point_element(tag: &str, point: Point) -> Element {
    Element::new(tag)
        .with_attribute("x", format_float(point.x()))
        .with_attribute("y", format_float(point.y()))
}

fn parameter_element(parameter: &Parameter) -> Element {
    let mut element = Element::new(schema::PARAM)
        .with_attribute("name", parameter.name())
        .with_attribute("type", parameter.type_name());
    if let Some(default_value) = parameter.default_value() {
        element.set_attribute("defaultValue", default_value);
    }
    element
}

fn field_element(field: &Field) -> Element {
    Element::new(schema::FIELD)
        .with_attribute("visibility", field.visibility().symbol())
        .with_child(parameter_element(field.parameter()))
}

fn method_element(method: &Method) -> Element {
    let mut element = Element::new(schema::METHOD)
        .with_attribute("name", method.name())
        .with_attribute("visibility", method.visibility().symbol());

    for modifier in method.modifiers() {
        element.push(Element::new(schema::MODIFIER).with_attribute("name", modifier.name()));
    }
    if let Some(return_type) = method.return_type() {
        element.push(Element::new(schema::RETURN).with_attribute("type", return_type));
    }
    for parameter in method.parameters() {
        element.push(parameter_element(parameter));
    }
    element
}
