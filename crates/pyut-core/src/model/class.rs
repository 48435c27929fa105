//! Class model: classes, their methods, fields and parameters.

use std::{fmt, str::FromStr};

use crate::identifier::EntityId;

/// Member visibility of a method or field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
    Package,
}

impl Visibility {
    /// The UML symbol for this visibility (`+`, `-`, `#`, `~`).
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Public => "+",
            Self::Private => "-",
            Self::Protected => "#",
            Self::Package => "~",
        }
    }
}

impl FromStr for Visibility {
    type Err = &'static str;

    /// Accepts the UML symbol or the visibility name in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" | "PUBLIC" | "public" => Ok(Self::Public),
            "-" | "PRIVATE" | "private" => Ok(Self::Private),
            "#" | "PROTECTED" | "protected" => Ok(Self::Protected),
            "~" | "PACKAGE" | "package" => Ok(Self::Package),
            _ => Err("Unsupported visibility"),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A named, typed parameter with an optional default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameter {
    name: String,
    type_name: String,
    default_value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            default_value: None,
        }
    }

    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_name)?;
        if let Some(default_value) = &self.default_value {
            write!(f, " = {default_value}")?;
        }
        Ok(())
    }
}

/// A class attribute: a parameter plus its visibility.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    parameter: Parameter,
    visibility: Visibility,
}

impl Field {
    pub fn new(parameter: Parameter, visibility: Visibility) -> Self {
        Self {
            parameter,
            visibility,
        }
    }

    pub fn parameter(&self) -> &Parameter {
        &self.parameter
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.visibility, self.parameter)
    }
}

/// A method modifier such as `static` or `abstract`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    name: String,
}

impl Modifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A class operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Method {
    name: String,
    visibility: Visibility,
    modifiers: Vec<Modifier>,
    return_type: Option<String>,
    parameters: Vec<Parameter>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

impl fmt::Display for Method {
    /// Formats as `+name(a: int, b: float = 1.0): ret`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}(", self.visibility, self.name)?;
        for (idx, parameter) in self.parameters.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str(")")?;
        if let Some(return_type) = &self.return_type {
            write!(f, ": {return_type}")?;
        }
        Ok(())
    }
}

/// A UML class.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    id: EntityId,
    name: String,
    description: String,
    filename: String,
    stereotype: Option<String>,
    show_methods: bool,
    show_fields: bool,
    show_stereotype: bool,
    methods: Vec<Method>,
    fields: Vec<Field>,
}

impl Class {
    /// Creates a class with methods, fields and stereotype all shown.
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            filename: String::new(),
            stereotype: None,
            show_methods: true,
            show_fields: true,
            show_stereotype: true,
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_stereotype(mut self, stereotype: impl Into<String>) -> Self {
        self.stereotype = Some(stereotype.into());
        self
    }

    /// Sets the three display toggles: methods, fields, stereotype.
    pub fn with_display(mut self, show_methods: bool, show_fields: bool, show_stereotype: bool) -> Self {
        self.show_methods = show_methods;
        self.show_fields = show_fields;
        self.show_stereotype = show_stereotype;
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_methods(mut self, methods: Vec<Method>) -> Self {
        self.methods = methods;
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn stereotype(&self) -> Option<&str> {
        self.stereotype.as_deref()
    }

    pub fn show_methods(&self) -> bool {
        self.show_methods
    }

    pub fn show_fields(&self) -> bool {
        self.show_fields
    }

    pub fn show_stereotype(&self) -> bool {
        self.show_stereotype
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}
