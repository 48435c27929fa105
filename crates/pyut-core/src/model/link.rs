//! Relationships between class-diagram and use-case entities.

use std::{fmt, str::FromStr};

use crate::identifier::EntityId;

/// The kind of relationship a [`Link`] expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkType {
    Association,
    Aggregation,
    Composition,
    Inheritance,
    Interface,
    NoteLink,
}

impl LinkType {
    /// All link types, in the order of their legacy integer codes.
    pub const ALL: [LinkType; 6] = [
        Self::Association,
        Self::Aggregation,
        Self::Composition,
        Self::Inheritance,
        Self::Interface,
        Self::NoteLink,
    ];

    /// Returns `true` for association, aggregation and composition.
    ///
    /// Links of these types carry a name label and two cardinality labels.
    pub fn is_association(self) -> bool {
        matches!(
            self,
            Self::Association | Self::Aggregation | Self::Composition
        )
    }

    /// Looks up a link type by the integer code older project files use.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }
}

impl FromStr for LinkType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASSOCIATION" => Ok(Self::Association),
            "AGGREGATION" => Ok(Self::Aggregation),
            "COMPOSITION" => Ok(Self::Composition),
            "INHERITANCE" => Ok(Self::Inheritance),
            "INTERFACE" => Ok(Self::Interface),
            "NOTELINK" => Ok(Self::NoteLink),
            _ => Err("Unsupported link type"),
        }
    }
}

impl From<LinkType> for &'static str {
    fn from(val: LinkType) -> Self {
        match val {
            LinkType::Association => "ASSOCIATION",
            LinkType::Aggregation => "AGGREGATION",
            LinkType::Composition => "COMPOSITION",
            LinkType::Inheritance => "INHERITANCE",
            LinkType::Interface => "INTERFACE",
            LinkType::NoteLink => "NOTELINK",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).into())
    }
}

/// A relationship from a source entity to a destination entity.
///
/// Endpoints are stored as ids of entities in the same document; they are
/// never owned by the link.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    id: EntityId,
    name: String,
    link_type: LinkType,
    source_cardinality: String,
    destination_cardinality: String,
    bidirectional: bool,
    source: EntityId,
    destination: EntityId,
}

impl Link {
    pub fn new(id: EntityId, link_type: LinkType, source: EntityId, destination: EntityId) -> Self {
        Self {
            id,
            name: String::new(),
            link_type,
            source_cardinality: String::new(),
            destination_cardinality: String::new(),
            bidirectional: false,
            source,
            destination,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_cardinalities(
        mut self,
        source_cardinality: impl Into<String>,
        destination_cardinality: impl Into<String>,
    ) -> Self {
        self.source_cardinality = source_cardinality.into();
        self.destination_cardinality = destination_cardinality.into();
        self
    }

    pub fn with_bidirectional(mut self, bidirectional: bool) -> Self {
        self.bidirectional = bidirectional;
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_cardinalities(
        &mut self,
        source_cardinality: impl Into<String>,
        destination_cardinality: impl Into<String>,
    ) {
        self.source_cardinality = source_cardinality.into();
        self.destination_cardinality = destination_cardinality.into();
    }

    pub fn set_bidirectional(&mut self, bidirectional: bool) {
        self.bidirectional = bidirectional;
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link_type(&self) -> LinkType {
        self.link_type
    }

    pub fn source_cardinality(&self) -> &str {
        &self.source_cardinality
    }

    pub fn destination_cardinality(&self) -> &str {
        &self.destination_cardinality
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    pub fn source(&self) -> EntityId {
        self.source
    }

    pub fn destination(&self) -> EntityId {
        self.destination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_type_token_round_trip() {
        for link_type in LinkType::ALL {
            let token: &'static str = link_type.into();
            assert_eq!(token.parse::<LinkType>(), Ok(link_type));
        }
    }

    #[test]
    fn test_link_type_codes() {
        assert_eq!(LinkType::from_code(0), Some(LinkType::Association));
        assert_eq!(LinkType::from_code(3), Some(LinkType::Inheritance));
        assert_eq!(LinkType::from_code(5), Some(LinkType::NoteLink));
        assert_eq!(LinkType::from_code(6), None);
    }

    #[test]
    fn test_association_family() {
        assert!(LinkType::Association.is_association());
        assert!(LinkType::Aggregation.is_association());
        assert!(LinkType::Composition.is_association());
        assert!(!LinkType::Inheritance.is_association());
        assert!(!LinkType::Interface.is_association());
        assert!(!LinkType::NoteLink.is_association());
    }

    #[test]
    fn test_link_setters() {
        let mut link = Link::new(
            EntityId::new(3),
            LinkType::Association,
            EntityId::new(1),
            EntityId::new(2),
        );
        link.set_name("owns");
        link.set_cardinalities("1", "0..*");
        link.set_bidirectional(true);

        assert_eq!(link.name(), "owns");
        assert_eq!(link.source_cardinality(), "1");
        assert_eq!(link.destination_cardinality(), "0..*");
        assert!(link.is_bidirectional());
    }
}
