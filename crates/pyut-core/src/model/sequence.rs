//! Sequence-diagram model: instances with life lines and the messages between them.

use crate::identifier::EntityId;

/// A participant of a sequence diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct SdInstance {
    id: EntityId,
    instance_name: String,
    life_line_length: i64,
}

impl SdInstance {
    pub fn new(id: EntityId, instance_name: impl Into<String>) -> Self {
        Self {
            id,
            instance_name: instance_name.into(),
            life_line_length: 0,
        }
    }

    pub fn with_life_line_length(mut self, life_line_length: i64) -> Self {
        self.life_line_length = life_line_length;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    pub fn life_line_length(&self) -> i64 {
        self.life_line_length
    }
}

/// One end of a message: the instance and the time on its life line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageEnd {
    instance: EntityId,
    time: i64,
}

impl MessageEnd {
    pub fn new(instance: EntityId, time: i64) -> Self {
        Self { instance, time }
    }

    pub fn instance(self) -> EntityId {
        self.instance
    }

    pub fn time(self) -> i64 {
        self.time
    }
}

/// A message sent from one [`SdInstance`] to another.
#[derive(Debug, Clone, PartialEq)]
pub struct SdMessage {
    id: EntityId,
    message: String,
    source: MessageEnd,
    destination: MessageEnd,
}

impl SdMessage {
    pub fn new(
        id: EntityId,
        message: impl Into<String>,
        source: MessageEnd,
        destination: MessageEnd,
    ) -> Self {
        Self {
            id,
            message: message.into(),
            source,
            destination,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source(&self) -> MessageEnd {
        self.source
    }

    pub fn destination(&self) -> MessageEnd {
        self.destination
    }
}
