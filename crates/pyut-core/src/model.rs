//! UML model entities.
//!
//! Pure data with no geometry. Each top-level entity carries its permanent
//! [`EntityId`](crate::identifier::EntityId); references between entities
//! are expressed as ids and resolved through the owning document.
//!
//! - [`class`] - [`Class`], [`Method`], [`Field`], [`Parameter`], [`Modifier`], [`Visibility`]
//! - [`annotation`] - [`Note`], [`Actor`], [`UseCase`]
//! - [`link`] - [`Link`], [`LinkType`]
//! - [`sequence`] - [`SdInstance`], [`SdMessage`], [`MessageEnd`]

pub mod annotation;
pub mod class;
pub mod link;
pub mod sequence;

pub use annotation::*;
pub use class::*;
pub use link::*;
pub use sequence::*;
