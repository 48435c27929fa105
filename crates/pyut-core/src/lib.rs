//! PyUT Core Types and Definitions
//!
//! This crate provides the in-memory side of a PyUT project. It includes:
//!
//! - **Identifiers**: permanent entity ids and the save-time [`identifier::IdRegistry`]
//! - **Geometry**: points and sizes ([`geometry`] module)
//! - **Model**: UML entities without geometry ([`model`] module)
//! - **Shapes**: model entities paired with geometry ([`shape::VisualEntity`])
//! - **Documents**: diagrams and the project that holds them ([`document`], [`project`])
//! - **Canvas**: the interface a loader uses to rebuild a diagram ([`canvas::Canvas`])
//! - **History**: undoable delete commands over a canvas ([`history`] module)

pub mod canvas;
pub mod document;
pub mod geometry;
pub mod history;
pub mod identifier;
pub mod model;
pub mod project;
pub mod shape;
