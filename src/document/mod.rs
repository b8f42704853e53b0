//! The diagram document and its patch reducer
//!
//! The document is a plain snapshot of shapes and connectors. Every mutation
//! is a described [`DocumentPatch`] applied by [`Document::apply`], which
//! returns a new snapshot instead of aliasing the old one in place. The host
//! owns the snapshots; the engine only proposes patches.

pub mod connector;
pub mod shape;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use connector::{Anchor, Connector, ConnectorEnd, ConnectorPatch, ConnectorState};
pub use shape::{Shape, ShapeKind, ShapePatch, MIN_SHAPE_EDGE};

use crate::geometry::BoundingBox;

/// Errors a patch application can produce.
///
/// These are input-validation failures, not faults: the editor treats an
/// unknown id as a stale hit-test and drops the event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("unknown shape: {0}")]
    UnknownShape(String),
    #[error("unknown connector: {0}")]
    UnknownConnector(String),
    #[error("duplicate id: {0}")]
    DuplicateId(String),
}

/// A described mutation of the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentPatch {
    AddShape(Shape),
    UpdateShape { id: String, patch: ShapePatch },
    RemoveShape { id: String },
    AddConnector(Connector),
    UpdateConnector { id: String, patch: ConnectorPatch },
    RemoveConnector { id: String },
    ClearSelection,
    RemoveSelected,
}

/// A snapshot of the diagram: shapes and connectors in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub connectors: Vec<Connector>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a shape by id
    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    /// Look up a connector by id
    pub fn connector(&self, id: &str) -> Option<&Connector> {
        self.connectors.iter().find(|connector| connector.id == id)
    }

    /// Current layout box of a shape, or `None` if the shape is gone.
    ///
    /// This is the resolution point for anchors; routing degrades gracefully
    /// on `None` instead of failing the render.
    pub fn bounding_box(&self, shape_id: &str) -> Option<BoundingBox> {
        self.shape(shape_id).map(Shape::bounding_box)
    }

    /// Apply a patch, returning the next document snapshot.
    ///
    /// Selecting any shape or connector clears the selection flag on every
    /// other shape and connector: the document holds at most one selection.
    pub fn apply(&self, patch: &DocumentPatch) -> Result<Document, DocumentError> {
        let mut next = self.clone();
        match patch {
            DocumentPatch::AddShape(shape) => {
                if next.shapes.iter().any(|existing| existing.id == shape.id) {
                    return Err(DocumentError::DuplicateId(shape.id.clone()));
                }
                next.shapes.push(shape.clone());
            }
            DocumentPatch::UpdateShape { id, patch } => {
                let index = next
                    .shapes
                    .iter()
                    .position(|shape| shape.id == *id)
                    .ok_or_else(|| DocumentError::UnknownShape(id.clone()))?;
                if patch.selected == Some(true) {
                    next.deselect_all();
                }
                patch.apply_to(&mut next.shapes[index]);
            }
            DocumentPatch::RemoveShape { id } => {
                if next.shape(id).is_none() {
                    return Err(DocumentError::UnknownShape(id.clone()));
                }
                next.shapes.retain(|shape| shape.id != *id);
            }
            DocumentPatch::AddConnector(connector) => {
                if next
                    .connectors
                    .iter()
                    .any(|existing| existing.id == connector.id)
                {
                    return Err(DocumentError::DuplicateId(connector.id.clone()));
                }
                next.connectors.push(connector.clone());
            }
            DocumentPatch::UpdateConnector { id, patch } => {
                let index = next
                    .connectors
                    .iter()
                    .position(|connector| connector.id == *id)
                    .ok_or_else(|| DocumentError::UnknownConnector(id.clone()))?;
                if patch.selected == Some(true) {
                    next.deselect_all();
                }
                patch.apply_to(&mut next.connectors[index]);
            }
            DocumentPatch::RemoveConnector { id } => {
                if next.connector(id).is_none() {
                    return Err(DocumentError::UnknownConnector(id.clone()));
                }
                next.connectors.retain(|connector| connector.id != *id);
            }
            DocumentPatch::ClearSelection => {
                next.deselect_all();
            }
            DocumentPatch::RemoveSelected => {
                next.shapes.retain(|shape| !shape.selected);
                next.connectors.retain(|connector| !connector.selected);
            }
        }
        Ok(next)
    }

    fn deselect_all(&mut self) {
        for shape in &mut self.shapes {
            shape.selected = false;
        }
        for connector in &mut self.connectors {
            connector.selected = false;
        }
    }
}
