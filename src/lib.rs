//! Flowboard - the connector engine of an interactive diagram editor
//!
//! This library provides the geometry and interaction core for a canvas
//! editor: fixed junction points on shape bounding boxes, relative-quadrant
//! classification, orthogonal connector routing with a standoff clearance,
//! and the pointer gesture state machine that drafts, re-targets and
//! finalizes connectors. Rendering, hit-testing, persistence and undo stay
//! with the host application; the engine reads shape boxes and returns
//! computed geometry and document patches.
//!
//! # Example
//!
//! ```rust
//! use flowboard::{Document, DocumentPatch, EngineConfig, Shape};
//! use flowboard::{Editor, Junction, Point, PointerTarget};
//!
//! let document = Document::new()
//!     .apply(&DocumentPatch::AddShape(Shape::new("a", 0.0, 0.0, 100.0, 100.0)))?
//!     .apply(&DocumentPatch::AddShape(Shape::new("b", 300.0, 0.0, 100.0, 100.0)))?;
//!
//! let mut editor = Editor::new(document, EngineConfig::default());
//! editor.pointer_down(Point::new(100.0, 50.0), PointerTarget::junction("a", Junction::Right));
//! editor.pointer_up(Point::new(300.0, 50.0), PointerTarget::junction("b", Junction::Left));
//!
//! let connector = &editor.document().connectors[0];
//! assert_eq!(
//!     editor.connector_path(&connector.id).unwrap(),
//!     vec![Point::new(100.0, 50.0), Point::new(300.0, 50.0)]
//! );
//! # Ok::<(), flowboard::DocumentError>(())
//! ```

pub mod config;
pub mod document;
pub mod editor;
pub mod geometry;

pub use config::{ConfigError, EngineConfig};
pub use document::{
    Anchor, Connector, ConnectorEnd, ConnectorPatch, ConnectorState, Document, DocumentError,
    DocumentPatch, Shape, ShapeKind, ShapePatch,
};
pub use editor::{Editor, PointerTarget};
pub use geometry::{
    connector_path, junction_point, junctions, route, route_free, BoundingBox, Direction,
    Junction, Point,
};
