//! Shape records and their merge-patches

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// Minimum edge length a resize patch can shrink a shape to
pub const MIN_SHAPE_EDGE: f64 = 5.0;

/// The primitives the editor can draw.
///
/// Kind affects rendering only. Junctions and routing read the bounding box
/// and never branch on the kind, so connector endpoints stay put when a
/// shape's kind is swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Circle,
    Rect,
    Rhombus,
    Swimlane,
}

/// A shape on the canvas.
///
/// The typed fields are the engine's input contract. Anything else a host or
/// renderer wants to hang off a shape goes in the open `attributes`
/// side-table, which the routing core never reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, applied by the renderer to the visual transform
    /// only; the layout box reported to the geometry layer stays un-rotated.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub kind: ShapeKind,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_style: Option<String>,
    #[serde(default)]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl Shape {
    /// Create a shape with the default kind and no label
    pub fn new(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
            rotation: 0.0,
            kind: ShapeKind::default(),
            label: String::new(),
            fill: None,
            fill_style: None,
            selected: false,
            attributes: BTreeMap::new(),
        }
    }

    /// Set the shape kind
    pub fn with_kind(mut self, kind: ShapeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the label text
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The layout box reported to the geometry layer: position and size with
    /// unit scale. Live transform scale is the host's to supply during a
    /// drag, via [`BoundingBox::with_scale`].
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }
}

/// A merge-patch for a shape: every field optional, absent fields untouched.
///
/// `width`/`height` are clamped to [`MIN_SHAPE_EDGE`] on application, so a
/// resize gesture can never invert or collapse a shape. `attributes` entries
/// are merged over the existing side-table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ShapeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl ShapePatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the shape
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Resize the shape (clamped on application)
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Rotate the shape, in degrees
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Set or clear the selection flag
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = Some(selected);
        self
    }

    /// Merge this patch into a shape
    pub(crate) fn apply_to(&self, shape: &mut Shape) {
        if let Some(x) = self.x {
            shape.x = x;
        }
        if let Some(y) = self.y {
            shape.y = y;
        }
        if let Some(width) = self.width {
            shape.width = width.max(MIN_SHAPE_EDGE);
        }
        if let Some(height) = self.height {
            shape.height = height.max(MIN_SHAPE_EDGE);
        }
        if let Some(rotation) = self.rotation {
            shape.rotation = rotation;
        }
        if let Some(kind) = self.kind {
            shape.kind = kind;
        }
        if let Some(label) = &self.label {
            shape.label = label.clone();
        }
        if let Some(fill) = &self.fill {
            shape.fill = Some(fill.clone());
        }
        if let Some(fill_style) = &self.fill_style {
            shape.fill_style = Some(fill_style.clone());
        }
        if let Some(selected) = self.selected {
            shape.selected = selected;
        }
        for (key, value) in &self.attributes {
            shape.attributes.insert(key.clone(), value.clone());
        }
    }
}
