//! Annotation documents: the saved form of the shapes drawn on one image.

use crate::error::ShapeResult;
use crate::shapes::EditableShape;
use crate::style::SerializableColor;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted form of a single shape.
///
/// Highlight and selection are transient and never saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub label: Option<String>,
    pub points: Vec<Point>,
    /// Missing in legacy files, which mark closing by repeating the first point.
    #[serde(default)]
    pub closed: Option<bool>,
    #[serde(default)]
    pub filled: bool,
    #[serde(default)]
    pub line_color: Option<SerializableColor>,
    #[serde(default)]
    pub fill_color: Option<SerializableColor>,
}

impl ShapeRecord {
    /// Capture the persistent parts of a shape.
    pub fn from_shape(shape: &EditableShape) -> Self {
        Self {
            label: shape.label.clone(),
            points: shape.points().to_vec(),
            closed: Some(shape.is_closed()),
            filled: shape.filled,
            line_color: shape.line_color_raw(),
            fill_color: shape.fill_color_raw(),
        }
    }

    /// Rebuild a shape.
    ///
    /// Points are restored as saved when the record carries a closed flag.
    /// Legacy records go through the point-by-point path instead.
    pub fn to_shape(&self) -> ShapeResult<EditableShape> {
        let mut shape = EditableShape::new();
        shape.label = self.label.clone();
        shape.filled = self.filled;
        shape.set_line_color(self.line_color.map(Into::into));
        shape.set_fill_color(self.fill_color.map(Into::into));
        match self.closed {
            Some(closed) => {
                shape.points = self.points.clone();
                if closed {
                    shape.close()?;
                }
            }
            None => {
                for point in &self.points {
                    shape.add_point_old(*point)?;
                }
            }
        }
        Ok(shape)
    }
}

/// All annotations drawn on one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationDocument {
    /// Unique document identifier.
    pub id: String,
    /// Image the annotations belong to.
    pub image_path: String,
    shapes: Vec<ShapeRecord>,
}

impl Default for AnnotationDocument {
    fn default() -> Self {
        Self::new("")
    }
}

impl AnnotationDocument {
    /// Create an empty document for an image.
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            image_path: image_path.into(),
            shapes: Vec::new(),
        }
    }

    /// Capture a set of shapes.
    pub fn from_shapes<'a>(
        image_path: impl Into<String>,
        shapes: impl IntoIterator<Item = &'a EditableShape>,
    ) -> Self {
        let mut doc = Self::new(image_path);
        for shape in shapes {
            doc.add_shape(shape);
        }
        doc
    }

    pub fn add_shape(&mut self, shape: &EditableShape) {
        self.shapes.push(ShapeRecord::from_shape(shape));
    }

    pub fn records(&self) -> &[ShapeRecord] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Rebuild editable shapes. Fails on a record that claims to be closed with too few points.
    pub fn shapes(&self) -> ShapeResult<Vec<EditableShape>> {
        self.shapes.iter().map(ShapeRecord::to_shape).collect()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
