//! Shared styling for annotation shapes.
//!
//! A single [`ShapeStyle`] is set up when the application starts and handed
//! by reference to every paint and copy call. Shapes only keep their own
//! color overrides.

use crate::error::{ShapeError, ShapeResult};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Marker drawn on each vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerShape {
    /// Axis-aligned box centered on the vertex.
    Square,
    /// Circle centered on the vertex.
    #[default]
    Round,
}

pub const DEFAULT_LINE_COLOR: SerializableColor = SerializableColor::new(0, 255, 0, 128);
pub const DEFAULT_FILL_COLOR: SerializableColor = SerializableColor::new(255, 0, 0, 128);
pub const DEFAULT_SELECT_LINE_COLOR: SerializableColor = SerializableColor::opaque(255, 255, 255);
pub const DEFAULT_SELECT_FILL_COLOR: SerializableColor = SerializableColor::new(0, 128, 255, 155);
pub const DEFAULT_VERTEX_FILL_COLOR: SerializableColor = SerializableColor::opaque(0, 255, 0);
pub const DEFAULT_HVERTEX_FILL_COLOR: SerializableColor = SerializableColor::opaque(255, 0, 0);

/// Styling shared by every shape that has not overridden it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    pub line_color: SerializableColor,
    pub fill_color: SerializableColor,
    pub select_line_color: SerializableColor,
    pub select_fill_color: SerializableColor,
    pub vertex_fill_color: SerializableColor,
    /// Vertex fill used while any vertex of the shape is highlighted.
    pub hvertex_fill_color: SerializableColor,
    pub marker: MarkerShape,
    /// Marker diameter in screen units at scale 1.0.
    pub point_size: f64,
    /// Image zoom factor. Stroke widths and markers shrink as it grows.
    scale: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            line_color: DEFAULT_LINE_COLOR,
            fill_color: DEFAULT_FILL_COLOR,
            select_line_color: DEFAULT_SELECT_LINE_COLOR,
            select_fill_color: DEFAULT_SELECT_FILL_COLOR,
            vertex_fill_color: DEFAULT_VERTEX_FILL_COLOR,
            hvertex_fill_color: DEFAULT_HVERTEX_FILL_COLOR,
            marker: MarkerShape::default(),
            point_size: 8.0,
            scale: 1.0,
        }
    }
}

impl ShapeStyle {
    /// Load a style from a JSON preference blob. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let style: Self = serde_json::from_str(json)?;
        if !(style.scale.is_finite() && style.scale > 0.0) {
            log::warn!("Ignoring invalid scale {} in style preferences", style.scale);
            return Ok(Self { scale: 1.0, ..style });
        }
        Ok(style)
    }

    /// Serialize the style to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Update the zoom factor, typically on a zoom change.
    pub fn set_scale(&mut self, scale: f64) -> ShapeResult<()> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ShapeError::InvalidScale(scale));
        }
        self.scale = scale;
        Ok(())
    }

    /// Outline width in device units: `max(1, round(2 / scale))`.
    pub fn pen_width(&self) -> f64 {
        (2.0 / self.scale).round().max(1.0)
    }

    /// Base marker diameter at the current scale.
    pub fn marker_diameter(&self) -> f64 {
        self.point_size / self.scale
    }
}
