//! Vertex highlight state.

use crate::style::MarkerShape;

/// How a highlighted vertex is emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightMode {
    /// Cursor is hovering close to the vertex.
    #[default]
    NearVertex,
    /// Vertex is being dragged.
    MoveVertex,
}

impl HighlightMode {
    /// Marker size multiplier for this mode.
    pub fn size_factor(self) -> f64 {
        match self {
            HighlightMode::NearVertex => 4.0,
            HighlightMode::MoveVertex => 1.5,
        }
    }

    /// Marker shape that replaces the default one.
    pub fn marker(self) -> MarkerShape {
        match self {
            HighlightMode::NearVertex => MarkerShape::Round,
            HighlightMode::MoveVertex => MarkerShape::Square,
        }
    }
}

/// Rendering hint set by the caller from cursor proximity or drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightState {
    #[default]
    None,
    Vertex { index: usize, mode: HighlightMode },
}

impl HighlightState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Vertex { .. })
    }

    /// Highlighted vertex index, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Vertex { index, .. } => Some(*index),
        }
    }

    /// Mode applied to vertex `index`, or `None` when it is not the highlighted one.
    pub fn mode_for(&self, index: usize) -> Option<HighlightMode> {
        match *self {
            Self::Vertex { index: i, mode } if i == index => Some(mode),
            _ => None,
        }
    }
}
