//! Annotation shape definitions.

mod editable;
mod square;

pub use editable::EditableShape;
pub use square::SQUARE_TOLERANCE;

use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;
