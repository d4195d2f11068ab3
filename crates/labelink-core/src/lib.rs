//! labelink Core Library
//!
//! Renderer-agnostic annotation shapes for the labelink image labeller:
//! editable polygons and squares, their shared styling, and persistence.

pub mod document;
pub mod error;
pub mod highlight;
pub mod paint;
pub mod shapes;
pub mod storage;
pub mod style;

pub use document::{AnnotationDocument, ShapeRecord};
pub use error::{ShapeError, ShapeResult};
pub use highlight::{HighlightMode, HighlightState};
pub use paint::{DrawCommand, RecordingSurface, Surface};
pub use shapes::{EditableShape, ShapeId};
pub use style::{MarkerShape, SerializableColor, ShapeStyle};
