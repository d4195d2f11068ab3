//! Renderer trait abstraction.

use kurbo::{Affine, Size};
use labelink_core::paint::Surface;
use labelink_core::shapes::EditableShape;
use labelink_core::style::ShapeStyle;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Shapes to draw, back to front.
    pub shapes: &'a [EditableShape],
    /// Shared styling for every shape without overrides.
    pub style: &'a ShapeStyle,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Image-to-viewport transform.
    pub transform: Affine,
    /// Background color.
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(shapes: &'a [EditableShape], style: &'a ShapeStyle, viewport_size: Size) -> Self {
        Self {
            shapes,
            style,
            viewport_size,
            transform: Affine::scale(style.scale()),
            background_color: Color::from_rgba8(40, 40, 40, 255),
        }
    }

    /// Set the image-to-viewport transform (zoom plus pan).
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Paint every shape of the frame onto a surface, in order.
pub fn paint_shapes<S: Surface + ?Sized>(surface: &mut S, ctx: &RenderContext) {
    for shape in ctx.shapes {
        shape.paint(surface, ctx.style);
    }
}
