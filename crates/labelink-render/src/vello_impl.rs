//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError, paint_shapes};
use kurbo::{Affine, BezPath, Rect, Stroke};
use labelink_core::paint::{FILL_RULE, Surface};
use peniko::{Color, Fill};
use vello::Scene;

/// Drawing surface that encodes into a Vello scene.
///
/// Paths are given in image coordinates and mapped through `transform`.
pub struct VelloSurface<'s> {
    scene: &'s mut Scene,
    transform: Affine,
    pen_color: Color,
    pen_width: f64,
}

impl<'s> VelloSurface<'s> {
    pub fn new(scene: &'s mut Scene, transform: Affine) -> Self {
        Self {
            scene,
            transform,
            pen_color: Color::BLACK,
            pen_width: 1.0,
        }
    }
}

impl Surface for VelloSurface<'_> {
    fn set_pen(&mut self, color: Color, width: f64) {
        self.pen_color = color;
        self.pen_width = width;
    }

    fn stroke_path(&mut self, path: &BezPath) {
        self.scene.stroke(
            &Stroke::new(self.pen_width),
            self.transform,
            self.pen_color,
            None,
            path,
        );
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.scene.fill(FILL_RULE, self.transform, color, None, path);
    }
}

/// Vello renderer for annotation frames.
#[derive(Default)]
pub struct VelloRenderer {
    scene: Scene,
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        if !ctx.transform.is_finite() || ctx.transform.determinant() == 0.0 {
            return Err(RendererError::RenderFailed(format!(
                "Degenerate view transform {:?}",
                ctx.transform
            )));
        }

        self.scene.reset();

        let viewport = Rect::from_origin_size((0.0, 0.0), ctx.viewport_size);
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            self.background_color(ctx),
            None,
            &viewport,
        );

        let mut surface = VelloSurface::new(&mut self.scene, ctx.transform);
        paint_shapes(&mut surface, ctx);
        log::trace!("Built scene with {} shapes", ctx.shapes.len());
        Ok(())
    }
}
