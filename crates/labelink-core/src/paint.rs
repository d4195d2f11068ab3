//! Drawing surface abstraction and shape painting.

use crate::shapes::EditableShape;
use crate::style::{MarkerShape, SerializableColor, ShapeStyle};
use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape};
use peniko::{Color, Fill};

/// Flattening tolerance for marker ellipses.
const MARKER_TOLERANCE: f64 = 0.1;

/// Fill rule shared by surfaces and hit testing.
pub const FILL_RULE: Fill = Fill::EvenOdd;

/// Whether `point` lies in the area `path` covers when filled with [`FILL_RULE`].
pub fn fill_contains(path: &BezPath, point: Point) -> bool {
    let winding = path.winding(point);
    match FILL_RULE {
        Fill::EvenOdd => winding % 2 != 0,
        Fill::NonZero => winding != 0,
    }
}

/// Immediate-mode 2D drawing target.
///
/// Implementations keep the current pen between calls, the same way a
/// painter object does in most toolkits.
pub trait Surface {
    /// Set the color and width used by subsequent strokes.
    fn set_pen(&mut self, color: Color, width: f64);

    /// Stroke a path with the current pen.
    fn stroke_path(&mut self, path: &BezPath);

    /// Fill a path with a solid color using [`FILL_RULE`].
    fn fill_path(&mut self, path: &BezPath, color: Color);
}

/// A recorded drawing call.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    SetPen { color: SerializableColor, width: f64 },
    Stroke(BezPath),
    Fill { path: BezPath, color: SerializableColor },
}

/// Surface that records every call, for headless use and tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn set_pen(&mut self, color: Color, width: f64) {
        self.commands.push(DrawCommand::SetPen {
            color: color.into(),
            width,
        });
    }

    fn stroke_path(&mut self, path: &BezPath) {
        self.commands.push(DrawCommand::Stroke(path.clone()));
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color: color.into(),
        });
    }
}

impl EditableShape {
    /// Draw the outline, vertex markers and optional fill.
    ///
    /// Does nothing for a shape without points.
    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S, style: &ShapeStyle) {
        if self.is_empty() {
            return;
        }

        let line_color = if self.selected {
            style.select_line_color.into()
        } else {
            self.line_color(style)
        };
        surface.set_pen(line_color, style.pen_width());

        let mut line_path = self.make_path();
        if self.is_closed() {
            line_path.line_to(self.points[0]);
        }

        let mut vertex_path = BezPath::new();
        for index in 0..self.len() {
            self.draw_vertex(&mut vertex_path, index, style);
        }

        surface.stroke_path(&line_path);
        surface.stroke_path(&vertex_path);
        surface.fill_path(&vertex_path, self.vertex_fill_color(style));

        if self.filled {
            let fill = if self.selected {
                style.select_fill_color.into()
            } else {
                self.fill_color(style)
            };
            surface.fill_path(&line_path, fill);
        }
    }

    /// Fill color for every vertex marker of this frame.
    pub fn vertex_fill_color(&self, style: &ShapeStyle) -> Color {
        if self.highlight().is_active() {
            style.hvertex_fill_color.into()
        } else {
            style.vertex_fill_color.into()
        }
    }

    /// Append the marker for vertex `index` to `path`.
    fn draw_vertex(&self, path: &mut BezPath, index: usize, style: &ShapeStyle) {
        let point = self.points[index];
        let mut diameter = style.marker_diameter();
        let mut marker = style.marker;
        if let Some(mode) = self.highlight().mode_for(index) {
            diameter *= mode.size_factor();
            marker = mode.marker();
        }
        append_marker(path, point, diameter, marker);
    }
}

fn append_marker(path: &mut BezPath, center: Point, diameter: f64, marker: MarkerShape) {
    match marker {
        MarkerShape::Square => {
            let rect = Rect::from_center_size(center, (diameter, diameter));
            path.extend(rect.path_elements(MARKER_TOLERANCE));
        }
        MarkerShape::Round => {
            let circle = Circle::new(center, diameter / 2.0);
            path.extend(circle.path_elements(MARKER_TOLERANCE));
        }
    }
}
