//! Editable polygon / square annotation.

use super::ShapeId;
use crate::error::{ShapeError, ShapeResult};
use crate::highlight::{HighlightMode, HighlightState};
use crate::paint::fill_contains;
use crate::style::{SerializableColor, ShapeStyle};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use peniko::Color;
use uuid::Uuid;

/// An annotation outline whose vertices are placed and dragged by the user.
///
/// Vertex indices are only valid until the next point is added or removed.
#[derive(Debug, Clone)]
pub struct EditableShape {
    pub(crate) id: ShapeId,
    /// Class name shown next to the annotation.
    pub label: Option<String>,
    pub(crate) points: Vec<Point>,
    closed: bool,
    /// Draw the interior fill.
    pub filled: bool,
    /// Use the selection colors.
    pub selected: bool,
    highlight: HighlightState,
    line_color: Option<SerializableColor>,
    fill_color: Option<SerializableColor>,
}

impl Default for EditableShape {
    fn default() -> Self {
        Self::new()
    }
}

impl EditableShape {
    /// Create an empty, open shape.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            label: None,
            points: Vec::new(),
            closed: false,
            filled: false,
            selected: false,
            highlight: HighlightState::None,
            line_color: None,
            fill_color: None,
        }
    }

    /// Create an empty shape carrying a label.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new()
        }
    }

    /// Override the shared line color, e.g. for the pending outline of a draw gesture.
    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = Some(color.into());
        self
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Replace a single vertex without any constraint.
    pub fn set_point(&mut self, index: usize, point: Point) -> ShapeResult<()> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(ShapeError::VertexOutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Close the outline. Needs at least three points.
    pub fn close(&mut self) -> ShapeResult<()> {
        if self.points.len() < 3 {
            return Err(ShapeError::TooFewPoints {
                count: self.points.len(),
            });
        }
        self.closed = true;
        log::debug!("Closed shape {} with {} points", self.id, self.points.len());
        Ok(())
    }

    pub fn set_open(&mut self) {
        self.closed = false;
    }

    /// Append a point when rebuilding a polygon from saved data.
    ///
    /// A point equal to the first stored point closes the shape instead.
    pub fn add_point_old(&mut self, point: Point) -> ShapeResult<()> {
        if self.points.first() == Some(&point) {
            self.close()
        } else {
            self.points.push(point);
            Ok(())
        }
    }

    /// Two-click square gesture: a center click followed by a radius click.
    ///
    /// The second click replaces both points with the four corners of a square
    /// of half-side `|radius - center|` around the center, then closes the shape.
    /// An open shape that already holds two or more points, such as one
    /// reopened by [`pop_point`](Self::pop_point), gets the point appended.
    pub fn add_point(&mut self, point: Point) -> ShapeResult<()> {
        if self.closed {
            return Err(ShapeError::AlreadyClosed);
        }
        self.points.push(point);
        if self.points.len() == 2 {
            let center = self.points[0];
            let dist = center.distance(self.points[1]);
            self.points = vec![
                Point::new(center.x - dist, center.y - dist),
                Point::new(center.x - dist, center.y + dist),
                Point::new(center.x + dist, center.y + dist),
                Point::new(center.x + dist, center.y - dist),
            ];
            log::debug!("Built square around ({}, {}) with half side {}", center.x, center.y, dist);
            self.close()?;
        }
        Ok(())
    }

    /// Remove the last placed point. Reopens the shape once it can no longer be closed.
    pub fn pop_point(&mut self) -> Option<Point> {
        let point = self.points.pop()?;
        if self.closed && self.points.len() < 3 {
            log::debug!("Reopening shape {} after removing a point", self.id);
            self.closed = false;
        }
        Some(point)
    }

    /// Index of the first vertex within `epsilon` of `point`, in storage order.
    pub fn nearest_vertex(&self, point: Point, epsilon: f64) -> Option<usize> {
        self.points.iter().position(|p| p.distance(point) <= epsilon)
    }

    /// Translate the whole shape.
    pub fn move_by(&mut self, offset: Vec2) {
        for p in &mut self.points {
            *p += offset;
        }
    }

    /// Open polyline through the vertices in order.
    pub fn make_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for p in iter {
                path.line_to(*p);
            }
        }
        path
    }

    /// Axis-aligned bounding box, `None` for an empty shape.
    pub fn bounding_rect(&self) -> Option<Rect> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.make_path().bounding_box())
    }

    /// Containment test under the shared fill rule.
    ///
    /// The polygon always counts as closed here, even while the outline is
    /// still open and drawn without its last edge.
    pub fn contains_point(&self, point: Point) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        let mut path = self.make_path();
        path.close_path();
        fill_contains(&path, point)
    }

    pub fn highlight(&self) -> HighlightState {
        self.highlight
    }

    pub fn highlight_vertex(&mut self, index: usize, mode: HighlightMode) {
        self.highlight = HighlightState::Vertex { index, mode };
    }

    pub fn highlight_clear(&mut self) {
        self.highlight = HighlightState::None;
    }

    /// Per-shape line color override.
    pub fn line_color_override(&self) -> Option<Color> {
        self.line_color.map(Into::into)
    }

    pub fn set_line_color(&mut self, color: Option<Color>) {
        self.line_color = color.map(Into::into);
    }

    /// Per-shape fill color override.
    pub fn fill_color_override(&self) -> Option<Color> {
        self.fill_color.map(Into::into)
    }

    pub fn set_fill_color(&mut self, color: Option<Color>) {
        self.fill_color = color.map(Into::into);
    }

    pub(crate) fn line_color_raw(&self) -> Option<SerializableColor> {
        self.line_color
    }

    pub(crate) fn fill_color_raw(&self) -> Option<SerializableColor> {
        self.fill_color
    }

    /// Line color in effect, falling back to the shared style.
    pub fn line_color(&self, style: &ShapeStyle) -> Color {
        self.line_color.unwrap_or(style.line_color).into()
    }

    /// Fill color in effect, falling back to the shared style.
    pub fn fill_color(&self, style: &ShapeStyle) -> Color {
        self.fill_color.unwrap_or(style.fill_color).into()
    }

    /// Independent duplicate with a fresh id and no highlight.
    ///
    /// Color overrides are only carried over when they differ from `style`.
    pub fn copy(&self, style: &ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: self.label.as_ref().map(|l| format!("Copy of {}", l)),
            points: self.points.clone(),
            closed: self.closed,
            filled: self.filled,
            selected: self.selected,
            highlight: HighlightState::None,
            line_color: self.line_color.filter(|c| *c != style.line_color),
            fill_color: self.fill_color.filter(|c| *c != style.fill_color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> EditableShape {
        let mut shape = EditableShape::new();
        for p in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)] {
            shape.add_point_old(Point::new(p.0, p.1)).unwrap();
        }
        shape
    }

    fn unit_square() -> EditableShape {
        let mut shape = EditableShape::with_label("box");
        for p in [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)] {
            shape.add_point_old(Point::new(p.0, p.1)).unwrap();
        }
        shape.close().unwrap();
        shape
    }

    #[test]
    fn test_close_needs_three_points() {
        let mut shape = EditableShape::new();
        shape.add_point_old(Point::new(0.0, 0.0)).unwrap();
        shape.add_point_old(Point::new(1.0, 0.0)).unwrap();
        assert_eq!(shape.close(), Err(ShapeError::TooFewPoints { count: 2 }));
        assert!(!shape.is_closed());

        shape.add_point_old(Point::new(1.0, 1.0)).unwrap();
        assert!(shape.close().is_ok());
        assert!(shape.is_closed());

        shape.set_open();
        assert!(!shape.is_closed());
    }

    #[test]
    fn test_add_point_old_closes_on_first_point() {
        let mut shape = triangle();
        shape.add_point_old(Point::new(0.0, 0.0)).unwrap();
        assert!(shape.is_closed());
        assert_eq!(shape.len(), 3);
    }

    #[test]
    fn test_add_point_old_on_first_point_too_early() {
        let mut shape = EditableShape::new();
        shape.add_point_old(Point::new(3.0, 3.0)).unwrap();
        let result = shape.add_point_old(Point::new(3.0, 3.0));
        assert_eq!(result, Err(ShapeError::TooFewPoints { count: 1 }));
        assert_eq!(shape.len(), 1);
    }

    #[test]
    fn test_two_click_square() {
        let mut shape = EditableShape::new();
        shape.add_point(Point::new(5.0, 5.0)).unwrap();
        assert_eq!(shape.len(), 1);
        assert!(!shape.is_closed());

        // 3-4-5 triangle: distance is exactly 5
        shape.add_point(Point::new(8.0, 9.0)).unwrap();
        assert!(shape.is_closed());
        assert_eq!(
            shape.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(0.0, 10.0),
                Point::new(10.0, 10.0),
                Point::new(10.0, 0.0),
            ]
        );
        assert_eq!(shape.add_point(Point::new(1.0, 1.0)), Err(ShapeError::AlreadyClosed));
        assert_eq!(shape.len(), 4);
    }

    #[test]
    fn test_add_point_on_reopened_shape_appends() {
        let mut shape = EditableShape::new();
        shape.add_point(Point::new(0.0, 0.0)).unwrap();
        shape.add_point(Point::new(1.0, 0.0)).unwrap();
        shape.pop_point();
        assert_eq!(shape.add_point(Point::new(9.0, 9.0)), Err(ShapeError::AlreadyClosed));

        shape.pop_point();
        assert!(!shape.is_closed());
        shape.add_point(Point::new(9.0, 9.0)).unwrap();
        assert_eq!(
            shape.points(),
            &[Point::new(-1.0, -1.0), Point::new(-1.0, 1.0), Point::new(9.0, 9.0)]
        );
        assert!(!shape.is_closed());
    }

    #[test]
    fn test_pop_point() {
        let mut shape = triangle();
        shape.close().unwrap();
        assert_eq!(shape.pop_point(), Some(Point::new(10.0, 10.0)));
        assert!(!shape.is_closed());
        assert_eq!(shape.pop_point(), Some(Point::new(10.0, 0.0)));
        assert_eq!(shape.pop_point(), Some(Point::new(0.0, 0.0)));
        assert_eq!(shape.pop_point(), None);
    }

    #[test]
    fn test_nearest_vertex() {
        let shape = triangle();
        assert_eq!(shape.nearest_vertex(Point::new(0.5, 0.0), 1.0), Some(0));
        assert_eq!(shape.nearest_vertex(Point::new(20.0, 20.0), 1.0), None);
    }

    #[test]
    fn test_nearest_vertex_first_match_wins() {
        let mut shape = EditableShape::new();
        shape.add_point_old(Point::new(0.0, 0.0)).unwrap();
        shape.add_point_old(Point::new(1.0, 0.0)).unwrap();
        // Closer to index 1, but index 0 is also within range
        assert_eq!(shape.nearest_vertex(Point::new(0.9, 0.0), 1.0), Some(0));
    }

    #[test]
    fn test_move_by() {
        let mut shape = triangle();
        shape.move_by(Vec2::new(2.0, -3.0));
        assert_eq!(shape.point(0), Some(Point::new(2.0, -3.0)));
        assert_eq!(shape.point(2), Some(Point::new(12.0, 7.0)));
    }

    #[test]
    fn test_set_point_out_of_range() {
        let mut shape = triangle();
        assert!(shape.set_point(1, Point::new(4.0, 4.0)).is_ok());
        assert_eq!(shape.point(1), Some(Point::new(4.0, 4.0)));
        assert_eq!(
            shape.set_point(7, Point::ORIGIN),
            Err(ShapeError::VertexOutOfRange { index: 7, len: 3 })
        );
    }

    #[test]
    fn test_contains_point() {
        let shape = unit_square();
        assert!(shape.contains_point(Point::new(5.0, 5.0)));
        assert!(!shape.contains_point(Point::new(15.0, 15.0)));
    }

    #[test]
    fn test_open_shape_still_contains() {
        let shape = triangle();
        assert!(!shape.is_closed());
        assert!(shape.contains_point(Point::new(8.0, 2.0)));
        assert!(!shape.contains_point(Point::new(2.0, 8.0)));
    }

    #[test]
    fn test_self_crossing_polygon_excludes_doubly_wound_core() {
        // Pentagram: visiting every second vertex of a regular pentagon
        let mut shape = EditableShape::new();
        for k in [0, 2, 4, 1, 3] {
            let angle = std::f64::consts::FRAC_PI_2 + k as f64 * std::f64::consts::TAU / 5.0;
            shape.add_point_old(Point::new(10.0 * angle.cos(), 10.0 * angle.sin())).unwrap();
        }
        shape.close().unwrap();
        assert!(shape.contains_point(Point::new(0.0, 8.0)));
        assert!(!shape.contains_point(Point::new(0.0, 0.0)));
        assert!(!shape.contains_point(Point::new(0.0, -12.0)));
    }

    #[test]
    fn test_bounding_rect() {
        let shape = triangle();
        let bounds = shape.bounding_rect().unwrap();
        assert!((bounds.x0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 10.0).abs() < f64::EPSILON);
        assert!(EditableShape::new().bounding_rect().is_none());
    }

    #[test]
    fn test_highlight_transitions() {
        let mut shape = triangle();
        assert_eq!(shape.highlight(), HighlightState::None);
        shape.highlight_vertex(1, HighlightMode::MoveVertex);
        assert_eq!(shape.highlight().index(), Some(1));
        shape.highlight_clear();
        assert!(!shape.highlight().is_active());
    }

    #[test]
    fn test_copy_is_independent() {
        let style = ShapeStyle::default();
        let mut original = unit_square();
        original.filled = true;
        original.selected = true;
        original.highlight_vertex(0, HighlightMode::NearVertex);

        let mut copy = original.copy(&style);
        assert_eq!(copy.points(), original.points());
        assert!(copy.is_closed());
        assert!(copy.filled);
        assert!(copy.selected);
        assert_eq!(copy.label.as_deref(), Some("Copy of box"));
        assert_eq!(copy.highlight(), HighlightState::None);
        assert_ne!(copy.id(), original.id());

        copy.move_by(Vec2::new(100.0, 0.0));
        copy.pop_point();
        assert_eq!(original.len(), 4);
        assert_eq!(original.point(0), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_copy_keeps_only_distinct_overrides() {
        let style = ShapeStyle::default();
        let mut shape = triangle();
        shape.set_line_color(Some(Color::from_rgba8(1, 2, 3, 255)));
        shape.set_fill_color(Some(style.fill_color.into()));

        let copy = shape.copy(&style);
        assert_eq!(copy.line_color_raw(), Some(SerializableColor::new(1, 2, 3, 255)));
        assert_eq!(copy.fill_color_raw(), None);
        assert!(copy.label.is_none());
    }

    #[test]
    fn test_color_fallback() {
        let style = ShapeStyle::default();
        let shape = EditableShape::new().with_line_color(Color::from_rgba8(9, 9, 9, 255));
        assert_eq!(
            SerializableColor::from(shape.line_color(&style)),
            SerializableColor::opaque(9, 9, 9)
        );
        assert_eq!(SerializableColor::from(shape.fill_color(&style)), style.fill_color);
    }
}
