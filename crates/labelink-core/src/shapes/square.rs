//! Square-preserving vertex drags.
//!
//! Corners are stored as produced by the two-click gesture:
//!
//! ```text
//!   0 ---- 3
//!   |      |
//!   1 ---- 2
//! ```
//!
//! Corners 0/1 and 2/3 share x, corners 1/2 and 3/0 share y.

use super::EditableShape;
use crate::error::{ShapeError, ShapeResult};
use kurbo::{Point, Vec2};

/// Allowed side-length mismatch before a shape is reported as no longer square.
pub const SQUARE_TOLERANCE: f64 = 0.1;

/// Length of one quantized drag step along each axis.
const STEP: f64 = 0.5;

/// Snap a free drag delta to a 45° diagonal step for `corner`.
///
/// Corners 0 and 2 sit on the main diagonal and move with equal signs,
/// corners 1 and 3 on the anti-diagonal and move with opposite signs.
fn quantize(corner: usize, offset: Vec2) -> Vec2 {
    if corner % 2 == 0 {
        if offset.x >= 0.0 || offset.y >= 0.0 {
            Vec2::new(STEP, STEP)
        } else {
            Vec2::new(-STEP, -STEP)
        }
    } else if offset.x >= 0.0 || offset.y <= 0.0 {
        Vec2::new(STEP, -STEP)
    } else {
        Vec2::new(-STEP, STEP)
    }
}

/// Corner sharing the x coordinate with `corner`.
fn x_partner(corner: usize) -> usize {
    corner ^ 1
}

/// Corner sharing the y coordinate with `corner`.
fn y_partner(corner: usize) -> usize {
    3 - corner
}

impl EditableShape {
    /// Drag one corner of a square, realigning the others so it stays square.
    ///
    /// The requested offset is snapped to a half-unit diagonal step. The
    /// dragged corner moves by the step and its diagonal opposite by the
    /// reverse step, so the square grows or shrinks about its center.
    pub fn move_vertex_by(&mut self, index: usize, offset: Vec2) -> ShapeResult<()> {
        if self.points.len() != 4 {
            return Err(ShapeError::NotASquare {
                count: self.points.len(),
            });
        }
        if index >= 4 {
            return Err(ShapeError::VertexOutOfRange { index, len: 4 });
        }

        let step = quantize(index, offset);
        let opposite = (index + 2) % 4;

        let mut next = [Point::ORIGIN; 4];
        next[index] = self.points[index] + step;
        next[opposite] = self.points[opposite] - step;

        for adjacent in [(index + 1) % 4, (index + 3) % 4] {
            let x_from = x_partner(adjacent);
            let y_from = y_partner(adjacent);
            next[adjacent] = Point::new(next[x_from].x, next[y_from].y);
        }

        self.points.copy_from_slice(&next);
        log::trace!("Moved corner {} of {} by ({}, {})", index, self.id, step.x, step.y);

        if !self.is_square(SQUARE_TOLERANCE) {
            log::warn!(
                "Shape {} is no longer square after moving corner {}: sides {:?}",
                self.id,
                index,
                self.side_lengths()
            );
        }
        Ok(())
    }

    /// Whether the four sides are equal within `tolerance`.
    ///
    /// Shapes without exactly four points are never square.
    pub fn is_square(&self, tolerance: f64) -> bool {
        let Some(sides) = self.side_lengths() else {
            return false;
        };
        let min = sides.iter().copied().fold(f64::INFINITY, f64::min);
        let max = sides.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        max - min <= tolerance
    }

    fn side_lengths(&self) -> Option<[f64; 4]> {
        if self.points.len() != 4 {
            return None;
        }
        let p = &self.points;
        Some([
            p[0].distance(p[1]),
            p[1].distance(p[2]),
            p[2].distance(p[3]),
            p[3].distance(p[0]),
        ])
    }
}
