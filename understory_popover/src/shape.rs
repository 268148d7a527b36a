// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rounded rectangle outlines with a single arrow.
//!
//! [`ArrowShape`] is the speech-bubble outline drawn behind popover content
//! and used to clip it. The arrow is a protrusion: the rounded body is inset
//! by the arrow length on the arrow's edge, and an isosceles triangle with
//! base and height equal to the arrow length fills the freed band, its tip
//! touching the outer rectangle.
//!
//! ```rust
//! use kurbo::{Rect, Shape};
//! use understory_popover::{ArrowShape, Position};
//!
//! let bubble = ArrowShape::new(Rect::new(0.0, 0.0, 120.0, 60.0), Position::Bottom, 20.0, 10.0);
//! assert_eq!(bubble.bounding_box(), Rect::new(0.0, 0.0, 120.0, 60.0));
//! assert_eq!(bubble.body().rect(), Rect::new(0.0, 0.0, 120.0, 40.0));
//! ```

use alloc::vec::IntoIter;
use core::f64::consts::{FRAC_PI_2, PI};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Arc, BezPath, PathEl, Point, Rect, RoundedRect, RoundedRectRadii, Shape, Vec2};

use crate::position::{Edge, EdgeAlignment};
use crate::Position;

/// A rounded rectangle with an optional arrow on one edge.
///
/// Corner radii apply to the body independently of the arrow and are clamped
/// the way [`RoundedRect`] clamps them. With an arrow length of zero, an arrow
/// position of [`Position::None`], or no straight edge left to host the arrow,
/// the outline is exactly the [`RoundedRect`] outline of the body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArrowShape {
    rect: Rect,
    arrow_position: Position,
    arrow_length: f64,
    radii: RoundedRectRadii,
}

/// The resolved arrow triangle, in absolute coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Notch {
    edge: Edge,
    /// Low end of the base, along the edge.
    start: f64,
    /// High end of the base, along the edge.
    end: f64,
    /// Cross-axis coordinate of the body edge the base sits on.
    base: f64,
    /// Cross-axis coordinate of the tip.
    tip: f64,
}

impl Notch {
    fn tip_point(&self) -> Point {
        let along = (self.start + self.end) / 2.0;
        if self.edge.is_horizontal() {
            Point::new(along, self.tip)
        } else {
            Point::new(self.tip, along)
        }
    }

    fn base_points(&self) -> (Point, Point) {
        if self.edge.is_horizontal() {
            (
                Point::new(self.start, self.base),
                Point::new(self.end, self.base),
            )
        } else {
            (
                Point::new(self.base, self.start),
                Point::new(self.base, self.end),
            )
        }
    }

    fn width(&self) -> f64 {
        self.end - self.start
    }

    fn height(&self) -> f64 {
        (self.tip - self.base).abs()
    }

    fn contains(&self, pt: Point) -> bool {
        let (a, b) = self.base_points();
        let c = self.tip_point();
        let d1 = (b - a).cross(pt - a);
        let d2 = (c - b).cross(pt - b);
        let d3 = (a - c).cross(pt - c);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }
}

impl ArrowShape {
    /// Creates an outline filling `rect` with an arrow at `arrow_position`.
    ///
    /// Negative or non-finite arrow lengths are treated as zero.
    #[must_use]
    pub fn new(
        rect: Rect,
        arrow_position: Position,
        arrow_length: f64,
        radii: impl Into<RoundedRectRadii>,
    ) -> Self {
        let arrow_length = if arrow_length.is_finite() {
            arrow_length.max(0.0)
        } else {
            0.0
        };
        Self {
            rect: rect.abs(),
            arrow_position,
            arrow_length,
            radii: radii.into(),
        }
    }

    /// The outer rectangle, including the arrow band.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The edge position the arrow is drawn at.
    #[must_use]
    pub fn arrow_position(&self) -> Position {
        self.arrow_position
    }

    /// Arrow base and height.
    #[must_use]
    pub fn arrow_length(&self) -> f64 {
        self.arrow_length
    }

    /// Requested corner radii, before clamping.
    #[must_use]
    pub fn radii(&self) -> RoundedRectRadii {
        self.radii
    }

    fn arrow_edge(&self) -> Option<Edge> {
        if self.arrow_length > 0.0 {
            self.arrow_position.arrow_edge()
        } else {
            None
        }
    }

    /// The rounded body: `rect` inset by the arrow length on the arrow edge.
    #[must_use]
    pub fn body(&self) -> RoundedRect {
        let Rect { x0, y0, x1, y1 } = self.rect;
        let len = self.arrow_length;
        let body = match self.arrow_edge() {
            Some(Edge::Top) => Rect::new(x0, (y0 + len).min(y1), x1, y1),
            Some(Edge::Bottom) => Rect::new(x0, y0, x1, (y1 - len).max(y0)),
            Some(Edge::Left) => Rect::new((x0 + len).min(x1), y0, x1, y1),
            Some(Edge::Right) => Rect::new(x0, y0, (x1 - len).max(x0), y1),
            None => self.rect,
        };
        RoundedRect::from_rect(body, self.radii)
    }

    fn notch(&self) -> Option<Notch> {
        let edge = self.arrow_edge()?;
        let body = self.body();
        let b = body.rect();
        let r = body.radii();
        // Straight span of the edge between the two corner arcs, plus the
        // edge's midpoint and the cross-axis coordinates of base and tip.
        let (lo, hi, mid, base, tip) = match edge {
            Edge::Top => (
                b.x0 + r.top_left,
                b.x1 - r.top_right,
                b.center().x,
                b.y0,
                self.rect.y0,
            ),
            Edge::Bottom => (
                b.x0 + r.bottom_left,
                b.x1 - r.bottom_right,
                b.center().x,
                b.y1,
                self.rect.y1,
            ),
            Edge::Left => (
                b.y0 + r.top_left,
                b.y1 - r.bottom_left,
                b.center().y,
                b.x0,
                self.rect.x0,
            ),
            Edge::Right => (
                b.y0 + r.top_right,
                b.y1 - r.bottom_right,
                b.center().y,
                b.x1,
                self.rect.x1,
            ),
        };
        let width = self.arrow_length.min(hi - lo);
        if width.is_nan() || width <= 0.0 || base == tip {
            return None;
        }
        let start = match self.arrow_position.arrow_alignment() {
            EdgeAlignment::Start => lo,
            EdgeAlignment::End => hi - width,
            EdgeAlignment::Center => (mid - width / 2.0).clamp(lo, hi - width),
        };
        Some(Notch {
            edge,
            start,
            end: start + width,
            base,
            tip,
        })
    }

    /// The arrow tip, if an arrow is drawn.
    #[must_use]
    pub fn tip(&self) -> Option<Point> {
        self.notch().map(|n| n.tip_point())
    }

    /// Returns `true` if the outline carries an arrow.
    #[must_use]
    pub fn has_arrow(&self) -> bool {
        self.notch().is_some()
    }

    fn build_path(&self, notch: &Notch, tolerance: f64) -> BezPath {
        let body = self.body();
        let b = body.rect();
        let r = body.radii();
        let along = (notch.start + notch.end) / 2.0;
        let on = |edge: Edge| (notch.edge == edge).then_some(notch);

        let mut path = BezPath::new();
        path.move_to((b.x0 + r.top_left, b.y0));

        // Top edge, left to right.
        if let Some(n) = on(Edge::Top) {
            path.line_to((n.start, n.base));
            path.line_to((along, n.tip));
            path.line_to((n.end, n.base));
        }
        path.line_to((b.x1 - r.top_right, b.y0));
        corner(
            &mut path,
            Point::new(b.x1 - r.top_right, b.y0 + r.top_right),
            r.top_right,
            -FRAC_PI_2,
            tolerance,
        );

        // Right edge, top to bottom.
        if let Some(n) = on(Edge::Right) {
            path.line_to((n.base, n.start));
            path.line_to((n.tip, along));
            path.line_to((n.base, n.end));
        }
        path.line_to((b.x1, b.y1 - r.bottom_right));
        corner(
            &mut path,
            Point::new(b.x1 - r.bottom_right, b.y1 - r.bottom_right),
            r.bottom_right,
            0.0,
            tolerance,
        );

        // Bottom edge, right to left.
        if let Some(n) = on(Edge::Bottom) {
            path.line_to((n.end, n.base));
            path.line_to((along, n.tip));
            path.line_to((n.start, n.base));
        }
        path.line_to((b.x0 + r.bottom_left, b.y1));
        corner(
            &mut path,
            Point::new(b.x0 + r.bottom_left, b.y1 - r.bottom_left),
            r.bottom_left,
            FRAC_PI_2,
            tolerance,
        );

        // Left edge, bottom to top.
        if let Some(n) = on(Edge::Left) {
            path.line_to((n.base, n.end));
            path.line_to((n.tip, along));
            path.line_to((n.base, n.start));
        }
        path.line_to((b.x0, b.y0 + r.top_left));
        corner(
            &mut path,
            Point::new(b.x0 + r.top_left, b.y0 + r.top_left),
            r.top_left,
            PI,
            tolerance,
        );

        path.close_path();
        path
    }
}

/// Appends a clockwise quarter arc starting at `start_angle`.
fn corner(path: &mut BezPath, center: Point, radius: f64, start_angle: f64, tolerance: f64) {
    if radius > 0.0 {
        let arc = Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle,
            sweep_angle: FRAC_PI_2,
            x_rotation: 0.0,
        };
        path.extend(arc.append_iter(tolerance));
    }
}

impl Shape for ArrowShape {
    type PathElementsIter<'iter> = IntoIter<PathEl>;

    fn path_elements(&self, tolerance: f64) -> Self::PathElementsIter<'_> {
        let path = match self.notch() {
            Some(notch) => self.build_path(&notch, tolerance),
            None => self.body().to_path(tolerance),
        };
        path.into_iter()
    }

    fn area(&self) -> f64 {
        let body = self.body().area();
        match self.notch() {
            Some(n) => body + 0.5 * n.width() * n.height(),
            None => body,
        }
    }

    fn perimeter(&self, accuracy: f64) -> f64 {
        let body = self.body().perimeter(accuracy);
        match self.notch() {
            Some(n) => {
                let half = n.width() / 2.0;
                let slant = (half * half + n.height() * n.height()).sqrt();
                body - n.width() + 2.0 * slant
            }
            None => body,
        }
    }

    fn winding(&self, pt: Point) -> i32 {
        let body = self.body().winding(pt);
        if body != 0 {
            return body;
        }
        match self.notch() {
            Some(n) if n.contains(pt) => 1,
            _ => 0,
        }
    }

    fn bounding_box(&self) -> Rect {
        let body = self.body().rect();
        match self.notch() {
            Some(n) => body.union_pt(n.tip_point()),
            None => body,
        }
    }
}
