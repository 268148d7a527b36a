// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement and arrow directions.

/// Where an overlay sits relative to its anchor, or which way its arrow points.
///
/// The same enum describes both the *placement* of a popover (the popover is
/// `Top` of its anchor) and the *arrow position* (the arrow is drawn on the
/// popover's `Bottom` edge). By default the arrow position is the
/// [opposite](Position::opposite) of the placement, so the arrow points back
/// at the anchor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Position {
    /// Above the anchor, horizontally centered.
    Top,
    /// Below the anchor, horizontally centered.
    Bottom,
    /// Left of the anchor, vertically centered.
    Left,
    /// Right of the anchor, vertically centered.
    Right,
    /// Above and to the left of the anchor.
    TopLeft,
    /// Above and to the right of the anchor.
    TopRight,
    /// Below and to the left of the anchor.
    BottomLeft,
    /// Below and to the right of the anchor.
    BottomRight,
    /// No direction.
    ///
    /// As a placement this pins the overlay to the container origin. As an
    /// arrow override it means "derive the arrow from the placement".
    #[default]
    None,
}

impl Position {
    /// Every position, directional values first.
    pub const ALL: [Self; 9] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
        Self::None,
    ];

    /// Returns the mirrored position.
    ///
    /// This is an involution: `p.opposite().opposite() == p` for every value,
    /// and [`Position::None`] is its only fixed point.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomLeft => Self::TopRight,
            Self::BottomRight => Self::TopLeft,
            Self::None => Self::None,
        }
    }

    /// Returns `true` for [`Position::None`].
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// The outline edge an arrow at this position is drawn on.
    ///
    /// Corner positions use the top or bottom edge; the horizontal half is
    /// expressed by [`Position::arrow_alignment`].
    #[must_use]
    pub const fn arrow_edge(self) -> Option<Edge> {
        match self {
            Self::Top | Self::TopLeft | Self::TopRight => Some(Edge::Top),
            Self::Bottom | Self::BottomLeft | Self::BottomRight => Some(Edge::Bottom),
            Self::Left => Some(Edge::Left),
            Self::Right => Some(Edge::Right),
            Self::None => None,
        }
    }

    /// Where along its [edge](Position::arrow_edge) an arrow at this position sits.
    #[must_use]
    pub const fn arrow_alignment(self) -> EdgeAlignment {
        match self {
            Self::TopLeft | Self::BottomLeft => EdgeAlignment::Start,
            Self::TopRight | Self::BottomRight => EdgeAlignment::End,
            _ => EdgeAlignment::Center,
        }
    }
}

/// One side of an axis-aligned outline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The `y0` edge.
    Top,
    /// The `x1` edge.
    Right,
    /// The `y1` edge.
    Bottom,
    /// The `x0` edge.
    Left,
}

impl Edge {
    /// Returns `true` for [`Edge::Top`] and [`Edge::Bottom`].
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Alignment of a feature along an edge, in increasing coordinate order.
///
/// `Start` is the low end (left for horizontal edges, top for vertical ones).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeAlignment {
    /// Against the low-coordinate corner.
    Start,
    /// Centered on the edge.
    Center,
    /// Against the high-coordinate corner.
    End,
}
