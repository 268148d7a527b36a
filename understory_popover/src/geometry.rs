// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor-relative placement math.
//!
//! Everything here is a pure function of its inputs. Offsets are expressed in
//! the overlay container's coordinate space: the overlay is laid out at the
//! container origin and then translated by the returned offset.

use kurbo::{Point, Rect, Size, Vec2};

use crate::Position;

/// How an overlay enters and leaves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PopoverKind {
    /// Always occupies its target frame; presentation only toggles opacity.
    #[default]
    Popover,
    /// Collapses onto the anchor's own bounds when dismissed and expands to
    /// the target frame when presented.
    Popout,
}

/// Horizontal offset that places an overlay of `frame` size next to `anchor`.
///
/// `extra_dx` is added unconditionally.
#[must_use]
pub fn offset_x(position: Position, frame: Size, anchor: Rect, extra_dx: f64) -> f64 {
    let x = match position {
        Position::Top | Position::Bottom => anchor.x0 + (anchor.width() - frame.width) / 2.0,
        Position::Left | Position::TopLeft | Position::BottomLeft => anchor.x0 - frame.width,
        Position::Right | Position::TopRight | Position::BottomRight => anchor.x0 + anchor.width(),
        Position::None => 0.0,
    };
    x + extra_dx
}

/// Vertical offset that places an overlay of `frame` size next to `anchor`.
///
/// `extra_dy` is added unconditionally.
#[must_use]
pub fn offset_y(position: Position, frame: Size, anchor: Rect, extra_dy: f64) -> f64 {
    let y = match position {
        Position::Left | Position::Right => anchor.y0 + (anchor.height() - frame.height) / 2.0,
        Position::Top | Position::TopLeft | Position::TopRight => anchor.y0 - frame.height,
        Position::Bottom | Position::BottomLeft | Position::BottomRight => {
            anchor.y0 + anchor.height()
        }
        Position::None => 0.0,
    };
    y + extra_dy
}

/// Offset of an overlay of `frame` size placed at `position` relative to `anchor`.
#[must_use]
pub fn placement_offset(position: Position, frame: Size, anchor: Rect, extra: Vec2) -> Vec2 {
    Vec2::new(
        offset_x(position, frame, anchor, extra.x),
        offset_y(position, frame, anchor, extra.y),
    )
}

/// Size of the overlay for the current presentation state.
#[must_use]
pub fn popover_size(kind: PopoverKind, presented: bool, target: Size, anchor: Rect) -> Size {
    match kind {
        PopoverKind::Popover => target,
        PopoverKind::Popout if presented => target,
        PopoverKind::Popout => anchor.size(),
    }
}

/// Offset of the overlay for the current presentation state.
///
/// A dismissed popout sits exactly on its anchor; the extra offset only
/// applies to the placed (presented) layout.
#[must_use]
pub fn popover_offset(
    kind: PopoverKind,
    presented: bool,
    position: Position,
    target: Size,
    anchor: Rect,
    extra: Vec2,
) -> Vec2 {
    match kind {
        PopoverKind::Popout if !presented => anchor.origin().to_vec2(),
        _ => placement_offset(position, target, anchor, extra),
    }
}

/// Resolved offset and size of an overlay for one layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PopoverLayout {
    /// Translation from the container origin to the overlay's top-left corner.
    pub offset: Vec2,
    /// Size of the overlay frame.
    pub size: Size,
}

impl PopoverLayout {
    /// An empty layout at the container origin.
    pub const ZERO: Self = Self {
        offset: Vec2::ZERO,
        size: Size::ZERO,
    };

    /// Computes the layout for the given inputs.
    #[must_use]
    pub fn resolve(
        kind: PopoverKind,
        presented: bool,
        position: Position,
        target: Size,
        anchor: Rect,
        extra: Vec2,
    ) -> Self {
        Self {
            offset: popover_offset(kind, presented, position, target, anchor, extra),
            size: popover_size(kind, presented, target, anchor),
        }
    }

    /// The overlay frame in container coordinates.
    #[must_use]
    pub fn frame(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO + self.offset, self.size)
    }

    /// The overlay frame in its own coordinates, at the origin.
    #[must_use]
    pub fn local_bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size)
    }

    /// Linearly interpolates between two layouts.
    ///
    /// Hosts drive popout transitions by feeding an animation's
    /// [progress](crate::Animation::progress) in as `t`. Spring progress may
    /// overshoot `1.0`, so `t` is not clamped.
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            offset: self.offset.lerp(to.offset, t),
            size: Size::new(
                self.size.width + (to.size.width - self.size.width) * t,
                self.size.height + (to.size.height - self.size.height) * t,
            ),
        }
    }
}
