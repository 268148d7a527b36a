// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition of a popover from its anchor, settings, and content.

use kurbo::{Affine, Rect};
use smallvec::smallvec;

use crate::{
    AnchorRegistry, ArrowShape, Composite, Node, PaintSink, PopoverKind, PopoverLayout,
    PopoverSettings, Position,
};

/// Everything the composer reads for one pass.
#[derive(Copy, Clone, Debug)]
pub struct PopoverRequest<'a> {
    /// Popover or popout behavior.
    pub kind: PopoverKind,
    /// Placement relative to the anchor.
    pub position: Position,
    /// Anchor to attach to. `None` never resolves.
    pub anchor_id: Option<&'a str>,
    /// Whether the popover is currently presented.
    pub presented: bool,
    /// Target frame; only its size is used.
    pub frame: Rect,
    /// Visual settings.
    pub settings: &'a PopoverSettings,
    /// Maps registry coordinates into the overlay container's coordinates.
    pub to_local: Affine,
}

/// A composed popover: the render node plus the values it was built from.
#[derive(Clone, Debug, PartialEq)]
pub struct PopoverNode<C> {
    node: Node<C>,
    layout: PopoverLayout,
    arrow_position: Position,
    anchor_bounds: Option<Rect>,
    opacity: f32,
}

impl<C> PopoverNode<C> {
    /// The render node.
    #[must_use]
    pub fn node(&self) -> &Node<C> {
        &self.node
    }

    /// Consumes the wrapper, returning the render node.
    #[must_use]
    pub fn into_node(self) -> Node<C> {
        self.node
    }

    /// Offset and size the popover was laid out with.
    #[must_use]
    pub fn layout(&self) -> PopoverLayout {
        self.layout
    }

    /// Popover frame in container coordinates.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.layout.frame()
    }

    /// Where the arrow was drawn.
    #[must_use]
    pub fn arrow_position(&self) -> Position {
        self.arrow_position
    }

    /// Resolved anchor bounds in container coordinates, if the anchor was found.
    #[must_use]
    pub fn anchor_bounds(&self) -> Option<Rect> {
        self.anchor_bounds
    }

    /// Returns `true` if the anchor id resolved in the registry.
    #[must_use]
    pub fn anchor_resolved(&self) -> bool {
        self.anchor_bounds.is_some()
    }

    /// Opacity of the popover layer: `1.0` when anchored and presented, else `0.0`.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Walks the render node into `sink`.
    pub fn paint(&self, sink: &mut impl PaintSink<C>) {
        self.node.paint(sink);
    }
}

/// Shrinks `bounds` by `padding` on every side, collapsing to its center
/// rather than inverting.
fn pad(bounds: Rect, padding: f64) -> Rect {
    let center = bounds.center();
    let half_w = (bounds.width() / 2.0 - padding).max(0.0);
    let half_h = (bounds.height() / 2.0 - padding).max(0.0);
    Rect::new(
        center.x - half_w,
        center.y - half_h,
        center.x + half_w,
        center.y + half_h,
    )
}

/// Builds the popover for one pass.
///
/// The result is, from the inside out: the content padded by the arrow
/// length, laid over the arrow outline filled with the background, in a
/// layer that is clipped to the same outline, shadowed, translated to the
/// placement offset, and fully transparent unless the anchor resolved and the
/// popover is presented.
///
/// Unresolved anchors are treated as a zero rectangle at the origin.
#[must_use]
pub fn compose<C>(
    registry: &AnchorRegistry,
    request: &PopoverRequest<'_>,
    content: C,
) -> PopoverNode<C> {
    let settings = request.settings.sanitized();
    let anchor_bounds = request
        .anchor_id
        .and_then(|id| registry.resolve(id, request.to_local));
    if anchor_bounds.is_none() {
        tracing::trace!(
            anchor_id = ?request.anchor_id,
            anchors = registry.len(),
            "popover anchor not found; composing transparent"
        );
    }

    let layout = PopoverLayout::resolve(
        request.kind,
        request.presented,
        request.position,
        request.frame.size(),
        anchor_bounds.unwrap_or(Rect::ZERO),
        settings.offset,
    );
    let arrow_position = settings.arrow_position_for(request.position);
    let bounds = layout.local_bounds();
    let outline = ArrowShape::new(
        bounds,
        arrow_position,
        settings.arrow_length,
        settings.corner_radii,
    );
    let opacity = if anchor_bounds.is_some() && request.presented {
        1.0
    } else {
        0.0
    };

    let node = Node::composite(Composite {
        children: smallvec![
            Node::ShapedFill {
                shape: outline,
                brush: settings.background,
            },
            Node::Content {
                content,
                frame: pad(bounds, settings.arrow_length),
            },
        ],
        clip: Some(outline),
        opacity,
        shadow_radius: settings.shadow_radius,
        offset: layout.offset,
        animation: settings.animation,
    });

    PopoverNode {
        node,
        layout,
        arrow_position,
        anchor_bounds,
        opacity,
    }
}
