// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small render node tree for composed overlays.
//!
//! The composer does not draw. It produces a [`Node`] tree which a host walks
//! with [`Node::paint`], receiving layer scopes, shape fills, and content
//! placements through a [`PaintSink`]. Clipping, opacity, shadow, and
//! translation are properties of a layer scope, as in the imaging IR: every
//! [`PaintSink::push_layer`] is matched by a [`PaintSink::pop_layer`].

use alloc::boxed::Box;

use kurbo::{Rect, Vec2};
use peniko::Brush;
use smallvec::SmallVec;

use crate::{Animation, ArrowShape};

/// A node in a composed overlay.
///
/// `C` is the host's content handle (a widget id, a closure, a text run...).
#[derive(Clone, Debug, PartialEq)]
pub enum Node<C> {
    /// Host content placed in `frame`, in the parent's coordinates.
    Content {
        /// Host content handle.
        content: C,
        /// Where the content is laid out.
        frame: Rect,
    },
    /// An outline filled with a brush.
    ShapedFill {
        /// Outline to fill.
        shape: ArrowShape,
        /// Fill brush.
        brush: Brush,
    },
    /// A layer scope over child nodes.
    Composite(Box<Composite<C>>),
}

/// A layer scope: children painted back to front, then composited.
#[derive(Clone, Debug, PartialEq)]
pub struct Composite<C> {
    /// Children, back to front.
    pub children: SmallVec<[Node<C>; 2]>,
    /// Optional clip applied to the children.
    pub clip: Option<ArrowShape>,
    /// Opacity (0–1) applied when compositing into the parent.
    pub opacity: f32,
    /// Drop shadow blur radius; zero for none.
    pub shadow_radius: f64,
    /// Translation applied to the whole scope.
    pub offset: Vec2,
    /// Transition hosts should use when these properties change.
    pub animation: Animation,
}

impl<C> Default for Composite<C> {
    fn default() -> Self {
        Self {
            children: SmallVec::new(),
            clip: None,
            opacity: 1.0,
            shadow_radius: 0.0,
            offset: Vec2::ZERO,
            animation: Animation::None,
        }
    }
}

impl<C> Composite<C> {
    /// Returns `true` if pushing this scope would not change the output.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.clip.is_none()
            && self.opacity >= 1.0
            && self.shadow_radius <= 0.0
            && self.offset == Vec2::ZERO
    }

    /// Returns `true` unless the scope is fully transparent.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    fn layer(&self) -> Layer<'_> {
        Layer {
            offset: self.offset,
            opacity: self.opacity,
            clip: self.clip.as_ref(),
            shadow_radius: self.shadow_radius,
            animation: self.animation,
        }
    }
}

/// Parameters of a pushed layer, borrowed from a [`Composite`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layer<'a> {
    /// Translation of the layer.
    pub offset: Vec2,
    /// Opacity (0–1).
    pub opacity: f32,
    /// Clip outline, in the layer's coordinates.
    pub clip: Option<&'a ArrowShape>,
    /// Drop shadow blur radius.
    pub shadow_radius: f64,
    /// Transition for animating the layer's properties.
    pub animation: Animation,
}

/// Receives the lowered form of a [`Node`] tree.
pub trait PaintSink<C> {
    /// Opens a layer scope.
    fn push_layer(&mut self, layer: &Layer<'_>);
    /// Closes the most recently opened layer scope.
    fn pop_layer(&mut self);
    /// Fills an outline.
    fn fill(&mut self, shape: &ArrowShape, brush: &Brush);
    /// Places host content.
    fn content(&mut self, content: &C, frame: Rect);
}

impl<C> Node<C> {
    /// Wraps a composite.
    #[must_use]
    pub fn composite(composite: Composite<C>) -> Self {
        Self::Composite(Box::new(composite))
    }

    /// Walks the tree into `sink`.
    ///
    /// Composites with no effect are flattened into their parent.
    pub fn paint(&self, sink: &mut impl PaintSink<C>) {
        match self {
            Self::Content { content, frame } => sink.content(content, *frame),
            Self::ShapedFill { shape, brush } => sink.fill(shape, brush),
            Self::Composite(composite) => {
                let noop = composite.is_noop();
                if !noop {
                    sink.push_layer(&composite.layer());
                }
                for child in &composite.children {
                    child.paint(sink);
                }
                if !noop {
                    sink.pop_layer();
                }
            }
        }
    }

    /// Visits every content handle, depth first, back to front.
    pub fn for_each_content(&self, f: &mut impl FnMut(&C, Rect)) {
        match self {
            Self::Content { content, frame } => f(content, *frame),
            Self::ShapedFill { .. } => {}
            Self::Composite(composite) => {
                for child in &composite.children {
                    child.for_each_content(f);
                }
            }
        }
    }
}
