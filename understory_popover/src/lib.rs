// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_popover --heading-base-level=0

//! Understory Popover: anchor-relative popover and popout layout.
//!
//! This crate computes where a floating overlay goes relative to an "anchor"
//! view, builds the speech-bubble outline drawn behind it, and packages the
//! result as a small render node tree. It is headless: it does not measure
//! views, run animation clocks, or rasterize anything.
//!
//! - [`Position`]: placement of an overlay relative to its anchor, and the
//!   edge its arrow is drawn on. [`Position::opposite`] maps one to the other.
//! - [`PopoverLayout`]: offset and size for a [`PopoverKind`] and presentation
//!   state, from the geometry functions [`offset_x`], [`offset_y`],
//!   [`popover_offset`], and [`popover_size`].
//! - [`ArrowShape`]: a [`kurbo::Shape`] for a rounded rectangle with one
//!   triangular arrow, used as both the background fill and the clip.
//! - [`AnchorRegistry`]: anchors recorded during one layout pass, reduced by
//!   appending and looked up by id (first declaration wins).
//! - [`compose`] and [`PopoverNode`]: the composed overlay, lowered through a
//!   [`PaintSink`] by the host.
//! - [`anchor_view`], [`popover_view`], and [`LayoutPass`]: the decorators a
//!   host attaches to its views and the per-pass context joining them.
//!
//! ## Layout pass
//!
//! Every frame, the host records anchors first and composes popovers second:
//!
//! ```rust
//! use kurbo::{Affine, Rect, Vec2};
//! use understory_popover::{
//!     anchor_view, popover_view, LayoutPass, PopoverKind, PopoverSettings, Position,
//! };
//!
//! let button = anchor_view("share");
//! let menu = popover_view(
//!     "share-menu",
//!     true,
//!     Rect::new(0.0, 0.0, 120.0, 60.0),
//!     PopoverKind::Popover,
//!     Position::Top,
//!     "share",
//! )
//! .with_settings(PopoverSettings::default().with_offset(Vec2::new(0.0, -5.0)));
//!
//! let mut pass = LayoutPass::new();
//! pass.anchor(&button, Rect::new(100.0, 200.0, 150.0, 220.0));
//!
//! let popover = pass.popover(&menu, Affine::IDENTITY);
//! assert_eq!(popover.frame(), Rect::new(65.0, 135.0, 185.0, 195.0));
//! assert_eq!(popover.arrow_position(), Position::Bottom);
//! assert_eq!(popover.opacity(), 1.0);
//! ```
//!
//! ## Popover versus popout
//!
//! A [`PopoverKind::Popover`] always occupies its target frame and only fades.
//! A [`PopoverKind::Popout`] collapses onto its anchor's bounds when dismissed
//! and expands to the target frame when presented; hosts interpolate between
//! the two layouts with [`PopoverLayout::lerp`] driven by
//! [`Animation::progress`].
//!
//! ## Missing anchors
//!
//! Composition never fails. An anchor id that is not in the registry is
//! treated as a zero rectangle at the origin and the popover composes fully
//! transparent. Invalid numeric settings are clamped to zero; call
//! [`PopoverSettings::validate`] to reject them instead.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod anchor;
mod animation;
mod compose;
mod geometry;
mod node;
mod position;
mod settings;
mod shape;
mod view;

pub use anchor::{AnchorEntry, AnchorRegistry};
pub use animation::Animation;
pub use compose::{PopoverNode, PopoverRequest, compose};
pub use geometry::{
    PopoverKind, PopoverLayout, offset_x, offset_y, placement_offset, popover_offset, popover_size,
};
pub use node::{Composite, Layer, Node, PaintSink};
pub use position::{Edge, EdgeAlignment, Position};
pub use settings::{DEFAULT_BACKGROUND, PopoverSettings, SettingsError, SettingsField};
pub use shape::ArrowShape;
pub use view::{AnchorView, LayoutPass, PopoverView, anchor_view, popover_view};
