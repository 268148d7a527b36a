// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor and popover decorators, and the per-pass context that connects them.
//!
//! A host runs one [`LayoutPass`] per frame. Anchor views record their bounds
//! into it as they are laid out; popover views read the finished registry and
//! compose their overlay. Nothing persists between passes, so a change to a
//! popover's presentation or target frame is picked up by simply running the
//! next pass.

use alloc::string::String;

use kurbo::{Affine, Rect};

use crate::{
    AnchorRegistry, PopoverKind, PopoverNode, PopoverRequest, PopoverSettings, Position, compose,
};

/// Marks a view as a named anchor.
#[must_use]
pub fn anchor_view(id: impl Into<String>) -> AnchorView {
    AnchorView { id: id.into() }
}

/// Attaches a popover showing `content` to the anchor named `anchor_id`.
///
/// Uses [`PopoverSettings::default`]; see [`PopoverView::with_settings`].
#[must_use]
pub fn popover_view<C>(
    content: C,
    presented: bool,
    frame: Rect,
    kind: PopoverKind,
    position: Position,
    anchor_id: impl Into<String>,
) -> PopoverView<C> {
    PopoverView {
        content,
        presented,
        frame,
        kind,
        position,
        anchor_id: Some(anchor_id.into()),
        settings: PopoverSettings::default(),
    }
}

/// A view decorator that records its bounds under an id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnchorView {
    id: String,
}

impl AnchorView {
    /// The anchor id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// This view's single-entry contribution for a pass.
    #[must_use]
    pub fn contribute(&self, bounds: Rect) -> AnchorRegistry {
        AnchorRegistry::contribution(self.id.clone(), bounds)
    }
}

/// A view decorator that composes a popover against a pass's anchors.
///
/// `presented` and `frame` belong to the caller, who updates them between
/// passes; composition only reads them.
#[derive(Clone, Debug, PartialEq)]
pub struct PopoverView<C> {
    content: C,
    presented: bool,
    frame: Rect,
    kind: PopoverKind,
    position: Position,
    anchor_id: Option<String>,
    settings: PopoverSettings,
}

impl<C> PopoverView<C> {
    /// Replaces the visual settings.
    #[must_use]
    pub fn with_settings(mut self, settings: PopoverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Detaches the popover from any anchor; it composes fully transparent.
    #[must_use]
    pub fn without_anchor(mut self) -> Self {
        self.anchor_id = None;
        self
    }

    /// Whether the popover is presented.
    #[must_use]
    pub fn presented(&self) -> bool {
        self.presented
    }

    /// Shows or hides the popover from the next pass on.
    pub fn set_presented(&mut self, presented: bool) {
        self.presented = presented;
    }

    /// Target frame of the presented popover.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Changes the target frame from the next pass on.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    /// The id of the anchor this popover attaches to.
    #[must_use]
    pub fn anchor_id(&self) -> Option<&str> {
        self.anchor_id.as_deref()
    }

    /// Visual settings.
    #[must_use]
    pub fn settings(&self) -> &PopoverSettings {
        &self.settings
    }

    /// Popover or popout behavior.
    #[must_use]
    pub fn kind(&self) -> PopoverKind {
        self.kind
    }

    /// Placement relative to the anchor.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The composition inputs for this view.
    #[must_use]
    pub fn request(&self, container: Affine) -> PopoverRequest<'_> {
        PopoverRequest {
            kind: self.kind,
            position: self.position,
            anchor_id: self.anchor_id.as_deref(),
            presented: self.presented,
            frame: self.frame,
            settings: &self.settings,
            to_local: container,
        }
    }

    /// Composes the popover against `registry`.
    ///
    /// `container` maps registry coordinates into the coordinates of the
    /// overlay container the popover is laid out in.
    #[must_use]
    pub fn compose(&self, registry: &AnchorRegistry, container: Affine) -> PopoverNode<C>
    where
        C: Clone,
    {
        compose(registry, &self.request(container), self.content.clone())
    }
}

/// Anchors recorded during one layout pass.
///
/// Record every anchor before composing any popover that reads them.
#[derive(Clone, Debug, Default)]
pub struct LayoutPass {
    registry: AnchorRegistry,
}

impl LayoutPass {
    /// Starts an empty pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `view` at `bounds`.
    pub fn anchor(&mut self, view: &AnchorView, bounds: Rect) {
        self.registry.reduce(view.contribute(bounds));
    }

    /// Folds in the anchors gathered from a subtree.
    pub fn record(&mut self, contribution: AnchorRegistry) {
        self.registry.reduce(contribution);
    }

    /// Anchors recorded so far.
    #[must_use]
    pub fn registry(&self) -> &AnchorRegistry {
        &self.registry
    }

    /// Composes `view` against the anchors recorded so far.
    #[must_use]
    pub fn popover<C: Clone>(&self, view: &PopoverView<C>, container: Affine) -> PopoverNode<C> {
        view.compose(&self.registry, container)
    }

    /// Clears the pass for reuse, keeping allocations.
    pub fn reset(&mut self) {
        self.registry.clear();
    }

    /// Ends the pass, returning its anchors.
    #[must_use]
    pub fn finish(self) -> AnchorRegistry {
        self.registry
    }
}
