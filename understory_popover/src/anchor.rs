// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pass registry of named anchor bounds.
//!
//! Anchor views contribute one [`AnchorEntry`] each while a layout pass runs.
//! Contributions are reduced by appending, so the registry ends up holding
//! every anchor of the pass in declaration order. Overlays then look their
//! anchor up by id.
//!
//! The registry is a plain value owned by the pass (see
//! [`LayoutPass`](crate::LayoutPass)); there is no global state. Build a new
//! one every pass rather than patching the previous one.
//!
//! ## Duplicate ids
//!
//! Uniqueness is not enforced. When several anchors share an id, lookups
//! return the first one in declaration order. This is deterministic but
//! rarely what was intended, so the reduction emits a `tracing` debug event
//! when it sees a duplicate.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Affine, Rect};

/// A named anchor and its bounds, in the coordinate space of the pass.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorEntry {
    /// Identifier overlays use to find this anchor.
    pub id: String,
    /// Bounds of the anchor view.
    pub bounds: Rect,
}

impl AnchorEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(id: impl Into<String>, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            bounds,
        }
    }

    /// The bounds mapped through `to_local`, as an axis-aligned bounding box.
    #[must_use]
    pub fn resolve(&self, to_local: Affine) -> Rect {
        to_local.transform_rect_bbox(self.bounds)
    }
}

/// Ordered collection of anchors recorded during one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnchorRegistry {
    entries: Vec<AnchorEntry>,
    /// Index of the first entry for each id.
    first: HashMap<String, usize>,
}

impl AnchorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-anchor contribution, as produced by one anchor view.
    #[must_use]
    pub fn contribution(id: impl Into<String>, bounds: Rect) -> Self {
        let mut registry = Self::new();
        registry.push(AnchorEntry::new(id, bounds));
        registry
    }

    /// Appends one entry.
    pub fn push(&mut self, entry: AnchorEntry) {
        let index = self.entries.len();
        match self.first.entry(entry.id.clone()) {
            hashbrown::hash_map::Entry::Occupied(_) => {
                tracing::debug!(id = %entry.id, "duplicate anchor id; first declaration wins");
            }
            hashbrown::hash_map::Entry::Vacant(slot) => {
                slot.insert(index);
            }
        }
        self.entries.push(entry);
    }

    /// Folds `next` into `self` by appending its entries after ours.
    ///
    /// Reduction is associative and order preserving: reducing `[a]`, `[b]`
    /// and `[c]` in sequence yields `[a, b, c]` however the steps are grouped.
    pub fn reduce(&mut self, next: Self) {
        self.entries.reserve(next.entries.len());
        for entry in next.entries {
            self.push(entry);
        }
    }

    /// Returns `a` followed by `b`.
    #[must_use]
    pub fn merge(mut a: Self, b: Self) -> Self {
        a.reduce(b);
        a
    }

    /// The first anchor declared with `id`.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&AnchorEntry> {
        self.first.get(id).map(|&index| &self.entries[index])
    }

    /// Bounds of the first anchor declared with `id`.
    #[must_use]
    pub fn bounds(&self, id: &str) -> Option<Rect> {
        self.lookup(id).map(|entry| entry.bounds)
    }

    /// Bounds of the first anchor declared with `id`, mapped into another space.
    #[must_use]
    pub fn resolve(&self, id: &str, to_local: Affine) -> Option<Rect> {
        self.lookup(id).map(|entry| entry.resolve(to_local))
    }

    /// All entries, in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[AnchorEntry] {
        &self.entries
    }

    /// Number of recorded anchors, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no anchors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry, keeping allocations for the next pass.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.first.clear();
    }
}

impl Extend<AnchorEntry> for AnchorRegistry {
    fn extend<I: IntoIterator<Item = AnchorEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.push(entry);
        }
    }
}

impl FromIterator<AnchorEntry> for AnchorRegistry {
    fn from_iter<I: IntoIterator<Item = AnchorEntry>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}
