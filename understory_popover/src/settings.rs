// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual configuration for popovers.

use core::fmt;

use kurbo::{RoundedRectRadii, Vec2};
use peniko::{Brush, Color};

use crate::{Animation, Position};

/// Default popover background (a light secondary system background).
pub const DEFAULT_BACKGROUND: Color = Color::from_rgb8(242, 242, 247);

/// Visual settings for a popover.
///
/// The defaults match a typical speech-bubble popover: a 10pt shadow, a light
/// background, a springy entrance, a 20pt arrow pointing back at the anchor,
/// and 10pt corner radii.
///
/// Numeric fields are expected to be finite and non-negative. The composer
/// always works on [`PopoverSettings::sanitized`], which clamps offending
/// values to zero; use [`PopoverSettings::validate`] to reject them instead.
#[derive(Clone, Debug, PartialEq)]
pub struct PopoverSettings {
    /// Blur radius of the drop shadow.
    pub shadow_radius: f64,
    /// Fill behind the content, inside the arrow outline.
    pub background: Brush,
    /// Transition used when presentation changes.
    pub animation: Animation,
    /// Extra translation applied to the placed popover.
    pub offset: Vec2,
    /// Arrow override. [`Position::None`] points the arrow at the anchor,
    /// i.e. uses the opposite of the placement.
    pub arrow_position: Position,
    /// Arrow base and height. Zero draws no arrow.
    pub arrow_length: f64,
    /// Per-corner radii of the bubble body.
    pub corner_radii: RoundedRectRadii,
}

impl Default for PopoverSettings {
    fn default() -> Self {
        Self {
            shadow_radius: 10.0,
            background: Brush::Solid(DEFAULT_BACKGROUND),
            animation: Animation::default(),
            offset: Vec2::ZERO,
            arrow_position: Position::None,
            arrow_length: 20.0,
            corner_radii: RoundedRectRadii::from_single_radius(10.0),
        }
    }
}

impl PopoverSettings {
    /// Sets the shadow radius.
    #[must_use]
    pub fn with_shadow_radius(mut self, radius: f64) -> Self {
        self.shadow_radius = radius;
        self
    }

    /// Sets the background brush.
    #[must_use]
    pub fn with_background(mut self, background: impl Into<Brush>) -> Self {
        self.background = background.into();
        self
    }

    /// Sets the transition animation.
    #[must_use]
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    /// Sets the extra offset.
    #[must_use]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Overrides where the arrow is drawn.
    #[must_use]
    pub fn with_arrow_position(mut self, position: Position) -> Self {
        self.arrow_position = position;
        self
    }

    /// Sets the arrow length. Zero disables the arrow.
    #[must_use]
    pub fn with_arrow_length(mut self, length: f64) -> Self {
        self.arrow_length = length;
        self
    }

    /// Sets the corner radii.
    #[must_use]
    pub fn with_corner_radii(mut self, radii: impl Into<RoundedRectRadii>) -> Self {
        self.corner_radii = radii.into();
        self
    }

    /// The arrow position for a popover placed at `placement`.
    #[must_use]
    pub fn arrow_position_for(&self, placement: Position) -> Position {
        if self.arrow_position.is_none() {
            placement.opposite()
        } else {
            self.arrow_position
        }
    }

    /// Checks that every numeric field is finite and non-negative.
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let radii = self.corner_radii;
        let fields = [
            (SettingsField::ShadowRadius, self.shadow_radius),
            (SettingsField::ArrowLength, self.arrow_length),
            (SettingsField::TopLeftRadius, radii.top_left),
            (SettingsField::TopRightRadius, radii.top_right),
            (SettingsField::BottomRightRadius, radii.bottom_right),
            (SettingsField::BottomLeftRadius, radii.bottom_left),
        ];
        for (field, value) in fields {
            if !is_valid_length(value) {
                return Err(SettingsError { field, value });
            }
        }
        if !(self.offset.x.is_finite() && self.offset.y.is_finite()) {
            let value = if self.offset.x.is_finite() {
                self.offset.y
            } else {
                self.offset.x
            };
            return Err(SettingsError {
                field: SettingsField::Offset,
                value,
            });
        }
        Ok(())
    }

    /// Returns a copy with invalid numeric fields clamped to zero.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        out.shadow_radius = clamp_length(SettingsField::ShadowRadius, self.shadow_radius);
        out.arrow_length = clamp_length(SettingsField::ArrowLength, self.arrow_length);
        let r = self.corner_radii;
        out.corner_radii = RoundedRectRadii::new(
            clamp_length(SettingsField::TopLeftRadius, r.top_left),
            clamp_length(SettingsField::TopRightRadius, r.top_right),
            clamp_length(SettingsField::BottomRightRadius, r.bottom_right),
            clamp_length(SettingsField::BottomLeftRadius, r.bottom_left),
        );
        if !self.offset.x.is_finite() || !self.offset.y.is_finite() {
            tracing::debug!(offset = ?self.offset, "non-finite popover offset replaced with zero");
            out.offset = Vec2::ZERO;
        }
        out
    }
}

fn is_valid_length(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn clamp_length(field: SettingsField, value: f64) -> f64 {
    if is_valid_length(value) {
        value
    } else {
        tracing::debug!(%field, value, "invalid popover setting clamped to zero");
        0.0
    }
}

/// A numeric field of [`PopoverSettings`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SettingsField {
    /// [`PopoverSettings::shadow_radius`].
    ShadowRadius,
    /// [`PopoverSettings::arrow_length`].
    ArrowLength,
    /// Top-left entry of [`PopoverSettings::corner_radii`].
    TopLeftRadius,
    /// Top-right entry of [`PopoverSettings::corner_radii`].
    TopRightRadius,
    /// Bottom-right entry of [`PopoverSettings::corner_radii`].
    BottomRightRadius,
    /// Bottom-left entry of [`PopoverSettings::corner_radii`].
    BottomLeftRadius,
    /// [`PopoverSettings::offset`].
    Offset,
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ShadowRadius => "shadow radius",
            Self::ArrowLength => "arrow length",
            Self::TopLeftRadius => "top-left corner radius",
            Self::TopRightRadius => "top-right corner radius",
            Self::BottomRightRadius => "bottom-right corner radius",
            Self::BottomLeftRadius => "bottom-left corner radius",
            Self::Offset => "offset",
        })
    }
}

/// A [`PopoverSettings`] field holds a negative or non-finite value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SettingsError {
    /// The offending field.
    pub field: SettingsField,
    /// Its value.
    pub value: f64,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid popover {}: {}", self.field, self.value)
    }
}

impl core::error::Error for SettingsError {}
