// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout metrics, constraints, and context.
//!
//! All geometry is in logical points ([`kurbo`] types); the scale factor to
//! device pixels travels alongside in [`LayoutMetrics`] and
//! [`LayoutContext`].

use kurbo::{Rect, Size, Vec2};

/// The computed layout of a node, in the parent's coordinate space.
///
/// Equality is structural; two nodes with the same frame and scale factor
/// are visually interchangeable as far as layout is concerned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    /// Position and size relative to the parent's origin.
    ///
    /// During view flattening the differentiator translates this frame by
    /// the accumulated origins of flattened ancestors, so the host tree
    /// always receives frames in the coordinate space of the effective
    /// parent view.
    pub frame: Rect,
    /// Ratio of device pixels to logical points.
    pub point_scale_factor: f64,
}

impl LayoutMetrics {
    /// Metrics with the given frame and a scale factor of 1.
    #[must_use]
    pub const fn with_frame(frame: Rect) -> Self {
        Self {
            frame,
            point_scale_factor: 1.0,
        }
    }

    /// Returns a copy translated by `offset`.
    #[must_use]
    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            frame: self.frame + offset,
            ..self
        }
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::with_frame(Rect::ZERO)
    }
}

/// Horizontal writing direction for layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Left-to-right scripts.
    #[default]
    LeftToRight,
    /// Right-to-left scripts.
    RightToLeft,
}

/// Size bounds a surface is measured and laid out against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConstraints {
    /// Smallest acceptable size.
    pub minimum_size: Size,
    /// Largest acceptable size.
    pub maximum_size: Size,
    /// Writing direction the layout is resolved in.
    pub layout_direction: LayoutDirection,
}

impl LayoutConstraints {
    /// Exact constraints: minimum and maximum both `size`.
    #[must_use]
    pub const fn tight(size: Size) -> Self {
        Self {
            minimum_size: size,
            maximum_size: size,
            layout_direction: LayoutDirection::LeftToRight,
        }
    }

    /// Clamps `size` into the constraint bounds.
    #[must_use]
    pub fn clamp(&self, size: Size) -> Size {
        Size::new(
            size.width
                .clamp(self.minimum_size.width, self.maximum_size.width),
            size.height
                .clamp(self.minimum_size.height, self.maximum_size.height),
        )
    }
}

impl Default for LayoutConstraints {
    fn default() -> Self {
        Self {
            minimum_size: Size::ZERO,
            maximum_size: Size::new(f64::INFINITY, f64::INFINITY),
            layout_direction: LayoutDirection::default(),
        }
    }
}

/// Ambient parameters a layout pass runs under.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutContext {
    /// Ratio of device pixels to logical points for the target display.
    pub point_scale_factor: f64,
    /// Offset of the surface's viewport within the host window.
    pub viewport_offset: Vec2,
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self {
            point_scale_factor: 1.0,
            viewport_offset: Vec2::ZERO,
        }
    }
}
