// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate transformations between the display
//! surface (where a letterboxed video frame is drawn and a crop rectangle is
//! dragged) and the source frame's native pixel grid.

use serde::{Deserialize, Serialize};

/// Smallest selection, in display pixels, accepted from a drag.
pub const MIN_SELECTION: i32 = 10;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// An integer rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Build the rectangle spanned by two drag points, in either order.
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        let (left, right) = if a.0 <= b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (top, bottom) = if a.1 <= b.1 { (a.1, b.1) } else { (b.1, a.1) };
        Self::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        )
    }

    /// The full frame of a source of the given size.
    pub fn of_size(size: Size) -> Self {
        Self::new(0, 0, size.width as i32, size.height as i32)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Overlap of two rectangles; empty (all zero) when they do not overlap.
    pub fn intersected(&self, other: &Rect) -> Rect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        )
    }
}

/// Fit a source frame into a display surface, preserving its aspect ratio.
///
/// Returns the letterboxed sub-rectangle of the surface where the frame is
/// drawn. A source relatively wider than the surface fills its width and is
/// centred vertically; otherwise it fills the height and is centred
/// horizontally.
pub fn fit_frame(surface: Size, source: Size) -> Rect {
    if surface.is_empty() || source.is_empty() {
        return Rect::default();
    }

    let source_aspect = source.aspect_ratio();
    let surface_aspect = surface.aspect_ratio();

    let (display_width, display_height) = if source_aspect > surface_aspect {
        // Source is wider - fit to width
        let width = surface.width as f64;
        (width, width / source_aspect)
    } else {
        // Source is taller - fit to height
        let height = surface.height as f64;
        (height * source_aspect, height)
    };

    let display_width = display_width.round() as i32;
    let display_height = display_height.round() as i32;

    Rect::new(
        (surface.width as i32 - display_width) / 2,
        (surface.height as i32 - display_height) / 2,
        display_width,
        display_height,
    )
}

/// Constrain a finished drag selection to the display frame.
///
/// Selections smaller than [`MIN_SELECTION`] display pixels in either
/// direction fall back to the whole frame, so a stray click never produces
/// a sliver crop.
pub fn finish_selection(selection: Rect, display_frame: Rect) -> Rect {
    let constrained = selection.intersected(&display_frame);
    if constrained.width < MIN_SELECTION || constrained.height < MIN_SELECTION {
        return display_frame;
    }
    constrained
}

/// Convert a rectangle in display coordinates to source-frame pixels.
///
/// Parts of the selection outside the frame are clipped away. An empty
/// display frame or source yields an empty rectangle ("no selection").
pub fn to_source(selection: Rect, display_frame: Rect, source: Size) -> Rect {
    if display_frame.is_empty() || source.is_empty() {
        return Rect::default();
    }

    let x_scale = source.width as f64 / display_frame.width as f64;
    let y_scale = source.height as f64 / display_frame.height as f64;

    let mapped = Rect::new(
        ((selection.x as f64 - display_frame.x as f64) * x_scale).round() as i32,
        ((selection.y as f64 - display_frame.y as f64) * y_scale).round() as i32,
        (selection.width as f64 * x_scale).round() as i32,
        (selection.height as f64 * y_scale).round() as i32,
    );

    mapped.intersected(&Rect::of_size(source))
}

/// Convert a rectangle in source-frame pixels to display coordinates.
pub fn to_display(source_rect: Rect, display_frame: Rect, source: Size) -> Rect {
    if display_frame.is_empty() || source.is_empty() {
        return Rect::default();
    }

    let x_scale = display_frame.width as f64 / source.width as f64;
    let y_scale = display_frame.height as f64 / source.height as f64;

    Rect::new(
        display_frame
            .x
            .saturating_add((source_rect.x as f64 * x_scale).round() as i32),
        display_frame
            .y
            .saturating_add((source_rect.y as f64 * y_scale).round() as i32),
        (source_rect.width as f64 * x_scale).round() as i32,
        (source_rect.height as f64 * y_scale).round() as i32,
    )
}
