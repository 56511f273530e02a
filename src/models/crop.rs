// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop parameters.
//!
//! A crop window in source pixels, editable either through numeric fields or
//! through a rectangle dragged over the letterboxed preview. Both paths end
//! in the same clamped state, and each transition reports which of the two
//! views needs refreshing so the view that produced the edit is never
//! notified of its own change.

use super::source::{SourceDescriptor, MIN_DIMENSION};
use crate::util::geometry::{self, Rect, Size};

/// Which representation an edit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOrigin {
    Fields,
    Selection,
}

/// What the caller must redraw after a crop transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropSync {
    /// Nothing changed (empty selection, no frame loaded).
    Unchanged,
    /// Numeric fields must show the new values.
    RefreshFields,
    /// The selection rectangle must be redrawn.
    RefreshSelection,
}

impl CropSync {
    fn for_origin(origin: EditOrigin) -> Self {
        match origin {
            EditOrigin::Fields => CropSync::RefreshSelection,
            EditOrigin::Selection => CropSync::RefreshFields,
        }
    }
}

/// Crop window in source-pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropParameters {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    source: Size,
}

impl CropParameters {
    /// Defaults to the full frame.
    pub fn new(source: &SourceDescriptor) -> Self {
        Self {
            x: 0,
            y: 0,
            width: source.width(),
            height: source.height(),
            source: source.size(),
        }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The crop window as a source-pixel rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x as i32, self.y as i32, self.width as i32, self.height as i32)
    }

    /// Where the crop window appears inside a display frame.
    pub fn display_rect(&self, display_frame: Rect) -> Rect {
        geometry::to_display(self.rect(), display_frame, self.source)
    }

    /// Set the window from numeric fields.
    ///
    /// A window running past the frame edge is shrunk, not moved.
    pub fn set_numeric(&mut self, x: u32, y: u32, width: u32, height: u32) -> CropSync {
        self.apply(x, y, width, height);
        CropSync::for_origin(EditOrigin::Fields)
    }

    /// Set the window from a rectangle dragged in display coordinates.
    pub fn set_from_selection(&mut self, selection: Rect, display_frame: Rect) -> CropSync {
        let finished = geometry::finish_selection(selection, display_frame);
        let mapped = geometry::to_source(finished, display_frame, self.source);
        if mapped.is_empty() {
            log::debug!("Ignoring empty crop selection {:?}", selection);
            return CropSync::Unchanged;
        }

        let min = MIN_DIMENSION as i32;
        let rect = if mapped.width < min || mapped.height < min {
            Rect::of_size(self.source)
        } else {
            mapped
        };

        self.apply(rect.x as u32, rect.y as u32, rect.width as u32, rect.height as u32);
        CropSync::for_origin(EditOrigin::Selection)
    }

    /// Route an edit by origin.
    pub fn edit(&mut self, origin: EditOrigin, rect: Rect, display_frame: Rect) -> CropSync {
        match origin {
            EditOrigin::Fields => self.set_numeric(
                rect.x.max(0) as u32,
                rect.y.max(0) as u32,
                rect.width.max(0) as u32,
                rect.height.max(0) as u32,
            ),
            EditOrigin::Selection => self.set_from_selection(rect, display_frame),
        }
    }

    fn apply(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.x = x.min(self.source.width - MIN_DIMENSION);
        self.y = y.min(self.source.height - MIN_DIMENSION);
        self.width = width.clamp(MIN_DIMENSION, self.source.width - self.x);
        self.height = height.clamp(MIN_DIMENSION, self.source.height - self.y);
    }
}
