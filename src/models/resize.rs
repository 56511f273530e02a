// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Resize parameters.
//!
//! Target dimensions with an optional aspect lock. The lock always derives
//! the dependent dimension from the source's own aspect ratio, captured once
//! at creation, so alternating width/height edits cannot drift.

use super::source::{SourceDescriptor, MIN_DIMENSION};
use serde::{Deserialize, Serialize};

/// Largest accepted target width (8K UHD).
pub const MAX_WIDTH: u32 = 7680;
/// Largest accepted target height (8K UHD).
pub const MAX_HEIGHT: u32 = 4320;

/// Resampling filter handed to the scaler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingAlgorithm {
    #[default]
    Bilinear,
    Bicubic,
    Lanczos,
    Spline,
}

impl ScalingAlgorithm {
    /// Name of the scaler flag.
    pub fn flag(&self) -> &'static str {
        match self {
            ScalingAlgorithm::Bilinear => "bilinear",
            ScalingAlgorithm::Bicubic => "bicubic",
            ScalingAlgorithm::Lanczos => "lanczos",
            ScalingAlgorithm::Spline => "spline",
        }
    }
}

/// Common output sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizePreset {
    Custom,
    Hd,
    FullHd,
    #[serde(rename = "2k")]
    TwoK,
    #[serde(rename = "4k")]
    FourK,
    Half,
    Quarter,
}

/// Target frame size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeParameters {
    width: u32,
    height: u32,
    maintain_aspect_ratio: bool,
    algorithm: ScalingAlgorithm,
    source_width: u32,
    source_height: u32,
    source_aspect: f64,
}

impl ResizeParameters {
    /// Defaults to the source size, aspect-locked, bilinear.
    pub fn new(source: &SourceDescriptor) -> Self {
        Self {
            width: clamp_width(source.width()),
            height: clamp_height(source.height()),
            maintain_aspect_ratio: true,
            algorithm: ScalingAlgorithm::default(),
            source_width: source.width(),
            source_height: source.height(),
            source_aspect: source.aspect_ratio(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn maintain_aspect_ratio(&self) -> bool {
        self.maintain_aspect_ratio
    }

    pub fn algorithm(&self) -> ScalingAlgorithm {
        self.algorithm
    }

    /// While locked, a height that would leave its range is clamped and the
    /// width pulled back to match, so the ratio survives at the bounds.
    pub fn set_width(&mut self, width: u32) {
        self.width = clamp_width(width);
        if self.maintain_aspect_ratio {
            let derived = round_to_u32(self.width as f64 / self.source_aspect);
            self.height = clamp_height(derived);
            if self.height != derived {
                self.width = clamp_width(round_to_u32(self.height as f64 * self.source_aspect));
            }
        }
    }

    /// Mirror of [`set_width`](Self::set_width).
    pub fn set_height(&mut self, height: u32) {
        self.height = clamp_height(height);
        if self.maintain_aspect_ratio {
            let derived = round_to_u32(self.height as f64 * self.source_aspect);
            self.width = clamp_width(derived);
            if self.width != derived {
                self.height = clamp_height(round_to_u32(self.width as f64 / self.source_aspect));
            }
        }
    }

    /// Turning the lock on re-derives the height from the current width.
    pub fn set_maintain_aspect_ratio(&mut self, maintain: bool) {
        let enabling = maintain && !self.maintain_aspect_ratio;
        self.maintain_aspect_ratio = maintain;
        if enabling {
            self.set_width(self.width);
        }
    }

    pub fn set_algorithm(&mut self, algorithm: ScalingAlgorithm) {
        self.algorithm = algorithm;
    }

    /// Set both dimensions from a preset, leaving the lock state alone.
    pub fn apply_preset(&mut self, preset: ResizePreset) {
        let (width, height) = match preset {
            ResizePreset::Custom => return,
            ResizePreset::Hd => (1280, 720),
            ResizePreset::FullHd => (1920, 1080),
            ResizePreset::TwoK => (2560, 1440),
            ResizePreset::FourK => (3840, 2160),
            ResizePreset::Half => (self.source_width / 2, self.source_height / 2),
            ResizePreset::Quarter => (self.source_width / 4, self.source_height / 4),
        };
        self.width = clamp_width(width);
        self.height = clamp_height(height);
    }
}

fn clamp_width(width: u32) -> u32 {
    width.clamp(MIN_DIMENSION, MAX_WIDTH)
}

fn clamp_height(height: u32) -> u32 {
    height.clamp(MIN_DIMENSION, MAX_HEIGHT)
}

fn round_to_u32(value: f64) -> u32 {
    value.round().clamp(0.0, u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_hd() -> SourceDescriptor {
        SourceDescriptor::new("clip.mp4", 10_000, 1920, 1080).unwrap()
    }

    #[test]
    fn test_defaults() {
        let resize = ResizeParameters::new(&full_hd());
        assert_eq!((resize.width(), resize.height()), (1920, 1080));
        assert!(resize.maintain_aspect_ratio());
        assert_eq!(resize.algorithm(), ScalingAlgorithm::Bilinear);
    }

    #[test]
    fn test_locked_width_derives_height() {
        let mut resize = ResizeParameters::new(&full_hd());
        resize.set_width(1280);
        assert_eq!(resize.height(), 720);
    }

    #[test]
    fn test_locked_height_derives_width() {
        let mut resize = ResizeParameters::new(&full_hd());
        resize.set_height(480);
        assert_eq!(resize.width(), 853);
    }

    #[test]
    fn test_locked_width_is_idempotent() {
        let mut resize = ResizeParameters::new(&full_hd());
        resize.set_width(1001);
        let expected = resize.height();

        for h in [17, 333, 719, 1000, 4000] {
            resize.set_height(h);
            resize.set_width(1001);
            assert_eq!(resize.height(), expected);
        }
    }

    #[test]
    fn test_unlocked_fields_are_independent() {
        let mut resize = ResizeParameters::new(&full_hd());
        resize.set_maintain_aspect_ratio(false);
        resize.set_width(1000);
        resize.set_height(1000);
        assert_eq!((resize.width(), resize.height()), (1000, 1000));
    }

    #[test]
    fn test_relocking_recomputes_height_once() {
        let mut resize = ResizeParameters::new(&full_hd());
        resize.set_maintain_aspect_ratio(false);
        resize.set_width(1280);
        resize.set_height(1000);

        resize.set_maintain_aspect_ratio(true);
        assert_eq!((resize.width(), resize.height()), (1280, 720));

        resize.set_maintain_aspect_ratio(false);
        assert_eq!((resize.width(), resize.height()), (1280, 720));
    }

    #[test]
    fn test_values_are_clamped() {
        let mut resize = ResizeParameters::new(&full_hd());
        resize.set_maintain_aspect_ratio(false);
        resize.set_width(0);
        resize.set_height(100_000);
        assert_eq!((resize.width(), resize.height()), (MIN_DIMENSION, MAX_HEIGHT));
    }

    #[test]
    fn test_lock_holds_at_size_bounds() {
        let portrait = SourceDescriptor::new("clip.mp4", 10_000, 1080, 1920).unwrap();
        let mut resize = ResizeParameters::new(&portrait);

        resize.set_width(MAX_WIDTH);
        assert_eq!((resize.width(), resize.height()), (2430, MAX_HEIGHT));

        let mut resize = ResizeParameters::new(&full_hd());
        resize.set_height(MAX_HEIGHT);
        assert_eq!((resize.width(), resize.height()), (MAX_WIDTH, MAX_HEIGHT));

        resize.set_height(4000);
        resize.set_width(MAX_WIDTH);
        assert_eq!((resize.width(), resize.height()), (MAX_WIDTH, MAX_HEIGHT));
    }

    #[test]
    fn test_presets_bypass_lock() {
        let source = SourceDescriptor::new("clip.mp4", 10_000, 1000, 1000).unwrap();
        let mut resize = ResizeParameters::new(&source);

        resize.apply_preset(ResizePreset::Hd);
        assert_eq!((resize.width(), resize.height()), (1280, 720));
        assert!(resize.maintain_aspect_ratio());

        resize.apply_preset(ResizePreset::Half);
        assert_eq!((resize.width(), resize.height()), (500, 500));

        resize.apply_preset(ResizePreset::Quarter);
        assert_eq!((resize.width(), resize.height()), (250, 250));

        resize.apply_preset(ResizePreset::Custom);
        assert_eq!((resize.width(), resize.height()), (250, 250));
    }

    #[test]
    fn test_preset_names() {
        let preset: ResizePreset = serde_json::from_str("\"2k\"").unwrap();
        assert_eq!(preset, ResizePreset::TwoK);
        let preset: ResizePreset = serde_json::from_str("\"fullhd\"").unwrap();
        assert_eq!(preset, ResizePreset::FullHd);
    }
}
