// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Trim parameters.
//!
//! A start/end window inside the source's duration. Times are kept in whole
//! milliseconds so repeated edits never accumulate floating-point error;
//! setters take seconds and clamp rather than reject.

use super::source::SourceDescriptor;

/// Shortest window a trim may produce, in milliseconds.
pub const MIN_TRIM_MS: u64 = 100;

/// Start/end window for a stream-copy trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimParameters {
    start_ms: u64,
    end_ms: u64,
    duration_ms: u64,
}

impl TrimParameters {
    /// Defaults to the whole source.
    pub fn new(source: &SourceDescriptor) -> Self {
        Self {
            start_ms: 0,
            end_ms: source.duration_ms(),
            duration_ms: source.duration_ms(),
        }
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn start_secs(&self) -> f64 {
        self.start_ms as f64 / 1000.0
    }

    pub fn end_secs(&self) -> f64 {
        self.end_ms as f64 / 1000.0
    }

    /// Set the start time; an end at or before it is pushed out.
    pub fn set_start(&mut self, seconds: f64) {
        self.start_ms = self.clamp_to_duration(seconds);
        self.resolve();
    }

    /// Set the end time; an end at or before the start is pushed out.
    pub fn set_end(&mut self, seconds: f64) {
        self.end_ms = self.clamp_to_duration(seconds);
        self.resolve();
    }

    fn clamp_to_duration(&self, seconds: f64) -> u64 {
        if seconds.is_nan() {
            return 0;
        }
        let ms = (seconds * 1000.0).round();
        ms.clamp(0.0, self.duration_ms as f64) as u64
    }

    /// Restore `start < end` with the minimum gap.
    ///
    /// The end moves first. When the duration stops it, the start is pulled
    /// back instead, and when zero stops that, the end moves out again.
    fn resolve(&mut self) {
        if self.start_ms >= self.end_ms {
            self.end_ms = (self.start_ms + MIN_TRIM_MS).min(self.duration_ms);
        }
        if self.end_ms.saturating_sub(self.start_ms) < MIN_TRIM_MS {
            self.start_ms = self.end_ms.saturating_sub(MIN_TRIM_MS);
        }
        if self.end_ms.saturating_sub(self.start_ms) < MIN_TRIM_MS {
            self.end_ms = (self.start_ms + MIN_TRIM_MS).min(self.duration_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(duration_ms: u64) -> SourceDescriptor {
        SourceDescriptor::new("clip.mp4", duration_ms, 1920, 1080).unwrap()
    }

    fn assert_invariant(trim: &TrimParameters, duration_ms: u64) {
        assert!(trim.start_ms() < trim.end_ms(), "{:?}", trim);
        assert!(trim.end_ms() <= duration_ms, "{:?}", trim);
        if duration_ms >= MIN_TRIM_MS {
            assert!(trim.end_ms() - trim.start_ms() >= MIN_TRIM_MS, "{:?}", trim);
        }
    }

    #[test]
    fn test_defaults_cover_source() {
        let trim = TrimParameters::new(&source(120_000));
        assert_eq!(trim.start_secs(), 0.0);
        assert_eq!(trim.end_secs(), 120.0);
    }

    #[test]
    fn test_start_past_duration_resolves_against_end() {
        let mut trim = TrimParameters::new(&source(120_000));
        trim.set_start(130.0);
        assert_eq!(trim.end_ms(), 120_000);
        assert_eq!(trim.start_ms(), 119_900);
        assert!((trim.start_secs() - 119.9).abs() < 1e-9);
    }

    #[test]
    fn test_equal_start_and_end_pushes_end() {
        let mut trim = TrimParameters::new(&source(120_000));
        trim.set_end(30.0);
        trim.set_start(30.0);
        assert_eq!(trim.start_ms(), 30_000);
        assert_eq!(trim.end_ms(), 30_100);
    }

    #[test]
    fn test_end_before_start_pushes_end() {
        let mut trim = TrimParameters::new(&source(120_000));
        trim.set_start(50.0);
        trim.set_end(10.0);
        assert_eq!(trim.start_ms(), 50_000);
        assert_eq!(trim.end_ms(), 50_100);
    }

    #[test]
    fn test_negative_and_nan_clamp_to_zero() {
        let mut trim = TrimParameters::new(&source(120_000));
        trim.set_start(-5.0);
        assert_eq!(trim.start_ms(), 0);
        trim.set_start(f64::NAN);
        assert_eq!(trim.start_ms(), 0);
        trim.set_end(f64::INFINITY);
        assert_eq!(trim.end_ms(), 120_000);
    }

    #[test]
    fn test_end_inside_first_gap_moves_out() {
        let mut trim = TrimParameters::new(&source(120_000));
        trim.set_end(0.05);
        assert_eq!(trim.start_ms(), 0);
        assert_eq!(trim.end_ms(), 100);
    }

    #[test]
    fn test_end_at_zero() {
        let mut trim = TrimParameters::new(&source(120_000));
        trim.set_end(0.0);
        assert_eq!(trim.start_ms(), 0);
        assert_eq!(trim.end_ms(), 100);
    }

    #[test]
    fn test_invariant_over_input_sweep() {
        let duration_ms = 120_000;
        let mut trim = TrimParameters::new(&source(duration_ms));
        let inputs = [-10.0, 0.0, 0.05, 0.1, 59.99, 60.0, 119.95, 119.9, 120.0, 121.0, 1e9];

        for &start in &inputs {
            for &end in &inputs {
                trim.set_start(start);
                assert_invariant(&trim, duration_ms);
                trim.set_end(end);
                assert_invariant(&trim, duration_ms);
            }
        }
    }

    #[test]
    fn test_source_shorter_than_min_gap() {
        let mut trim = TrimParameters::new(&source(50));
        trim.set_start(1.0);
        assert_eq!(trim.start_ms(), 0);
        assert_eq!(trim.end_ms(), 50);
    }
}
