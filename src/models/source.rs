// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Source video descriptor.
//!
//! The facts about an opened video that every edit is validated against:
//! where it lives, how long it runs and how large its frames are.

use crate::util::geometry::Size;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Smallest frame dimension any edit can produce or accept.
pub const MIN_DIMENSION: u32 = 10;

/// Reasons a source descriptor is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("source path is empty")]
    EmptyPath,

    #[error("source duration must be positive")]
    ZeroDuration,

    #[error("source frame {width}x{height} is smaller than the {min}x{min} minimum", min = MIN_DIMENSION)]
    TooSmall { width: u32, height: u32 },
}

/// Immutable description of the video being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSource")]
pub struct SourceDescriptor {
    path: PathBuf,
    duration_ms: u64,
    width: u32,
    height: u32,
}

/// Unchecked form used when deserializing.
#[derive(Deserialize)]
struct RawSource {
    path: PathBuf,
    duration_ms: u64,
    width: u32,
    height: u32,
}

impl TryFrom<RawSource> for SourceDescriptor {
    type Error = SourceError;

    fn try_from(raw: RawSource) -> Result<Self, Self::Error> {
        SourceDescriptor::new(raw.path, raw.duration_ms, raw.width, raw.height)
    }
}

impl SourceDescriptor {
    /// Validate and create a descriptor.
    pub fn new(
        path: impl Into<PathBuf>,
        duration_ms: u64,
        width: u32,
        height: u32,
    ) -> Result<Self, SourceError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(SourceError::EmptyPath);
        }
        if duration_ms == 0 {
            return Err(SourceError::ZeroDuration);
        }
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(SourceError::TooSmall { width, height });
        }

        Ok(Self {
            path,
            duration_ms,
            width,
            height,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Width divided by height of the native frame.
    pub fn aspect_ratio(&self) -> f64 {
        self.size().aspect_ratio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_descriptor() {
        let source = SourceDescriptor::new("clip.mp4", 120_000, 1920, 1080).unwrap();
        assert_eq!(source.duration_secs(), 120.0);
        assert_eq!(source.size(), Size::new(1920, 1080));
        assert!((source.aspect_ratio() - 16.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(SourceDescriptor::new("", 1000, 640, 480), Err(SourceError::EmptyPath));
        assert_eq!(SourceDescriptor::new("a.mp4", 0, 640, 480), Err(SourceError::ZeroDuration));
        assert_eq!(
            SourceDescriptor::new("a.mp4", 1000, 8, 480),
            Err(SourceError::TooSmall { width: 8, height: 480 })
        );
    }

    #[test]
    fn test_deserialize_is_validated() {
        let ok: SourceDescriptor =
            serde_json::from_str(r#"{"path":"a.mp4","duration_ms":5000,"width":640,"height":360}"#)
                .unwrap();
        assert_eq!(ok.width(), 640);

        let bad = serde_json::from_str::<SourceDescriptor>(
            r#"{"path":"a.mp4","duration_ms":0,"width":640,"height":360}"#,
        );
        assert!(bad.is_err());
    }
}
