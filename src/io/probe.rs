// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Source inspection via ffprobe.
//!
//! This module runs ffprobe on an input file and turns its JSON report into
//! a validated [`SourceDescriptor`].

use crate::command;
use crate::models::source::SourceDescriptor;
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Deserialize)]
struct ProbeReport {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Probe `path` with the given ffprobe executable.
pub fn probe_source(ffprobe: &Path, path: &Path) -> Result<SourceDescriptor> {
    let args = command::probe(path);
    log::debug!("Running {} {}", ffprobe.display(), args);

    let output = Command::new(ffprobe)
        .args(args.as_slice())
        .output()
        .with_context(|| format!("Failed to run {}", ffprobe.display()))?;

    if !output.status.success() {
        bail!(
            "ffprobe failed on {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    parse_report(path, &output.stdout)
}

/// Build a descriptor from ffprobe's `-print_format json` output.
///
/// Dimensions come from the first video stream. Duration prefers the
/// stream's own value and falls back to the container's.
pub fn parse_report(path: &Path, json: &[u8]) -> Result<SourceDescriptor> {
    let report: ProbeReport =
        serde_json::from_slice(json).context("Failed to parse ffprobe output")?;

    let video = report
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| anyhow!("No video stream found in {}", path.display()))?;

    let width = video.width.context("Could not read video width")?;
    let height = video.height.context("Could not read video height")?;

    let seconds = video
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .or_else(|| {
            report
                .format
                .as_ref()
                .and_then(|f| f.duration.as_deref())
                .and_then(|d| d.parse::<f64>().ok())
        })
        .context("Could not read video duration")?;

    let duration_ms = (seconds * 1000.0).round().max(0.0) as u64;
    log::info!(
        "Probed {}: {}x{}, {} ms",
        path.display(),
        width,
        height,
        duration_ms
    );

    Ok(SourceDescriptor::new(path, duration_ms, width, height)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{
        "streams": [
            {"index": 0, "codec_type": "audio", "codec_name": "aac", "duration": "61.000000"},
            {"index": 1, "codec_type": "video", "codec_name": "h264",
             "width": 1920, "height": 1080, "duration": "60.060000"}
        ],
        "format": {"filename": "clip.mp4", "duration": "61.000000", "size": "1234"}
    }"#;

    #[test]
    fn test_parse_picks_video_stream() {
        let source = parse_report(Path::new("clip.mp4"), REPORT.as_bytes()).unwrap();
        assert_eq!(source.width(), 1920);
        assert_eq!(source.height(), 1080);
        assert_eq!(source.duration_ms(), 60_060);
        assert_eq!(source.path(), Path::new("clip.mp4"));
    }

    #[test]
    fn test_parse_falls_back_to_format_duration() {
        let json = r#"{
            "streams": [{"codec_type": "video", "width": 640, "height": 360}],
            "format": {"duration": "12.5"}
        }"#;
        let source = parse_report(Path::new("clip.mkv"), json.as_bytes()).unwrap();
        assert_eq!(source.duration_ms(), 12_500);
    }

    #[test]
    fn test_parse_rejects_audio_only() {
        let json = r#"{"streams": [{"codec_type": "audio"}], "format": {"duration": "3.0"}}"#;
        let err = parse_report(Path::new("song.mp3"), json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("No video stream"));
    }

    #[test]
    fn test_parse_rejects_zero_duration() {
        let json = r#"{"streams": [{"codec_type": "video", "width": 640, "height": 360, "duration": "0"}]}"#;
        assert!(parse_report(Path::new("still.png"), json.as_bytes()).is_err());
    }
}
