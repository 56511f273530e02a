// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Edit job serialization and deserialization.
//!
//! This module handles importing edit jobs and exporting synthesized command
//! plans in YAML and JSON formats. A job names a source, an output and one
//! edit whose fields are fed through the parameter model's setters, so a job
//! file can never bypass the clamping rules.

use crate::command::ArgumentList;
use crate::models::{
    convert::{AudioCodec, Container, ConvertParameters},
    crop::CropParameters,
    resize::{ResizeParameters, ResizePreset, ScalingAlgorithm},
    source::SourceDescriptor,
    trim::TrimParameters,
};
use crate::session::{EditKind, EditOperation, EditSession};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Requested parameter values for one edit. Missing fields keep defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EditSpec {
    Trim {
        start: Option<f64>,
        end: Option<f64>,
    },
    Crop {
        x: Option<u32>,
        y: Option<u32>,
        width: Option<u32>,
        height: Option<u32>,
    },
    Resize {
        preset: Option<ResizePreset>,
        width: Option<u32>,
        height: Option<u32>,
        maintain_aspect_ratio: Option<bool>,
        algorithm: Option<ScalingAlgorithm>,
    },
    Convert {
        container: Option<Container>,
        video_bitrate_kbps: Option<u32>,
        include_audio: Option<bool>,
        audio_codec: Option<AudioCodec>,
        audio_bitrate_kbps: Option<u32>,
    },
}

impl EditSpec {
    pub fn kind(&self) -> EditKind {
        match self {
            EditSpec::Trim { .. } => EditKind::Trim,
            EditSpec::Crop { .. } => EditKind::Crop,
            EditSpec::Resize { .. } => EditKind::Resize,
            EditSpec::Convert { .. } => EditKind::Convert,
        }
    }

    /// Fresh parameters for `source` with the requested values applied.
    ///
    /// Values go in the order a user would set them: resize lock before
    /// dimensions, convert container before audio settings.
    pub fn build(&self, source: &SourceDescriptor) -> EditOperation {
        match self {
            EditSpec::Trim { start, end } => {
                let mut trim = TrimParameters::new(source);
                if let Some(start) = start {
                    trim.set_start(*start);
                }
                if let Some(end) = end {
                    trim.set_end(*end);
                }
                EditOperation::Trim(trim)
            }
            EditSpec::Crop {
                x,
                y,
                width,
                height,
            } => {
                let mut crop = CropParameters::new(source);
                crop.set_numeric(
                    x.unwrap_or(crop.x()),
                    y.unwrap_or(crop.y()),
                    width.unwrap_or(crop.width()),
                    height.unwrap_or(crop.height()),
                );
                EditOperation::Crop(crop)
            }
            EditSpec::Resize {
                preset,
                width,
                height,
                maintain_aspect_ratio,
                algorithm,
            } => {
                let mut resize = ResizeParameters::new(source);
                if let Some(maintain) = maintain_aspect_ratio {
                    resize.set_maintain_aspect_ratio(*maintain);
                }
                if let Some(preset) = preset {
                    resize.apply_preset(*preset);
                }
                if let Some(width) = width {
                    resize.set_width(*width);
                }
                if let Some(height) = height {
                    resize.set_height(*height);
                }
                if let Some(algorithm) = algorithm {
                    resize.set_algorithm(*algorithm);
                }
                EditOperation::Resize(resize)
            }
            EditSpec::Convert {
                container,
                video_bitrate_kbps,
                include_audio,
                audio_codec,
                audio_bitrate_kbps,
            } => {
                let mut convert = ConvertParameters::new();
                if let Some(container) = container {
                    convert.set_container(*container);
                }
                if let Some(kbps) = video_bitrate_kbps {
                    convert.set_video_bitrate_kbps(*kbps);
                }
                if let Some(include) = include_audio {
                    convert.set_include_audio(*include);
                }
                if let Some(codec) = audio_codec {
                    convert.set_audio_codec(*codec);
                }
                if let Some(kbps) = audio_bitrate_kbps {
                    convert.set_audio_bitrate_kbps(*kbps);
                }
                EditOperation::Convert(convert)
            }
        }
    }

    /// Build this edit for the session's source and make it the active edit.
    pub fn apply(&self, session: &mut EditSession) {
        let edit = self.build(session.source());
        session.host(edit);
    }
}

/// A complete edit request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditJob {
    /// Known source facts. When absent the input is probed.
    pub source: Option<SourceDescriptor>,
    /// Input file, used when `source` is absent.
    pub input: Option<PathBuf>,
    /// Output file; derived from the input when absent.
    pub output: Option<PathBuf>,
    pub edit: EditSpec,
}

impl EditJob {
    /// The file the job reads from.
    pub fn input_path(&self) -> Option<&Path> {
        self.source
            .as_ref()
            .map(SourceDescriptor::path)
            .or(self.input.as_deref())
    }
}

/// What a confirmed edit would run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandPlan {
    pub program: PathBuf,
    pub arguments: ArgumentList,
    pub output: PathBuf,
}

/// Parse a job from YAML text.
pub fn parse_yaml(text: &str) -> Result<EditJob> {
    Ok(serde_yaml::from_str(text)?)
}

/// Parse a job from JSON text.
pub fn parse_json(text: &str) -> Result<EditJob> {
    Ok(serde_json::from_str(text)?)
}

/// Import a job file, choosing the format by extension.
pub fn import_job(path: &Path) -> Result<EditJob> {
    let text = std::fs::read_to_string(path)?;
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => parse_yaml(&text),
        Some("json") => parse_json(&text),
        extension => bail!("Unsupported job file extension: {:?}", extension),
    }
}

/// Export a command plan, choosing the format by extension.
pub fn export_plan(plan: &CommandPlan, path: &Path) -> Result<()> {
    let text = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::to_string(plan)?,
        Some("json") => serde_json::to_string_pretty(plan)?,
        extension => bail!("Unsupported plan file extension: {:?}", extension),
    };
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditSession {
        EditSession::new(SourceDescriptor::new("in.mp4", 120_000, 1920, 1080).unwrap())
    }

    #[test]
    fn test_parse_yaml_job() {
        let job = parse_yaml(
            "source: { path: in.mp4, duration_ms: 120000, width: 1920, height: 1080 }\n\
             output: out.mp4\n\
             edit:\n  kind: resize\n  width: 1280\n  algorithm: lanczos\n",
        )
        .unwrap();

        assert_eq!(job.input_path(), Some(Path::new("in.mp4")));
        assert_eq!(job.output.as_deref(), Some(Path::new("out.mp4")));
        assert_eq!(job.edit.kind(), EditKind::Resize);
    }

    #[test]
    fn test_parse_json_job_without_source() {
        let job = parse_json(
            r#"{"input": "in.mov", "edit": {"kind": "convert", "container": "gif"}}"#,
        )
        .unwrap();
        assert!(job.source.is_none());
        assert_eq!(job.input_path(), Some(Path::new("in.mov")));
        assert!(job.output.is_none());
    }

    #[test]
    fn test_invalid_source_is_rejected() {
        let result = parse_yaml(
            "source: { path: in.mp4, duration_ms: 0, width: 1920, height: 1080 }\n\
             edit: { kind: trim }\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_resize_spec() {
        let mut session = session();
        let spec = EditSpec::Resize {
            preset: None,
            width: Some(1280),
            height: None,
            maintain_aspect_ratio: None,
            algorithm: Some(ScalingAlgorithm::Spline),
        };
        spec.apply(&mut session);

        let args = session.preview(Path::new("out.mp4")).unwrap();
        assert!(args.contains("scale=1280:720:flags=spline"));
    }

    #[test]
    fn test_apply_trim_spec_is_clamped() {
        let mut session = session();
        EditSpec::Trim {
            start: Some(130.0),
            end: None,
        }
        .apply(&mut session);

        match session.active() {
            Some(EditOperation::Trim(trim)) => {
                assert_eq!(trim.start_ms(), 119_900);
                assert_eq!(trim.end_ms(), 120_000);
            }
            other => panic!("unexpected edit {:?}", other),
        }
    }

    #[test]
    fn test_apply_convert_spec_keeps_gif_silent() {
        let mut session = session();
        EditSpec::Convert {
            container: Some(Container::Gif),
            video_bitrate_kbps: None,
            include_audio: Some(true),
            audio_codec: None,
            audio_bitrate_kbps: None,
        }
        .apply(&mut session);

        let args = session.preview(Path::new("out.gif")).unwrap();
        assert!(args.contains("-loop"));
        assert!(!args.contains("-c:a"));
        assert!(!args.contains("-an"));
    }

    #[test]
    fn test_build_matches_requested_kind() {
        let source = SourceDescriptor::new("in.mp4", 120_000, 1920, 1080).unwrap();
        let specs = [
            EditSpec::Trim {
                start: None,
                end: None,
            },
            EditSpec::Crop {
                x: None,
                y: None,
                width: None,
                height: None,
            },
            EditSpec::Resize {
                preset: None,
                width: None,
                height: None,
                maintain_aspect_ratio: None,
                algorithm: None,
            },
            EditSpec::Convert {
                container: None,
                video_bitrate_kbps: None,
                include_audio: None,
                audio_codec: None,
                audio_bitrate_kbps: None,
            },
        ];

        for spec in &specs {
            let edit = spec.build(&source);
            assert_eq!(edit.kind(), spec.kind());
            assert_eq!(edit, EditOperation::new(spec.kind(), &source));
        }
    }

    #[test]
    fn test_apply_replaces_active_edit() {
        let mut session = session();
        session.begin(EditKind::Convert);
        EditSpec::Trim {
            start: Some(10.0),
            end: Some(20.0),
        }
        .apply(&mut session);

        match session.active() {
            Some(EditOperation::Trim(trim)) => {
                assert_eq!((trim.start_ms(), trim.end_ms()), (10_000, 20_000));
            }
            other => panic!("unexpected edit {:?}", other),
        }
    }

    #[test]
    fn test_apply_partial_crop_keeps_defaults() {
        let mut session = session();
        EditSpec::Crop {
            x: Some(100),
            y: None,
            width: None,
            height: Some(500),
        }
        .apply(&mut session);

        let args = session.preview(Path::new("out.mp4")).unwrap();
        assert!(args.contains("crop=1820:500:100:0"));
    }

    #[test]
    fn test_plan_serializes_arguments_in_order() {
        let mut arguments = ArgumentList::new();
        arguments.args(["-y", "-i", "in.mp4", "out.mp4"]);
        let plan = CommandPlan {
            program: PathBuf::from("ffmpeg"),
            arguments,
            output: PathBuf::from("out.mp4"),
        };

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["program"], "ffmpeg");
        assert_eq!(json["arguments"][2], "in.mp4");
        assert_eq!(json["arguments"].as_array().unwrap().len(), 4);
    }
}
