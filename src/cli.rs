// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Command line arguments.

use crate::io::serialization::{EditJob, EditSpec};
use crate::models::{
    convert::{AudioCodec, Container},
    resize::{ResizePreset, ScalingAlgorithm},
};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Trim, crop, resize and convert videos with ffmpeg
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: EditCommand,

    /// ffmpeg executable used to run edits
    #[arg(long = "ffmpeg", value_name = "BIN", default_value = "ffmpeg", global = true)]
    pub ffmpeg: PathBuf,

    /// ffprobe executable used to inspect inputs
    #[arg(long = "ffprobe", value_name = "BIN", default_value = "ffprobe", global = true)]
    pub ffprobe: PathBuf,

    /// Print the ffmpeg command instead of running it
    #[arg(short = 'n', long = "dry-run", global = true)]
    pub dry_run: bool,

    /// Write the command plan to a YAML or JSON file
    #[arg(long = "emit", value_name = "PLAN_FILE", global = true)]
    pub emit: Option<PathBuf>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

/// Input and output files shared by the edit subcommands.
#[derive(clap::Args, Debug)]
pub struct IoArgs {
    /// Video to edit
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: derived from the input name)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum EditCommand {
    /// Cut a time window without re-encoding
    Trim {
        #[command(flatten)]
        io: IoArgs,

        /// Start time in seconds
        #[arg(long = "start", value_name = "SECONDS")]
        start: Option<f64>,

        /// End time in seconds
        #[arg(long = "end", value_name = "SECONDS")]
        end: Option<f64>,
    },

    /// Crop to a rectangle in source pixels
    Crop {
        #[command(flatten)]
        io: IoArgs,

        #[arg(short = 'x', long = "x", value_name = "PX")]
        x: Option<u32>,

        #[arg(short = 'y', long = "y", value_name = "PX")]
        y: Option<u32>,

        #[arg(short = 'W', long = "width", value_name = "PX")]
        width: Option<u32>,

        #[arg(short = 'H', long = "height", value_name = "PX")]
        height: Option<u32>,
    },

    /// Scale to new dimensions
    Resize {
        #[command(flatten)]
        io: IoArgs,

        /// Size preset: hd, fullhd, 2k, 4k, half, quarter
        #[arg(short = 'p', long = "preset", value_parser = parse_name::<ResizePreset>)]
        preset: Option<ResizePreset>,

        #[arg(short = 'W', long = "width", value_name = "PX")]
        width: Option<u32>,

        #[arg(short = 'H', long = "height", value_name = "PX")]
        height: Option<u32>,

        /// Do not keep the source aspect ratio
        #[arg(long = "no-aspect")]
        no_aspect: bool,

        /// Scaling algorithm: bilinear, bicubic, lanczos, spline
        #[arg(short = 'a', long = "algorithm", value_parser = parse_name::<ScalingAlgorithm>)]
        algorithm: Option<ScalingAlgorithm>,
    },

    /// Convert to another container format
    Convert {
        #[command(flatten)]
        io: IoArgs,

        /// Target container: mp4, webm, mkv, avi, mov, gif
        #[arg(short = 'f', long = "format", value_parser = parse_name::<Container>)]
        container: Option<Container>,

        /// Video bitrate in kbps (500-20000)
        #[arg(long = "video-bitrate", value_name = "KBPS")]
        video_bitrate: Option<u32>,

        /// Drop the audio stream
        #[arg(long = "no-audio")]
        no_audio: bool,

        /// Audio codec: aac, mp3, opus, flac
        #[arg(long = "audio-codec", value_parser = parse_name::<AudioCodec>)]
        audio_codec: Option<AudioCodec>,

        /// Audio bitrate in kbps (32-320)
        #[arg(long = "audio-bitrate", value_name = "KBPS")]
        audio_bitrate: Option<u32>,
    },

    /// Run an edit described in a YAML or JSON job file
    Run {
        #[arg(value_name = "JOB")]
        job: PathBuf,
    },

    /// Print the source facts of a video
    Probe {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}

impl EditCommand {
    /// The job an edit subcommand describes; `None` for `run` and `probe`.
    pub fn into_job(self) -> Option<EditJob> {
        let (io, edit) = match self {
            EditCommand::Trim { io, start, end } => (io, EditSpec::Trim { start, end }),
            EditCommand::Crop {
                io,
                x,
                y,
                width,
                height,
            } => (
                io,
                EditSpec::Crop {
                    x,
                    y,
                    width,
                    height,
                },
            ),
            EditCommand::Resize {
                io,
                preset,
                width,
                height,
                no_aspect,
                algorithm,
            } => (
                io,
                EditSpec::Resize {
                    preset,
                    width,
                    height,
                    maintain_aspect_ratio: no_aspect.then_some(false),
                    algorithm,
                },
            ),
            EditCommand::Convert {
                io,
                container,
                video_bitrate,
                no_audio,
                audio_codec,
                audio_bitrate,
            } => (
                io,
                EditSpec::Convert {
                    container,
                    video_bitrate_kbps: video_bitrate,
                    include_audio: no_audio.then_some(false),
                    audio_codec,
                    audio_bitrate_kbps: audio_bitrate,
                },
            ),
            EditCommand::Run { .. } | EditCommand::Probe { .. } => return None,
        };

        Some(EditJob {
            source: None,
            input: Some(io.input),
            output: io.output,
            edit,
        })
    }
}

/// Parse a lowercase enum name the same way job files spell it.
fn parse_name<T: DeserializeOwned>(name: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(name.to_lowercase()))
        .map_err(|_| format!("unknown value '{}'", name))
}
