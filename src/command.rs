// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Transcoder argument synthesis.
//!
//! One pure function per edit kind, each turning validated parameters into
//! the exact, ordered ffmpeg argument list. Nothing here touches the
//! filesystem or spawns processes.

use crate::models::convert::{Container, ConvertParameters};
use crate::models::crop::CropParameters;
use crate::models::resize::ResizeParameters;
use crate::models::trim::TrimParameters;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Palette-based GIF filter chain; GIF output has no bitrate setting.
pub const GIF_FILTER: &str =
    "fps=10,scale=320:-1:flags=lanczos,split[s0][s1];[s0]palettegen[p];[s1][p]paletteuse";

/// Ordered command tokens for the external transcoder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ArgumentList(Vec<String>);

impl ArgumentList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append one token.
    pub fn arg(&mut self, token: impl Into<String>) -> &mut Self {
        self.0.push(token.into());
        self
    }

    /// Append several tokens in order.
    pub fn args<I, S>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ArgumentList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Shell-style rendering for logs and dry runs.
impl fmt::Display for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let plain = !token.is_empty()
                && token
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));
            if plain {
                f.write_str(token)?;
            } else {
                write!(f, "'{}'", token.replace('\'', r"'\''"))?;
            }
        }
        Ok(())
    }
}

/// Shortest decimal seconds for a millisecond time: `12.5`, `120`, `0.05`.
pub fn format_seconds(ms: u64) -> String {
    let secs = ms / 1000;
    let frac = ms % 1000;
    if frac == 0 {
        return secs.to_string();
    }
    let frac = format!("{:03}", frac);
    format!("{}.{}", secs, frac.trim_end_matches('0'))
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn input(source: &Path) -> ArgumentList {
    let mut args = ArgumentList::new();
    args.args(["-y", "-i"]).arg(path_arg(source));
    args
}

/// Stream-copy trim. Cuts land on the nearest keyframe.
pub fn trim(params: &TrimParameters, source: &Path, output: &Path) -> ArgumentList {
    let mut args = input(source);
    args.arg("-ss")
        .arg(format_seconds(params.start_ms()))
        .arg("-to")
        .arg(format_seconds(params.end_ms()))
        .args(["-c", "copy"])
        .arg(path_arg(output));
    args
}

/// The `crop=W:H:X:Y` filter expression.
pub fn crop_filter(params: &CropParameters) -> String {
    format!(
        "crop={}:{}:{}:{}",
        params.width(),
        params.height(),
        params.x(),
        params.y()
    )
}

pub fn crop(params: &CropParameters, source: &Path, output: &Path) -> ArgumentList {
    let mut args = input(source);
    args.arg("-vf")
        .arg(crop_filter(params))
        .args(["-c:a", "copy"])
        .arg(path_arg(output));
    args
}

/// The `scale=W:H:flags=ALGO` filter expression.
pub fn scale_filter(params: &ResizeParameters) -> String {
    format!(
        "scale={}:{}:flags={}",
        params.width(),
        params.height(),
        params.algorithm().flag()
    )
}

pub fn resize(params: &ResizeParameters, source: &Path, output: &Path) -> ArgumentList {
    let mut args = input(source);
    args.arg("-vf")
        .arg(scale_filter(params))
        .args(["-c:a", "copy"])
        .arg(path_arg(output));
    args
}

pub fn convert(params: &ConvertParameters, source: &Path, output: &Path) -> ArgumentList {
    let mut args = input(source);

    // GIF never carries audio, so it gets neither -an nor -c:a
    if params.container() != Container::Gif {
        if params.include_audio() {
            args.arg("-c:a")
                .arg(params.audio_codec().encoder())
                .arg("-b:a")
                .arg(format!("{}k", params.audio_bitrate_kbps()));
        } else {
            args.arg("-an");
        }
    }

    let video_bitrate = format!("{}k", params.video_bitrate_kbps());
    match params.container() {
        Container::Webm => {
            args.args(["-c:v", "libvpx-vp9", "-b:v"]).arg(video_bitrate);
        }
        Container::Mp4 | Container::Mov | Container::Mkv => {
            args.args(["-c:v", "libx264", "-b:v"]).arg(video_bitrate);
        }
        Container::Avi => {
            args.args(["-c:v", "mjpeg", "-b:v"]).arg(video_bitrate);
        }
        Container::Gif => {
            args.arg("-vf").arg(GIF_FILTER).args(["-loop", "0"]);
        }
    }

    args.arg(path_arg(output));
    args
}

/// Extract a single still one second in, for the crop preview.
pub fn frame_grab(source: &Path, output: &Path) -> ArgumentList {
    let mut args = input(source);
    args.args(["-ss", "00:00:01", "-frames:v", "1", "-q:v", "2"])
        .arg(path_arg(output));
    args
}

/// Arguments for the ffprobe inspection utility, producing JSON.
pub fn probe(source: &Path) -> ArgumentList {
    let mut args = ArgumentList::new();
    args.args([
        "-v",
        "quiet",
        "-print_format",
        "json",
        "-show_format",
        "-show_streams",
    ])
    .arg(path_arg(source));
    args
}
