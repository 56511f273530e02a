// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Format conversion parameters.
//!
//! Target container, bitrates and audio handling. Picking a container also
//! picks a recommended audio encoder, and GIF switches audio off entirely.

use serde::{Deserialize, Serialize};

pub const MIN_VIDEO_KBPS: u32 = 500;
pub const MAX_VIDEO_KBPS: u32 = 20_000;
pub const MIN_AUDIO_KBPS: u32 = 32;
pub const MAX_AUDIO_KBPS: u32 = 320;

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    #[default]
    Mp4,
    Webm,
    Mkv,
    Avi,
    Mov,
    Gif,
}

impl Container {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Container::Mp4 => "mp4",
            Container::Webm => "webm",
            Container::Mkv => "mkv",
            Container::Avi => "avi",
            Container::Mov => "mov",
            Container::Gif => "gif",
        }
    }

    /// Whether the container can carry an audio stream.
    pub fn supports_audio(&self) -> bool {
        !matches!(self, Container::Gif)
    }

    /// Audio encoder suggested when switching to this container.
    ///
    /// `None` keeps whatever codec is currently chosen.
    pub fn recommended_audio(&self) -> Option<AudioCodec> {
        match self {
            Container::Webm => Some(AudioCodec::Opus),
            Container::Mp4 | Container::Mov => Some(AudioCodec::Aac),
            Container::Avi => Some(AudioCodec::Flac),
            Container::Mkv | Container::Gif => None,
        }
    }
}

/// Audio encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    #[default]
    Aac,
    Mp3,
    Opus,
    Flac,
}

impl AudioCodec {
    /// Encoder name passed to `-c:a`.
    pub fn encoder(&self) -> &'static str {
        match self {
            AudioCodec::Aac => "aac",
            AudioCodec::Mp3 => "libmp3lame",
            AudioCodec::Opus => "libopus",
            AudioCodec::Flac => "flac",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertParameters {
    container: Container,
    video_bitrate_kbps: u32,
    include_audio: bool,
    audio_codec: AudioCodec,
    audio_bitrate_kbps: u32,
}

impl Default for ConvertParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertParameters {
    /// MP4 at 2000 kbps with 128 kbps AAC audio.
    pub fn new() -> Self {
        Self {
            container: Container::Mp4,
            video_bitrate_kbps: 2000,
            include_audio: true,
            audio_codec: AudioCodec::Aac,
            audio_bitrate_kbps: 128,
        }
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn video_bitrate_kbps(&self) -> u32 {
        self.video_bitrate_kbps
    }

    pub fn include_audio(&self) -> bool {
        self.include_audio
    }

    pub fn audio_codec(&self) -> AudioCodec {
        self.audio_codec
    }

    pub fn audio_bitrate_kbps(&self) -> u32 {
        self.audio_bitrate_kbps
    }

    /// Whether the audio toggle may be switched on.
    pub fn audio_available(&self) -> bool {
        self.container.supports_audio()
    }

    /// Switch container.
    ///
    /// Entering GIF clears the audio flag. Leaving GIF makes audio
    /// available again but leaves it off.
    pub fn set_container(&mut self, container: Container) {
        self.container = container;
        if !container.supports_audio() {
            self.include_audio = false;
        }
        if let Some(codec) = container.recommended_audio() {
            self.audio_codec = codec;
        }
    }

    pub fn set_video_bitrate_kbps(&mut self, kbps: u32) {
        self.video_bitrate_kbps = kbps.clamp(MIN_VIDEO_KBPS, MAX_VIDEO_KBPS);
    }

    /// Ignored while the container has no audio stream.
    pub fn set_include_audio(&mut self, include: bool) {
        self.include_audio = include && self.audio_available();
    }

    pub fn set_audio_codec(&mut self, codec: AudioCodec) {
        self.audio_codec = codec;
    }

    pub fn set_audio_bitrate_kbps(&mut self, kbps: u32) {
        self.audio_bitrate_kbps = kbps.clamp(MIN_AUDIO_KBPS, MAX_AUDIO_KBPS);
    }
}
