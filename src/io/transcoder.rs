// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! External transcoder invocation.
//!
//! The boundary where a finished argument list leaves the core. The
//! transcoder's output is never interpreted beyond success or failure, and
//! failed runs are not retried since the output file may be half written.

use crate::command::ArgumentList;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Result of one transcoder run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Opaque message for display, usually the tool's stderr.
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Runs a synthesized argument list to completion.
pub trait Transcoder {
    fn run(&mut self, args: &ArgumentList) -> Outcome;
}

/// Spawns the ffmpeg executable and waits for it.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: PathBuf,
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegTranscoder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Transcoder for FfmpegTranscoder {
    fn run(&mut self, args: &ArgumentList) -> Outcome {
        log::info!("Running {} {}", self.program.display(), args);

        let output = Command::new(&self.program)
            .args(args.as_slice())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                log::info!("{} finished successfully", self.program.display());
                Outcome::Success
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                let message = if stderr.is_empty() {
                    format!("{} exited with {}", self.program.display(), output.status)
                } else {
                    stderr
                };
                log::error!("{} failed: {}", self.program.display(), message);
                Outcome::Failure(message)
            }
            Err(e) => {
                let message = format!("Failed to start {}: {}", self.program.display(), e);
                log::error!("{}", message);
                Outcome::Failure(message)
            }
        }
    }
}
