// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state.
//!
//! This module ties the command line to the edit core: it resolves the
//! source (from a job file or by probing), drives one edit session through
//! its parameter model, and either prints, exports or runs the resulting
//! ffmpeg command.

use crate::cli::{Args, EditCommand};
use crate::io::{
    probe,
    serialization::{self, CommandPlan, EditJob},
    transcoder::{FfmpegTranscoder, Outcome},
};
use crate::session::{EditOperation, EditSession};
use anyhow::{anyhow, bail, Context, Result};
use std::path::{Path, PathBuf};

/// Runtime settings taken from the command line.
pub struct EditorApp {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
    dry_run: bool,
    emit: Option<PathBuf>,
}

impl EditorApp {
    pub fn new(args: &Args) -> Self {
        Self {
            ffmpeg: args.ffmpeg.clone(),
            ffprobe: args.ffprobe.clone(),
            dry_run: args.dry_run,
            emit: args.emit.clone(),
        }
    }

    /// Execute one subcommand.
    pub fn run(&self, command: EditCommand) -> Result<()> {
        match command {
            EditCommand::Probe { input } => {
                let source = probe::probe_source(&self.ffprobe, &input)?;
                println!("{}", serde_yaml::to_string(&source)?);
                Ok(())
            }
            EditCommand::Run { job } => {
                let edit_job = serialization::import_job(&job)
                    .with_context(|| format!("Failed to load job {}", job.display()))?;
                log::info!("Loaded {} job from {}", edit_job.edit.kind(), job.display());
                self.execute(edit_job)
            }
            command => {
                let job = command
                    .into_job()
                    .ok_or_else(|| anyhow!("subcommand does not describe an edit"))?;
                self.execute(job)
            }
        }
    }

    /// Build the session for a job, apply its edit and confirm it.
    fn execute(&self, job: EditJob) -> Result<()> {
        let source = match job.source.clone() {
            Some(source) => source,
            None => {
                let input = job
                    .input
                    .as_deref()
                    .ok_or_else(|| anyhow!("Job names neither a source nor an input file"))?;
                probe::probe_source(&self.ffprobe, input)?
            }
        };

        let mut session = EditSession::new(source);
        job.edit.apply(&mut session);

        let edit = session
            .active()
            .ok_or_else(|| anyhow!("No edit in progress"))?;
        let output = match job.output {
            Some(output) => output,
            None => derive_output(session.source().path(), edit),
        };
        if output == session.source().path() {
            bail!("Refusing to overwrite the input file {}", output.display());
        }

        let arguments = edit.synthesize(session.source().path(), &output);
        if let Some(ref emit) = self.emit {
            let plan = CommandPlan {
                program: self.ffmpeg.clone(),
                arguments: arguments.clone(),
                output: output.clone(),
            };
            serialization::export_plan(&plan, emit)
                .with_context(|| format!("Failed to write plan {}", emit.display()))?;
            log::info!("Wrote command plan to {}", emit.display());
        }

        if self.dry_run {
            println!("{} {}", self.ffmpeg.display(), arguments);
            session.cancel();
            return Ok(());
        }

        let mut transcoder = FfmpegTranscoder::new(&self.ffmpeg);
        match session.confirm(&output, &mut transcoder)? {
            Outcome::Success => {
                println!("{}", output.display());
                Ok(())
            }
            Outcome::Failure(message) => Err(anyhow!("ffmpeg error: {}", message)),
        }
    }
}

/// Default output file for an edit of `input`.
///
/// Conversions swap the extension for the container's. Other edits keep
/// the extension and tag the file stem with the edit performed.
pub fn derive_output(input: &Path, edit: &EditOperation) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let extension = input
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mp4".to_string());

    let file_name = match edit {
        EditOperation::Convert(convert) => {
            let target = convert.container().extension();
            if extension.eq_ignore_ascii_case(target) {
                format!("{}_converted.{}", stem, target)
            } else {
                format!("{}.{}", stem, target)
            }
        }
        EditOperation::Trim(_) => format!("{}_trimmed.{}", stem, extension),
        EditOperation::Crop(_) => format!("{}_cropped.{}", stem, extension),
        EditOperation::Resize(_) => format!("{}_resized.{}", stem, extension),
    };

    input.with_file_name(file_name)
}
