// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Edit session state.
//!
//! A session wraps one opened source and at most one in-progress edit. The
//! edit's parameter model lives only until it is confirmed or cancelled;
//! confirming hands its argument list to a [`Transcoder`] and discards it.

use crate::command::{self, ArgumentList};
use crate::io::transcoder::{Outcome, Transcoder};
use crate::models::{
    convert::ConvertParameters, crop::CropParameters, resize::ResizeParameters,
    source::SourceDescriptor, trim::TrimParameters,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// The kinds of edit a session can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    Trim,
    Crop,
    Resize,
    Convert,
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditKind::Trim => "trim",
            EditKind::Crop => "crop",
            EditKind::Resize => "resize",
            EditKind::Convert => "convert",
        };
        f.write_str(name)
    }
}

/// A parameter model for one edit kind.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOperation {
    Trim(TrimParameters),
    Crop(CropParameters),
    Resize(ResizeParameters),
    Convert(ConvertParameters),
}

impl EditOperation {
    /// Fresh parameters with defaults derived from the source.
    pub fn new(kind: EditKind, source: &SourceDescriptor) -> Self {
        match kind {
            EditKind::Trim => EditOperation::Trim(TrimParameters::new(source)),
            EditKind::Crop => EditOperation::Crop(CropParameters::new(source)),
            EditKind::Resize => EditOperation::Resize(ResizeParameters::new(source)),
            EditKind::Convert => EditOperation::Convert(ConvertParameters::new()),
        }
    }

    pub fn kind(&self) -> EditKind {
        match self {
            EditOperation::Trim(_) => EditKind::Trim,
            EditOperation::Crop(_) => EditKind::Crop,
            EditOperation::Resize(_) => EditKind::Resize,
            EditOperation::Convert(_) => EditKind::Convert,
        }
    }

    pub fn synthesize(&self, source: &Path, output: &Path) -> ArgumentList {
        match self {
            EditOperation::Trim(params) => command::trim(params, source, output),
            EditOperation::Crop(params) => command::crop(params, source, output),
            EditOperation::Resize(params) => command::resize(params, source, output),
            EditOperation::Convert(params) => command::convert(params, source, output),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no edit in progress")]
    NoActiveEdit,
}

/// One opened source and its current edit.
#[derive(Debug)]
pub struct EditSession {
    source: SourceDescriptor,
    active: Option<EditOperation>,
}

impl EditSession {
    pub fn new(source: SourceDescriptor) -> Self {
        Self {
            source,
            active: None,
        }
    }

    pub fn source(&self) -> &SourceDescriptor {
        &self.source
    }

    /// Start an edit from defaults, replacing any edit already in progress.
    pub fn begin(&mut self, kind: EditKind) -> &mut EditOperation {
        let edit = EditOperation::new(kind, &self.source);
        self.host(edit)
    }

    /// Make a prepared edit the current one, replacing any edit in progress.
    pub fn host(&mut self, edit: EditOperation) -> &mut EditOperation {
        if let Some(previous) = &self.active {
            log::debug!("Discarding unconfirmed {} edit", previous.kind());
        }
        log::debug!("Starting {} edit of {}", edit.kind(), self.source.path().display());
        self.active.insert(edit)
    }

    pub fn active(&self) -> Option<&EditOperation> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut EditOperation> {
        self.active.as_mut()
    }

    /// Arguments the current edit would run with, without confirming it.
    pub fn preview(&self, output: &Path) -> Option<ArgumentList> {
        self.active
            .as_ref()
            .map(|edit| edit.synthesize(self.source.path(), output))
    }

    /// Drop the current edit, returning its kind.
    pub fn cancel(&mut self) -> Option<EditKind> {
        let kind = self.active.take().map(|edit| edit.kind());
        if let Some(kind) = kind {
            log::debug!("Cancelled {} edit", kind);
        }
        kind
    }

    /// Consume the current edit and run it.
    ///
    /// Blocks until the transcoder reports back. The edit is gone
    /// afterwards whether the run succeeded or not.
    pub fn confirm(
        &mut self,
        output: &Path,
        transcoder: &mut dyn Transcoder,
    ) -> Result<Outcome, SessionError> {
        let edit = self.active.take().ok_or(SessionError::NoActiveEdit)?;
        let args = edit.synthesize(self.source.path(), output);

        log::info!("Confirmed {} edit -> {}", edit.kind(), output.display());
        let outcome = transcoder.run(&args);
        match &outcome {
            Outcome::Success => log::info!("{} edit written to {}", edit.kind(), output.display()),
            Outcome::Failure(message) => log::error!("{} edit failed: {}", edit.kind(), message),
        }
        Ok(outcome)
    }
}
