// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! vedit - Video EDIT parameter models and ffmpeg command synthesis
//!
//! The core turns user-chosen trim, crop, resize and convert parameters
//! into validated state and then into an exact, ordered ffmpeg argument
//! list. It also maps crop selections between a letterboxed display and
//! the source frame.

pub mod app;
pub mod cli;
pub mod command;
pub mod io;
pub mod models;
pub mod session;
pub mod util;
