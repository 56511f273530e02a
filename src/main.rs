// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! vedit - Video EDIT command line
//!
//! Builds validated ffmpeg commands for trimming, cropping, resizing and
//! converting videos, and runs them.

use anyhow::Result;
use clap::Parser;
use vedit::app::EditorApp;
use vedit::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides the -v level
    let level = match args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let app = EditorApp::new(&args);
    app.run(args.command)
}
