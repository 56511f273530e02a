// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: probing sources, job files and running the transcoder.

pub mod probe;
pub mod serialization;
pub mod transcoder;
