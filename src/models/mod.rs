// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Source facts and the per-edit parameter models.

pub mod convert;
pub mod crop;
pub mod resize;
pub mod source;
pub mod trim;
