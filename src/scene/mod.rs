// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scene description: turns fused detector results into spoken sentences

pub mod compose;
pub mod grammar;

pub use compose::{compose_description, SceneInputs, NOTHING_AHEAD};
pub use grammar::{join_ahead, object_phrase, pluralize};
