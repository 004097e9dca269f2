// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scene description composer
//!
//! Fuses detector counts, step-count results and signboard text into the
//! sentence sequence that gets spoken to the user. Output order is fixed:
//! stairs, then objects, then signboards.

use super::grammar::{capitalize, join_ahead, object_phrase};
use crate::vision::detection::ObjectCountMap;
use crate::vision::ocr::OcrResults;
use crate::vision::stepcount::StepCountSummary;
use crate::vision::vocabulary::is_sign_class;

/// Spoken when no stage produced anything
pub const NOTHING_AHEAD: &str = "Nothing relevant ahead.";

/// Everything the composer reads for one frame
#[derive(Debug, Clone, Copy)]
pub struct SceneInputs<'a> {
    pub counts: &'a ObjectCountMap,
    pub steps: Option<&'a StepCountSummary>,
    pub ocr: &'a OcrResults,
}

/// "<Type> with <N> steps ahead." for each stair result
pub fn stair_sentences(steps: Option<&StepCountSummary>) -> Vec<String> {
    let Some(summary) = steps.filter(|s| s.is_success()) else {
        return Vec::new();
    };

    summary
        .results
        .iter()
        .map(|stair| format!("{} with {} steps ahead.", capitalize(&stair.stair_type), stair.step_count))
        .collect()
}

/// Enumeration of non-sign objects, or `None` when there are none
pub fn object_sentence(counts: &ObjectCountMap) -> Option<String> {
    let phrases: Vec<String> = counts
        .iter()
        .filter(|(class_name, _)| !is_sign_class(class_name))
        .map(|(class_name, count)| object_phrase(class_name, count))
        .collect();

    join_ahead(&phrases)
}

/// "Signboard reads '<text>'." for each crop with non-blank text
pub fn signboard_sentences(ocr: &OcrResults) -> Vec<String> {
    ocr.iter()
        .map(|(_, text)| text.trim())
        .filter(|text| !text.is_empty())
        .map(|text| format!("Signboard reads '{}'.", text))
        .collect()
}

/// Compose the full scene description
///
/// Never fails: with no stair, object or sign sentence the result is
/// [`NOTHING_AHEAD`].
pub fn compose_description(inputs: SceneInputs<'_>) -> String {
    let mut parts = stair_sentences(inputs.steps);
    parts.extend(object_sentence(inputs.counts));
    parts.extend(signboard_sentences(inputs.ocr));

    if parts.is_empty() {
        NOTHING_AHEAD.to_string()
    } else {
        parts.join(" ")
    }
}
