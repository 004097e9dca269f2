// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Class vocabularies shared by the detector, the specialists and the composer
//!
//! All entries are lower-case. Callers normalize class names before lookup.

/// Classes the open-vocabulary detector is prompted with
pub const DETECTOR_CLASSES: &[&str] = &[
    "chair",
    "table",
    "door",
    "Trash bin",
    "outdoor stairs",
    "man",
    "woman",
    "people",
    "elevator",
    "spiral staircase",
    "wooden stairs",
    "concrete stairs",
    "stairway",
    "stairs",
    "staircase",
    "white staircase",
    "white stairs",
    "sign board",
    "banner",
];

/// Stair-like classes; any of these triggers step-count dispatch
pub const STAIR_CLASSES: &[&str] = &[
    "outdoor stairs",
    "spiral staircase",
    "wooden stairs",
    "concrete stairs",
    "stairway",
    "stairs",
    "staircase",
    "white staircase",
    "white stairs",
];

/// Sign classes are OCR candidates and never enumerated as objects
pub const SIGN_CLASSES: &[&str] = &["sign board", "banner"];

/// Non-stair, non-sign classes worth keeping a crop of
const EXTRA_CROP_CLASSES: &[&str] = &["chair", "man", "woman", "trash bin"];

/// Substrings in a crop file name that mark it as a stair crop
pub const STAIR_FILENAME_MARKERS: &[&str] = &["stair", "staircase", "stairway", "ladder"];

/// Substrings in a crop file name that mark it as a signboard crop
pub const SIGN_FILENAME_MARKERS: &[&str] = &["sign_board", "banner"];

pub fn is_stair_class(class_name: &str) -> bool {
    STAIR_CLASSES.contains(&class_name)
}

pub fn is_sign_class(class_name: &str) -> bool {
    SIGN_CLASSES.contains(&class_name)
}

/// Whether a detection of this class gets its bounding box saved to disk
pub fn is_crop_class(class_name: &str) -> bool {
    is_stair_class(class_name) || is_sign_class(class_name) || EXTRA_CROP_CLASSES.contains(&class_name)
}

/// Whether a crop file name looks like a stair crop
pub fn is_stair_crop(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    STAIR_FILENAME_MARKERS.iter().any(|m| lower.contains(m))
}

/// Whether a crop file name looks like a signboard or banner crop
pub fn is_sign_crop(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    SIGN_FILENAME_MARKERS.iter().any(|m| lower.contains(m))
}
