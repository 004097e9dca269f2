// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Signboard OCR dispatch over saved crops

use std::path::PathBuf;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use super::recognizer::TextRecognizer;
use crate::vision::vocabulary::is_sign_crop;

/// Crop file name → extracted text, in the order the crops were scanned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OcrResults {
    entries: Vec<(String, String)>,
}

impl OcrResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_name: impl Into<String>, text: impl Into<String>) {
        let file_name = file_name.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(k, _)| *k == file_name) {
            Some((_, existing)) => *existing = text,
            None => self.entries.push((file_name, text)),
        }
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == file_name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OcrResults {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut results = OcrResults::new();
        for (k, v) in iter {
            results.insert(k, v);
        }
        results
    }
}

impl Serialize for OcrResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (file_name, text) in &self.entries {
            map.serialize_entry(file_name, text)?;
        }
        map.end()
    }
}

/// Run OCR on every signboard or banner crop
///
/// Crops whose file name does not mark them as signs are skipped. A
/// recognizer failure on one crop records an empty string for it and the
/// scan continues.
pub async fn read_signboards(recognizer: &dyn TextRecognizer, crops: &[PathBuf]) -> OcrResults {
    let mut results = OcrResults::new();

    for crop in crops {
        let Some(file_name) = crop.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if !is_sign_crop(&file_name) {
            continue;
        }

        let text = match recognizer.recognize(crop).await {
            Ok(text) => text,
            Err(e) => {
                warn!("OCR failed on {} ({}): {:#}", file_name, recognizer.name(), e);
                String::new()
            }
        };
        debug!("Extracted text from {}: {:?}", file_name, text);
        results.insert(file_name, text);
    }

    results
}
