// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection data types shared by the detector client, the adapter and the API

use std::fmt;
use std::path::PathBuf;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Axis-aligned box in source-image pixel coordinates
///
/// Travels on the wire as `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl From<[f32; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [f32; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// A single detection as reported by the detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Class label; records without one are ignored when counting
    #[serde(rename = "class", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub confidence: f32,
    #[serde(rename = "bbox", default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl DetectionRecord {
    pub fn new(class_name: &str, confidence: f32, bounding_box: Option<BoundingBox>) -> Self {
        Self {
            class_name: Some(class_name.to_string()),
            confidence,
            bounding_box,
        }
    }
}

/// Class → count pairs in the order the detector reported them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassCounts(pub Vec<(String, u32)>);

impl ClassCounts {
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Serialize for ClassCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (class_name, count) in &self.0 {
            map.serialize_entry(class_name, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ClassCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = ClassCounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of class name to count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((class_name, count)) = access.next_entry::<String, u32>()? {
                    entries.push((class_name, count));
                }
                Ok(ClassCounts(entries))
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

/// Raw detector output, resolved once at the system boundary
///
/// The detector either aggregates for us (`Counts`) or reports every box
/// (`Records`). Anything else is kept verbatim and treated as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDetections {
    Counts(ClassCounts),
    Records(Vec<DetectionRecord>),
    Unrecognized(serde_json::Value),
}

impl Default for RawDetections {
    fn default() -> Self {
        RawDetections::Records(Vec::new())
    }
}

/// Lower-cased class name → occurrence count
///
/// Built once per request by the adapter. Iteration follows first-seen order
/// so the rendered description is stable for a given detector output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectCountMap {
    entries: Vec<(String, u32)>,
}

impl ObjectCountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `class_name`, lower-casing it first
    pub(crate) fn add(&mut self, class_name: &str, count: u32) {
        let key = class_name.to_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing += count,
            None => self.entries.push((key, count)),
        }
    }

    /// Set the count for a class, replacing any case-variant already present
    pub(crate) fn insert(&mut self, class_name: &str, count: u32) {
        let key = class_name.to_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = count,
            None => self.entries.push((key, count)),
        }
    }

    pub fn get(&self, class_name: &str) -> Option<u32> {
        let key = class_name.to_lowercase();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.get(class_name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, u32)> for ObjectCountMap {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut map = ObjectCountMap::new();
        for (class_name, count) in iter {
            map.add(class_name.as_ref(), count);
        }
        map
    }
}

impl Serialize for ObjectCountMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (class_name, count) in &self.entries {
            map.serialize_entry(class_name, count)?;
        }
        map.end()
    }
}

/// One row of the list view built from a count mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassCount {
    #[serde(rename = "class")]
    pub class_name: String,
    pub count: u32,
}

/// Detections as echoed back to the API caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetectionsView {
    Counts(Vec<ClassCount>),
    Records(Vec<DetectionRecord>),
}

impl Default for DetectionsView {
    fn default() -> Self {
        DetectionsView::Records(Vec::new())
    }
}

/// A bounding-box crop saved to disk for the specialists
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBoxCrop {
    pub path: PathBuf,
    /// Source class as reported by the detector
    pub class_name: String,
    /// Unix millis at save time; only used to keep file names unique
    pub timestamp_ms: i64,
}

impl BoundingBoxCrop {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// What the detector collaborator hands back for one frame
#[derive(Debug, Clone, Default)]
pub struct DetectorOutput {
    pub raw: RawDetections,
    pub crops: Vec<BoundingBoxCrop>,
}
