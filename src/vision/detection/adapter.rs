// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detector adapter: turns either detector output shape into one count map

use tracing::debug;

use super::types::{ClassCount, DetectionsView, ObjectCountMap, RawDetections};

/// Adapter output: the count map used downstream plus the API echo view
#[derive(Debug, Clone, Default)]
pub struct NormalizedDetections {
    pub counts: ObjectCountMap,
    pub view: DetectionsView,
}

/// Normalize raw detector output
///
/// Count mappings are lower-cased key by key with values untouched and also
/// rendered as a `{class, count}` list. Keys that collide once lower-cased
/// keep the later value. Record lists are counted per
/// lower-cased class; records without a class are skipped. Unrecognized shapes
/// produce an empty map. Never fails.
pub fn normalize(raw: RawDetections) -> NormalizedDetections {
    match raw {
        RawDetections::Counts(counts) => {
            let mut map = ObjectCountMap::new();
            for (class_name, count) in counts.iter() {
                map.insert(class_name, count);
            }
            let view = counts
                .0
                .into_iter()
                .map(|(class_name, count)| ClassCount { class_name, count })
                .collect();
            NormalizedDetections {
                counts: map,
                view: DetectionsView::Counts(view),
            }
        }
        RawDetections::Records(records) => {
            let map: ObjectCountMap = records
                .iter()
                .filter_map(|r| r.class_name.as_deref())
                .map(|class_name| (class_name, 1))
                .collect();
            NormalizedDetections {
                counts: map,
                view: DetectionsView::Records(records),
            }
        }
        RawDetections::Unrecognized(value) => {
            debug!("Ignoring unrecognized detector output: {}", value);
            NormalizedDetections::default()
        }
    }
}
