// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Box outlines for annotated step-count images

use image::{Rgb, RgbImage};

use crate::vision::detection::BoundingBox;

/// Outline colour for counted steps
pub const STEP_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Outline thickness in pixels
pub const STEP_THICKNESS: u32 = 2;

/// Draw a hollow rectangle, clipped to the image
pub fn draw_box(image: &mut RgbImage, bbox: &BoundingBox, color: Rgb<u8>, thickness: u32) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let clip = |v: f32, max: u32| -> u32 {
        if v.is_nan() || v <= 0.0 {
            0
        } else {
            (v as u32).min(max - 1)
        }
    };
    let x1 = clip(bbox.x1, width);
    let y1 = clip(bbox.y1, height);
    let x2 = clip(bbox.x2, width);
    let y2 = clip(bbox.y2, height);
    if x2 < x1 || y2 < y1 {
        return;
    }

    for t in 0..thickness {
        let top = (y1 + t).min(y2);
        let bottom = y2.saturating_sub(t).max(y1);
        let left = (x1 + t).min(x2);
        let right = x2.saturating_sub(t).max(x1);

        for x in x1..=x2 {
            image.put_pixel(x, top, color);
            image.put_pixel(x, bottom, color);
        }
        for y in y1..=y2 {
            image.put_pixel(left, y, color);
            image.put_pixel(right, y, color);
        }
    }
}
