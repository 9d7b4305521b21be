use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::{BlockRect, Tolerance};

/// Inclusive lower/upper bounds in OpenCV HSV space (H 0-179, S/V 0-255).
/// Serialized as a `[lower, upper]` pair of triplets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange(pub [i32; 3], pub [i32; 3]);

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("color {color}: reference rect {w}x{h} must have positive width and height")]
    EmptyRect { color: String, w: i32, h: i32 },
    #[error("color {color}: tolerance scale ({x}, {y}) must lie in (0, 1]")]
    BadScale { color: String, x: f64, y: f64 },
    #[error("color {color}: no hsv ranges supplied")]
    NoRanges { color: String },
}

/// One entry of the reference map: which hsv ranges make up the color, where
/// the block is expected, and how far off it is allowed to be.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorSpec {
    pub ranges: Vec<HsvRange>,
    pub rect: BlockRect,
    pub scale: Tolerance,
}

impl ColorSpec {
    pub fn validate(&self, color: &str) -> Result<(), SpecError> {
        if self.ranges.is_empty() {
            return Err(SpecError::NoRanges {
                color: color.to_string(),
            });
        }
        if self.rect.w <= 0 || self.rect.h <= 0 {
            return Err(SpecError::EmptyRect {
                color: color.to_string(),
                w: self.rect.w,
                h: self.rect.h,
            });
        }
        let scale_ok = |s: f64| s > 0.0 && s <= 1.0;
        if !scale_ok(self.scale.x) || !scale_ok(self.scale.y) {
            return Err(SpecError::BadScale {
                color: color.to_string(),
                x: self.scale.x,
                y: self.scale.y,
            });
        }

        Ok(())
    }
}

/// Checks every entry before any image work happens. One malformed entry
/// rejects the whole map.
pub fn validate_color_map(color_map: &BTreeMap<String, ColorSpec>) -> Result<(), SpecError> {
    for (color, spec) in color_map {
        spec.validate(color)?;
    }

    Ok(())
}

/// Pixel dimensions of the frame the reference rects are defined in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub w: i32,
    pub h: i32,
}

/// Measured block positions of an already-isolated patch image. `None` means
/// the color was not found anywhere in the crop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelLayout {
    pub size: FrameSize,
    pub position: BTreeMap<String, Option<BlockRect>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ColorSpec {
        ColorSpec {
            ranges: vec![HsvRange([100, 150, 50], [140, 255, 255])],
            rect: BlockRect::new(10, 10, 100, 100),
            scale: Tolerance { x: 0.05, y: 0.05 },
        }
    }

    #[test]
    fn valid_spec_passes() {
        assert!(spec().validate("blue").is_ok());
    }

    #[test]
    fn zero_height_rect_rejected() {
        let mut bad = spec();
        bad.rect.h = 0;
        assert!(matches!(
            bad.validate("blue"),
            Err(SpecError::EmptyRect { .. })
        ));
    }

    #[test]
    fn out_of_band_scale_rejected() {
        let mut bad = spec();
        bad.scale.x = 0.0;
        assert!(matches!(
            bad.validate("blue"),
            Err(SpecError::BadScale { .. })
        ));

        let mut bad = spec();
        bad.scale.y = 1.5;
        assert!(matches!(
            bad.validate("blue"),
            Err(SpecError::BadScale { .. })
        ));
    }

    #[test]
    fn empty_range_list_rejected() {
        let mut bad = spec();
        bad.ranges.clear();
        assert!(matches!(bad.validate("blue"), Err(SpecError::NoRanges { .. })));
    }

    #[test]
    fn map_validation_names_offending_color() {
        let mut map = BTreeMap::new();
        map.insert("blue".to_string(), spec());
        let mut bad = spec();
        bad.rect.w = 0;
        map.insert("red".to_string(), bad);

        let err = validate_color_map(&map).unwrap_err();
        assert!(err.to_string().contains("red"));
    }

    #[test]
    fn reference_entry_round_trips_from_json() {
        let raw = r#"{
            "ranges": [[[0, 120, 70], [10, 255, 255]], [[170, 120, 70], [180, 255, 255]]],
            "rect": {"x": 5, "y": 8, "w": 40, "h": 30},
            "scale": {"x": 0.1, "y": 0.2}
        }"#;
        let parsed: ColorSpec = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.ranges.len(), 2);
        assert_eq!(parsed.ranges[1].0, [170, 120, 70]);
        assert_eq!(parsed.rect, BlockRect::new(5, 8, 40, 30));
        assert!(parsed.validate("red").is_ok());
    }
}
