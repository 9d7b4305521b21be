use std::{collections::BTreeMap, fs, path::Path};

use panel_vision::{ColorSpec, FrameSize, HsvRange};
use serde::Deserialize;

/// Reference document for a panel check: the frame every rect is defined in,
/// plus the per-color specs.
///
/// ```json
/// {
///   "size": {"w": 1280, "h": 720},
///   "colors": {
///     "red": {
///       "ranges": [[[0, 120, 70], [10, 255, 255]], [[170, 120, 70], [180, 255, 255]]],
///       "rect": {"x": 100, "y": 80, "w": 200, "h": 150},
///       "scale": {"x": 0.05, "y": 0.05}
///     }
///   }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct ReferenceDoc {
    pub size: FrameSize,
    pub colors: BTreeMap<String, ColorSpec>,
}

pub fn load_reference(path: &Path) -> anyhow::Result<ReferenceDoc> {
    let raw = fs::read_to_string(path)?;

    Ok(serde_json::from_str(&raw)?)
}

/// Ranges file for layout collection: `{"red": [[[0, 120, 70], [10, 255, 255]]]}`.
pub fn load_ranges(path: &Path) -> anyhow::Result<BTreeMap<String, Vec<HsvRange>>> {
    let raw = fs::read_to_string(path)?;

    Ok(serde_json::from_str(&raw)?)
}
