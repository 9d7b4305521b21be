use std::collections::BTreeMap;

use crate::check::spec::HsvRange;

/// Hsv ranges for a color the panels are printed with. Red carries two
/// ranges to cover the hue wrap at 180.
pub fn builtin_ranges(name: &str) -> Option<Vec<HsvRange>> {
    let ranges = match name {
        "blue" => vec![HsvRange([100, 150, 50], [140, 255, 255])],
        "red" => vec![
            HsvRange([0, 120, 70], [10, 255, 255]),
            HsvRange([170, 120, 70], [180, 255, 255]),
        ],
        "yellow" => vec![HsvRange([20, 100, 100], [30, 255, 255])],
        "green" => vec![HsvRange([40, 80, 70], [80, 255, 255])],
        "orange" => vec![HsvRange([11, 120, 70], [19, 255, 255])],
        _ => return None,
    };

    Some(ranges)
}

/// The whole built-in catalog, keyed by color name.
pub fn all() -> BTreeMap<String, Vec<HsvRange>> {
    ["blue", "green", "orange", "red", "yellow"]
        .iter()
        .filter_map(|name| builtin_ranges(name).map(|ranges| (name.to_string(), ranges)))
        .collect()
}
