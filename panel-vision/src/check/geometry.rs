use nalgebra::Vector2;
use opencv::core::Rect;
use serde::{Deserialize, Serialize};

/// Axis-aligned block position in frame pixels, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl BlockRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn bottom_left(&self) -> Vector2<i32> {
        Vector2::new(self.x, self.y + self.h)
    }

    pub fn to_cv(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

impl From<Rect> for BlockRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            w: rect.width,
            h: rect.height,
        }
    }
}

/// Maximum allowed relative deviation per axis, as a fraction of the
/// reference block's own width/height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub x: f64,
    pub y: f64,
}

/// Position and size comparison between the expected block and a detected one.
/// Every deviation is normalized by the reference dimensions, and the
/// comparison is strict: a deviation exactly at the tolerance fraction fails.
/// The reference block must have positive width and height.
pub fn within_tolerance(std_rect: &BlockRect, found: &BlockRect, scale: &Tolerance) -> bool {
    let w = std_rect.w as f64;
    let h = std_rect.h as f64;

    ((std_rect.x - found.x).abs() as f64) / w < scale.x
        && ((std_rect.y - found.y).abs() as f64) / h < scale.y
        && ((std_rect.w - found.w).abs() as f64) / w < scale.x
        && ((std_rect.h - found.h).abs() as f64) / h < scale.y
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALE: Tolerance = Tolerance { x: 0.05, y: 0.05 };

    #[test]
    fn zero_deviation_passes() {
        let rect = BlockRect::new(10, 10, 100, 100);
        assert!(within_tolerance(&rect, &rect, &SCALE));
    }

    #[test]
    fn offset_below_tolerance_passes() {
        let std_rect = BlockRect::new(10, 10, 100, 100);
        assert!(within_tolerance(&std_rect, &BlockRect::new(14, 10, 100, 100), &SCALE));
    }

    #[test]
    fn offset_at_exact_tolerance_fails() {
        let std_rect = BlockRect::new(10, 10, 100, 100);
        // |10 - 15| / 100 == 0.05, which the strict comparison rejects
        assert!(!within_tolerance(&std_rect, &BlockRect::new(15, 10, 100, 100), &SCALE));
    }

    #[test]
    fn offset_beyond_tolerance_fails() {
        let std_rect = BlockRect::new(10, 10, 100, 100);
        assert!(!within_tolerance(&std_rect, &BlockRect::new(16, 10, 100, 100), &SCALE));
    }

    #[test]
    fn size_deviation_normalized_by_reference() {
        let std_rect = BlockRect::new(10, 10, 100, 100);
        assert!(within_tolerance(&std_rect, &BlockRect::new(10, 10, 104, 100), &SCALE));
        assert!(!within_tolerance(&std_rect, &BlockRect::new(10, 10, 90, 100), &SCALE));
    }

    #[test]
    fn axes_checked_independently() {
        let std_rect = BlockRect::new(10, 10, 100, 50);
        let scale = Tolerance { x: 0.5, y: 0.05 };
        // 40/100 = 0.4 horizontal deviation is fine under x = 0.5
        assert!(within_tolerance(&std_rect, &BlockRect::new(50, 10, 100, 50), &scale));
        // 4/50 = 0.08 vertical deviation breaks y = 0.05
        assert!(!within_tolerance(&std_rect, &BlockRect::new(10, 14, 100, 50), &scale));
    }
}
