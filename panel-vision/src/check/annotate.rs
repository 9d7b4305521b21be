use nalgebra::Vector2;
use opencv::{
    core::{Mat, Point, Scalar},
    imgproc::{put_text, rectangle, FONT_HERSHEY_SIMPLEX, LINE_8},
};

use super::geometry::BlockRect;

const OUTLINE_THICKNESS: i32 = 5;
const MARK_SCALE: f64 = 8.0;
const MARK_THICKNESS: i32 = 10;

/// Green outline at the expected block position, drawn whether or not the
/// check passed.
pub fn draw_reference_outline(img: &mut Mat, rect: &BlockRect) -> anyhow::Result<()> {
    rectangle(
        img,
        rect.to_cv(),
        Scalar::new(0.0, 255.0, 0.0, 0.0),
        OUTLINE_THICKNESS,
        LINE_8,
        0,
    )?;

    Ok(())
}

/// Large red "X" anchored at the bottom-left of the block under suspicion.
pub fn mark_failure(img: &mut Mat, anchor: Vector2<i32>) -> anyhow::Result<()> {
    put_text(
        img,
        "X",
        Point::new(anchor.x, anchor.y),
        FONT_HERSHEY_SIMPLEX,
        MARK_SCALE,
        Scalar::new(0.0, 0.0, 255.0, 0.0),
        MARK_THICKNESS,
        LINE_8,
        false,
    )?;

    Ok(())
}
