use opencv::{
    core::{find_non_zero, Mat, Point, Size, Vector},
    imgproc::{
        bounding_rect, cvt_color_def, resize, threshold, COLOR_BGR2GRAY, INTER_LINEAR,
        THRESH_BINARY_INV, THRESH_OTSU,
    },
    prelude::*,
};

use crate::check::geometry::BlockRect;

/// Exact resize to the fixed coordinate frame the reference rects live in.
pub fn resize_to_frame(img: &Mat, width: i32, height: i32) -> anyhow::Result<Mat> {
    let mut out = Mat::default();
    resize(img, &mut out, Size::new(width, height), 0.0, 0.0, INTER_LINEAR)?;

    Ok(out)
}

/// Bounding box of the foreground against a uniform light background.
/// A frame with no foreground at all maps to the full frame.
pub fn cut_background(img: &Mat) -> anyhow::Result<BlockRect> {
    let mut gray = Mat::default();
    cvt_color_def(img, &mut gray, COLOR_BGR2GRAY)?;

    // Inverse threshold: the light background drops to zero, the panel stays.
    let mut binary = Mat::default();
    threshold(&gray, &mut binary, 0.0, 255.0, THRESH_BINARY_INV + THRESH_OTSU)?;

    let mut foreground: Vector<Point> = Vector::new();
    find_non_zero(&binary, &mut foreground)?;
    if foreground.is_empty() {
        return Ok(BlockRect::new(0, 0, img.cols(), img.rows()));
    }

    Ok(bounding_rect(&foreground)?.into())
}
