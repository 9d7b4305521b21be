use anyhow::bail;
use opencv::{
    core::{bitwise_or_def, in_range, Mat, Point, Size, Vector},
    imgproc::{
        bounding_rect, contour_area_def, cvt_color, find_contours_def,
        get_structuring_element_def, morphology_ex_def, threshold, CHAIN_APPROX_SIMPLE,
        COLOR_BGR2HSV, MORPH_CLOSE, MORPH_OPEN, MORPH_RECT, RETR_EXTERNAL, THRESH_BINARY,
        THRESH_OTSU,
    },
};

use super::geometry::BlockRect;
use super::spec::HsvRange;

const KERNEL_SIZE: i32 = 10;

/// External contours of every image region whose hsv values fall inside any
/// of the supplied ranges. An empty result means the color is simply not
/// there; it is not an error.
pub fn extract_regions(img: &Mat, ranges: &[HsvRange]) -> anyhow::Result<Vector<Vector<Point>>> {
    if ranges.is_empty() {
        bail!("no hsv ranges to match against");
    }

    let mut hsv = Mat::default();
    cvt_color(img, &mut hsv, COLOR_BGR2HSV, 0)?;

    let mask = union_mask(&hsv, ranges)?;

    let mut binary = Mat::default();
    threshold(&mask, &mut binary, 0.0, 255.0, THRESH_BINARY + THRESH_OTSU)?;

    // Open first so background speckle is gone before closing fills the
    // holes inside the target block.
    let kernel = get_structuring_element_def(MORPH_RECT, Size::new(KERNEL_SIZE, KERNEL_SIZE))?;
    let mut opened = Mat::default();
    morphology_ex_def(&binary, &mut opened, MORPH_OPEN, &kernel)?;
    let mut closed = Mat::default();
    morphology_ex_def(&opened, &mut closed, MORPH_CLOSE, &kernel)?;

    let mut contours: Vector<Vector<Point>> = Vector::new();
    find_contours_def(&closed, &mut contours, RETR_EXTERNAL, CHAIN_APPROX_SIMPLE)?;

    Ok(contours)
}

// A pixel matching any one of the ranges belongs to the color.
fn union_mask(hsv: &Mat, ranges: &[HsvRange]) -> anyhow::Result<Mat> {
    let mut mask = Mat::default();
    in_range(hsv, &ranges[0].0, &ranges[0].1, &mut mask)?;
    for range in &ranges[1..] {
        let mut next = Mat::default();
        in_range(hsv, &range.0, &range.1, &mut next)?;
        let mut merged = Mat::default();
        bitwise_or_def(&mask, &next, &mut merged)?;
        mask = merged;
    }

    Ok(mask)
}

/// Bounding rect of the region with the largest enclosed area, first-seen on
/// ties. Only the single largest block is considered; multiple legitimate
/// blocks of the same color are not reconciled.
pub fn largest_region(contours: &Vector<Vector<Point>>) -> anyhow::Result<Option<BlockRect>> {
    let mut best: Option<(f64, BlockRect)> = None;
    for contour in contours.iter() {
        let area = contour_area_def(&contour)?;
        if best.as_ref().map_or(true, |(top, _)| area > *top) {
            best = Some((area, bounding_rect(&contour)?.into()));
        }
    }

    Ok(best.map(|(_, rect)| rect))
}
