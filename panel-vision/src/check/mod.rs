pub mod annotate;
pub mod geometry;
pub mod regions;
pub mod spec;

use std::collections::BTreeMap;

use anyhow::bail;
use itertools::Itertools;
use opencv::{
    core::Mat,
    imgcodecs::{imread, imwrite_def, IMREAD_COLOR},
    prelude::*,
};

use crate::preprocess;
use annotate::{draw_reference_outline, mark_failure};
use geometry::within_tolerance;
use regions::{extract_regions, largest_region};
use spec::{validate_color_map, ColorSpec, FrameSize, HsvRange, PanelLayout, SpecError};

/// Checks a single color against its spec and annotates the draw frame.
/// Absence and mis-position are ordinary `false` outcomes, not errors; they
/// differ only in where the failure mark lands.
pub fn verify_color(img: &Mat, spec: &ColorSpec, mut draw: Mat) -> anyhow::Result<(bool, Mat)> {
    let contours = extract_regions(img, &spec.ranges)?;

    let Some(found) = largest_region(&contours)? else {
        draw_reference_outline(&mut draw, &spec.rect)?;
        mark_failure(&mut draw, spec.rect.bottom_left())?;
        return Ok((false, draw));
    };

    log::info!("{:?} - {:?}", spec.rect, found);
    draw_reference_outline(&mut draw, &spec.rect)?;
    if within_tolerance(&spec.rect, &found, &spec.scale) {
        Ok((true, draw))
    } else {
        mark_failure(&mut draw, found.bottom_left())?;
        Ok((false, draw))
    }
}

/// Verifies every color of the reference map against the photo at `img_path`
/// and returns the per-color 0/1 mapping plus the annotated frame.
///
/// The annotated frame is written back over the original file. Callers that
/// need the untouched photo must pass a copy's path.
pub fn check_panel(
    img_path: &str,
    size: &FrameSize,
    color_map: &BTreeMap<String, ColorSpec>,
) -> anyhow::Result<(BTreeMap<String, u8>, Mat)> {
    validate_color_map(color_map)?;

    let frame = read_frame(img_path)?;
    let frame = preprocess::resize_to_frame(&frame, size.w, size.h)?;
    let mut draw = frame.clone();

    let mut results = BTreeMap::new();
    for (color, spec) in color_map {
        log::info!("start check color: {color}");
        let (passed, next) = verify_color(&frame, spec, draw)?;
        draw = next;
        results.insert(color.clone(), passed as u8);
        log::info!("end check color: {color}");
    }

    log::info!(
        "{} result: {}",
        img_path,
        results
            .iter()
            .map(|(color, flag)| format!("{color}={flag}"))
            .join(", ")
    );
    imwrite_def(img_path, &draw)?;

    Ok((results, draw))
}

/// Measures where each color actually sits in a close-up photo of isolated
/// patches. The frame is cropped to the foreground before searching, so the
/// reported positions are relative to the crop.
///
/// The annotated crop is written back over the original file.
pub fn collect_layout(
    img_path: &str,
    color_map: &BTreeMap<String, Vec<HsvRange>>,
) -> anyhow::Result<(PanelLayout, Mat)> {
    for (color, ranges) in color_map {
        if ranges.is_empty() {
            return Err(SpecError::NoRanges {
                color: color.clone(),
            }
            .into());
        }
    }

    let frame = read_frame(img_path)?;
    let crop_rect = preprocess::cut_background(&frame)?;
    let frame = Mat::roi(&frame, crop_rect.to_cv())?.try_clone()?;
    let mut draw = frame.clone();

    let mut position = BTreeMap::new();
    for (color, ranges) in color_map {
        log::debug!("{color}: {ranges:?}");
        let contours = extract_regions(&frame, ranges)?;
        let found = largest_region(&contours)?;
        if let Some(rect) = &found {
            draw_reference_outline(&mut draw, rect)?;
        }
        position.insert(color.clone(), found);
    }

    let layout = PanelLayout {
        size: FrameSize {
            w: crop_rect.w,
            h: crop_rect.h,
        },
        position,
    };
    log::info!("{img_path} info: {layout:?}");
    imwrite_def(img_path, &draw)?;

    Ok((layout, draw))
}

fn read_frame(img_path: &str) -> anyhow::Result<Mat> {
    let frame = imread(img_path, IMREAD_COLOR)?;
    if frame.empty() {
        bail!("cannot read image at {img_path}");
    }

    Ok(frame)
}
