use ndarray::ArrayView2;

use crate::detection::BBox;
use crate::mask::mask_area;

/// Ratio of mask pixels to bounding-box area
///
/// Zero when the box has zero width or height, so a point detection never
/// divides by zero.
pub fn area_ratio(bbox: &BBox, mask_pixels: usize) -> f32 {
    let box_area = bbox.area();

    if box_area > 0.0 {
        mask_pixels as f32 / box_area
    } else {
        0.0
    }
}

/// Composite quality of one detection
///
/// # Arguments
/// * `confidence` - Detector confidence, conventionally in [0, 1]; not
///   re-validated here
/// * `bbox` - Detection bounding box in pixel coordinates
/// * `mask` - Binary segmentation mask for the detection
///
/// # Returns
/// * `confidence * area_ratio`. A mask that fills its box tightly at high
///   confidence scores near the confidence itself; a sparse mask relative
///   to its box (occlusion, segmentation noise) is penalized.
pub fn quality_score(confidence: f32, bbox: &BBox, mask: &ArrayView2<u8>) -> f32 {
    confidence * area_ratio(bbox, mask_area(mask))
}
