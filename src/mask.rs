use ndarray::{Array2, Array3, ArrayView2, ArrayView3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaskError {
    #[error("mask is {mask_h}x{mask_w} but frame is {frame_h}x{frame_w}")]
    ShapeMismatch {
        frame_h: usize,
        frame_w: usize,
        mask_h: usize,
        mask_w: usize,
    },
}

/// Count of object pixels in a binary mask
pub fn mask_area(mask: &ArrayView2<u8>) -> usize {
    mask.iter().filter(|&&p| p != 0).count()
}

/// Threshold a soft mask to binary (1 where `value >= threshold`)
pub fn binarize(mask: &ArrayView2<f32>, threshold: f32) -> Array2<u8> {
    mask.map(|&v| u8::from(v >= threshold))
}

/// Zero every frame pixel outside the mask
///
/// # Arguments
/// * `frame` - Source frame as HWC `ArrayView3<u8>`
/// * `mask` - Binary mask on the same pixel grid as the frame
///
/// # Returns
/// * The masked copy of the frame, or `MaskError::ShapeMismatch` when the
///   mask and frame do not share height and width
pub fn apply_mask(
    frame: &ArrayView3<u8>,
    mask: &ArrayView2<u8>,
) -> Result<Array3<u8>, MaskError> {
    let (frame_h, frame_w, channels) = frame.dim();
    let (mask_h, mask_w) = mask.dim();

    if (frame_h, frame_w) != (mask_h, mask_w) {
        return Err(MaskError::ShapeMismatch {
            frame_h,
            frame_w,
            mask_h,
            mask_w,
        });
    }

    let mut masked = Array3::<u8>::zeros((frame_h, frame_w, channels));

    for y in 0..frame_h {
        for x in 0..frame_w {
            if mask[[y, x]] != 0 {
                for c in 0..channels {
                    masked[[y, x, c]] = frame[[y, x, c]];
                }
            }
        }
    }

    Ok(masked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_area_counts_nonzero() {
        let mut mask = Array2::<u8>::zeros((4, 4));
        mask[[0, 0]] = 1;
        mask[[1, 2]] = 255;
        assert_eq!(mask_area(&mask.view()), 2);
    }

    #[test]
    fn test_binarize_threshold() {
        let soft =
            Array2::from_shape_vec((1, 4), vec![0.1f32, 0.5, 0.49, 0.9]).unwrap();
        let mask = binarize(&soft.view(), 0.5);
        assert_eq!(mask.as_slice().unwrap(), &[0, 1, 0, 1]);
    }

    #[test]
    fn test_apply_mask_zeroes_outside() {
        let frame = Array3::from_elem((2, 2, 3), 200u8);
        let mut mask = Array2::<u8>::zeros((2, 2));
        mask[[0, 1]] = 1;

        let masked = apply_mask(&frame.view(), &mask.view()).unwrap();

        assert_eq!(masked[[0, 1, 0]], 200);
        assert_eq!(masked[[0, 1, 2]], 200);
        assert_eq!(masked[[0, 0, 0]], 0);
        assert_eq!(masked[[1, 1, 1]], 0);
    }

    #[test]
    fn test_apply_mask_rejects_shape_mismatch() {
        let frame = Array3::<u8>::zeros((4, 4, 3));
        let mask = Array2::<u8>::zeros((2, 2));

        let err = apply_mask(&frame.view(), &mask.view()).unwrap_err();
        assert_eq!(
            err,
            MaskError::ShapeMismatch {
                frame_h: 4,
                frame_w: 4,
                mask_h: 2,
                mask_w: 2,
            }
        );
    }
}
