use ndarray::Array2;

/// Axis-aligned bounding box [x1, y1, x2, y2] in pixel coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width, clamped to zero when the corners are inverted
    #[inline]
    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    /// Height, clamped to zero when the corners are inverted
    #[inline]
    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    pub fn from_array(arr: &[f32; 4]) -> Self {
        Self {
            x1: arr[0],
            y1: arr[1],
            x2: arr[2],
            y2: arr[3],
        }
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

/// One detector/tracker output for a single frame
#[derive(Debug, Clone)]
pub struct Detection {
    /// Tracker-assigned identity, stable across frames while the tracker
    /// can re-associate the object. `None` for detections the tracker has
    /// not confirmed yet.
    pub track_id: Option<u32>,
    pub class_id: usize,
    pub confidence: f32,
    pub bbox: BBox,
    /// Binary segmentation mask on the frame's pixel grid, non-zero where
    /// the pixel belongs to the object
    pub mask: Array2<u8>,
}

/// Class index to label lookup, in detector output order
#[derive(Debug, Clone, Default)]
pub struct ClassNames(Vec<String>);

impl ClassNames {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn from_slice(names: &[&str]) -> Self {
        Self(names.iter().map(|s| s.to_string()).collect())
    }

    pub fn get(&self, class_id: usize) -> Option<&str> {
        self.0.get(class_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_area() {
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(bbox.area(), 100.0);
        assert_eq!(bbox.center(), (5.0, 5.0));
    }

    #[test]
    fn test_inverted_bbox_clamps_to_zero() {
        let bbox = BBox::new(10.0, 0.0, 5.0, 10.0);
        assert_eq!(bbox.width(), 0.0);
        assert_eq!(bbox.area(), 0.0);
    }

    #[test]
    fn test_bbox_array_roundtrip() {
        let bbox = BBox::from_array(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(bbox.to_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_class_names_lookup() {
        let names = ClassNames::from_slice(&["person", "chair"]);
        assert_eq!(names.get(1), Some("chair"));
        assert_eq!(names.get(7), None);
    }
}
