pub mod colmap;
pub mod detection;
pub mod frames;
pub mod mask;
pub mod observations;
pub mod openmvs;
pub mod process;
pub mod quality;
pub mod selector;

pub use colmap::{CameraConfig, ColmapProject};
pub use detection::{BBox, ClassNames, Detection};
pub use frames::FrameExtractor;
pub use mask::{MaskError, apply_mask, binarize, mask_area};
pub use observations::{BestObservations, Observation};
pub use openmvs::OpenMvsProject;
pub use process::ToolError;
pub use quality::{area_ratio, quality_score};
pub use selector::{
    FrameReport, FrameSource, ObservationSelector, PassError, PassReport, TrackedFrame,
};
