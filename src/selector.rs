use ndarray::{Array3, ArrayView3};
use thiserror::Error;
use tracing::debug;

use crate::detection::{ClassNames, Detection};
use crate::mask::{MaskError, apply_mask};
use crate::observations::BestObservations;
use crate::quality::quality_score;

/// A decoded frame together with the tracker output for it
pub struct TrackedFrame {
    /// Frame pixels in HWC layout
    pub pixels: Array3<u8>,
    pub detections: Vec<Detection>,
}

/// Synchronous pull source of tracked frames
///
/// Implemented once per upstream detector/tracker pair. `Ok(None)` signals
/// end of stream; there is no other termination or cancellation path.
pub trait FrameSource {
    type Error;

    fn next_frame(&mut self) -> Result<Option<TrackedFrame>, Self::Error>;
}

/// Counters for one processed frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameReport {
    pub detections: usize,
    /// Observations that entered the table, by insert or replacement
    pub stored: usize,
    /// Detections dropped for lacking a track identity
    pub skipped_untracked: usize,
}

/// Counters for a whole video pass
#[derive(Debug, Clone, Copy, Default)]
pub struct PassReport {
    pub frames: usize,
    pub stored: usize,
}

#[derive(Debug, Error)]
pub enum PassError<E> {
    #[error("frame source failed: {0}")]
    Source(E),
    #[error(transparent)]
    Mask(#[from] MaskError),
}

/// Streaming selection loop over tracker output
///
/// Consumes frames strictly in arrival order and keeps, per track
/// identity, the single highest-scoring masked observation seen so far.
/// All state lives in the owned table; construction starts a pass from
/// empty and `into_observations` ends it.
pub struct ObservationSelector {
    names: ClassNames,
    best: BestObservations,
}

impl ObservationSelector {
    pub fn new(names: ClassNames) -> Self {
        Self {
            names,
            best: BestObservations::new(),
        }
    }

    /// Feed one frame of tracker output into the table
    ///
    /// Detections without a track identity are skipped entirely; an
    /// identity-less observation cannot be compared against later frames
    /// of the same object. For each remaining detection the masked crop is
    /// computed first, then the quality score, then the table is offered
    /// the observation.
    ///
    /// # Arguments
    /// * `frame` - Frame pixels as HWC `ArrayView3<u8>`
    /// * `detections` - Tracker output for this frame, in emission order
    pub fn process_frame(
        &mut self,
        frame: &ArrayView3<u8>,
        detections: &[Detection],
    ) -> Result<FrameReport, MaskError> {
        let mut report = FrameReport {
            detections: detections.len(),
            ..FrameReport::default()
        };

        for det in detections {
            let Some(track_id) = det.track_id else {
                report.skipped_untracked += 1;
                continue;
            };

            let masked = apply_mask(frame, &det.mask.view())?;
            let score = quality_score(det.confidence, &det.bbox, &det.mask.view());

            let label = match self.names.get(det.class_id) {
                Some(name) => name.to_string(),
                None => det.class_id.to_string(),
            };

            if self.best.update(track_id, &label, masked, score) {
                debug!("track {} new best {} (score {:.4})", track_id, label, score);
                report.stored += 1;
            }
        }

        Ok(report)
    }

    /// Drain a frame source to exhaustion
    pub fn run<S: FrameSource>(
        &mut self,
        source: &mut S,
    ) -> Result<PassReport, PassError<S::Error>> {
        let mut pass = PassReport::default();

        while let Some(frame) = source.next_frame().map_err(PassError::Source)? {
            let report = self.process_frame(&frame.pixels.view(), &frame.detections)?;
            pass.frames += 1;
            pass.stored += report.stored;
        }

        Ok(pass)
    }

    /// Current best observations, readable at any point of the pass
    pub fn observations(&self) -> &BestObservations {
        &self.best
    }

    pub fn into_observations(self) -> BestObservations {
        self.best
    }
}
