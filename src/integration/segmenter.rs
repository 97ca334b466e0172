//! Trait for frame segmentation collaborators.

use crate::tracker::FrameObservation;

/// A segmentation collaborator: anything that can turn an analyzed frame
/// into candidate entity observations. Background subtraction and external
/// instance-segmentation models both fit behind this trait.
///
/// Centers must be reported in the same coordinate space across frames; any
/// resizing has to be applied upstream.
///
/// # Example
///
/// ```ignore
/// use ethotrack::{ObservationSource, FrameObservation};
///
/// struct MySegmenter {
///     // Your background model or network here
/// }
///
/// impl ObservationSource for MySegmenter {
///     type Error = std::io::Error;
///
///     fn segment(&mut self, frame_index: usize) -> Result<Vec<FrameObservation>, Self::Error> {
///         // Detect candidate outlines and return them
///         Ok(vec![])
///     }
/// }
/// ```
pub trait ObservationSource {
    /// Error type for segmentation failures.
    type Error;

    /// Produce the candidate observations for one frame. An empty vector is
    /// a valid result (nothing detected), not an error.
    fn segment(&mut self, frame_index: usize) -> Result<Vec<FrameObservation>, Self::Error>;
}

/// Helper trait for converting segmenter-specific outputs into observations.
pub trait IntoObservations {
    fn into_observations(self) -> Vec<FrameObservation>;
}

impl IntoObservations for Vec<FrameObservation> {
    fn into_observations(self) -> Vec<FrameObservation> {
        self
    }
}
