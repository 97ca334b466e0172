//! Trait for behavior classification collaborators.

use crate::behavior::BehaviorEvent;
use crate::tracker::Track;

/// A classification collaborator: turns a track's trailing window at a given
/// frame into a behavior label and probability.
///
/// The pipeline only invokes this for frames where the track has a full
/// window of history, frame-index-aligned with the kinematics windows, so an
/// implementation may read `track.contour_history[frame_index - L + 1..=frame_index]`
/// without bounds concerns. Returning [`BehaviorEvent::na`] means no
/// behavior was recognized for that window.
pub trait BehaviorClassifier {
    fn classify(&mut self, track: &Track, frame_index: usize) -> BehaviorEvent;
}
