//! A single entity track: one stable identity, owning all of its
//! per-frame history arrays.

use crate::geometry::{Outline, Point};
use crate::tracker::observation::FrameObservation;
use crate::tracker::track_state::TrackState;

/// Sentinel center placed far outside any plausible frame coordinate once a
/// track is retired, so distance-based matching can never reach it.
pub(crate) fn out_of_frame() -> Point {
    Point::new(-1.0e6, -1.0e6)
}

/// A persistent identity representing one physical entity across frames.
///
/// The three history arrays always share one length, equal to the number of
/// frames analyzed so far; an absent slot means "no detection this frame".
#[derive(Debug, Clone)]
pub struct Track {
    /// Unique track identifier, never reused within a run
    pub id: u64,
    /// Current lifecycle state
    pub state: TrackState,
    /// Frame index at which the track was created
    pub registered_at_frame: usize,
    /// Consecutive frames without a match, reset on any successful match
    pub miss_streak: u32,
    /// Most recent non-absent center, used for matching while coasting
    pub last_seen_center: Point,
    /// One outline-or-absent slot per analyzed frame
    pub contour_history: Vec<Option<Outline>>,
    /// One center-or-absent slot per analyzed frame
    pub center_history: Vec<Option<Point>>,
    /// One long-axis-length-or-absent slot per analyzed frame
    pub height_history: Vec<Option<f32>>,
}

impl Track {
    /// Create a track from its first observation, back-padding every earlier
    /// frame with absent slots so histories stay frame-index aligned.
    pub fn register(id: u64, frame_index: usize, obs: FrameObservation) -> Self {
        let mut track = Self {
            id,
            state: TrackState::Active,
            registered_at_frame: frame_index,
            miss_streak: 0,
            last_seen_center: obs.center,
            contour_history: vec![None; frame_index],
            center_history: vec![None; frame_index],
            height_history: vec![None; frame_index],
        };
        track.push_observation(obs);
        track
    }

    /// Commit a matched observation for the current frame.
    pub fn observe(&mut self, obs: FrameObservation) {
        self.last_seen_center = obs.center;
        self.miss_streak = 0;
        self.state = TrackState::Active;
        self.push_observation(obs);
    }

    /// Record a miss within the grace period: histories get an absent slot,
    /// the last seen center stays reachable for re-matching.
    pub fn coast(&mut self) {
        self.miss_streak += 1;
        self.state = TrackState::Coasting;
        self.push_absent();
    }

    /// Record a miss beyond the grace period: the track is dead and its
    /// center becomes unreachable for all future matching.
    pub fn retire(&mut self) {
        self.miss_streak += 1;
        self.state = TrackState::Dead;
        self.last_seen_center = out_of_frame();
        self.push_absent();
    }

    /// Append an absent slot without touching the lifecycle state. Used to
    /// keep dead tracks frame-aligned until the end of the run.
    pub fn pad_absent(&mut self) {
        self.push_absent();
    }

    /// Number of frames with an actual detection.
    pub fn lifetime_hits(&self) -> usize {
        self.center_history.iter().filter(|c| c.is_some()).count()
    }

    /// Number of analyzed frames covered by the histories.
    pub fn len(&self) -> usize {
        self.center_history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.center_history.is_empty()
    }

    /// Trim histories to the run's final usable frame count.
    pub fn truncate(&mut self, len: usize) {
        self.contour_history.truncate(len);
        self.center_history.truncate(len);
        self.height_history.truncate(len);
    }

    fn push_observation(&mut self, obs: FrameObservation) {
        self.contour_history.push(Some(obs.outline));
        self.center_history.push(Some(obs.center));
        self.height_history.push(Some(obs.height));
    }

    fn push_absent(&mut self) {
        self.contour_history.push(None);
        self.center_history.push(None);
        self.height_history.push(None);
    }
}
