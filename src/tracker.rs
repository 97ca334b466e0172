mod greedy_tracker;
mod matching;
mod observation;
mod track;
mod track_state;

pub use greedy_tracker::{Tracker, TrackerConfig};
pub use matching::{AssignmentResult, center_distance_matrix, greedy_assignment};
pub use observation::{FrameObservation, GroupingPolicy, pool_observations};
pub use track::Track;
pub use track_state::TrackState;
