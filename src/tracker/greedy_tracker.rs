//! Main per-frame tracking algorithm.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::geometry::Point;
use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::observation::{FrameObservation, GroupingPolicy, pool_observations};
use crate::tracker::track::Track;
use crate::tracker::track_state::TrackState;

/// Configuration for the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Consecutive misses a track survives before it is retired. Typically
    /// about twice the source frame rate.
    pub grace_period_frames: u32,
    /// Matching cap: `None` means always match to the nearest observation,
    /// `Some(d)` rejects pairs at distance `d` or more. A useful finite cap
    /// is about `2 * sqrt(typical_entity_area)`.
    pub max_match_distance: Option<f32>,
    /// One track per entity, or one pooled track for the whole frame.
    pub grouping: GroupingPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            grace_period_frames: 60,
            max_match_distance: None,
            grouping: GroupingPolicy::PerEntity,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(d) = self.max_match_distance {
            if !(d > 0.0 && d.is_finite()) {
                return Err(ConfigError::InvalidMatchDistance(d));
            }
        }
        Ok(())
    }
}

/// Maintains a stable set of track identities over a sequence of frames.
///
/// Each call to [`Tracker::update`] greedily matches live tracks to the
/// frame's observations by center distance, registers unmatched observations
/// as new tracks, and retires tracks unmatched beyond the grace period.
pub struct Tracker {
    live_tracks: BTreeMap<u64, Track>,
    next_id: u64,
    frames_processed: usize,
    config: TrackerConfig,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            live_tracks: BTreeMap::new(),
            next_id: 1,
            frames_processed: 0,
            config,
        })
    }

    /// Process one frame's observations. `frame_index` must advance by one
    /// per call, starting at 0.
    pub fn update(&mut self, frame_index: usize, observations: Vec<FrameObservation>) {
        let observations = match self.config.grouping {
            GroupingPolicy::PerEntity => observations,
            GroupingPolicy::Pooled => pool_observations(observations),
        };

        // Candidate rows: live tracks in ascending id order. Dead tracks are
        // excluded outright; their sentinel center already makes them
        // unreachable under any finite cap, and exclusion keeps the
        // never-rematch invariant under an infinite one.
        let row_ids: Vec<u64> = self
            .live_tracks
            .iter()
            .filter(|(_, t)| t.state != TrackState::Dead)
            .map(|(&id, _)| id)
            .collect();
        let track_centers: Vec<Point> = row_ids
            .iter()
            .map(|id| self.live_tracks[id].last_seen_center)
            .collect();
        let obs_centers: Vec<Point> = observations.iter().map(|o| o.center).collect();

        let dists = matching::center_distance_matrix(&track_centers, &obs_centers);
        let AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_observations,
        } = matching::greedy_assignment(&dists, self.config.max_match_distance);

        let mut slots: Vec<Option<FrameObservation>> =
            observations.into_iter().map(Some).collect();

        for (row, col) in matches {
            if let (Some(track), Some(obs)) =
                (self.live_tracks.get_mut(&row_ids[row]), slots[col].take())
            {
                track.observe(obs);
            }
        }

        for row in unmatched_tracks {
            if let Some(track) = self.live_tracks.get_mut(&row_ids[row]) {
                if track.miss_streak < self.config.grace_period_frames {
                    track.coast();
                } else {
                    debug!(track_id = track.id, frame_index, "retiring track");
                    track.retire();
                }
            }
        }

        // Dead tracks stay frame-aligned until the end of the run.
        for track in self.live_tracks.values_mut() {
            if track.state == TrackState::Dead && track.len() <= frame_index {
                track.pad_absent();
            }
        }

        for col in unmatched_observations {
            if let Some(obs) = slots[col].take() {
                let id = self.next_id;
                self.next_id += 1;
                debug!(track_id = id, frame_index, "registered new track");
                self.live_tracks
                    .insert(id, Track::register(id, frame_index, obs));
            }
        }

        self.frames_processed = self.frames_processed.max(frame_index + 1);
    }

    /// End of acquisition: trim every history to the final usable frame
    /// count and prune spurious short-lived tracks, keeping the
    /// `expected_entities` longest-lived ones (at least one).
    pub fn finish(self, expected_entities: usize) -> Vec<Track> {
        let final_len = self.frames_processed;
        let mut tracks: Vec<Track> = self.live_tracks.into_values().collect();
        for track in &mut tracks {
            track.truncate(final_len);
        }

        let keep = expected_entities.max(1);
        if tracks.len() > keep {
            info!(
                created = tracks.len(),
                kept = keep,
                "pruning spurious tracks"
            );
            tracks.sort_by(|a, b| {
                b.lifetime_hits()
                    .cmp(&a.lifetime_hits())
                    .then(a.id.cmp(&b.id))
            });
            tracks.truncate(keep);
        }
        tracks.sort_by_key(|t| t.id);
        tracks
    }

    /// Number of frames processed so far.
    pub fn frames_processed(&self) -> usize {
        self.frames_processed
    }

    /// All tracks, including coasting and dead ones, in id order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.live_tracks.values()
    }

    pub fn track(&self, id: u64) -> Option<&Track> {
        self.live_tracks.get(&id)
    }
}
