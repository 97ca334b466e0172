//! Aggregation of externally classified behavior events into per-behavior
//! count, duration and latency statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One frame's classification for one track, as supplied by the external
/// classifier. `label = None` is the "NA" sentinel: no behavior recognized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorEvent {
    pub frame_index: usize,
    pub label: Option<String>,
    /// Classifier confidence in [0, 1]
    pub probability: f32,
}

impl BehaviorEvent {
    pub fn labeled(frame_index: usize, label: impl Into<String>, probability: f32) -> Self {
        Self {
            frame_index,
            label: Some(label.into()),
            probability,
        }
    }

    pub fn na(frame_index: usize) -> Self {
        Self {
            frame_index,
            label: None,
            probability: 0.0,
        }
    }
}

/// Per-behavior statistics for one track.
///
/// `duration` and `latency` are `None` when the behavior never occurred;
/// an observed behavior always yields a numeric duration of at least one
/// window's worth of time. The distinction between "never occurred" and
/// "occurred but measured near zero" is deliberate and must survive export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSummary {
    pub track_id: u64,
    pub label: String,
    /// Number of maximal runs of identical consecutive labels
    pub count: usize,
    /// Total labeled time in seconds, plus one trailing window
    pub duration: Option<f64>,
    /// Time of the first occurrence in seconds
    pub latency: Option<f64>,
}

/// Folds a per-frame event stream into [`BehaviorSummary`] rows.
///
/// Each labeled frame contributes `1/fps` of duration; because a label
/// classifies the whole trailing window rather than the single frame, one
/// extra `window_length/fps` is added once per observed behavior.
pub struct BehaviorAggregator {
    frame_rate: f64,
    window_length: usize,
}

impl BehaviorAggregator {
    pub fn new(window_length: usize, frame_rate: f64) -> Result<Self, ConfigError> {
        if window_length == 0 {
            return Err(ConfigError::ZeroWindowLength);
        }
        if !(frame_rate > 0.0) {
            return Err(ConfigError::NonPositiveFrameRate(frame_rate));
        }
        Ok(Self {
            frame_rate,
            window_length,
        })
    }

    /// Summarize one track's event stream. Events must be in frame order.
    /// Returns one row per distinct label, sorted by label.
    pub fn summarize(&self, track_id: u64, events: &[BehaviorEvent]) -> Vec<BehaviorSummary> {
        struct Tally {
            runs: usize,
            frames: usize,
            first_frame: usize,
        }

        let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
        let mut previous: Option<(&str, usize)> = None;

        for event in events {
            let Some(label) = event.label.as_deref() else {
                previous = None;
                continue;
            };
            // A run continues only when the immediately preceding frame
            // carried the same label.
            let continues = previous
                .is_some_and(|(prev, frame)| prev == label && frame + 1 == event.frame_index);
            let tally = tallies.entry(label).or_insert(Tally {
                runs: 0,
                frames: 0,
                first_frame: event.frame_index,
            });
            if !continues {
                tally.runs += 1;
            }
            tally.frames += 1;
            previous = Some((label, event.frame_index));
        }

        tallies
            .into_iter()
            .map(|(label, tally)| {
                let frame_time = tally.frames as f64 / self.frame_rate;
                let window_time = self.window_length as f64 / self.frame_rate;
                BehaviorSummary {
                    track_id,
                    label: label.to_string(),
                    count: tally.runs,
                    duration: Some(frame_time + window_time),
                    latency: Some(tally.first_frame as f64 / self.frame_rate),
                }
            })
            .collect()
    }

    /// Summaries against a fixed label vocabulary: behaviors never observed
    /// still get a row, with `count = 0` and NA duration/latency.
    pub fn summarize_with_vocabulary(
        &self,
        track_id: u64,
        events: &[BehaviorEvent],
        vocabulary: &[String],
    ) -> Vec<BehaviorSummary> {
        let observed = self.summarize(track_id, events);
        let mut rows: Vec<BehaviorSummary> = Vec::with_capacity(vocabulary.len());
        for label in vocabulary {
            match observed.iter().find(|s| &s.label == label) {
                Some(row) => rows.push(row.clone()),
                None => rows.push(BehaviorSummary {
                    track_id,
                    label: label.clone(),
                    count: 0,
                    duration: None,
                    latency: None,
                }),
            }
        }
        rows
    }
}
