//! End-to-end pipeline combining segmentation, tracking, kinematics and
//! behavior aggregation.

use crate::behavior::{BehaviorAggregator, BehaviorEvent, BehaviorSummary};
use crate::error::ConfigError;
use crate::kinematics::{KinematicsConfig, SlidingWindowKinematics, TrackParameters};
use crate::tracker::{Track, Tracker, TrackerConfig};

use super::classifier::BehaviorClassifier;
use super::segmenter::ObservationSource;

/// Everything this core hands to the export collaborator at the end of a
/// run: the surviving tracks, their parameter series, the raw event stream
/// per track, and the per-behavior summary rows.
#[derive(Debug, Clone)]
pub struct RunResults {
    pub tracks: Vec<Track>,
    pub parameters: Vec<TrackParameters>,
    pub events: Vec<(u64, Vec<BehaviorEvent>)>,
    pub summaries: Vec<BehaviorSummary>,
}

/// Sequential per-frame driver: pulls observations from an
/// [`ObservationSource`], feeds the tracker, and on `finish` runs the
/// sliding-window kinematics (and optionally a classifier) over every
/// surviving track.
pub struct TrackingPipeline<S: ObservationSource> {
    source: S,
    tracker: Tracker,
    kinematics: SlidingWindowKinematics,
    next_frame: usize,
}

impl<S: ObservationSource> TrackingPipeline<S> {
    /// Create a pipeline; all configuration errors surface here, before any
    /// frame is processed.
    pub fn new(
        source: S,
        tracker_config: TrackerConfig,
        kinematics_config: KinematicsConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            source,
            tracker: Tracker::new(tracker_config)?,
            kinematics: SlidingWindowKinematics::new(kinematics_config)?,
            next_frame: 0,
        })
    }

    /// Segment and track the next frame. Returns the frame index processed.
    pub fn process_frame(&mut self) -> Result<usize, S::Error> {
        let frame_index = self.next_frame;
        let observations = self.source.segment(frame_index)?;
        self.tracker.update(frame_index, observations);
        self.next_frame += 1;
        Ok(frame_index)
    }

    /// Finish the run without a classifier: trim and prune tracks, compute
    /// every parameter series. A prefix of frames is always a valid run.
    pub fn finish(self, expected_entities: usize) -> RunResults {
        let tracks = self.tracker.finish(expected_entities);
        let parameters = tracks.iter().map(|t| self.kinematics.compute(t)).collect();
        RunResults {
            tracks,
            parameters,
            events: Vec::new(),
            summaries: Vec::new(),
        }
    }

    /// Finish the run, additionally invoking `classifier` for every frame of
    /// every surviving track that carries a full trailing window, and folding
    /// the resulting event stream into per-behavior summaries.
    pub fn finish_with_classifier<C: BehaviorClassifier>(
        self,
        expected_entities: usize,
        classifier: &mut C,
    ) -> Result<RunResults, ConfigError> {
        let config = self.kinematics.config().clone();
        let aggregator = BehaviorAggregator::new(config.window_length, config.frame_rate)?;

        let tracks = self.tracker.finish(expected_entities);
        let parameters: Vec<TrackParameters> =
            tracks.iter().map(|t| self.kinematics.compute(t)).collect();

        let mut events = Vec::with_capacity(tracks.len());
        let mut summaries = Vec::new();
        for track in &tracks {
            let first = track.registered_at_frame + config.window_length - 1;
            let stream: Vec<BehaviorEvent> = (first..track.len())
                .map(|n| classifier.classify(track, n))
                .collect();
            summaries.extend(aggregator.summarize(track.id, &stream));
            events.push((track.id, stream));
        }

        Ok(RunResults {
            tracks,
            parameters,
            events,
            summaries,
        })
    }

    /// Get a reference to the underlying observation source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying observation source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Outline, Point};
    use crate::tracker::FrameObservation;

    struct ScriptedSegmenter {
        frames: Vec<Vec<FrameObservation>>,
    }

    impl ObservationSource for ScriptedSegmenter {
        type Error = std::convert::Infallible;

        fn segment(&mut self, frame_index: usize) -> Result<Vec<FrameObservation>, Self::Error> {
            Ok(self.frames.get(frame_index).cloned().unwrap_or_default())
        }
    }

    struct ConstantClassifier;

    impl BehaviorClassifier for ConstantClassifier {
        fn classify(&mut self, _track: &Track, frame_index: usize) -> BehaviorEvent {
            BehaviorEvent::labeled(frame_index, "walk", 0.95)
        }
    }

    fn obs(x: f32, y: f32) -> FrameObservation {
        FrameObservation::new(
            Outline::new(vec![
                Point::new(x - 1.0, y - 1.0),
                Point::new(x + 1.0, y - 1.0),
                Point::new(x, y + 1.0),
            ]),
            Point::new(x, y),
            2.0,
        )
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let frames = (0..10).map(|i| vec![obs(i as f32, 0.0)]).collect();
        let mut pipeline = TrackingPipeline::new(
            ScriptedSegmenter { frames },
            TrackerConfig::default(),
            KinematicsConfig {
                window_length: 5,
                frame_rate: 10.0,
                area_normalizer: None,
            },
        )
        .unwrap();

        for _ in 0..10 {
            pipeline.process_frame().unwrap();
        }
        let results = pipeline.finish(1);
        assert_eq!(results.tracks.len(), 1);
        assert_eq!(results.parameters.len(), 1);
        assert!(results.parameters[0].total_distance > 0.0);
    }

    #[test]
    fn test_pipeline_with_classifier() {
        let frames = (0..10).map(|i| vec![obs(i as f32, 0.0)]).collect();
        let mut pipeline = TrackingPipeline::new(
            ScriptedSegmenter { frames },
            TrackerConfig::default(),
            KinematicsConfig {
                window_length: 5,
                frame_rate: 10.0,
                area_normalizer: None,
            },
        )
        .unwrap();
        for _ in 0..10 {
            pipeline.process_frame().unwrap();
        }
        let results = pipeline
            .finish_with_classifier(1, &mut ConstantClassifier)
            .unwrap();
        // events start at the first full-window frame (4) and run to frame 9
        assert_eq!(results.events.len(), 1);
        assert_eq!(results.events[0].1.len(), 6);
        assert_eq!(results.summaries.len(), 1);
        assert_eq!(results.summaries[0].count, 1);
        // 6 labeled frames at 0.1 s plus one 0.5 s window
        assert!((results.summaries[0].duration.unwrap() - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_partial_run_is_valid() {
        let frames = (0..3).map(|i| vec![obs(i as f32, 0.0)]).collect();
        let mut pipeline = TrackingPipeline::new(
            ScriptedSegmenter { frames },
            TrackerConfig::default(),
            KinematicsConfig {
                window_length: 5,
                frame_rate: 10.0,
                area_normalizer: None,
            },
        )
        .unwrap();
        for _ in 0..3 {
            pipeline.process_frame().unwrap();
        }
        let results = pipeline.finish(1);
        assert_eq!(results.tracks[0].len(), 3);
        // no frame has a full window yet
        assert_eq!(results.parameters[0].series(crate::kinematics::ParameterKind::Speed).defined_count(), 0);
    }
}
