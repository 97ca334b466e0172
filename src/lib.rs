//! Tracking of moving animals across video frames from per-frame geometric
//! observations (silhouette outlines, centers, long-axis lengths), plus
//! sliding-window kinematic and shape-change statistics and per-behavior
//! event aggregation.
//!
//! Segmentation of frames into candidate outlines and classification of
//! trailing windows into behavior labels are external collaborators,
//! connected through the traits in [`integration`].

pub mod background;
pub mod behavior;
pub mod error;
pub mod geometry;
pub mod integration;
pub mod kinematics;
pub mod tracker;

pub use background::BackgroundModel;
pub use behavior::{BehaviorAggregator, BehaviorEvent, BehaviorSummary};
pub use error::ConfigError;
pub use geometry::{BoundingBox, Outline, Point};
pub use integration::{
    BehaviorClassifier, ObservationBuilder, ObservationSource, RunResults, TrackingPipeline,
};
pub use kinematics::{
    KinematicsConfig, ParameterKind, ParameterSeries, SlidingWindowKinematics, TrackParameters,
};
pub use tracker::{
    FrameObservation, GroupingPolicy, Track, TrackState, Tracker, TrackerConfig,
};
