//! Integration module connecting external segmentation and classification
//! collaborators with the tracking core.
//!
//! This core never does image processing or inference itself; it consumes
//! already-materialized observations and behavior events through the traits
//! here.

mod builder;
mod classifier;
mod pipeline;
mod segmenter;

pub use builder::ObservationBuilder;
pub use classifier::BehaviorClassifier;
pub use pipeline::{RunResults, TrackingPipeline};
pub use segmenter::{IntoObservations, ObservationSource};
