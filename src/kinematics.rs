mod engine;
mod params;
mod window;

pub use engine::{KinematicsConfig, SlidingWindowKinematics};
pub use params::{ParameterKind, ParameterSeries, TrackParameters};
pub use window::{PeakProfile, peak_profile};
