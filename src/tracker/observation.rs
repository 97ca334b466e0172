//! Per-frame observation input for the tracker.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::geometry::{Outline, Point};

/// One candidate entity detected in the current frame. Ephemeral: consumed
/// within a single tracking step.
#[derive(Debug, Clone)]
pub struct FrameObservation {
    /// Silhouette outline in frame coordinates
    pub outline: Outline,
    /// Center point, same coordinate space across all frames
    pub center: Point,
    /// Long-axis length
    pub height: f32,
    /// Optional inner body-part point (e.g. head position)
    pub inner_point: Option<Point>,
    /// Optional grayscale patch cropped around the entity
    pub visual_patch: Option<Array2<u8>>,
}

impl FrameObservation {
    pub fn new(outline: Outline, center: Point, height: f32) -> Self {
        Self {
            outline,
            center,
            height,
            inner_point: None,
            visual_patch: None,
        }
    }
}

/// How a frame's observations are presented to the tracker.
///
/// `PerEntity` keeps one observation per detected entity and yields one track
/// per entity. `Pooled` merges every observation in the frame into a single
/// union pseudo-observation, yielding one pooled track for the whole group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingPolicy {
    #[default]
    PerEntity,
    Pooled,
}

/// Merge a frame's observations into at most one pooled observation:
/// concatenated outline, mean center, mean height. Inner points and patches
/// do not pool meaningfully and are dropped.
pub fn pool_observations(observations: Vec<FrameObservation>) -> Vec<FrameObservation> {
    if observations.len() <= 1 {
        return observations;
    }
    let n = observations.len() as f32;
    let (mut sx, mut sy, mut sh) = (0.0f32, 0.0f32, 0.0f32);
    let mut points = Vec::new();
    for obs in &observations {
        sx += obs.center.x;
        sy += obs.center.y;
        sh += obs.height;
        points.extend_from_slice(obs.outline.points());
    }
    vec![FrameObservation::new(
        Outline::new(points),
        Point::new(sx / n, sy / n),
        sh / n,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs_at(x: f32, y: f32, height: f32) -> FrameObservation {
        let outline = Outline::new(vec![
            Point::new(x - 1.0, y - 1.0),
            Point::new(x + 1.0, y - 1.0),
            Point::new(x + 1.0, y + 1.0),
            Point::new(x - 1.0, y + 1.0),
        ]);
        FrameObservation::new(outline, Point::new(x, y), height)
    }

    #[test]
    fn test_pooling_merges_centers_and_heights() {
        let pooled = pool_observations(vec![obs_at(0.0, 0.0, 4.0), obs_at(10.0, 10.0, 6.0)]);
        assert_eq!(pooled.len(), 1);
        assert!((pooled[0].center.x - 5.0).abs() < 1e-6);
        assert!((pooled[0].center.y - 5.0).abs() < 1e-6);
        assert!((pooled[0].height - 5.0).abs() < 1e-6);
        assert_eq!(pooled[0].outline.len(), 8);
    }

    #[test]
    fn test_pooling_single_observation_is_identity() {
        let pooled = pool_observations(vec![obs_at(3.0, 4.0, 2.0)]);
        assert_eq!(pooled.len(), 1);
        assert!((pooled[0].center.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_pooling_empty_frame() {
        assert!(pool_observations(vec![]).is_empty());
    }
}
