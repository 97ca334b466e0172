//! Builder for creating observations from raw segmenter output.

use ndarray::Array2;

use crate::geometry::{Outline, Point};
use crate::tracker::FrameObservation;

/// Builder for [`FrameObservation`] values. Center and height default to the
/// outline's centroid and long-axis length when not supplied, which is what
/// background-subtraction segmenters usually want.
#[derive(Debug, Clone, Default)]
pub struct ObservationBuilder {
    outline: Vec<Point>,
    center: Option<Point>,
    height: Option<f32>,
    inner_point: Option<Point>,
    visual_patch: Option<Array2<u8>>,
}

impl ObservationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outline from an ordered vertex sequence.
    pub fn outline(mut self, points: Vec<Point>) -> Self {
        self.outline = points;
        self
    }

    /// Override the derived center.
    pub fn center(mut self, x: f32, y: f32) -> Self {
        self.center = Some(Point::new(x, y));
        self
    }

    /// Override the derived long-axis length.
    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Attach an inner body-part point.
    pub fn inner_point(mut self, x: f32, y: f32) -> Self {
        self.inner_point = Some(Point::new(x, y));
        self
    }

    /// Attach a grayscale patch cropped around the entity.
    pub fn visual_patch(mut self, patch: Array2<u8>) -> Self {
        self.visual_patch = Some(patch);
        self
    }

    /// Build the final observation.
    pub fn build(self) -> FrameObservation {
        let outline = Outline::new(self.outline);
        let center = self.center.unwrap_or_else(|| outline.centroid());
        let height = self.height.unwrap_or_else(|| outline.long_axis());
        FrameObservation {
            outline,
            center,
            height,
            inner_point: self.inner_point,
            visual_patch: self.visual_patch,
        }
    }
}
