//! Reference background image storage.
//!
//! The external segmenter compares frames against a reference background and
//! its brighter/darker tolerance variants. This core only stores the images
//! and hands them out; it never does pixel-level processing itself.

use ndarray::Array2;

/// A grayscale reference background with precomputed tolerance variants.
#[derive(Debug, Clone)]
pub struct BackgroundModel {
    reference: Array2<f32>,
    brighter: Array2<f32>,
    darker: Array2<f32>,
    tolerance: f32,
}

impl BackgroundModel {
    /// Store a reference image together with variants shifted up and down by
    /// `tolerance`, clamped to the 8-bit range.
    pub fn new(reference: Array2<f32>, tolerance: f32) -> Self {
        let brighter = reference.mapv(|v| (v + tolerance).min(255.0));
        let darker = reference.mapv(|v| (v - tolerance).max(0.0));
        Self {
            reference,
            brighter,
            darker,
            tolerance,
        }
    }

    pub fn reference(&self) -> &Array2<f32> {
        &self.reference
    }

    pub fn brighter(&self) -> &Array2<f32> {
        &self.brighter
    }

    pub fn darker(&self) -> &Array2<f32> {
        &self.darker
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Replace the reference image, recomputing both variants.
    pub fn set_reference(&mut self, reference: Array2<f32>) {
        *self = Self::new(reference, self.tolerance);
    }
}
