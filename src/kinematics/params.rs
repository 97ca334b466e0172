//! Strongly-typed parameter series.

use serde::{Deserialize, Serialize};

/// The fixed set of per-frame kinematic and shape-change parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    MagnitudeLength,
    VigorLength,
    IntensityLength,
    Distance,
    Speed,
    Velocity,
    Acceleration,
    MagnitudeArea,
    VigorArea,
    IntensityArea,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 10] = [
        ParameterKind::MagnitudeLength,
        ParameterKind::VigorLength,
        ParameterKind::IntensityLength,
        ParameterKind::Distance,
        ParameterKind::Speed,
        ParameterKind::Velocity,
        ParameterKind::Acceleration,
        ParameterKind::MagnitudeArea,
        ParameterKind::VigorArea,
        ParameterKind::IntensityArea,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ParameterKind::MagnitudeLength => "magnitude_length",
            ParameterKind::VigorLength => "vigor_length",
            ParameterKind::IntensityLength => "intensity_length",
            ParameterKind::Distance => "distance",
            ParameterKind::Speed => "speed",
            ParameterKind::Velocity => "velocity",
            ParameterKind::Acceleration => "acceleration",
            ParameterKind::MagnitudeArea => "magnitude_area",
            ParameterKind::VigorArea => "vigor_area",
            ParameterKind::IntensityArea => "intensity_area",
        }
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

/// One parameter's values over a track, aligned 1:1 with frame index.
/// `None` means "not available" for that frame; `Some(0.0)` is a defined
/// zero, deliberately distinct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSeries {
    values: Vec<Option<f64>>,
}

impl ParameterSeries {
    pub fn with_len(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, frame: usize) -> Option<f64> {
        self.values.get(frame).copied().flatten()
    }

    pub fn set(&mut self, frame: usize, value: f64) {
        if let Some(slot) = self.values.get_mut(frame) {
            *slot = Some(value);
        }
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.values.iter().copied()
    }
}

/// All parameter series for one track, plus the lifetime distance total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackParameters {
    pub track_id: u64,
    series: Vec<ParameterSeries>,
    /// Accumulated `distance_traveled` over every qualifying frame.
    pub total_distance: f64,
}

impl TrackParameters {
    pub fn new(track_id: u64, frames: usize) -> Self {
        Self {
            track_id,
            series: ParameterKind::ALL
                .iter()
                .map(|_| ParameterSeries::with_len(frames))
                .collect(),
            total_distance: 0.0,
        }
    }

    pub fn series(&self, kind: ParameterKind) -> &ParameterSeries {
        &self.series[kind.index()]
    }

    pub fn series_mut(&mut self, kind: ParameterKind) -> &mut ParameterSeries {
        &mut self.series[kind.index()]
    }

    pub fn get(&self, kind: ParameterKind, frame: usize) -> Option<f64> {
        self.series(kind).get(frame)
    }
}
