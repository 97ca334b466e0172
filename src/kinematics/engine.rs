//! Per-track sliding-window parameter computation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::{distance, mask_area, mask_symmetric_difference};
use crate::kinematics::params::{ParameterKind, TrackParameters};
use crate::kinematics::window::{argmax, argmin, peak_profile};
use crate::tracker::Track;

/// Configuration shared by every sliding-window parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicsConfig {
    /// Trailing window length in frames
    pub window_length: usize,
    /// Source frame rate; every time normalization divides by this
    pub frame_rate: f64,
    /// When set, traveled distances are divided by this run-level constant,
    /// conventionally `sqrt(mean_entity_area)`
    pub area_normalizer: Option<f64>,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            window_length: 15,
            frame_rate: 30.0,
            area_normalizer: None,
        }
    }
}

impl KinematicsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_length == 0 {
            return Err(ConfigError::ZeroWindowLength);
        }
        if !(self.frame_rate > 0.0) {
            return Err(ConfigError::NonPositiveFrameRate(self.frame_rate));
        }
        if let Some(a) = self.area_normalizer {
            if !(a > 0.0 && a.is_finite()) {
                return Err(ConfigError::InvalidAreaNormalizer(a));
            }
        }
        Ok(())
    }
}

/// Computes, for each frame of a track with a full trailing window, the
/// length-change, locomotion and areal-change parameter sets.
pub struct SlidingWindowKinematics {
    config: KinematicsConfig,
}

impl SlidingWindowKinematics {
    pub fn new(config: KinematicsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &KinematicsConfig {
        &self.config
    }

    /// Compute every parameter series for one finished track. Frames without
    /// a full trailing window (or with insufficient history) stay not
    /// available, never zero.
    pub fn compute(&self, track: &Track) -> TrackParameters {
        let frames = track.len();
        let l = self.config.window_length;
        let mut params = TrackParameters::new(track.id, frames);

        for n in 0..frames {
            // A frame qualifies once the window [n - L + 1, n] fits inside
            // the track's own history.
            if n + 1 < track.registered_at_frame + l {
                continue;
            }
            let start = n + 1 - l;

            self.length_set(track, &mut params, start, n);
            self.locomotion_set(track, &mut params, start, n);
            self.areal_set(track, &mut params, start, n);
        }

        params
    }

    /// {magnitude, vigor, intensity}_length from relative height changes.
    fn length_set(&self, track: &Track, params: &mut TrackParameters, start: usize, n: usize) {
        let fps = self.config.frame_rate;
        let current = track.height_history[n];
        let diffs: Vec<f64> = (start..=n)
            .map(|k| match (track.height_history[k], current) {
                (Some(hk), Some(hn)) if hk != 0.0 => ((hk - hn).abs() / hk) as f64,
                _ => 0.0,
            })
            .collect();
        if let Some(p) = peak_profile(&diffs, fps) {
            params.series_mut(ParameterKind::MagnitudeLength).set(n, p.magnitude);
            params.series_mut(ParameterKind::VigorLength).set(n, p.vigor);
            params.series_mut(ParameterKind::IntensityLength).set(n, p.intensity);
        }
    }

    /// {distance, speed, velocity, acceleration} from center motion.
    fn locomotion_set(&self, track: &Track, params: &mut TrackParameters, start: usize, n: usize) {
        let l = self.config.window_length;
        let fps = self.config.frame_rate;

        // Anchorless windows stay not available; a zero here would read as
        // "stationary", which is a different claim.
        let Some(center_n) = track.center_history[n] else {
            return;
        };

        let mut traveled = 0.0f64;
        for k in start..n {
            if let (Some(a), Some(b)) = (track.center_history[k], track.center_history[k + 1]) {
                traveled += distance(&a, &b) as f64;
            }
        }
        if let Some(norm) = self.config.area_normalizer {
            traveled /= norm;
        }
        params.series_mut(ParameterKind::Distance).set(n, traveled);
        params.total_distance += traveled;

        let speed = traveled / (l as f64 / fps);
        params.series_mut(ParameterKind::Speed).set(n, speed);

        let displacements: Vec<f64> = (start..=n)
            .map(|k| match track.center_history[k] {
                Some(ck) => distance(&center_n, &ck) as f64,
                None => 0.0,
            })
            .collect();
        if let Some((peak_offset, peak)) = argmax(&displacements) {
            let velocity = peak / ((l - peak_offset) as f64 / fps);
            params.series_mut(ParameterKind::Velocity).set(n, velocity);
        }

        // Acceleration from the spread of velocity samples over the same
        // trailing window; needs at least two defined samples at distinct
        // peak offsets.
        let velocity_window: Vec<(usize, f64)> = (start..=n)
            .filter_map(|k| params.get(ParameterKind::Velocity, k).map(|v| (k - start, v)))
            .collect();
        if velocity_window.len() >= 2 {
            let values: Vec<f64> = velocity_window.iter().map(|&(_, v)| v).collect();
            if let (Some((imax, vmax)), Some((imin, vmin))) = (argmax(&values), argmin(&values)) {
                let off_max = velocity_window[imax].0;
                let off_min = velocity_window[imin].0;
                if off_max != off_min {
                    let dt = off_max.abs_diff(off_min) as f64 / fps;
                    params
                        .series_mut(ParameterKind::Acceleration)
                        .set(n, (vmax - vmin) / dt);
                }
            }
        }
    }

    /// {magnitude, vigor, intensity}_area from rasterized contour
    /// symmetric differences.
    fn areal_set(&self, track: &Track, params: &mut TrackParameters, start: usize, n: usize) {
        let fps = self.config.frame_rate;
        let Some(contour_n) = track.contour_history[n].as_ref() else {
            return;
        };
        let bbox_n = contour_n.bounding_box();

        let diffs: Vec<f64> = (start..=n)
            .map(|k| match track.contour_history[k].as_ref() {
                Some(contour_k) => {
                    let bbox = bbox_n.union(&contour_k.bounding_box());
                    let mask_k = contour_k.rasterize(&bbox);
                    let mask_n = contour_n.rasterize(&bbox);
                    let earlier_area = mask_area(&mask_k);
                    if earlier_area == 0 {
                        0.0
                    } else {
                        mask_symmetric_difference(&mask_k, &mask_n) as f64 / earlier_area as f64
                    }
                }
                None => 0.0,
            })
            .collect();
        if let Some(p) = peak_profile(&diffs, fps) {
            params.series_mut(ParameterKind::MagnitudeArea).set(n, p.magnitude);
            params.series_mut(ParameterKind::VigorArea).set(n, p.vigor);
            params.series_mut(ParameterKind::IntensityArea).set(n, p.intensity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Outline, Point};
    use crate::tracker::FrameObservation;

    fn obs(x: f32, y: f32, height: f32) -> FrameObservation {
        let outline = Outline::new(vec![
            Point::new(x - 2.0, y - 1.0),
            Point::new(x + 2.0, y - 1.0),
            Point::new(x + 2.0, y + 1.0),
            Point::new(x - 2.0, y + 1.0),
        ]);
        FrameObservation::new(outline, Point::new(x, y), height)
    }

    fn straight_line_track(frames: usize) -> Track {
        let mut t = Track::register(1, 0, obs(0.0, 0.0, 2.0));
        for i in 1..frames {
            t.observe(obs(i as f32, 0.0, 2.0));
        }
        t
    }

    #[test]
    fn test_window_underflow_is_not_available() {
        let track = straight_line_track(10);
        let kin = SlidingWindowKinematics::new(KinematicsConfig {
            window_length: 5,
            frame_rate: 10.0,
            area_normalizer: None,
        })
        .unwrap();
        let params = kin.compute(&track);
        for n in 0..4 {
            for kind in ParameterKind::ALL {
                assert_eq!(params.get(kind, n), None, "{} at frame {n}", kind.name());
            }
        }
        assert!(params.get(ParameterKind::Speed, 4).is_some());
    }

    #[test]
    fn test_constant_speed_values() {
        let track = straight_line_track(10);
        let kin = SlidingWindowKinematics::new(KinematicsConfig {
            window_length: 5,
            frame_rate: 10.0,
            area_normalizer: None,
        })
        .unwrap();
        let params = kin.compute(&track);
        // 4 unit steps over a 0.5 s window
        let speed = params.get(ParameterKind::Speed, 4).unwrap();
        assert!((speed - 8.0).abs() < 1e-9);
        // peak displacement 4 at window offset 0
        let velocity = params.get(ParameterKind::Velocity, 4).unwrap();
        assert!((velocity - 8.0).abs() < 1e-9);
        // constant heights never produce a length-change magnitude
        assert_eq!(params.get(ParameterKind::MagnitudeLength, 4), None);
    }

    #[test]
    fn test_constant_velocity_has_no_acceleration() {
        let track = straight_line_track(20);
        let kin = SlidingWindowKinematics::new(KinematicsConfig {
            window_length: 5,
            frame_rate: 10.0,
            area_normalizer: None,
        })
        .unwrap();
        let params = kin.compute(&track);
        for n in 0..20 {
            if let Some(a) = params.get(ParameterKind::Acceleration, n) {
                assert!(a.abs() < 1e-6, "acceleration {a} at frame {n}");
            }
        }
    }

    #[test]
    fn test_total_distance_accumulates() {
        let track = straight_line_track(10);
        let kin = SlidingWindowKinematics::new(KinematicsConfig {
            window_length: 5,
            frame_rate: 10.0,
            area_normalizer: None,
        })
        .unwrap();
        let params = kin.compute(&track);
        // qualifying frames 4..=9, each contributing a 4-unit window sum
        assert!((params.total_distance - 24.0).abs() < 1e-6);
    }

    #[test]
    fn test_area_normalizer_scales_distance() {
        let track = straight_line_track(10);
        let kin = SlidingWindowKinematics::new(KinematicsConfig {
            window_length: 5,
            frame_rate: 10.0,
            area_normalizer: Some(2.0),
        })
        .unwrap();
        let params = kin.compute(&track);
        let speed = params.get(ParameterKind::Speed, 4).unwrap();
        assert!((speed - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_height_shrink_defines_length_set() {
        // Heights fall from 4.0 to 2.0 at the window's last frame.
        let mut track = Track::register(1, 0, obs(0.0, 0.0, 4.0));
        for _ in 1..4 {
            track.observe(obs(0.0, 0.0, 4.0));
        }
        track.observe(obs(0.0, 0.0, 2.0));
        let kin = SlidingWindowKinematics::new(KinematicsConfig {
            window_length: 5,
            frame_rate: 10.0,
            area_normalizer: None,
        })
        .unwrap();
        let params = kin.compute(&track);
        // height_diff = |4 - 2| / 4 = 0.5 for the first four frames
        let magnitude = params.get(ParameterKind::MagnitudeLength, 4).unwrap();
        assert!((magnitude - 0.5).abs() < 1e-9);
        // peak at offset 0: vigor = 0.5 / (5 / 10)
        let vigor = params.get(ParameterKind::VigorLength, 4).unwrap();
        assert!((vigor - 1.0).abs() < 1e-9);
        // intensity = (0.5 * 4) / (5 / 10)
        let intensity = params.get(ParameterKind::IntensityLength, 4).unwrap();
        assert!((intensity - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_contour_growth_defines_areal_set() {
        fn square_obs(side: f32) -> FrameObservation {
            let outline = Outline::new(vec![
                Point::new(0.0, 0.0),
                Point::new(side, 0.0),
                Point::new(side, side),
                Point::new(0.0, side),
            ]);
            FrameObservation::new(outline, Point::new(side / 2.0, side / 2.0), side)
        }

        // A 4x4 silhouette that doubles its side at the window's last frame.
        let mut track = Track::register(1, 0, square_obs(4.0));
        for _ in 1..4 {
            track.observe(square_obs(4.0));
        }
        track.observe(square_obs(8.0));
        let kin = SlidingWindowKinematics::new(KinematicsConfig {
            window_length: 5,
            frame_rate: 10.0,
            area_normalizer: None,
        })
        .unwrap();
        let params = kin.compute(&track);
        // Aligned on the union box, each earlier 4x4 mask holds 16 cells and
        // the 8x8 mask 64; the smaller mask is fully contained, so
        // area_diff = (64 - 16) / 16 = 3 for the first four frames.
        let magnitude = params.get(ParameterKind::MagnitudeArea, 4).unwrap();
        assert!((magnitude - 3.0).abs() < 1e-9);
        // peak at offset 0: vigor = 3 / (5 / 10)
        let vigor = params.get(ParameterKind::VigorArea, 4).unwrap();
        assert!((vigor - 6.0).abs() < 1e-9);
        // intensity = (3 * 4) / (5 / 10)
        let intensity = params.get(ParameterKind::IntensityArea, 4).unwrap();
        assert!((intensity - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_contour_yields_no_areal_change() {
        let track = straight_line_track(10);
        let kin = SlidingWindowKinematics::new(KinematicsConfig {
            window_length: 5,
            frame_rate: 10.0,
            area_normalizer: None,
        })
        .unwrap();
        let params = kin.compute(&track);
        // A rigidly translating outline keeps its own-frame mask shape, but
        // windows compare masks in absolute coordinates, so translation does
        // register as area change; a fully static track must not.
        let mut static_track = Track::register(2, 0, obs(5.0, 5.0, 2.0));
        for _ in 1..10 {
            static_track.observe(obs(5.0, 5.0, 2.0));
        }
        let static_params = kin.compute(&static_track);
        assert_eq!(static_params.get(ParameterKind::MagnitudeArea, 4), None);
        assert!(params.get(ParameterKind::MagnitudeArea, 4).is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(
            SlidingWindowKinematics::new(KinematicsConfig {
                window_length: 0,
                ..KinematicsConfig::default()
            })
            .is_err()
        );
        assert!(
            SlidingWindowKinematics::new(KinematicsConfig {
                frame_rate: 0.0,
                ..KinematicsConfig::default()
            })
            .is_err()
        );
        assert_eq!(
            SlidingWindowKinematics::new(KinematicsConfig {
                area_normalizer: Some(0.0),
                ..KinematicsConfig::default()
            })
            .err(),
            Some(ConfigError::InvalidAreaNormalizer(0.0))
        );
    }

    #[test]
    fn test_absent_anchor_yields_na_locomotion() {
        let mut track = straight_line_track(5);
        track.coast(); // frame 5 absent
        let kin = SlidingWindowKinematics::new(KinematicsConfig {
            window_length: 5,
            frame_rate: 10.0,
            area_normalizer: None,
        })
        .unwrap();
        let params = kin.compute(&track);
        assert_eq!(params.get(ParameterKind::Speed, 5), None);
        assert_eq!(params.get(ParameterKind::Velocity, 5), None);
    }
}
