//! Greedy nearest-neighbor matching between tracks and observations.
//!
//! The matcher is deliberately greedy rather than a minimum-total-cost
//! assignment: all (track, observation) pairs are sorted by ascending
//! distance and committed first-come-first-served. Exact distance ties break
//! by the row-major flattening order, which favors the lower track row.

use ndarray::Array2;

use crate::geometry::{Point, distance};

/// Outcome of one frame's matching step. Indices refer to the row (track)
/// and column (observation) order the distance matrix was built with.
#[derive(Debug, Clone)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_observations: Vec<usize>,
}

/// Full pairwise Euclidean distance matrix, tracks as rows and observations
/// as columns.
pub fn center_distance_matrix(track_centers: &[Point], obs_centers: &[Point]) -> Array2<f32> {
    let mut dists = Array2::zeros((track_centers.len(), obs_centers.len()));
    for (i, t) in track_centers.iter().enumerate() {
        for (j, o) in obs_centers.iter().enumerate() {
            dists[[i, j]] = distance(t, o);
        }
    }
    dists
}

/// Walk all pairs in ascending distance order and commit every pair whose
/// track and observation are both still unconsumed and whose distance is
/// below `max_distance` (`None` = no cap).
pub fn greedy_assignment(dists: &Array2<f32>, max_distance: Option<f32>) -> AssignmentResult {
    let (num_tracks, num_obs) = dists.dim();

    if num_tracks == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: vec![],
            unmatched_observations: (0..num_obs).collect(),
        };
    }
    if num_obs == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: (0..num_tracks).collect(),
            unmatched_observations: vec![],
        };
    }

    // Row-major flattening; the stable sort keeps that order on exact ties.
    let mut pairs: Vec<(f32, usize, usize)> = Vec::with_capacity(num_tracks * num_obs);
    for i in 0..num_tracks {
        for j in 0..num_obs {
            pairs.push((dists[[i, j]], i, j));
        }
    }
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut track_used = vec![false; num_tracks];
    let mut obs_used = vec![false; num_obs];
    let mut matches = Vec::new();

    for (d, i, j) in pairs {
        if track_used[i] || obs_used[j] {
            continue;
        }
        if max_distance.is_some_and(|cap| d >= cap) {
            continue;
        }
        track_used[i] = true;
        obs_used[j] = true;
        matches.push((i, j));
    }

    let unmatched_tracks = (0..num_tracks).filter(|&i| !track_used[i]).collect();
    let unmatched_observations = (0..num_obs).filter(|&j| !obs_used[j]).collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_observations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_pairs_win() {
        let tracks = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let obs = vec![Point::new(9.0, 0.0), Point::new(1.0, 0.0)];
        let dists = center_distance_matrix(&tracks, &obs);
        let result = greedy_assignment(&dists, None);
        assert_eq!(result.matches.len(), 2);
        assert!(result.matches.contains(&(0, 1)));
        assert!(result.matches.contains(&(1, 0)));
    }

    #[test]
    fn test_cap_leaves_far_pairs_unmatched() {
        let tracks = vec![Point::new(0.0, 0.0)];
        let obs = vec![Point::new(100.0, 0.0)];
        let dists = center_distance_matrix(&tracks, &obs);
        let result = greedy_assignment(&dists, Some(50.0));
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_tracks, vec![0]);
        assert_eq!(result.unmatched_observations, vec![0]);
    }

    #[test]
    fn test_exact_tie_favors_lower_track_row() {
        // Both tracks equidistant from the single observation.
        let tracks = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let obs = vec![Point::new(5.0, 0.0)];
        let dists = center_distance_matrix(&tracks, &obs);
        let result = greedy_assignment(&dists, None);
        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_tracks, vec![1]);
    }

    #[test]
    fn test_empty_inputs() {
        let dists = center_distance_matrix(&[], &[Point::new(1.0, 1.0)]);
        let result = greedy_assignment(&dists, None);
        assert_eq!(result.unmatched_observations, vec![0]);

        let dists = center_distance_matrix(&[Point::new(1.0, 1.0)], &[]);
        let result = greedy_assignment(&dists, None);
        assert_eq!(result.unmatched_tracks, vec![0]);
    }
}
