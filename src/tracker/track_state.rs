/// Track state enumeration for the entity tracking lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Matched to an observation in the current frame
    #[default]
    Active,
    /// Temporarily unmatched, still within the grace period
    Coasting,
    /// Unmatched beyond the grace period; never matched again
    Dead,
}
