use thiserror::Error;

/// Errors reported by fallible map operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The requested capacity cannot hold the live entries
    #[error("requested capacity {requested} is smaller than the map size {size}")]
    CapacityBelowSize {
        /// Capacity passed to the resize call
        requested: usize,
        /// Live entries at the time of the call
        size: usize,
    },

    /// No prime at or above the requested capacity fits in a `usize`
    #[error("no prime capacity at or above {requested} fits in usize")]
    CapacityOverflow {
        /// Capacity passed to the resize call
        requested: usize,
    },
}

/// Result alias for map operations
pub type Result<T> = std::result::Result<T, MapError>;
