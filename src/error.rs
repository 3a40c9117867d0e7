use thiserror::Error;

/// Domain faults the simulation can hit once input files are readable.
///
/// I/O and parse failures stay `anyhow` at the loader boundary; these are
/// the conditions a caller may want to distinguish.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("no records remain after cleaning and spatial filtering")]
    EmptyFilteredSet,

    #[error("boundary polygon has no area, cannot sample points inside it")]
    DegenerateBoundary,

    #[error("unknown EPSG code: {0}")]
    UnknownEpsg(u32),

    #[error(
        "cannot draw {requested} unique lab-ID suffixes from [1, {available}]"
    )]
    SuffixSpaceExhausted { requested: usize, available: u64 },

    #[error("rejection sampling stalled after {attempts} attempts ({accepted} of {requested} points accepted)")]
    SamplingStalled {
        attempts: usize,
        accepted: usize,
        requested: usize,
    },

    #[error("age weights are degenerate over [{min_age}, {max_age}] with rate {rate}")]
    DegenerateAgeWeights {
        min_age: u32,
        max_age: u32,
        rate: f64,
    },

    #[error("coordinate transform failed: {0}")]
    Transform(#[from] proj4rs::errors::Error),
}
