use rand::SeedableRng;
use rand::rngs::StdRng;

// ---------------------------------------------------------------------------
// Simulation parameters
// ---------------------------------------------------------------------------

/// Everything a run needs beyond the input files. The seed, rate constant
/// and bad-coordinate list are explicit parameters so a run can be
/// reproduced exactly.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Rate constant of the exponential age weighting.
    pub rate: f64,
    /// Round sampled measurement errors to integers.
    pub round_errors: bool,
    /// How many of the most frequent lab prefixes to sample from.
    pub top_prefixes: usize,
    /// CRS of the source latitude/longitude columns.
    pub source_epsg: u32,
    /// CRS of the boundary polygon and of the spatial sampling.
    pub study_epsg: u32,
    /// Known-bad (lat, lon) literals to drop before filtering.
    pub exclusions: Vec<(f64, f64)>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            seed: None,
            rate: 5e-4,
            round_errors: false,
            top_prefixes: 10,
            source_epsg: 4326,
            study_epsg: 3035,
            exclusions: Vec::new(),
        }
    }
}

impl SimulationConfig {
    /// The run's RNG. Every sampler draws from this one stream, so a fixed
    /// seed fixes the whole output.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
