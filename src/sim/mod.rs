/// Simulation layer: the samplers and the orchestrator that strings them
/// together into one run.
///
/// ```text
///   filtered SourceDataset ──┬─► age sampler      (exponential weights)
///                            ├─► spatial sampler  (uniform in polygon)
///                            ├─► lab-ID sampler   (prefix × suffix)
///                            ├─► error sampler    (empirical pool)
///                            └─► passthrough      (positional copy)
///                                      │
///                                      ▼
///                              Vec<SimulatedRecord>
/// ```
///
/// Every field is drawn independently; the only coupling to the source is
/// the record count and the empirical distributions.
pub mod age;
pub mod fields;
pub mod labcode;
pub mod spatial;

use geo::MultiPolygon;
use rand::Rng;

use crate::config::SimulationConfig;
use crate::crs::CrsTransform;
use crate::data::filter::{FilterSummary, clean_and_clip};
use crate::data::model::{SimulatedRecord, SourceDataset};
use crate::error::SimError;
use labcode::LabCodeStats;

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct RunOutput {
    pub records: Vec<SimulatedRecord>,
    pub filter: FilterSummary,
}

/// One simulation over one dataset and one boundary.
pub struct Simulation<'a> {
    pub config: &'a SimulationConfig,
    /// Boundary polygon, already in the study CRS.
    pub boundary: &'a MultiPolygon<f64>,
}

impl Simulation<'_> {
    /// Clean and clip the source, then draw a synthetic dataset of the same
    /// size. The output row count always equals the filtered input count.
    pub fn run<R: Rng>(
        &self,
        source: SourceDataset,
        rng: &mut R,
    ) -> Result<RunOutput, SimError> {
        let config = self.config;
        let to_study = CrsTransform::new(config.source_epsg, config.study_epsg)?;
        let (filtered, summary) =
            clean_and_clip(source, &config.exclusions, &to_study, self.boundary)?;
        if filtered.is_empty() {
            return Err(SimError::EmptyFilteredSet);
        }
        let n = filtered.len();

        let (min_age, max_age) = filtered.age_range().ok_or(SimError::EmptyFilteredSet)?;
        let ages = age::sample_ages(min_age, max_age, config.rate, n, rng)?;
        let points = spatial::sample_points(self.boundary, n, rng)?;

        let stats = LabCodeStats::from_lab_ids(
            filtered.records.iter().map(|r| r.lab_id.as_str()),
            config.top_prefixes,
        );
        let lab_ids = labcode::sample_lab_ids(&stats, n, rng)?;
        let errors = fields::sample_errors(
            &filtered.error_pool(),
            n,
            config.round_errors,
            rng,
        )?;
        let passthrough = fields::passthrough_fields(&filtered.records);

        // Back to geographic coordinates: x is longitude, y is latitude.
        // Easy to get backwards, hence the explicit naming here.
        let to_geographic = CrsTransform::new(config.study_epsg, config.source_epsg)?;
        let mut records = Vec::with_capacity(n);
        for i in 0..n {
            let (lon, lat) = to_geographic.apply(points[i].x(), points[i].y())?;
            records.push(SimulatedRecord {
                lab_id: lab_ids[i].clone(),
                lat,
                lon,
                age: ages[i],
                species: passthrough[i].species.clone(),
                region: passthrough[i].region.clone(),
                error: errors[i],
            });
        }

        Ok(RunOutput {
            records,
            filter: summary,
        })
    }
}
