use geo::{Contains, MultiPolygon, Point};

use super::model::SourceDataset;
use crate::crs::CrsTransform;
use crate::error::SimError;

// ---------------------------------------------------------------------------
// Cleaning + spatial clip
// ---------------------------------------------------------------------------

/// What happened to the source rows during cleaning and clipping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub kept: usize,
    /// Rows matching a literal (lat, lon) pair on the exclusion list.
    pub excluded_coordinates: usize,
    /// Rows whose projected position fell outside the boundary polygon.
    pub outside_boundary: usize,
}

/// Drop rows on the exclusion list, project the rest into the study CRS and
/// keep only those inside the boundary polygon.
///
/// Exclusions are matched as literal coordinate values, the same way the
/// known-bad rows are tagged in the source datasets. Everything dropped is
/// counted rather than silently discarded.
pub fn clean_and_clip(
    dataset: SourceDataset,
    exclusions: &[(f64, f64)],
    to_study: &CrsTransform,
    boundary: &MultiPolygon<f64>,
) -> Result<(SourceDataset, FilterSummary), SimError> {
    let mut summary = FilterSummary::default();
    let mut kept = Vec::with_capacity(dataset.len());

    for record in dataset.records {
        if exclusions.iter().any(|&(lat, lon)| record.lat == lat && record.lon == lon) {
            summary.excluded_coordinates += 1;
            continue;
        }
        let (x, y) = to_study.apply(record.lon, record.lat)?;
        if boundary.contains(&Point::new(x, y)) {
            kept.push(record);
        } else {
            summary.outside_boundary += 1;
        }
    }

    summary.kept = kept.len();
    Ok((SourceDataset::from_records(kept), summary))
}
