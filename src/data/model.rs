use serde::Serialize;

// ---------------------------------------------------------------------------
// SourceRecord – one row of the real dataset
// ---------------------------------------------------------------------------

/// A single dated sample from the source dataset. Immutable input.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    /// Laboratory reference, conventionally "PREFIX-number".
    pub lab_id: String,
    /// Latitude in the source geographic CRS (degrees).
    pub lat: f64,
    /// Longitude in the source geographic CRS (degrees).
    pub lon: f64,
    /// Uncalibrated radiocarbon age, years BP.
    pub age: f64,
    /// Measurement error (one sigma), years.
    pub error: f64,
    /// Dated species or taxon, where reported.
    pub species: Option<String>,
    /// Region or site grouping, where reported.
    pub region: Option<String>,
}

// ---------------------------------------------------------------------------
// SourceDataset – the loaded dataset plus derived statistics
// ---------------------------------------------------------------------------

/// All loaded source records with the derived values the samplers need.
#[derive(Debug, Clone, Default)]
pub struct SourceDataset {
    pub records: Vec<SourceRecord>,
}

impl SourceDataset {
    pub fn from_records(records: Vec<SourceRecord>) -> Self {
        SourceDataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed age range, rounded to the integer years the age sampler
    /// works over. `None` when the dataset is empty.
    pub fn age_range(&self) -> Option<(u32, u32)> {
        let mut ages = self.records.iter().map(|r| r.age);
        let first = ages.next()?;
        let (min, max) = ages.fold((first, first), |(lo, hi), a| (lo.min(a), hi.max(a)));
        Some((min.round() as u32, max.round() as u32))
    }

    /// The empirical pool of measurement errors.
    pub fn error_pool(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.error).collect()
    }

    /// All lab reference strings.
    pub fn lab_ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.lab_id.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// SimulatedRecord – one output row
// ---------------------------------------------------------------------------

/// A synthetic observation. Field order here is the output column order:
/// identifier, position, descriptive fields, error last.
#[derive(Debug, Clone, Serialize)]
pub struct SimulatedRecord {
    #[serde(rename = "labnr")]
    pub lab_id: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "c14age")]
    pub age: u32,
    pub species: Option<String>,
    pub region: Option<String>,
    #[serde(rename = "c14std")]
    pub error: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lab_id: &str, age: f64) -> SourceRecord {
        SourceRecord {
            lab_id: lab_id.to_string(),
            lat: 40.0,
            lon: -3.0,
            age,
            error: 30.0,
            species: None,
            region: None,
        }
    }

    #[test]
    fn age_range_rounds_to_integers() {
        let ds = SourceDataset::from_records(vec![
            record("OxA-100", 1200.4),
            record("OxA-101", 4999.6),
        ]);
        assert_eq!(ds.age_range(), Some((1200, 5000)));
    }

    #[test]
    fn empty_dataset_has_no_age_range() {
        assert_eq!(SourceDataset::default().age_range(), None);
    }
}
