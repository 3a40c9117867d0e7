use rand::Rng;
use rand::seq::SliceRandom;

use crate::data::model::SourceRecord;
use crate::error::SimError;

// ---------------------------------------------------------------------------
// Measurement errors
// ---------------------------------------------------------------------------

/// Draw `n` measurement errors uniformly, with replacement, from the
/// observed pool. `round` snaps each draw to an integer; one of the source
/// datasets reports integer errors and the other does not, so the choice
/// stays with the caller.
pub fn sample_errors<R: Rng>(
    pool: &[f64],
    n: usize,
    round: bool,
    rng: &mut R,
) -> Result<Vec<f64>, SimError> {
    if pool.is_empty() {
        return Err(SimError::EmptyFilteredSet);
    }
    Ok((0..n)
        .map(|_| {
            // choose() only fails on an empty slice, checked above.
            let v = *pool.choose(rng).unwrap_or(&pool[0]);
            if round { v.round() } else { v }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Positional passthrough
// ---------------------------------------------------------------------------

/// Descriptive metadata carried from filtered source record `i` onto
/// simulated record `i`. Position and age are randomised elsewhere, so the
/// pairing is a deliberate simplification, not a modelled relationship.
#[derive(Debug, Clone, Default)]
pub struct Passthrough {
    pub species: Option<String>,
    pub region: Option<String>,
}

pub fn passthrough_fields(records: &[SourceRecord]) -> Vec<Passthrough> {
    records
        .iter()
        .map(|r| Passthrough {
            species: r.species.clone(),
            region: r.region.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn errors_come_from_the_observed_pool() {
        let pool = vec![25.0, 30.0, 40.0, 55.0];
        let mut rng = StdRng::seed_from_u64(5);
        let drawn = sample_errors(&pool, 200, false, &mut rng).unwrap();
        assert_eq!(drawn.len(), 200);
        let observed: HashSet<u64> = pool.iter().map(|v| v.to_bits()).collect();
        assert!(drawn.iter().all(|v| observed.contains(&v.to_bits())));
    }

    #[test]
    fn rounding_is_applied_when_requested() {
        let pool = vec![32.4, 48.6];
        let mut rng = StdRng::seed_from_u64(5);
        let drawn = sample_errors(&pool, 100, true, &mut rng).unwrap();
        assert!(drawn.iter().all(|v| *v == 32.0 || *v == 49.0));
    }

    #[test]
    fn empty_pool_is_an_error() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            sample_errors(&[], 10, false, &mut rng),
            Err(SimError::EmptyFilteredSet)
        ));
    }
}
