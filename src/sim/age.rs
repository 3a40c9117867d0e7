use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::error::SimError;

// ---------------------------------------------------------------------------
// Exponential-weighted age sampling
// ---------------------------------------------------------------------------

/// Draw `n` integer ages from `[min_age, max_age]` with replacement, each
/// integer weighted by the exponential density `rate * exp(-rate * age)`.
///
/// The rate constant is supplied by the caller, not fitted: it is a tuning
/// knob chosen per dataset. Small rates flatten the distribution, larger
/// rates concentrate draws at the recent (low-age) end.
pub fn sample_ages<R: Rng>(
    min_age: u32,
    max_age: u32,
    rate: f64,
    n: usize,
    rng: &mut R,
) -> Result<Vec<u32>, SimError> {
    let weights: Vec<f64> = (min_age..=max_age)
        .map(|age| rate * (-rate * f64::from(age)).exp())
        .collect();

    // All-zero weights happen when rate * min_age underflows the density
    // to nothing; that is a caller error, not a sampling outcome.
    let dist = WeightedIndex::new(&weights).map_err(|_| SimError::DegenerateAgeWeights {
        min_age,
        max_age,
        rate,
    })?;

    Ok((0..n).map(|_| min_age + dist.sample(rng) as u32).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn draws_stay_inside_the_observed_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let ages = sample_ages(200, 5000, 0.0005, 500, &mut rng).unwrap();
        assert_eq!(ages.len(), 500);
        assert!(ages.iter().all(|&a| (200..=5000).contains(&a)));
    }

    #[test]
    fn exponential_weighting_favours_recent_ages() {
        let mut rng = StdRng::seed_from_u64(7);
        let ages = sample_ages(0, 5000, 0.001, 2000, &mut rng).unwrap();
        let mean = ages.iter().map(|&a| f64::from(a)).sum::<f64>() / ages.len() as f64;
        // Uniform sampling would centre near 2500; the exponential pulls the
        // mean towards 1/rate = 1000.
        assert!(mean < 1500.0, "mean {mean} not biased towards low ages");
    }

    #[test]
    fn single_value_range_is_degenerate_but_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        let ages = sample_ages(3000, 3000, 0.0005, 10, &mut rng).unwrap();
        assert!(ages.iter().all(|&a| a == 3000));
    }

    #[test]
    fn underflowing_rate_is_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        // rate * age around 1e6 drives exp() to exactly zero everywhere.
        let result = sample_ages(40_000, 40_010, 30.0, 5, &mut rng);
        assert!(matches!(result, Err(SimError::DegenerateAgeWeights { .. })));
    }
}
