use std::collections::HashMap;

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::error::SimError;

// ---------------------------------------------------------------------------
// Prefix statistics
// ---------------------------------------------------------------------------

/// Empirical lab-code structure derived from the source lab references.
///
/// Each reference splits into prefix and suffix at its first hyphen; a
/// reference with no hyphen counts as a bare prefix. Suffixes that fail to
/// parse as numbers are ignored when deriving the suffix ceiling.
#[derive(Debug, Clone)]
pub struct LabCodeStats {
    /// The most frequent prefixes with their counts, frequency-descending.
    pub top_prefixes: Vec<(String, usize)>,
    /// Largest numeric suffix observed in the source.
    pub max_suffix: u64,
}

impl LabCodeStats {
    pub fn from_lab_ids<'a, I>(lab_ids: I, top_k: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut max_suffix = 0u64;
        let mut unparsed = 0usize;

        for id in lab_ids {
            let (prefix, suffix) = match id.split_once('-') {
                Some((p, s)) => (p.trim(), Some(s.trim())),
                None => (id.trim(), None),
            };
            if prefix.is_empty() {
                continue;
            }
            *counts.entry(prefix.to_string()).or_default() += 1;

            if let Some(suffix) = suffix {
                match suffix.parse::<u64>() {
                    Ok(v) => max_suffix = max_suffix.max(v),
                    Err(_) => unparsed += 1,
                }
            }
        }
        if unparsed > 0 {
            log::debug!("{unparsed} lab references had non-numeric suffixes");
        }

        let mut top_prefixes: Vec<(String, usize)> = counts.into_iter().collect();
        // Ties broken by prefix string so a fixed seed reproduces a run.
        top_prefixes.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_prefixes.truncate(top_k);

        LabCodeStats {
            top_prefixes,
            max_suffix,
        }
    }
}

// ---------------------------------------------------------------------------
// Synthetic lab-ID generation
// ---------------------------------------------------------------------------

/// Generate `n` synthetic lab references: prefixes drawn with replacement,
/// weighted by observed frequency; numeric suffixes drawn without
/// replacement from `[1, max_suffix]` so every reference in a run is unique.
///
/// Prefix and suffix are drawn independently; only the marginal
/// distributions of the source are approximated.
pub fn sample_lab_ids<R: Rng>(
    stats: &LabCodeStats,
    n: usize,
    rng: &mut R,
) -> Result<Vec<String>, SimError> {
    if stats.top_prefixes.is_empty() {
        return Err(SimError::EmptyFilteredSet);
    }
    if (stats.max_suffix as usize) < n {
        return Err(SimError::SuffixSpaceExhausted {
            requested: n,
            available: stats.max_suffix,
        });
    }

    // Counts are all positive, so the weighted table cannot fail once the
    // empty case is handled above.
    let weights: Vec<usize> = stats.top_prefixes.iter().map(|(_, c)| *c).collect();
    let dist = WeightedIndex::new(&weights).map_err(|_| SimError::EmptyFilteredSet)?;

    let suffixes = rand::seq::index::sample(rng, stats.max_suffix as usize, n);

    Ok(suffixes
        .into_iter()
        .map(|s| {
            let prefix = &stats.top_prefixes[dist.sample(rng)].0;
            format!("{}-{}", prefix, s as u64 + 1)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn source_ids() -> Vec<String> {
        let mut ids = Vec::new();
        for i in 0..50 {
            ids.push(format!("OxA-{}", 1000 + i));
        }
        for i in 0..30 {
            ids.push(format!("Beta-{}", 2000 + i));
        }
        for i in 0..5 {
            ids.push(format!("GrN-{}", 300 + i));
        }
        ids.push("KIA-old/a".to_string()); // non-numeric suffix
        ids.push("nohyphen".to_string());
        ids
    }

    #[test]
    fn prefixes_are_ranked_by_frequency() {
        let ids = source_ids();
        let stats = LabCodeStats::from_lab_ids(ids.iter().map(String::as_str), 10);
        assert_eq!(stats.top_prefixes[0].0, "OxA");
        assert_eq!(stats.top_prefixes[0].1, 50);
        assert_eq!(stats.top_prefixes[1].0, "Beta");
        assert_eq!(stats.max_suffix, 2029);
    }

    #[test]
    fn top_k_limits_the_prefix_table() {
        let ids = source_ids();
        let stats = LabCodeStats::from_lab_ids(ids.iter().map(String::as_str), 2);
        assert_eq!(stats.top_prefixes.len(), 2);
    }

    #[test]
    fn generated_ids_use_top_prefixes_and_unique_suffixes() {
        let ids = source_ids();
        let stats = LabCodeStats::from_lab_ids(ids.iter().map(String::as_str), 10);
        let mut rng = StdRng::seed_from_u64(3);
        let generated = sample_lab_ids(&stats, 500, &mut rng).unwrap();
        assert_eq!(generated.len(), 500);

        let allowed: HashSet<&str> =
            stats.top_prefixes.iter().map(|(p, _)| p.as_str()).collect();
        let mut seen = HashSet::new();
        for id in &generated {
            let (prefix, suffix) = id.split_once('-').expect("generated id has a hyphen");
            assert!(allowed.contains(prefix), "unexpected prefix {prefix}");
            let suffix: u64 = suffix.parse().unwrap();
            assert!((1..=stats.max_suffix).contains(&suffix));
            assert!(seen.insert(suffix), "duplicate suffix {suffix}");
        }
    }

    #[test]
    fn refuses_when_suffix_space_is_too_small() {
        let stats = LabCodeStats::from_lab_ids(["X-3", "X-2"], 10);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            sample_lab_ids(&stats, 10, &mut rng),
            Err(SimError::SuffixSpaceExhausted { requested: 10, available: 3 })
        ));
    }
}
