// src/model/distribution.rs

use crate::error::{InventoryError, Result};
use crate::model::rng::RandomSource;
use serde::Serialize;

/// How far the final cumulative probability may sit from 1.0.
pub const CUMULATIVE_TOLERANCE: f64 = 1e-9;

/// A discrete empirical distribution stored as `(value, cumulative probability)` pairs.
///
/// Construction checks that the cumulative column is strictly increasing and
/// ends at 1.0, after which the table is immutable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionTable {
    entries: Vec<(u32, f64)>,
}

impl DistributionTable {
    pub fn new(entries: Vec<(u32, f64)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(InventoryError::configuration(
                "distribution table has no entries",
            ));
        }

        let mut previous = 0.0;
        for &(value, cumulative) in &entries {
            if !cumulative.is_finite() || cumulative <= previous {
                return Err(InventoryError::configuration(format!(
                    "cumulative probability {} for value {} does not increase past {}",
                    cumulative, value, previous
                )));
            }
            previous = cumulative;
        }

        if (previous - 1.0).abs() > CUMULATIVE_TOLERANCE {
            return Err(InventoryError::configuration(format!(
                "cumulative probabilities end at {} instead of 1.0",
                previous
            )));
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    /// Draws one value: the first entry whose cumulative probability covers
    /// a uniform fraction taken from `rng`.
    ///
    /// Consumes exactly one draw from the source.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<u32> {
        let fraction = rng.draw();
        self.entries
            .iter()
            .find(|(_, cumulative)| *cumulative >= fraction)
            .map(|(value, _)| *value)
            .ok_or_else(|| {
                InventoryError::configuration(format!(
                    "draw {} is not covered by the table (cumulative total below 1.0)",
                    fraction
                ))
            })
    }

    /// Marginal probability of each bucket, in table order.
    pub fn marginals(&self) -> Vec<(u32, f64)> {
        let mut previous = 0.0;
        self.entries
            .iter()
            .map(|&(value, cumulative)| {
                let p = cumulative - previous;
                previous = cumulative;
                (value, p)
            })
            .collect()
    }

    /// Exact expectation of the distribution.
    pub fn theoretical_mean(&self) -> f64 {
        self.marginals()
            .iter()
            .map(|&(value, p)| value as f64 * p)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rng::{ScriptedSource, SimRng};

    fn demand_table() -> DistributionTable {
        DistributionTable::new(vec![(1, 0.10), (2, 0.25), (3, 0.60), (4, 0.80), (5, 1.00)])
            .unwrap()
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(matches!(
            DistributionTable::new(vec![]),
            Err(InventoryError::Configuration { .. })
        ));
    }

    #[test]
    fn test_rejects_short_total() {
        let err = DistributionTable::new(vec![(1, 0.5), (2, 0.9)]).unwrap_err();
        assert!(matches!(err, InventoryError::Configuration { .. }));
    }

    #[test]
    fn test_rejects_non_increasing() {
        let err = DistributionTable::new(vec![(1, 0.5), (2, 0.5), (3, 1.0)]).unwrap_err();
        assert!(matches!(err, InventoryError::Configuration { .. }));
    }

    #[test]
    fn test_sample_picks_first_covering_bucket() {
        let table = demand_table();
        let mut src = ScriptedSource::new(vec![0.0, 0.10, 0.11, 0.5, 0.61, 0.99]).unwrap();
        let drawn: Vec<u32> = (0..6).map(|_| table.sample(&mut src).unwrap()).collect();
        assert_eq!(drawn, vec![1, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sample_fails_when_draw_is_not_covered() {
        // Ends just below 1.0 but inside the construction tolerance.
        let table = DistributionTable::new(vec![(1, 0.5), (2, 1.0 - 5e-10)]).unwrap();
        let mut src = ScriptedSource::new(vec![0.99999999995]).unwrap();
        assert!(matches!(
            table.sample(&mut src),
            Err(InventoryError::Configuration { .. })
        ));
    }

    #[test]
    fn test_theoretical_means() {
        assert!((demand_table().theoretical_mean() - 3.1).abs() < 1e-9);

        let lead = DistributionTable::new(vec![(1, 0.40), (2, 0.75), (3, 1.00)]).unwrap();
        assert!((lead.theoretical_mean() - 1.85).abs() < 1e-9);
    }

    #[test]
    fn test_empirical_frequencies_match_table() {
        let table = demand_table();
        let mut rng = SimRng::new(7);
        let n = 100_000;
        let mut counts = [0usize; 6];
        for _ in 0..n {
            counts[table.sample(&mut rng).unwrap() as usize] += 1;
        }

        for (value, p) in table.marginals() {
            let observed = counts[value as usize] as f64 / n as f64;
            assert!(
                (observed - p).abs() < 0.01,
                "value {}: observed {:.4}, expected {:.4}",
                value,
                observed,
                p
            );
        }
    }
}
