// src/strategy/optimization.rs

//! Mode estimation over repeated stochastic searches.
//!
//! A single search reflects one draw of demand and lead times, so its answer
//! is noisy. Repeating it and keeping the most frequent outcome gives a
//! stable point estimate without any closed-form analysis.

use crate::error::{InventoryError, Result};
use crate::model::rng::RandomSource;
use crate::strategy::implementations::{
    MaximalReviewPeriod, MinimalDepotCapacity, OptimalCombination,
};
use crate::strategy::traits::{ParameterSearch, PolicyPair, SearchOutcome};
use std::fmt::Debug;
use tracing::info;

/// Trial count used when no other is given.
pub const DEFAULT_TRIALS: usize = 200;

/// Calls `trial` `trials` times and returns its most frequent result.
///
/// Ties go to the outcome that was seen first. Any error from a trial aborts
/// the estimate.
pub fn estimate_mode<T, F>(trials: usize, mut trial: F) -> Result<T>
where
    T: Clone + PartialEq + Debug,
    F: FnMut() -> Result<T>,
{
    if trials == 0 {
        return Err(InventoryError::invalid(
            "mode estimation needs at least one trial",
        ));
    }

    // (outcome, count) in first-seen order; outcome sets are tiny.
    let mut tally: Vec<(T, usize)> = Vec::new();
    for _ in 0..trials {
        let outcome = trial()?;
        match tally.iter_mut().find(|(seen, _)| *seen == outcome) {
            Some((_, count)) => *count += 1,
            None => tally.push((outcome, 1)),
        }
    }

    let mut best = &tally[0];
    for entry in &tally[1..] {
        if entry.1 > best.1 {
            best = entry;
        }
    }

    info!(
        mode = ?best.0,
        frequency = best.1,
        trials,
        distinct = tally.len(),
        "Mode estimated"
    );
    Ok(best.0.clone())
}

/// Mode of `search` over `trials` independent runs sharing `rng`.
pub fn estimate_search_mode<S: ParameterSearch>(
    search: &S,
    trials: usize,
    rng: &mut dyn RandomSource,
) -> Result<SearchOutcome<S::Value>> {
    estimate_mode(trials, || search.search(&mut *rng))
}

pub fn best_depot_capacity(
    trials: usize,
    rng: &mut dyn RandomSource,
) -> Result<SearchOutcome<u32>> {
    estimate_search_mode(&MinimalDepotCapacity::preset()?, trials, rng)
}

pub fn best_review_period(
    trials: usize,
    rng: &mut dyn RandomSource,
) -> Result<SearchOutcome<u32>> {
    estimate_search_mode(&MaximalReviewPeriod::preset()?, trials, rng)
}

pub fn best_combination(
    trials: usize,
    rng: &mut dyn RandomSource,
) -> Result<SearchOutcome<PolicyPair>> {
    estimate_search_mode(&OptimalCombination::preset()?, trials, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rng::SimRng;

    #[test]
    fn test_constant_trial_yields_constant() {
        for trials in [1, 2, 17, 200] {
            assert_eq!(estimate_mode(trials, || Ok(7)).unwrap(), 7);
        }
    }

    #[test]
    fn test_zero_trials_rejected() {
        assert!(matches!(
            estimate_mode(0, || Ok(7)),
            Err(InventoryError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_most_frequent_wins() {
        let script = [1, 2, 2, 3, 2, 1];
        let mut i = 0;
        let mode = estimate_mode(script.len(), || {
            let v = script[i];
            i += 1;
            Ok(v)
        })
        .unwrap();
        assert_eq!(mode, 2);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let script = [
            SearchOutcome::NotFound,
            SearchOutcome::Found(4),
            SearchOutcome::Found(4),
            SearchOutcome::NotFound,
        ];
        let mut i = 0;
        let mode = estimate_mode(script.len(), || {
            let v = script[i];
            i += 1;
            Ok(v)
        })
        .unwrap();
        assert_eq!(mode, SearchOutcome::NotFound);
    }

    #[test]
    fn test_trial_error_propagates() {
        let result: Result<u32> =
            estimate_mode(5, || Err(InventoryError::configuration("bad table")));
        assert!(result.is_err());
    }

    #[test]
    fn test_seeded_estimates_repeat() {
        let a = best_depot_capacity(10, &mut SimRng::new(11)).unwrap();
        let b = best_depot_capacity(10, &mut SimRng::new(11)).unwrap();
        assert_eq!(a, b);

        let period = best_review_period(10, &mut SimRng::new(11)).unwrap();
        if let SearchOutcome::Found(p) = period {
            assert!((4..14).contains(&p));
        }
    }
}
