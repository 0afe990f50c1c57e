// src/strategy/implementations.rs

use crate::error::Result;
use crate::model::demand::SimulationModels;
use crate::model::rng::RandomSource;
use crate::simulation::config::PolicyConfig;
use crate::simulation::engine::run_simulation_with;
use crate::strategy::traits::{ParameterSearch, PolicyPair, SearchOutcome, SearchRange};
use tracing::{debug, info};

// =========================================================================
// 1. Minimal Depot Capacity
// =========================================================================

/// Scans capacities in ascending order and returns the first one whose run
/// ends with no depot shortage. Horizon and review period come from `baseline`.
pub fn find_minimal_depot_capacity(
    capacities: SearchRange,
    baseline: &PolicyConfig,
    models: &SimulationModels,
    rng: &mut dyn RandomSource,
) -> Result<SearchOutcome<u32>> {
    baseline.with_depot_capacity(0).validate()?;

    for capacity in capacities.candidates() {
        let result = run_simulation_with(baseline.with_depot_capacity(capacity), models, &mut *rng)?;
        let shortage = result.summary.final_depot_shortage;
        debug!(capacity, shortage, "Capacity candidate simulated");
        if shortage == 0 {
            info!(capacity, "Minimal shortage-free depot capacity found");
            return Ok(SearchOutcome::Found(capacity));
        }
    }

    info!(?capacities, "No shortage-free depot capacity in range");
    Ok(SearchOutcome::NotFound)
}

#[derive(Debug, Clone)]
pub struct MinimalDepotCapacity {
    pub capacities: SearchRange,
    pub baseline: PolicyConfig,
    pub models: SimulationModels,
}

impl MinimalDepotCapacity {
    pub fn new(capacities: SearchRange, baseline: PolicyConfig, models: SimulationModels) -> Self {
        Self {
            capacities,
            baseline,
            models,
        }
    }

    /// Capacities 10, 15, .. 35 over a 40-day horizon with a 6-day review.
    pub fn preset() -> Result<Self> {
        Ok(Self::new(
            SearchRange::new(10, 40, 5)?,
            PolicyConfig::new(40, 30, 6),
            SimulationModels::standard()?,
        ))
    }
}

impl ParameterSearch for MinimalDepotCapacity {
    type Value = u32;

    fn search(&self, rng: &mut dyn RandomSource) -> Result<SearchOutcome<u32>> {
        find_minimal_depot_capacity(self.capacities, &self.baseline, &self.models, rng)
    }
}

// =========================================================================
// 2. Maximal Review Period
// =========================================================================

/// Scans review periods in ascending order. At the first period whose run ends
/// with a depot shortage, returns the period just before it: the last one
/// observed shortage-free.
///
/// A single stochastic run per candidate means shortage onset need not be
/// monotonic; wrap this in a mode estimate for a stable answer.
pub fn find_maximal_review_period(
    periods: SearchRange,
    baseline: &PolicyConfig,
    models: &SimulationModels,
    rng: &mut dyn RandomSource,
) -> Result<SearchOutcome<u32>> {
    baseline.with_review_period(1).validate()?;

    for period in periods.candidates() {
        let result = run_simulation_with(baseline.with_review_period(period), models, &mut *rng)?;
        let shortage = result.summary.final_depot_shortage;
        debug!(period, shortage, "Review period candidate simulated");
        if shortage != 0 {
            let last_clean = period - 1;
            info!(review_period = last_clean, "Maximal shortage-free review period found");
            return Ok(SearchOutcome::Found(last_clean));
        }
    }

    info!(?periods, "Depot shortage never appeared in review period range");
    Ok(SearchOutcome::NotFound)
}

#[derive(Debug, Clone)]
pub struct MaximalReviewPeriod {
    pub periods: SearchRange,
    pub baseline: PolicyConfig,
    pub models: SimulationModels,
}

impl MaximalReviewPeriod {
    pub fn new(periods: SearchRange, baseline: PolicyConfig, models: SimulationModels) -> Self {
        Self {
            periods,
            baseline,
            models,
        }
    }

    /// Periods 5 through 14 over a 20-day horizon with a depot of 30.
    pub fn preset() -> Result<Self> {
        Ok(Self::new(
            SearchRange::new(5, 15, 1)?,
            PolicyConfig::new(20, 30, 6),
            SimulationModels::standard()?,
        ))
    }
}

impl ParameterSearch for MaximalReviewPeriod {
    type Value = u32;

    fn search(&self, rng: &mut dyn RandomSource) -> Result<SearchOutcome<u32>> {
        find_maximal_review_period(self.periods, &self.baseline, &self.models, rng)
    }
}

// =========================================================================
// 3. Optimal Combination
// =========================================================================

/// Grid scan over capacity (outer) and review period (inner).
///
/// Returns the first pair in scan order that ends shortage-free; otherwise the
/// pair with the smallest final depot shortage, earliest pair winning ties.
/// `NotFound` only when the grid is empty.
pub fn find_optimal_combination(
    capacities: SearchRange,
    periods: SearchRange,
    baseline: &PolicyConfig,
    models: &SimulationModels,
    rng: &mut dyn RandomSource,
) -> Result<SearchOutcome<PolicyPair>> {
    baseline
        .with_depot_capacity(0)
        .with_review_period(1)
        .validate()?;

    let mut best: Option<(u32, PolicyPair)> = None;

    for depot_capacity in capacities.candidates() {
        for review_period in periods.candidates() {
            let config = PolicyConfig {
                depot_capacity,
                review_period,
                ..baseline.clone()
            };
            let result = run_simulation_with(config, models, &mut *rng)?;
            let shortage = result.summary.final_depot_shortage;
            let pair = PolicyPair {
                depot_capacity,
                review_period,
            };
            debug!(depot_capacity, review_period, shortage, "Policy pair simulated");

            if shortage == 0 {
                info!(%pair, "Shortage-free policy pair found");
                return Ok(SearchOutcome::Found(pair));
            }
            if best.map_or(true, |(lowest, _)| shortage < lowest) {
                best = Some((shortage, pair));
            }
        }
    }

    if let Some((shortage, pair)) = best {
        info!(%pair, shortage, "No shortage-free pair; returning least-shortage pair");
    }
    Ok(best.map(|(_, pair)| pair).into())
}

#[derive(Debug, Clone)]
pub struct OptimalCombination {
    pub capacities: SearchRange,
    pub periods: SearchRange,
    pub baseline: PolicyConfig,
    pub models: SimulationModels,
}

impl OptimalCombination {
    pub fn new(
        capacities: SearchRange,
        periods: SearchRange,
        baseline: PolicyConfig,
        models: SimulationModels,
    ) -> Self {
        Self {
            capacities,
            periods,
            baseline,
            models,
        }
    }

    /// Capacities 20, 22, .. 38 against periods 2 through 10 over 100 days.
    pub fn preset() -> Result<Self> {
        Ok(Self::new(
            SearchRange::new(20, 40, 2)?,
            SearchRange::new(2, 11, 1)?,
            PolicyConfig::new(100, 30, 6),
            SimulationModels::standard()?,
        ))
    }
}

impl ParameterSearch for OptimalCombination {
    type Value = PolicyPair;

    fn search(&self, rng: &mut dyn RandomSource) -> Result<SearchOutcome<PolicyPair>> {
        find_optimal_combination(
            self.capacities,
            self.periods,
            &self.baseline,
            &self.models,
            rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use crate::model::distribution::DistributionTable;
    use crate::model::rng::{ScriptedSource, SimRng};

    /// Demand of exactly one unit every day, lead time of one day.
    fn calm_models() -> SimulationModels {
        SimulationModels::new(
            DistributionTable::new(vec![(1, 1.0)]).unwrap(),
            DistributionTable::new(vec![(1, 1.0)]).unwrap(),
        )
    }

    /// Demand of five units every day, lead time of three days.
    fn heavy_models() -> SimulationModels {
        SimulationModels::new(
            DistributionTable::new(vec![(5, 1.0)]).unwrap(),
            DistributionTable::new(vec![(3, 1.0)]).unwrap(),
        )
    }

    #[test]
    fn test_minimal_capacity_first_clean_candidate() {
        let mut rng = ScriptedSource::new(vec![0.5]).unwrap();
        let outcome = find_minimal_depot_capacity(
            SearchRange::new(0, 50, 10).unwrap(),
            &PolicyConfig::new(30, 0, 3),
            &heavy_models(),
            &mut rng,
        )
        .unwrap();

        // Five units a day over 30 days can't be met from a depot of 0.
        let capacity = outcome.found().unwrap();
        assert!(capacity > 0);
        let check = run_simulation_with(
            PolicyConfig::new(30, capacity, 3),
            &heavy_models(),
            &mut ScriptedSource::new(vec![0.5]).unwrap(),
        )
        .unwrap();
        assert_eq!(check.summary.final_depot_shortage, 0);
    }

    #[test]
    fn test_minimal_capacity_not_found() {
        let mut rng = ScriptedSource::new(vec![0.5]).unwrap();
        let outcome = find_minimal_depot_capacity(
            SearchRange::new(0, 3, 1).unwrap(),
            &PolicyConfig::new(40, 0, 30),
            &heavy_models(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(outcome, SearchOutcome::NotFound);
    }

    #[test]
    fn test_minimal_capacity_rejects_bad_baseline() {
        let mut rng = SimRng::new(1);
        let err = find_minimal_depot_capacity(
            SearchRange::new(10, 40, 5).unwrap(),
            &PolicyConfig::new(0, 30, 6),
            &calm_models(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_bad_baseline_rejected_even_for_empty_ranges() {
        let mut rng = SimRng::new(1);
        let bad = PolicyConfig::new(0, 30, 6);
        let empty = SearchRange::new(5, 5, 1).unwrap();

        let err = find_maximal_review_period(empty, &bad, &calm_models(), &mut rng).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidConfiguration { .. }));

        let err = find_optimal_combination(empty, empty, &bad, &calm_models(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_maximal_review_period_steps_back_one() {
        // Calm demand never runs the depot dry over 20 days with capacity 30,
        // so the scan finishes without finding an onset.
        let mut rng = ScriptedSource::new(vec![0.5]).unwrap();
        let outcome = find_maximal_review_period(
            SearchRange::new(1, 10, 1).unwrap(),
            &PolicyConfig::new(20, 30, 1),
            &calm_models(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(outcome, SearchOutcome::NotFound);

        // Heavy demand against an empty depot shows shortage from the first candidate.
        let outcome = find_maximal_review_period(
            SearchRange::new(4, 10, 1).unwrap(),
            &PolicyConfig::new(20, 0, 1),
            &heavy_models(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(outcome, SearchOutcome::Found(3));
    }

    #[test]
    fn test_optimal_combination_short_circuits() {
        let mut rng = ScriptedSource::new(vec![0.5]).unwrap();
        let outcome = find_optimal_combination(
            SearchRange::new(20, 40, 2).unwrap(),
            SearchRange::new(2, 11, 1).unwrap(),
            &PolicyConfig::new(30, 0, 1),
            &calm_models(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(
            outcome,
            SearchOutcome::Found(PolicyPair {
                depot_capacity: 20,
                review_period: 2
            })
        );
    }

    #[test]
    fn test_optimal_combination_falls_back_to_least_shortage() {
        let mut rng = ScriptedSource::new(vec![0.5]).unwrap();
        let outcome = find_optimal_combination(
            SearchRange::new(0, 3, 1).unwrap(),
            SearchRange::new(30, 32, 1).unwrap(),
            &PolicyConfig::new(40, 0, 1),
            &heavy_models(),
            &mut rng,
        )
        .unwrap();
        // More capacity always means less residual shortage here.
        let pair = outcome.found().unwrap();
        assert_eq!(pair.depot_capacity, 2);

        let empty = find_optimal_combination(
            SearchRange::new(5, 5, 1).unwrap(),
            SearchRange::new(2, 11, 1).unwrap(),
            &PolicyConfig::default(),
            &heavy_models(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(empty, SearchOutcome::NotFound);
    }

    #[test]
    fn test_presets_run_with_seeded_source() {
        let mut rng = SimRng::new(2024);
        let capacity = MinimalDepotCapacity::preset().unwrap().search(&mut rng).unwrap();
        if let SearchOutcome::Found(c) = capacity {
            assert!((10..40).contains(&c));
            assert_eq!(c % 5, 0);
        }

        let period = MaximalReviewPeriod::preset().unwrap().search(&mut rng).unwrap();
        if let SearchOutcome::Found(p) = period {
            assert!((4..14).contains(&p));
        }

        let pair = OptimalCombination::preset().unwrap().search(&mut rng).unwrap();
        assert!(pair.is_found());
    }

    #[test]
    fn test_search_is_deterministic_per_seed() {
        let search = MinimalDepotCapacity::preset().unwrap();
        let a = search.search(&mut SimRng::new(5)).unwrap();
        let b = search.search(&mut SimRng::new(5)).unwrap();
        assert_eq!(a, b);
    }
}
