// src/model/demand.rs

use crate::error::Result;
use crate::model::distribution::DistributionTable;
use crate::model::rng::RandomSource;

/// Cumulative table of daily demand (occupied rooms, one box each).
pub const DEMAND_BUCKETS: [(u32, f64); 5] =
    [(1, 0.10), (2, 0.25), (3, 0.60), (4, 0.80), (5, 1.00)];

/// Cumulative table of replenishment lead times, in days.
pub const LEAD_TIME_BUCKETS: [(u32, f64); 3] = [(1, 0.40), (2, 0.75), (3, 1.00)];

/// The two stochastic inputs of a run: daily demand and order lead time.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationModels {
    pub demand: DistributionTable,
    pub lead_time: DistributionTable,
}

impl SimulationModels {
    pub fn new(demand: DistributionTable, lead_time: DistributionTable) -> Self {
        Self { demand, lead_time }
    }

    /// The standard hospital tables.
    pub fn standard() -> Result<Self> {
        Ok(Self {
            demand: DistributionTable::new(DEMAND_BUCKETS.to_vec())?,
            lead_time: DistributionTable::new(LEAD_TIME_BUCKETS.to_vec())?,
        })
    }

    pub fn draw_demand<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<u32> {
        self.demand.sample(rng)
    }

    pub fn draw_lead_time<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<u32> {
        self.lead_time.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rng::ScriptedSource;

    #[test]
    fn test_standard_tables_are_valid() {
        let models = SimulationModels::standard().unwrap();
        assert_eq!(models.demand.entries().len(), 5);
        assert_eq!(models.lead_time.entries().len(), 3);
    }

    #[test]
    fn test_draws_use_their_own_table() {
        let models = SimulationModels::standard().unwrap();
        let mut src = ScriptedSource::new(vec![0.5]).unwrap();
        assert_eq!(models.draw_demand(&mut src).unwrap(), 3);
        assert_eq!(models.draw_lead_time(&mut src).unwrap(), 2);
    }
}
