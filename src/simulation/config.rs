// src/simulation/config.rs

use crate::error::{InventoryError, Result};
use serde::{Deserialize, Serialize};

/// What a periodic review does when an earlier order has not arrived yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReorderDiscipline {
    /// Every review places an order; a pending countdown is replaced by the
    /// freshly drawn lead time.
    #[default]
    RearmEveryReview,
    /// A review that finds an order outstanding places nothing.
    SkipWhilePending,
}

/// Policy parameters for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub horizon_days: u32,
    pub depot_capacity: u32,
    pub review_period: u32,
    pub initial_front_stock: u32,
    /// Front stock capacity; also the batch size pulled from the depot.
    pub front_capacity: u32,
    pub reorder: ReorderDiscipline,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            horizon_days: 20,
            depot_capacity: 30,
            review_period: 6,
            initial_front_stock: 4,
            front_capacity: 10,
            reorder: ReorderDiscipline::RearmEveryReview,
        }
    }
}

impl PolicyConfig {
    pub fn new(horizon_days: u32, depot_capacity: u32, review_period: u32) -> Self {
        Self {
            horizon_days,
            depot_capacity,
            review_period,
            ..Self::default()
        }
    }

    pub fn with_depot_capacity(&self, depot_capacity: u32) -> Self {
        Self {
            depot_capacity,
            ..self.clone()
        }
    }

    pub fn with_review_period(&self, review_period: u32) -> Self {
        Self {
            review_period,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            return Err(InventoryError::invalid("horizon must be at least one day"));
        }
        if self.review_period == 0 {
            return Err(InventoryError::invalid(
                "review period must be at least one day",
            ));
        }
        if self.front_capacity == 0 {
            return Err(InventoryError::invalid("front capacity must be positive"));
        }
        if self.initial_front_stock > self.front_capacity {
            return Err(InventoryError::invalid(format!(
                "initial front stock {} exceeds front capacity {}",
                self.initial_front_stock, self.front_capacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PolicyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let config = PolicyConfig::new(0, 30, 6);
        assert!(matches!(
            config.validate(),
            Err(InventoryError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_zero_review_period_rejected() {
        assert!(PolicyConfig::new(20, 30, 0).validate().is_err());
    }

    #[test]
    fn test_overfull_front_rejected() {
        let config = PolicyConfig {
            initial_front_stock: 11,
            ..PolicyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_helpers_keep_other_fields() {
        let base = PolicyConfig {
            reorder: ReorderDiscipline::SkipWhilePending,
            ..PolicyConfig::new(40, 30, 6)
        };
        let tuned = base.with_depot_capacity(15).with_review_period(3);
        assert_eq!(tuned.horizon_days, 40);
        assert_eq!(tuned.depot_capacity, 15);
        assert_eq!(tuned.review_period, 3);
        assert_eq!(tuned.reorder, ReorderDiscipline::SkipWhilePending);
    }
}
