// src/lib.rs

//! Two-echelon hospital inventory simulation.
//!
//! A small front shelf (capacity 10) is fed from a larger depot, which is
//! replenished on a periodic review with a stochastic lead time. The crate
//! simulates that policy day by day and searches policy parameters for
//! shortage-free settings by repeated simulation.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{InventoryError, Result};
pub use model::demand::SimulationModels;
pub use model::distribution::DistributionTable;
pub use model::ledger::{DayRecord, OrderCountdown};
pub use model::rng::{RandomSource, ScriptedSource, SimRng};
pub use simulation::config::{PolicyConfig, ReorderDiscipline};
pub use simulation::engine::{
    run_simulation, run_simulation_with, InventorySimulation, SimulationResult, SimulationSummary,
};
pub use strategy::implementations::{
    find_maximal_review_period, find_minimal_depot_capacity, find_optimal_combination,
    MaximalReviewPeriod, MinimalDepotCapacity, OptimalCombination,
};
pub use strategy::optimization::{estimate_mode, estimate_search_mode};
pub use strategy::traits::{ParameterSearch, PolicyPair, SearchOutcome, SearchRange};
