// src/simulation/engine.rs

use crate::error::Result;
use crate::model::demand::SimulationModels;
use crate::model::ledger::{DayRecord, InventoryState, OrderCountdown};
use crate::model::rng::RandomSource;
use crate::simulation::config::{PolicyConfig, ReorderDiscipline};
use serde::Serialize;
use tracing::{debug, trace};

/// Aggregated statistics of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub avg_front_stock: f64,
    pub avg_depot_stock: f64,
    pub total_shortage_days: u32,
    /// Days on which demand hit an empty depot.
    pub depot_shortage_days: u32,
    pub experimental_avg_demand: f64,
    pub experimental_avg_lead_time: f64,
    pub theoretical_avg_demand: f64,
    pub theoretical_avg_lead_time: f64,
    /// Depot shortage still outstanding at the end of the horizon.
    pub final_depot_shortage: u32,
}

/// Full output of a run; owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub ledger: Vec<DayRecord>,
    pub summary: SimulationSummary,
}

/// One run of the two-echelon hospital inventory under a periodic review policy.
pub struct InventorySimulation<'a> {
    config: PolicyConfig,
    models: &'a SimulationModels,

    pub state: InventoryState,
    pub review_countdown: u32,
    pub order: OrderCountdown,
    pub current_day: u32,

    demand_samples: Vec<u32>,
    lead_time_samples: Vec<u32>,
    pub ledger: Vec<DayRecord>,
}

impl<'a> InventorySimulation<'a> {
    /// Validates `config` before any state is built.
    pub fn new(config: PolicyConfig, models: &'a SimulationModels) -> Result<Self> {
        config.validate()?;

        let state = InventoryState::new(
            config.initial_front_stock,
            config.depot_capacity,
            config.front_capacity,
        );
        let review_countdown = config.review_period - 1;
        let horizon = config.horizon_days as usize;

        Ok(Self {
            config,
            models,
            state,
            review_countdown,
            order: OrderCountdown::Inactive,
            current_day: 1,
            demand_samples: Vec::with_capacity(horizon),
            lead_time_samples: Vec::new(),
            ledger: Vec::with_capacity(horizon),
        })
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn run<R: RandomSource + ?Sized>(mut self, rng: &mut R) -> Result<SimulationResult> {
        while self.current_day <= self.config.horizon_days {
            self.step(rng)?;
        }

        let summary = self.summarize();
        debug!(
            days = self.config.horizon_days,
            depot_capacity = self.config.depot_capacity,
            review_period = self.config.review_period,
            final_depot_shortage = summary.final_depot_shortage,
            "Simulation finished"
        );

        Ok(SimulationResult {
            ledger: self.ledger,
            summary,
        })
    }

    /// Advances the run by one day and appends that day's record.
    pub fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<&DayRecord> {
        let day = self.current_day;

        // 1. Demand
        let demand = self.models.draw_demand(rng)?;
        self.demand_samples.push(demand);

        // 2-3. Serve from the front stock, falling back on the depot
        let beginning_front_stock = self.state.front_stock;
        let fulfilment = self.state.fulfil(demand);

        // 4. Review clock
        let lead_time_drawn = self.review(rng)?;

        // 5. Order arrival
        self.advance_order(day);

        // 6. Record
        trace!(
            day,
            demand,
            front = self.state.front_stock,
            depot = self.state.depot_stock,
            depot_shortage = self.state.depot_shortage,
            "Day simulated"
        );
        self.ledger.push(DayRecord {
            day,
            demand,
            beginning_front_stock,
            front_shortage: fulfilment.shortage,
            depot_transfer: fulfilment.transferred,
            ending_front_stock: self.state.front_stock,
            depot_stock: self.state.depot_stock,
            depot_shortage: self.state.depot_shortage,
            days_until_review: self.review_countdown,
            lead_time_drawn,
            order_countdown: self.order,
        });
        self.current_day += 1;

        Ok(&self.ledger[self.ledger.len() - 1])
    }

    /// Places an order when the review countdown is due, then ticks the clock.
    fn review<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<Option<u32>> {
        if self.review_countdown > 0 {
            self.review_countdown -= 1;
            return Ok(None);
        }
        self.review_countdown = self.config.review_period - 1;

        if self.config.reorder == ReorderDiscipline::SkipWhilePending && self.order.is_pending() {
            debug!(day = self.current_day, "Review skipped: order still pending");
            return Ok(None);
        }

        let lead_time = self.models.draw_lead_time(rng)?;
        self.lead_time_samples.push(lead_time);
        if let OrderCountdown::Counting(remaining) = self.order {
            debug!(
                day = self.current_day,
                remaining, lead_time, "Pending order re-armed"
            );
        } else {
            debug!(day = self.current_day, lead_time, "Order placed");
        }
        self.order = OrderCountdown::Counting(lead_time);
        Ok(Some(lead_time))
    }

    fn advance_order(&mut self, day: u32) {
        if let OrderCountdown::Counting(n) = self.order {
            let remaining = n.saturating_sub(1);
            if remaining == 0 {
                self.state.receive_delivery(self.config.depot_capacity);
                self.order = OrderCountdown::Inactive;
                debug!(
                    day,
                    depot = self.state.depot_stock,
                    depot_shortage = self.state.depot_shortage,
                    "Order arrived"
                );
            } else {
                self.order = OrderCountdown::Counting(remaining);
            }
        }
    }

    fn summarize(&self) -> SimulationSummary {
        SimulationSummary {
            avg_front_stock: mean(self.ledger.iter().map(|r| r.ending_front_stock)),
            avg_depot_stock: mean(self.ledger.iter().map(|r| r.depot_stock)),
            total_shortage_days: self.state.shortage_days,
            depot_shortage_days: self.state.depot_shortage_days,
            experimental_avg_demand: mean(self.demand_samples.iter().copied()),
            experimental_avg_lead_time: mean(self.lead_time_samples.iter().copied()),
            theoretical_avg_demand: self.models.demand.theoretical_mean(),
            theoretical_avg_lead_time: self.models.lead_time.theoretical_mean(),
            final_depot_shortage: self.state.depot_shortage,
        }
    }
}

/// Arithmetic mean; 0 for an empty sequence.
fn mean(values: impl Iterator<Item = u32>) -> f64 {
    let (sum, count) = values.fold((0u64, 0u64), |(s, c), v| (s + v as u64, c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Runs `config` with the standard demand and lead-time tables.
pub fn run_simulation<R: RandomSource + ?Sized>(
    config: PolicyConfig,
    rng: &mut R,
) -> Result<SimulationResult> {
    let models = SimulationModels::standard()?;
    run_simulation_with(config, &models, rng)
}

/// Runs `config` with caller-supplied tables.
pub fn run_simulation_with<R: RandomSource + ?Sized>(
    config: PolicyConfig,
    models: &SimulationModels,
    rng: &mut R,
) -> Result<SimulationResult> {
    InventorySimulation::new(config, models)?.run(rng)
}
