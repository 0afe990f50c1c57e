// src/io/reporting.rs

use crate::error::{InventoryError, Result};
use crate::model::ledger::DayRecord;
use crate::model::rng::RandomSource;
use crate::simulation::config::PolicyConfig;
use crate::simulation::engine::{run_simulation, SimulationSummary};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

/// Flat CSV row; countdown and optional fields rendered the way the table shows them.
#[derive(Debug, Serialize)]
struct LedgerRow {
    day: u32,
    demand: u32,
    beginning_front_stock: u32,
    front_shortage: u32,
    depot_transfer: u32,
    ending_front_stock: u32,
    depot_stock: u32,
    depot_shortage: u32,
    days_until_review: u32,
    lead_time_drawn: String,
    order_countdown: String,
}

impl From<&DayRecord> for LedgerRow {
    fn from(record: &DayRecord) -> Self {
        Self {
            day: record.day,
            demand: record.demand,
            beginning_front_stock: record.beginning_front_stock,
            front_shortage: record.front_shortage,
            depot_transfer: record.depot_transfer,
            ending_front_stock: record.ending_front_stock,
            depot_stock: record.depot_stock,
            depot_shortage: record.depot_shortage,
            days_until_review: record.days_until_review,
            lead_time_drawn: record
                .lead_time_drawn
                .map_or_else(|| "-".to_string(), |lt| lt.to_string()),
            order_countdown: record.order_countdown.to_string(),
        }
    }
}

/// Writes the ledger as CSV, one row per day with a header.
///
/// # Arguments
/// * `writer` - Destination, e.g. stdout or an in-memory buffer.
/// * `ledger` - The day records of one run.
pub fn write_ledger<W: Write>(writer: W, ledger: &[DayRecord]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for record in ledger {
        wtr.serialize(LedgerRow::from(record))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Human-readable statistics block for one run.
pub fn format_summary(summary: &SimulationSummary) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Average Front Stock: {:.2}", summary.avg_front_stock);
    let _ = writeln!(out, "Average Depot Stock: {:.2}", summary.avg_depot_stock);
    let _ = writeln!(out, "Total Shortage Days: {}", summary.total_shortage_days);
    let _ = writeln!(out, "Depot Shortage Days: {}", summary.depot_shortage_days);
    let _ = writeln!(out, "Experimental Avg Demand: {:.2}", summary.experimental_avg_demand);
    let _ = writeln!(out, "Experimental Avg Lead Time: {:.2}", summary.experimental_avg_lead_time);
    let _ = writeln!(out, "Theoretical Avg Demand: {:.2}", summary.theoretical_avg_demand);
    let _ = writeln!(out, "Theoretical Avg Lead Time: {:.2}", summary.theoretical_avg_lead_time);
    let _ = writeln!(out, "Final Depot Shortage: {}", summary.final_depot_shortage);
    out
}

/// Per-statistic means across several independent runs of the same policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchAverages {
    pub runs: usize,
    pub avg_front_stock: f64,
    pub avg_depot_stock: f64,
    pub avg_shortage_days: f64,
    pub avg_demand: f64,
    pub avg_lead_time: f64,
    pub avg_final_depot_shortage: f64,
}

/// Runs `config` `runs` times and averages the per-run summaries.
pub fn run_batch<R: RandomSource + ?Sized>(
    config: &PolicyConfig,
    runs: usize,
    rng: &mut R,
) -> Result<BatchAverages> {
    if runs == 0 {
        return Err(InventoryError::invalid("a batch needs at least one run"));
    }

    let mut totals = BatchAverages {
        runs,
        avg_front_stock: 0.0,
        avg_depot_stock: 0.0,
        avg_shortage_days: 0.0,
        avg_demand: 0.0,
        avg_lead_time: 0.0,
        avg_final_depot_shortage: 0.0,
    };

    for _ in 0..runs {
        let summary = run_simulation(config.clone(), rng)?.summary;
        totals.avg_front_stock += summary.avg_front_stock;
        totals.avg_depot_stock += summary.avg_depot_stock;
        totals.avg_shortage_days += summary.total_shortage_days as f64;
        totals.avg_demand += summary.experimental_avg_demand;
        totals.avg_lead_time += summary.experimental_avg_lead_time;
        totals.avg_final_depot_shortage += summary.final_depot_shortage as f64;
    }

    let n = runs as f64;
    totals.avg_front_stock /= n;
    totals.avg_depot_stock /= n;
    totals.avg_shortage_days /= n;
    totals.avg_demand /= n;
    totals.avg_lead_time /= n;
    totals.avg_final_depot_shortage /= n;
    Ok(totals)
}

pub fn format_batch(batch: &BatchAverages) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Results for {} runs:", batch.runs);
    let _ = writeln!(out, "------------------------------");
    let _ = writeln!(out, "Average Front Stock: {:.2}", batch.avg_front_stock);
    let _ = writeln!(out, "Average Depot Stock: {:.2}", batch.avg_depot_stock);
    let _ = writeln!(out, "Average Shortage Days: {:.2}", batch.avg_shortage_days);
    let _ = writeln!(out, "Average Demand: {:.2}", batch.avg_demand);
    let _ = writeln!(out, "Average Lead Time: {:.2}", batch.avg_lead_time);
    let _ = writeln!(out, "Average Final Depot Shortage: {:.2}", batch.avg_final_depot_shortage);
    out
}
