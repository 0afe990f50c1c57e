// src/model/ledger.rs

use serde::Serialize;
use std::fmt;

/// Lifecycle of a replenishment order: none outstanding, or arriving in `n` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OrderCountdown {
    #[default]
    Inactive,
    Counting(u32),
}

impl OrderCountdown {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Counting(_))
    }
}

impl fmt::Display for OrderCountdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => write!(f, "-"),
            Self::Counting(n) => write!(f, "{}", n),
        }
    }
}

/// Snapshot of one simulated day, taken after all of that day's transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    pub day: u32,
    pub demand: u32,
    pub beginning_front_stock: u32,
    pub front_shortage: u32,
    /// Units pulled from the depot into the front stock today.
    pub depot_transfer: u32,
    pub ending_front_stock: u32,
    pub depot_stock: u32,
    /// Running depot shortage still waiting on a delivery.
    pub depot_shortage: u32,
    pub days_until_review: u32,
    /// Set when a review placed an order today.
    pub lead_time_drawn: Option<u32>,
    pub order_countdown: OrderCountdown,
}

/// What happened when a day's demand met the front stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fulfilment {
    pub shortage: u32,
    pub transferred: u32,
}

/// Live two-echelon stock: the point-of-use front shelf and the backup depot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryState {
    pub front_stock: u32,
    pub depot_stock: u32,
    pub front_capacity: u32,

    // Running counters
    pub depot_shortage: u32,
    pub shortage_days: u32,
    pub depot_shortage_days: u32,
}

impl InventoryState {
    pub fn new(front_stock: u32, depot_stock: u32, front_capacity: u32) -> Self {
        Self {
            front_stock,
            depot_stock,
            front_capacity,
            depot_shortage: 0,
            shortage_days: 0,
            depot_shortage_days: 0,
        }
    }

    /// Moves up to one front-capacity batch from the depot to the front.
    /// Returns the number of units moved.
    fn pull_from_depot(&mut self) -> u32 {
        let pulled = self.front_capacity.min(self.depot_stock);
        self.front_stock += pulled;
        self.depot_stock -= pulled;
        pulled
    }

    /// Serves one day's demand from the front stock.
    ///
    /// A front stock emptied exactly by demand is topped up from the depot the
    /// same day. A front stock that cannot cover demand records a shortage,
    /// pulls a batch from the depot, and charges whatever is still uncovered
    /// to the running depot shortage.
    pub fn fulfil(&mut self, demand: u32) -> Fulfilment {
        if self.front_stock >= demand {
            self.front_stock -= demand;
            let transferred = if self.front_stock == 0 {
                self.pull_from_depot()
            } else {
                0
            };
            return Fulfilment {
                shortage: 0,
                transferred,
            };
        }

        let shortage = demand - self.front_stock;
        self.shortage_days += 1;

        if self.depot_stock > 0 {
            let transferred = self.pull_from_depot();
            if demand > self.front_stock {
                self.depot_shortage += demand - self.front_stock;
            }
            self.front_stock = self.front_stock.saturating_sub(demand);
            Fulfilment {
                shortage,
                transferred,
            }
        } else {
            self.depot_shortage += shortage;
            self.depot_shortage_days += 1;
            self.front_stock = 0;
            Fulfilment {
                shortage,
                transferred: 0,
            }
        }
    }

    /// Refills the depot to `capacity` and nets the delivery against the
    /// running depot shortage.
    pub fn receive_delivery(&mut self, capacity: u32) {
        let delivered = capacity;
        self.depot_stock = delivered.saturating_sub(self.depot_shortage);
        self.depot_shortage = self.depot_shortage.saturating_sub(delivered);
    }
}
