// src/strategy/traits.rs

use crate::error::{InventoryError, Result};
use crate::model::rng::RandomSource;
use serde::Serialize;
use std::fmt::{self, Debug};

/// Half-open scan range `[start, end)` walked in `step` increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchRange {
    pub start: u32,
    pub end: u32,
    pub step: u32,
}

impl SearchRange {
    pub fn new(start: u32, end: u32, step: u32) -> Result<Self> {
        if step == 0 {
            return Err(InventoryError::invalid("search step must be positive"));
        }
        Ok(Self { start, end, step })
    }

    /// Candidate values in ascending order. Empty when `start >= end`.
    pub fn candidates(&self) -> impl Iterator<Item = u32> {
        (self.start..self.end).step_by(self.step.max(1) as usize)
    }
}

/// A depot capacity together with a review period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PolicyPair {
    pub depot_capacity: u32,
    pub review_period: u32,
}

impl fmt::Display for PolicyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(capacity {}, review every {} days)",
            self.depot_capacity, self.review_period
        )
    }
}

/// Result of a parameter search. Exhausting the range is a normal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SearchOutcome<T> {
    Found(T),
    NotFound,
}

impl<T> SearchOutcome<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl<T> From<Option<T>> for SearchOutcome<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}

impl<T: fmt::Display> fmt::Display for SearchOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(value) => write!(f, "{}", value),
            Self::NotFound => write!(f, "not found"),
        }
    }
}

/// A strategy that scans policy-parameter space by repeated simulation.
///
/// Each call draws fresh randomness, so two calls with different sources may
/// disagree; see [`estimate_mode`](crate::strategy::optimization::estimate_mode).
pub trait ParameterSearch: Debug {
    type Value: Clone + PartialEq + Debug;

    fn search(&self, rng: &mut dyn RandomSource) -> Result<SearchOutcome<Self::Value>>;
}
