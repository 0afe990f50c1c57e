// src/model/rng.rs

use crate::error::{InventoryError, Result};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// A source of uniform random fractions in `[0, 1)`.
///
/// Every stochastic draw in the crate goes through this trait so a run can
/// be replayed from a seed, or fed a scripted sequence in tests.
pub trait RandomSource {
    fn draw(&mut self) -> f64;
}

/// Seedable PCG generator. The same seed always yields the same ledger.
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Seeds from the operating system; the chosen seed is still reported
    /// by [`SimRng::seed`] so the run can be replayed.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn draw(&mut self) -> f64 {
        self.rng.gen()
    }
}

/// Replays a fixed sequence of draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Fails if `draws` is empty or any draw lies outside `[0, 1)`.
    pub fn new(draws: Vec<f64>) -> Result<Self> {
        if draws.is_empty() {
            return Err(InventoryError::invalid(
                "scripted source needs at least one draw",
            ));
        }
        if let Some(bad) = draws.iter().find(|d| !(0.0..1.0).contains(*d)) {
            return Err(InventoryError::invalid(format!(
                "scripted draw {} lies outside [0, 1)",
                bad
            )));
        }
        Ok(Self { draws, cursor: 0 })
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn draw(&mut self) -> f64 {
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}
