// src/model/mod.rs

pub mod demand;
pub mod distribution;
pub mod ledger;
pub mod rng;
