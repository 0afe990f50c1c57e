// src/simulation/mod.rs

pub mod config;
pub mod engine;
