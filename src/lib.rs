//! Contagion - permutation tests for social contagion of cheating
//!
//! This library loads multiplayer match logs (cheater records, team
//! assignments and kill events) and asks whether players who interact with
//! cheaters start cheating more often than chance would predict. The chance
//! baseline is built by permuting player identities within each match while
//! keeping event timing and match structure fixed.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod hypothesis;
pub mod loader;
pub mod montecarlo;
pub mod randomize;
pub mod records;
pub mod report;
