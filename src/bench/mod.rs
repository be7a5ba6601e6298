//! Bench Module
//!
//! Everything the benchmark driver needs around the store.
//!
//! ## Components
//! - `Timer`: NotStarted → Started → Stopped state machine around a steady clock
//! - `generate_test_data`: predictable seed records for a store
//! - `naive_find_matching_records`: per-record branch-and-parse baseline
//! - `PerformanceRunner`: times the store against the baseline

mod generator;
mod naive;
mod runner;
mod timer;

pub use generator::{generate_test_data, make_record};
pub use naive::naive_find_matching_records;
pub use runner::{Measurement, PerformanceRunner};
pub use timer::{TimeUnit, Timer, TimerState, CANNOT_START, CANNOT_STOP, NOT_MEASURED};
