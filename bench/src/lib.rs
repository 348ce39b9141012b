//! Benchmark utilities for flyby.
//!
//! This crate provides the pieces needed to run repeatable flythrough
//! benchmarks and to measure the benchmark core itself:
//!
//! - **Scenarios**: deterministic camera routes (orbit, sweep, random walk)
//! - **Frame profiles**: synthetic frame timings for simulated runs
//! - **Memory tracking**: a dhat-backed heap probe
//! - **Tick benchmarks**: criterion measurements of the per-tick cost
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p flyby_bench
//!
//! # Run specific benchmark group
//! cargo bench -p flyby_bench -- follower
//!
//! # Run with memory profiling (slower)
//! cargo bench -p flyby_bench --features memory_profiling
//! ```
//!
//! # Benchmark Results
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.
//! Memory profiling results are written to `dhat-heap.json` for viewing with
//! DHAT's viewer.

pub mod frame_profile;
pub mod memory;
pub mod scenarios;

pub use frame_profile::FrameProfile;
pub use memory::DhatProbe;
pub use scenarios::Scenario;
