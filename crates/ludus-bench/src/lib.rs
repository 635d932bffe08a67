//! Benchmark support for the ludus game-playing core.
//!
//! The crate body is intentionally empty: the benchmarks under
//! `benches/` carry their own fixtures.
