//! # protodox Bench
//!
//! Benchmarking utilities for protodox performance testing.

pub mod corpus;
pub mod timing;
