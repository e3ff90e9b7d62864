//! Transit catalogue and routing engine.
//!
//! Stores stops and bus lines, derives per-line statistics, and answers
//! fastest-route queries over a graph that is built once from the finished
//! catalogue. The whole state can be persisted and restored as a unit.

pub mod catalogue;
pub mod config;
pub mod domain;
pub mod persist;
pub mod router;

#[cfg(test)]
mod fixtures;
