//! Shared test utilities

pub mod fixtures;
