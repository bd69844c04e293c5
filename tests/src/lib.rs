//! Shared fixtures for the cross-crate scenarios.

pub mod fixtures;

#[cfg(test)]
mod end_to_end;
