//! AI components

pub mod fsm;
pub mod vocalization;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod fsm_tests;

// Re-export all components
pub use fsm::*;
pub use vocalization::*;
