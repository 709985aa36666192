//! Core data structures shared across the facade and presentation layers.

mod unified;

pub use unified::{SearchStatistics, UnifiedSearchResult};
