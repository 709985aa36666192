//! # bookscout
//!
//! Unified book search across three external providers (Aladin, Kakao,
//! Naver). One keyword fans out to all providers concurrently; partial
//! failures are tolerated and merged into a single result with derived
//! statistics.
//!
//! ## Architecture
//!
//! - [`providers`]: per-provider clients with native request/response schemas
//! - [`facade`]: concurrent fan-out/fan-in aggregation over the providers
//! - [`models`]: the unified result and statistics types
//! - [`http`]: REST presentation layer (pure marshalling)
//! - [`config`]: credentials and tuning
//! - [`utils`]: shared HTTP client

pub mod config;
pub mod facade;
pub mod http;
pub mod models;
pub mod providers;
pub mod utils;

// Re-export commonly used types
pub use facade::{ProviderSelection, SearchFacade};
pub use models::{SearchStatistics, UnifiedSearchResult};
pub use providers::{ProviderError, ProviderKind, ValidationError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
