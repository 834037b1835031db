//! Pipeline for filtering and ranking friend-voted item candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - RecommendationEngine, which runs candidate generation, the filters and
//!   the final ranking
//!
//! ## Architecture
//! The engine processes candidates in stages:
//! 1. `sources::vote_candidates` counts neighbour votes per item
//! 2. Filters remove unwanted candidates (already chosen, no votes)
//! 3. The remaining candidates are ranked and cut to the limit
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{RecommendationEngine, recommend};
//!
//! let result = recommend(&dataset.choices, &[2, 4, 5], ema, 5)?;
//!
//! // Or keep a configured engine around
//! let engine = RecommendationEngine::new().with_limit(3);
//! let result = engine.recommend(&dataset.choices, &neighbours, ema)?;
//! ```

pub mod engine;
pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use engine::{
    DEFAULT_LIMIT, Recommendation, RecommendationEngine, RecommendationResult, own_items, recommend,
};
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
