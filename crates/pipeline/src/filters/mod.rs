//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod already_chosen;
pub mod minimum_votes;

// Re-export for convenience
pub use already_chosen::AlreadyChosenFilter;
pub use minimum_votes::MinimumVotesFilter;
