//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use data_loader::Result;
use sources::{Candidate, PersonContext};

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be used in concurrent contexts
/// - Filters take ownership of the Vec<Candidate> and return a filtered Vec
/// - Filters keep the relative order of the candidates they let through
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `context` - The person's own choices and neighbours
    fn apply(&self, candidates: Vec<Candidate>, context: &PersonContext) -> Result<Vec<Candidate>>;
}
