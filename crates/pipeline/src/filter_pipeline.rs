//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use data_loader::Result;
use sources::{Candidate, PersonContext};

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AlreadyChosenFilter)
///     .add_filter(MinimumVotesFilter::new(1));
///
/// let filtered = pipeline.apply(candidates, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// ## Algorithm
    /// 1. Start with the input candidates
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set
    pub fn apply(&self, candidates: Vec<Candidate>, context: &PersonContext) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{AlreadyChosenFilter, MinimumVotesFilter};

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let context = PersonContext::new(0);

        let candidates = vec![Candidate::new(1, 2), Candidate::new(2, 0)];

        let filtered = pipeline.apply(candidates.clone(), &context).unwrap();
        assert_eq!(filtered, candidates);
    }

    #[test]
    fn test_single_filter() {
        let context = PersonContext::new(0).with_chosen_items([1]);

        let pipeline = FilterPipeline::new().add_filter(AlreadyChosenFilter);

        let candidates = vec![Candidate::new(1, 3), Candidate::new(2, 1)];

        let filtered = pipeline.apply(candidates, &context).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].item, 2);
    }

    #[test]
    fn test_filters_run_in_order() {
        let pipeline = FilterPipeline::new()
            .add_filter(AlreadyChosenFilter)
            .add_filter(MinimumVotesFilter::new(1));
        assert_eq!(
            pipeline.filter_names(),
            vec!["AlreadyChosenFilter", "MinimumVotesFilter"]
        );

        let context = PersonContext::new(0).with_chosen_items([0]);
        let candidates = vec![
            Candidate::new(0, 4),
            Candidate::new(1, 0),
            Candidate::new(2, 2),
            Candidate::new(3, 1),
        ];
        let filtered = pipeline.apply(candidates, &context).unwrap();
        assert_eq!(filtered, vec![Candidate::new(2, 2), Candidate::new(3, 1)]);
    }
}
