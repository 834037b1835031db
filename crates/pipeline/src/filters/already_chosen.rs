//! Filter to remove items the person has already chosen.
//!
//! This is the first filter in the default pipeline: an item the person
//! already has is never recommended, however many friends chose it.

use crate::traits::Filter;
use data_loader::Result;
use sources::{Candidate, PersonContext};

/// Removes candidates the person has already chosen.
///
/// ## Algorithm
/// Uses the HashSet in `PersonContext::chosen_items` for O(1) lookups.
pub struct AlreadyChosenFilter;

impl Filter for AlreadyChosenFilter {
    fn name(&self) -> &str {
        "AlreadyChosenFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, context: &PersonContext) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !context.has_chosen(candidate.item))
            .collect();
        Ok(filtered)
    }
}
