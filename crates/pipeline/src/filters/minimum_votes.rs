//! Filter to drop items too few neighbours chose.

use crate::traits::Filter;
use data_loader::Result;
use sources::{Candidate, PersonContext};

/// Keeps candidates with at least `min_votes` votes.
///
/// The default engine uses a threshold of 1, so items no neighbour chose
/// are never recommended.
pub struct MinimumVotesFilter {
    min_votes: usize,
}

impl MinimumVotesFilter {
    pub fn new(min_votes: usize) -> Self {
        Self { min_votes }
    }
}

impl Default for MinimumVotesFilter {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Filter for MinimumVotesFilter {
    fn name(&self) -> &str {
        "MinimumVotesFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _context: &PersonContext) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| candidate.votes >= self.min_votes)
            .collect())
    }
}
