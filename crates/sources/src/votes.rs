//! Neighbour votes - friend-based candidate generation
//!
//! "Your friends chose these items"
//!
//! ## Algorithm
//! 1. Take the neighbour list from the person context
//! 2. Sum the neighbours' choice rows column by column; every neighbour who
//!    chose an item adds one vote
//! 3. Emit one candidate per catalog item, in column order
//!
//! Candidates with zero votes and items the person already chose are still
//! emitted here; dropping them is the job of the filter pipeline.

use crate::types::{Candidate, PersonContext};
use data_loader::{ChoiceMatrix, Result};
use tracing::{debug, instrument};

/// Generate vote-counted candidates for the person in `context`.
///
/// Fails with `InvalidIndex` if any neighbour is not a row of `choices`.
#[instrument(skip(choices, context), fields(person = context.person))]
pub fn vote_candidates(choices: &ChoiceMatrix, context: &PersonContext) -> Result<Vec<Candidate>> {
    let votes = choices.column_votes(&context.neighbours)?;

    let candidates: Vec<Candidate> = votes
        .into_iter()
        .enumerate()
        .map(|(item, votes)| Candidate::new(item, votes))
        .collect();

    debug!(
        "Counted votes of {} neighbours over {} items",
        context.neighbours.len(),
        candidates.len()
    );
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::DataError;

    /// Four persons, four items
    ///
    /// Person 0 chose item 0; persons 1-3 are its neighbours.
    fn create_test_choices() -> ChoiceMatrix {
        ChoiceMatrix::from_rows(&[
            vec![true, false, false, false],
            vec![true, true, false, false],
            vec![false, true, true, false],
            vec![false, true, false, false],
        ])
        .unwrap()
    }

    #[test]
    fn test_vote_candidates() {
        let choices = create_test_choices();
        let context = PersonContext::new(0).with_neighbours(vec![1, 2, 3]);

        let candidates = vote_candidates(&choices, &context).unwrap();
        let votes: Vec<usize> = candidates.iter().map(|c| c.votes).collect();
        assert_eq!(votes, vec![1, 3, 1, 0]);

        let items: Vec<usize> = candidates.iter().map(|c| c.item).collect();
        assert_eq!(items, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_neighbour_order_does_not_change_votes() {
        let choices = create_test_choices();
        let forward = PersonContext::new(0).with_neighbours(vec![1, 2, 3]);
        let backward = PersonContext::new(0).with_neighbours(vec![3, 2, 1]);
        assert_eq!(
            vote_candidates(&choices, &forward).unwrap(),
            vote_candidates(&choices, &backward).unwrap()
        );
    }

    #[test]
    fn test_no_neighbours() {
        let choices = create_test_choices();
        let candidates = vote_candidates(&choices, &PersonContext::new(0)).unwrap();
        assert!(candidates.iter().all(|c| c.votes == 0));
    }

    #[test]
    fn test_invalid_neighbour() {
        let choices = create_test_choices();
        let context = PersonContext::new(0).with_neighbours(vec![1, 9]);
        assert!(matches!(
            vote_candidates(&choices, &context),
            Err(DataError::InvalidIndex { .. })
        ));
    }
}
