//! # Sources Crate
//!
//! This crate turns a person's friends into candidate items.
//!
//! ## Components
//!
//! ### Friends
//! Outgoing edges of the person, ordered by edge weight, for display.
//!
//! ### Votes
//! Friend-based candidate generation:
//! - "Your friends chose these items"
//! - One vote per neighbour who chose the item
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{build_person_context, neighbours_by_weight, vote_candidates};
//!
//! let friends = neighbours_by_weight(&network.adjacency, ema)?;
//! let context = build_person_context(&dataset.choices, &network.adjacency, ema)?;
//! let candidates = vote_candidates(&dataset.choices, &context)?;
//! ```

// Public modules
pub mod friends;
pub mod person_context;
pub mod types;
pub mod votes;

// Re-export commonly used types
pub use friends::{Neighbour, neighbours_by_weight};
pub use person_context::{build_person_context, context_with_neighbours};
pub use types::{Candidate, PersonContext};
pub use votes::vote_candidates;

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{ChoiceMatrix, Edge, WeightedAdjacency};

    #[test]
    fn test_candidate_creation() {
        let candidate = Candidate::new(3, 2);
        assert_eq!(candidate.item, 3);
        assert_eq!(candidate.votes, 2);
    }

    #[test]
    fn test_context_to_candidates() {
        let choices = ChoiceMatrix::from_rows(&[
            vec![false, false],
            vec![true, true],
            vec![false, true],
        ])
        .unwrap();
        let adjacency =
            WeightedAdjacency::from_edges(3, [Edge::new(0, 1, 2.0), Edge::new(0, 2, 1.0)]).unwrap();

        let context = build_person_context(&choices, &adjacency, 0).unwrap();
        let candidates = vote_candidates(&choices, &context).unwrap();
        assert_eq!(candidates, vec![Candidate::new(0, 1), Candidate::new(1, 2)]);

        let friends = neighbours_by_weight(&adjacency, 0).unwrap();
        assert_eq!(friends[0].person, 2);
    }
}
