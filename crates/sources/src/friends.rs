//! Neighbour ranking
//!
//! Lists a person's outgoing edges as friends, ordered by edge weight.
//!
//! ## Algorithm
//! 1. Read the outgoing row of the person from the adjacency
//! 2. Sort ascending by weight; the sort is stable, so equal weights keep
//!    adjacency (ascending index) order
//!
//! Weights are compared with `f64::total_cmp`, so NaN weights still sort
//! deterministically: positive NaN after every number, negative NaN before.

use data_loader::{PersonIndex, Result, WeightedAdjacency};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One outgoing edge of the selected person
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbour {
    pub person: PersonIndex,
    pub weight: f64,
}

/// Friends of `person` ordered by ascending edge weight.
///
/// Fails with `InvalidIndex` when `person` is not a node of the adjacency;
/// a node without outgoing edges yields an empty list.
#[instrument(skip(adjacency))]
pub fn neighbours_by_weight(adjacency: &WeightedAdjacency, person: PersonIndex) -> Result<Vec<Neighbour>> {
    let mut neighbours: Vec<Neighbour> = adjacency
        .outgoing_edges(person)?
        .into_iter()
        .map(|(person, weight)| Neighbour { person, weight })
        .collect();

    neighbours.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    debug!("Person {} has {} friends", person, neighbours.len());
    Ok(neighbours)
}
