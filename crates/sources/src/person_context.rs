//! Helper functions to build a `PersonContext`
//!
//! ## Learning Note
//! The "context builder" pattern: gather the person's own choices and
//! neighbour list once, then hand the context to candidate generation and
//! every filter.

use crate::types::PersonContext;
use data_loader::{ChoiceMatrix, PersonIndex, Result, WeightedAdjacency};

/// Build the context for `person` with its adjacency neighbours.
///
/// Neighbours are taken in adjacency (ascending index) order, which is the
/// order recommenders are reported in.
pub fn build_person_context(
    choices: &ChoiceMatrix,
    adjacency: &WeightedAdjacency,
    person: PersonIndex,
) -> Result<PersonContext> {
    let neighbours = adjacency.neighbours(person)?.to_vec();
    context_with_neighbours(choices, person, neighbours)
}

/// Build the context for `person` with an explicit neighbour list.
pub fn context_with_neighbours(
    choices: &ChoiceMatrix,
    person: PersonIndex,
    neighbours: Vec<PersonIndex>,
) -> Result<PersonContext> {
    let chosen = choices.chosen_items(person)?;
    Ok(PersonContext::new(person)
        .with_chosen_items(chosen)
        .with_neighbours(neighbours))
}
