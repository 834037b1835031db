//! Shared types for candidate generation

use data_loader::{ItemIndex, PersonIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Candidate Types
// ============================================================================

/// An item some neighbours have chosen, before filtering and ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Column of the item in the catalog
    pub item: ItemIndex,

    /// Number of neighbours who chose the item
    pub votes: usize,
}

impl Candidate {
    pub fn new(item: ItemIndex, votes: usize) -> Self {
        Self { item, votes }
    }
}

// ============================================================================
// Person Context
// ============================================================================

/// Everything candidate generation and filtering need to know about the
/// person recommendations are made for.
///
/// ## Learning Note
/// Gathered once per request so filters can use O(1) set lookups instead of
/// re-reading the choice matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonContext {
    pub person: PersonIndex,

    /// Items the person has already chosen
    pub chosen_items: HashSet<ItemIndex>,

    /// Neighbours whose choices count as votes, in the order recommenders
    /// are reported
    pub neighbours: Vec<PersonIndex>,
}

impl PersonContext {
    pub fn new(person: PersonIndex) -> Self {
        Self {
            person,
            ..Default::default()
        }
    }

    pub fn with_chosen_items<I: IntoIterator<Item = ItemIndex>>(mut self, items: I) -> Self {
        self.chosen_items = items.into_iter().collect();
        self
    }

    pub fn with_neighbours(mut self, neighbours: Vec<PersonIndex>) -> Self {
        self.neighbours = neighbours;
        self
    }

    pub fn has_chosen(&self, item: ItemIndex) -> bool {
        self.chosen_items.contains(&item)
    }
}
