//! What a host shows for the selected person.

use data_loader::{ItemIndex, PersonIndex};
use serde::Serialize;

/// A friend of the selected person
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendView {
    pub person: PersonIndex,
    pub name: String,
    pub weight: f64,
}

/// A recommended item with the names of the friends who chose it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationView {
    pub item: ItemIndex,
    pub name: String,
    pub image: Option<String>,
    pub votes: usize,
    pub recommenders: Vec<String>,
}

/// The three lists of the selected person.
///
/// Empty when nothing is selected or the session is not ready.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonView {
    pub person: Option<PersonIndex>,
    pub name: Option<String>,
    /// Names of the items the person chose, in catalog order
    pub items: Vec<String>,
    /// Friends by ascending edge weight
    pub friends: Vec<FriendView>,
    pub recommendations: Vec<RecommendationView>,
}

impl PersonView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.friends.is_empty() && self.recommendations.is_empty()
    }
}
