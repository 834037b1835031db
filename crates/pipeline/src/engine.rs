//! The recommendation engine: candidates -> filters -> ranking.
//!
//! ## Algorithm
//! 1. No neighbours means no recommendations
//! 2. Count, per item, how many neighbours chose it (`sources::votes`)
//! 3. Run the filter pipeline: drop items the person already chose, then
//!    items with no votes
//! 4. Rank by descending votes; ties go to the higher column index
//! 5. Keep the first `limit` items and list, for each, the neighbours who
//!    chose it in the order the neighbours were given
//!
//! Only `InvalidIndex` can fail a request. Empty inputs give empty results.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{AlreadyChosenFilter, MinimumVotesFilter};
use data_loader::{ChoiceMatrix, ItemIndex, PersonIndex, Result};
use serde::{Deserialize, Serialize};
use sources::{Candidate, context_with_neighbours, vote_candidates};
use tracing::{debug, instrument};

/// Number of recommendations returned unless configured otherwise
pub const DEFAULT_LIMIT: usize = 5;

/// One recommended item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item: ItemIndex,

    /// Number of neighbours who chose the item
    pub votes: usize,

    /// Those neighbours, in neighbour-list order
    pub recommenders: Vec<PersonIndex>,
}

/// Ranked recommendations, best first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub items: Vec<Recommendation>,
}

impl RecommendationResult {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.items.iter()
    }

    /// Recommended item indices, in rank order
    pub fn item_indices(&self) -> Vec<ItemIndex> {
        self.items.iter().map(|recommendation| recommendation.item).collect()
    }
}

/// Friend-based recommender
///
/// ## Usage
/// ```ignore
/// let engine = RecommendationEngine::new().with_limit(3);
/// let result = engine.recommend(&dataset.choices, &neighbours, person)?;
/// ```
pub struct RecommendationEngine {
    limit: usize,
    pipeline: FilterPipeline,
}

impl RecommendationEngine {
    /// Engine with the default limit and filters
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            pipeline: FilterPipeline::new()
                .add_filter(AlreadyChosenFilter)
                .add_filter(MinimumVotesFilter::default()),
        }
    }

    /// Configure how many items to return (default: 5)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Recommend items to `person` from the choices of `neighbours`.
    #[instrument(skip(self, choices, neighbours), fields(num_neighbours = neighbours.len()))]
    pub fn recommend(
        &self,
        choices: &ChoiceMatrix,
        neighbours: &[PersonIndex],
        person: PersonIndex,
    ) -> Result<RecommendationResult> {
        let context = context_with_neighbours(choices, person, neighbours.to_vec())?;
        if neighbours.is_empty() {
            debug!("Person {} has no neighbours", person);
            return Ok(RecommendationResult::default());
        }

        let candidates = vote_candidates(choices, &context)?;
        let filtered = self.pipeline.apply(candidates, &context)?;
        let ranked = rank_candidates(filtered, self.limit);

        let mut items = Vec::with_capacity(ranked.len());
        for candidate in ranked {
            let mut recommenders = Vec::with_capacity(candidate.votes);
            for &neighbour in neighbours {
                if choices.get(neighbour, candidate.item)? {
                    recommenders.push(neighbour);
                }
            }
            items.push(Recommendation {
                item: candidate.item,
                votes: candidate.votes,
                recommenders,
            });
        }

        debug!("Recommending {} items to person {}", items.len(), person);
        Ok(RecommendationResult { items })
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort by descending votes, ties by descending item index, and keep `limit`.
fn rank_candidates(mut candidates: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.votes.cmp(&a.votes).then(b.item.cmp(&a.item)));
    candidates.truncate(limit);
    candidates
}

/// Top `k` recommendations for `person` from `neighbours`, with the default
/// filters.
pub fn recommend(
    choices: &ChoiceMatrix,
    neighbours: &[PersonIndex],
    person: PersonIndex,
    k: usize,
) -> Result<RecommendationResult> {
    RecommendationEngine::new().with_limit(k).recommend(choices, neighbours, person)
}

/// Items `person` has chosen, in column order
pub fn own_items(choices: &ChoiceMatrix, person: PersonIndex) -> Result<Vec<ItemIndex>> {
    choices.chosen_items(person)
}
