//! # Recommendation Session
//!
//! Holds the inputs a host has provided and answers queries about a
//! selected person:
//! 1. Align the network with the item table (once per input change)
//! 2. List the person's own items
//! 3. Rank the person's friends by edge weight
//! 4. Run the recommendation engine over the person's neighbours
//!
//! Alignment failures are not errors of a query. They put the session in
//! the `NotReady` state, which keeps the reason and answers every query
//! with an empty view. Only an invalid person index fails a query.

use std::time::Instant;

use data_loader::{
    ColumnChoices, DataError, Dataset, Network, PersonIndex, Result, Table, align,
};
use pipeline::RecommendationEngine;
use sources::neighbours_by_weight;
use tracing::{debug, error, info, warn};

use crate::config::SessionConfig;
use crate::view::{FriendView, PersonView, RecommendationView};

/// Whether the inputs could be aligned
#[derive(Debug)]
enum SessionState {
    Ready(Dataset),
    NotReady(DataError),
}

pub struct RecommendationSession {
    network: Network,
    item_table: Option<Table>,
    config: SessionConfig,
    engine: RecommendationEngine,
    state: SessionState,
}

impl RecommendationSession {
    /// Create a session and align its inputs
    pub fn new(network: Network, item_table: Option<Table>, config: SessionConfig) -> Self {
        let engine = RecommendationEngine::new().with_limit(config.limit);
        let state = compute_state(&network, item_table.as_ref(), &config.columns);
        Self {
            network,
            item_table,
            config,
            engine,
            state,
        }
    }

    pub fn set_network(&mut self, network: Network) {
        self.network = network;
        self.refresh();
    }

    pub fn set_item_table(&mut self, item_table: Option<Table>) {
        self.item_table = item_table;
        self.refresh();
    }

    pub fn set_columns(&mut self, columns: ColumnChoices) {
        self.config.columns = columns;
        self.refresh();
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.config.limit = limit;
        self.engine = RecommendationEngine::new().with_limit(limit);
    }

    /// Re-derive everything from the current inputs
    fn refresh(&mut self) {
        self.state = compute_state(&self.network, self.item_table.as_ref(), &self.config.columns);
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SessionState::Ready(_))
    }

    /// Why the session is not ready, if it is not
    pub fn not_ready_reason(&self) -> Option<&DataError> {
        match &self.state {
            SessionState::NotReady(err) => Some(err),
            SessionState::Ready(_) => None,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.state {
            SessionState::Ready(dataset) => Some(dataset),
            SessionState::NotReady(_) => None,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Persons in the order a host lists them (alphabetical)
    pub fn display_order(&self) -> Vec<PersonIndex> {
        self.dataset()
            .map(|dataset| dataset.roster.sorted_indices())
            .unwrap_or_default()
    }

    pub fn person_index(&self, name: &str) -> Option<PersonIndex> {
        self.dataset()?.roster.position(name)
    }

    /// Own items, friends and recommendations of `selected`.
    ///
    /// ## Algorithm
    /// 1. Empty view if nothing is selected or the session is not ready
    /// 2. Own items from the person's choice row
    /// 3. Friends from `neighbours_by_weight`
    /// 4. Recommendations from the engine, with the adjacency neighbours in
    ///    ascending index order so recommenders are listed in that order
    pub fn view(&self, selected: Option<PersonIndex>) -> Result<PersonView> {
        let (Some(person), SessionState::Ready(dataset)) = (selected, &self.state) else {
            return Ok(PersonView::default());
        };
        let start_time = Instant::now();
        let adjacency = &self.network.adjacency;

        let name = dataset.roster.name_of(person)?;
        let items = dataset.chosen_item_names(person)?;

        let friends = neighbours_by_weight(adjacency, person)?
            .into_iter()
            .map(|neighbour| {
                Ok(FriendView {
                    person: neighbour.person,
                    name: dataset.roster.name_of(neighbour.person)?,
                    weight: neighbour.weight,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let neighbours = adjacency.neighbours(person)?;
        let result = self.engine.recommend(&dataset.choices, neighbours, person)?;
        let mut recommendations = Vec::with_capacity(result.len());
        for recommendation in result.iter() {
            let item = dataset.catalog.get(recommendation.item)?;
            let recommenders = recommendation
                .recommenders
                .iter()
                .map(|&recommender| dataset.roster.name_of(recommender))
                .collect::<Result<Vec<_>>>()?;
            recommendations.push(RecommendationView {
                item: recommendation.item,
                name: item.name.clone(),
                image: item.image.clone(),
                votes: recommendation.votes,
                recommenders,
            });
        }

        debug!(
            "View for {}: {} items, {} friends, {} recommendations in {:.2?}",
            name,
            items.len(),
            friends.len(),
            recommendations.len(),
            start_time.elapsed()
        );

        Ok(PersonView {
            person: Some(person),
            name: Some(name),
            items,
            friends,
            recommendations,
        })
    }
}

fn compute_state(network: &Network, item_table: Option<&Table>, columns: &ColumnChoices) -> SessionState {
    let start_time = Instant::now();
    match align(network, item_table, columns) {
        Ok(dataset) => {
            let (persons, items, chosen) = dataset.counts();
            info!(
                "Session ready: {} persons, {} items, {} choices (aligned in {:.2?})",
                persons,
                items,
                chosen,
                start_time.elapsed()
            );
            SessionState::Ready(dataset)
        }
        Err(err) if err.is_not_ready() => {
            warn!("Session not ready: {}", err);
            SessionState::NotReady(err)
        }
        Err(err) => {
            error!("Failed to align inputs: {}", err);
            SessionState::NotReady(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::parser::{parse_pajek_str, parse_table_str};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    const NETWORK: &str = "\
*Vertices 3
1 \"Ana\"
2 \"Jan\"
3 \"Maja\"
*Arcs
1 2 2
1 3 1
";

    const ITEMS: &str = "\
title\tAna\tJan\tMaja\tposter
s\tc\tc\tc\ts
meta\t\t\t\tmeta type=image
Coco\t1\t0\t1\tcoco.png
Up\t0\t1\t0\tup.png
Rango\t0\t1\t1\t
";

    fn network() -> Network {
        parse_pajek_str(NETWORK, "test.net").unwrap()
    }

    fn items() -> Table {
        parse_table_str(ITEMS, "test.tab").unwrap()
    }

    fn create_test_session() -> RecommendationSession {
        RecommendationSession::new(network(), Some(items()), SessionConfig::default())
    }

    // ============================================================================
    // Tests
    // ============================================================================

    #[test]
    fn test_ready_session_view() {
        let session = create_test_session();
        assert!(session.is_ready());

        let ana = session.person_index("Ana").unwrap();
        let view = session.view(Some(ana)).unwrap();

        assert_eq!(view.name.as_deref(), Some("Ana"));
        assert_eq!(view.items, vec!["Coco"]);

        let friends: Vec<&str> = view.friends.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(friends, vec!["Maja", "Jan"]);
        assert_eq!(view.friends[0].weight, 1.0);

        assert_eq!(view.recommendations.len(), 2);
        let rango = &view.recommendations[0];
        assert_eq!(rango.name, "Rango");
        assert_eq!(rango.votes, 2);
        assert_eq!(rango.recommenders, vec!["Jan", "Maja"]);
        assert_eq!(rango.image, None);

        let up = &view.recommendations[1];
        assert_eq!(up.name, "Up");
        assert_eq!(up.image.as_deref(), Some("up.png"));
        assert_eq!(up.recommenders, vec!["Jan"]);
    }

    #[test]
    fn test_limit() {
        let mut session = create_test_session();
        session.set_limit(1);
        let view = session.view(Some(0)).unwrap();
        assert_eq!(view.recommendations.len(), 1);
        assert_eq!(session.config().limit, 1);
    }

    #[test]
    fn test_nothing_selected() {
        let session = create_test_session();
        assert!(session.view(None).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_selection() {
        let session = create_test_session();
        assert!(matches!(
            session.view(Some(3)),
            Err(DataError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn test_not_ready_without_choices() {
        let session = RecommendationSession::new(network(), None, SessionConfig::default());
        assert!(!session.is_ready());
        assert!(matches!(session.not_ready_reason(), Some(DataError::NoChoices)));
        assert!(session.view(Some(0)).unwrap().is_empty());
        assert!(session.display_order().is_empty());
        assert_eq!(session.person_index("Ana"), None);
    }

    #[test]
    fn test_mismatched_names_then_fixed() {
        let renamed = ITEMS.replace("Maja", "Greta");
        let table = parse_table_str(&renamed, "renamed.tab").unwrap();
        let mut session = RecommendationSession::new(network(), Some(table), SessionConfig::default());

        match session.not_ready_reason() {
            Some(DataError::AlignmentMismatch { missing, unexpected }) => {
                assert_eq!(missing, &vec!["Maja".to_string()]);
                assert_eq!(unexpected, &vec!["Greta".to_string()]);
            }
            other => panic!("unexpected state: {other:?}"),
        }

        session.set_item_table(Some(items()));
        assert!(session.is_ready());
        assert_eq!(session.display_order(), vec![0, 1, 2]);
    }

    #[test]
    fn test_network_change_recomputes() {
        let mut session = create_test_session();
        let smaller = parse_pajek_str("*Vertices 2\n1 \"Ana\"\n2 \"Jan\"\n", "pair.net").unwrap();
        session.set_network(smaller);
        assert!(matches!(
            session.not_ready_reason(),
            Some(DataError::AlignmentMismatch { .. })
        ));
    }
}
