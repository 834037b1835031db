//! Integration tests for the pipeline.
//!
//! These tests load the fixture network from disk, align it and run the
//! engine end to end, then check the ranking rules on a small hand-built
//! network.

use data_loader::{
    ChoiceMatrix, ColumnChoices, Dataset, Edge, InputFiles, PersonIndex, WeightedAdjacency, align,
    load_inputs, load_network,
};
use pipeline::{RecommendationEngine, own_items, recommend};
use sources::{build_person_context, neighbours_by_weight};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Friends network with the choices in a node table
fn load_friends() -> (WeightedAdjacency, Dataset) {
    let node_table = fixture("friends.tab");
    let network = load_network(&fixture("friends.net"), Some(node_table.as_path())).unwrap();
    let dataset = align(&network, None, &ColumnChoices::default()).unwrap();
    (network.adjacency, dataset)
}

fn names(dataset: &Dataset, persons: &[PersonIndex]) -> Vec<String> {
    persons
        .iter()
        .map(|&person| dataset.roster.name_of(person).unwrap())
        .collect()
}

/// Recommended item names with their recommenders' names
fn describe(dataset: &Dataset, adjacency: &WeightedAdjacency, person: PersonIndex) -> Vec<(String, Vec<String>)> {
    let neighbours = adjacency.neighbours(person).unwrap();
    recommend(&dataset.choices, neighbours, person, 5)
        .unwrap()
        .iter()
        .map(|recommendation| {
            (
                dataset.catalog.get(recommendation.item).unwrap().name.clone(),
                names(dataset, &recommendation.recommenders),
            )
        })
        .collect()
}

#[test]
fn test_ema_novak_end_to_end() {
    let (adjacency, dataset) = load_friends();
    let ema = dataset.roster.position("Ema Novak").unwrap();

    assert_eq!(
        dataset.chosen_item_names(ema).unwrap(),
        vec![
            "Moana",
            "Spirited Away",
            "Spider-Man: Into the Spider-Verse",
            "Kung Fu Panda",
            "Hotel Transylvania",
        ]
    );

    let friends: Vec<PersonIndex> = neighbours_by_weight(&adjacency, ema)
        .unwrap()
        .iter()
        .map(|neighbour| neighbour.person)
        .collect();
    assert_eq!(
        names(&dataset, &friends).join(", "),
        "Tilen Novak, Tim Bizjak, Zoja Leban, Jan Horvat, Maja Čeh"
    );

    let expected = vec![
        ("Coco", vec!["Maja Čeh", "Tim Bizjak"]),
        ("Lilo & Stich", vec!["Jan Horvat", "Zoja Leban"]),
        ("Tangled 1", vec!["Maja Čeh"]),
        ("Happy Feet", vec!["Jan Horvat"]),
        ("Rango", vec!["Tim Bizjak"]),
    ];
    let actual = describe(&dataset, &adjacency, ema);
    assert_eq!(actual.len(), expected.len());
    for ((item, recommenders), (expected_item, expected_recommenders)) in actual.iter().zip(&expected) {
        assert_eq!(item, expected_item);
        assert_eq!(recommenders, expected_recommenders);
    }
}

#[test]
fn test_item_table_gives_same_recommendations() {
    let (network_path, items_path) = (fixture("friends.net"), fixture("friends_items.tab"));
    let files = InputFiles {
        network: &network_path,
        node_table: None,
        item_table: Some(items_path.as_path()),
    };
    let (network, items) = load_inputs(files).unwrap();
    let dataset = align(&network, items.as_ref(), &ColumnChoices::default()).unwrap();
    let (_, from_nodes) = load_friends();

    assert_eq!(dataset.item_column.as_deref(), Some("title"));
    assert_eq!(dataset.image_column.as_deref(), Some("poster"));
    assert_eq!(dataset.roster.names(), from_nodes.roster.names());
    assert_eq!(dataset.catalog.names(), from_nodes.catalog.names());
    assert_eq!(dataset.choices, from_nodes.choices);

    let coco = dataset.catalog.get(8).unwrap();
    assert_eq!(coco.name, "Coco");
    assert_eq!(coco.image.as_deref(), Some("posters/coco.png"));

    let ema = dataset.roster.position("Ema Novak").unwrap();
    assert_eq!(
        describe(&dataset, &network.adjacency, ema),
        describe(&from_nodes, &network.adjacency, ema)
    );
}

#[test]
fn test_person_without_friends() {
    let (adjacency, dataset) = load_friends();
    let tilen = dataset.roster.position("Tilen Novak").unwrap();

    assert!(neighbours_by_weight(&adjacency, tilen).unwrap().is_empty());
    assert!(describe(&dataset, &adjacency, tilen).is_empty());
    assert_eq!(dataset.chosen_item_names(tilen).unwrap(), vec!["Moana", "Kung Fu Panda"]);
}

#[test]
fn test_recommendations_never_include_own_items() {
    let (adjacency, dataset) = load_friends();
    for person in 0..dataset.roster.len() {
        let own = own_items(&dataset.choices, person).unwrap();
        let neighbours = adjacency.neighbours(person).unwrap();
        let result = recommend(&dataset.choices, neighbours, person, 12).unwrap();
        for recommendation in result.iter() {
            assert!(!own.contains(&recommendation.item));
            assert!(recommendation.votes > 0);
            assert_eq!(recommendation.votes, recommendation.recommenders.len());
        }
    }
}

// =============================================================================
// Seven persons, eight items
// =============================================================================

const PERSONS: [&str; 7] = ["Cilka", "Ana", "Franz", "Greta", "Benjamin", "Dani", "Ema"];
const ITEMS: [&str; 8] = ["A", "D", "B", "C", "G", "F", "E", "H"];
const CHOICES: [&str; 7] = [
    "00110100", "10001010", "11101010", "01001110", "01101110", "00000000", "11111111",
];
const EDGES: [&str; 16] = [
    "AF", "AC", "BC", "BD", "BE", "BF", "BG", "CD", "CF", "CG", "DG", "EA", "EF", "GB", "GD", "GF",
];

fn seven_person_network() -> (ChoiceMatrix, WeightedAdjacency) {
    let rows: Vec<Vec<bool>> = CHOICES
        .iter()
        .map(|row| row.chars().map(|cell| cell == '1').collect())
        .collect();
    let choices = ChoiceMatrix::from_rows(&rows).unwrap();

    let node = |letter: u8| (letter - b'A') as usize;
    let edges = EDGES.iter().map(|pair| {
        let bytes = pair.as_bytes();
        Edge::new(node(bytes[0]), node(bytes[1]), 1.0)
    });
    let adjacency = WeightedAdjacency::from_edges(PERSONS.len(), edges).unwrap();
    (choices, adjacency)
}

fn item_names(items: &[usize]) -> Vec<&'static str> {
    items.iter().map(|&item| ITEMS[item]).collect()
}

#[test]
fn test_seven_person_rankings() {
    let (choices, adjacency) = seven_person_network();
    let engine = RecommendationEngine::new();
    let run = |person: PersonIndex| {
        let context = build_person_context(&choices, &adjacency, person).unwrap();
        engine.recommend(&choices, &context.neighbours, person).unwrap()
    };

    // Cilka: only Franz chose anything; ties go to the later column
    let cilka = run(0);
    assert_eq!(item_names(&cilka.item_indices()), vec!["E", "G", "D", "A"]);
    assert!(cilka.iter().all(|r| r.recommenders == vec![2]));

    // Ana: D has four votes, F and B three, H and C one
    let ana = run(1);
    assert_eq!(item_names(&ana.item_indices()), vec!["D", "F", "B", "H", "C"]);
    assert_eq!(ana.items[0].recommenders, vec![2, 3, 4, 6]);
    assert_eq!(ana.items[1].recommenders, vec![3, 4, 6]);
    assert_eq!(ana.items[2].recommenders, vec![2, 4, 6]);
    assert_eq!(ana.items[3].recommenders, vec![6]);

    let benjamin = run(4);
    assert_eq!(item_names(&benjamin.item_indices()), vec!["C"]);
    assert_eq!(benjamin.items[0].recommenders, vec![0]);

    // Dani has no friends; Ema has chosen everything
    assert!(run(5).is_empty());
    assert!(run(6).is_empty());
}

#[test]
fn test_limit_takes_the_best() {
    let (choices, adjacency) = seven_person_network();
    let neighbours = adjacency.neighbours(1).unwrap();
    let result = recommend(&choices, neighbours, 1, 3).unwrap();
    assert_eq!(item_names(&result.item_indices()), vec!["D", "F", "B"]);
}

#[test]
fn test_neighbour_order_keeps_items_and_votes() {
    let (choices, adjacency) = seven_person_network();
    let forward: Vec<PersonIndex> = adjacency.neighbours(1).unwrap().to_vec();
    let backward: Vec<PersonIndex> = forward.iter().rev().copied().collect();

    let a = recommend(&choices, &forward, 1, 5).unwrap();
    let b = recommend(&choices, &backward, 1, 5).unwrap();

    assert_eq!(a.item_indices(), b.item_indices());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.votes, y.votes);
        let reversed: Vec<PersonIndex> = y.recommenders.iter().rev().copied().collect();
        assert_eq!(x.recommenders, reversed);
    }
}
