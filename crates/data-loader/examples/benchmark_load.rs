use data_loader::{ColumnChoices, InputFiles, align, load_inputs};
use std::path::Path;
use std::time::Instant;

fn main() {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("../pipeline/tests/fixtures");
    let network = fixtures.join("friends.net");
    let items = fixtures.join("friends_items.tab");

    println!("Loading friends network and item table...\n");

    let start = Instant::now();
    let files = InputFiles {
        network: &network,
        node_table: None,
        item_table: Some(items.as_path()),
    };
    let (network, item_table) = load_inputs(files).expect("Failed to load inputs");
    let loaded = start.elapsed();
    let dataset = align(&network, item_table.as_ref(), &ColumnChoices::default())
        .expect("Failed to align inputs");
    let elapsed = start.elapsed();

    let (persons, items, chosen) = dataset.counts();

    println!("\n=== Load Complete ===");
    println!("Parsing: {:?}", loaded);
    println!("Parsing + alignment: {:?}", elapsed);
    println!("Persons: {}", persons);
    println!("Items: {}", items);
    println!("Choices: {}", chosen);
    println!("Edges: {}", network.adjacency.num_edges());
}
