//! Loading the input files into a `Network` and an optional item table.
//!
//! The files are independent, so they are parsed in parallel with Rayon;
//! attaching the node table and validating shapes happens afterwards.

use crate::error::Result;
use crate::parser;
use crate::types::{Network, Table};
use std::path::Path;
use tracing::info;

/// Paths of the files that make up one input set
#[derive(Debug, Clone, Copy)]
pub struct InputFiles<'a> {
    /// Pajek network
    pub network: &'a Path,
    /// Node table: one row per network node, replaces the vertex labels
    pub node_table: Option<&'a Path>,
    /// Item table: one row per item, one attribute column per person
    pub item_table: Option<&'a Path>,
}

/// Parse an optional table file
fn parse_optional(path: Option<&Path>) -> Result<Option<Table>> {
    path.map(parser::parse_table).transpose()
}

/// Load a network and, optionally, the table that describes its nodes.
pub fn load_network(network_path: &Path, node_table: Option<&Path>) -> Result<Network> {
    let (network, nodes) = rayon::join(
        || parser::parse_pajek(network_path),
        || parse_optional(node_table),
    );
    attach(network?, nodes?)
}

fn attach(network: Network, nodes: Option<Table>) -> Result<Network> {
    match nodes {
        Some(table) => network.with_node_table(table),
        None => Ok(network),
    }
}

/// Load every file of an input set.
///
/// ## Steps
/// 1. Parse the network, node table and item table in parallel
/// 2. Attach the node table to the network
/// 3. Report what was loaded
pub fn load_inputs(files: InputFiles<'_>) -> Result<(Network, Option<Table>)> {
    let (network, (nodes, items)) = rayon::join(
        || parser::parse_pajek(files.network),
        || {
            rayon::join(
                || parse_optional(files.node_table),
                || parse_optional(files.item_table),
            )
        },
    );

    let network = attach(network?, nodes?)?;
    let items = items?;

    info!(
        "Loaded network with {} nodes and {} edges{}",
        network.num_nodes(),
        network.adjacency.num_edges(),
        match &items {
            Some(table) => format!(", item table with {} items", table.num_rows()),
            None => String::new(),
        }
    );
    Ok((network, items))
}
