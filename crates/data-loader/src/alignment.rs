//! Aligning the network's persons with the item choices.
//!
//! Person and item identities may come from two differently oriented tables:
//! the network's node table (rows are persons) and an optional item table
//! (rows are items, attribute columns are persons). Before a `ChoiceMatrix`
//! can be built the two must agree on who the persons are, and the item
//! table's person columns must be permuted into the network's node order.
//!
//! Every failure here is a validation state reported before any matrix is
//! built; there is never a partially aligned `Dataset`.

use crate::columns::{ColumnRole, classify_candidate_columns, resolve_column};
use crate::error::{DataError, Result};
use crate::matrix::ChoiceMatrix;
use crate::types::{Catalog, Column, Dataset, Network, NodeData, Roster, Table};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Explicit column choices made by the host (or the user).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnChoices {
    /// Node table column holding person names
    pub person_column: Option<String>,
    /// Item table column holding item names
    pub item_column: Option<String>,
    /// Take the first candidate when several qualify and no choice was made
    pub default_to_first_candidate: bool,
}

impl ColumnChoices {
    pub fn with_person_column<S: Into<String>>(mut self, name: S) -> Self {
        self.person_column = Some(name.into());
        self
    }

    pub fn with_item_column<S: Into<String>>(mut self, name: S) -> Self {
        self.item_column = Some(name.into());
        self
    }

    pub fn with_default_to_first_candidate(mut self, enabled: bool) -> Self {
        self.default_to_first_candidate = enabled;
        self
    }
}

/// Build an aligned `Dataset` from a network and an optional item table.
///
/// ## Algorithm
/// 1. Resolve person names, from the node labels or from the node table's
///    person-name column. With an item table present, only columns whose
///    values equal the item table's person columns (as sets) qualify, and
///    plain node labels must match them.
/// 2. With an item table: permute its person columns into node order,
///    transpose, and name items from its item-name column.
/// 3. Without one: the node table's attributes are the items.
#[instrument(skip_all, fields(nodes = network.num_nodes(), item_table = item_table.is_some()))]
pub fn align(network: &Network, item_table: Option<&Table>, choices: &ColumnChoices) -> Result<Dataset> {
    let (person_names, person_column) = resolve_person_names(network, item_table, choices)?;
    debug!("Resolved {} person names", person_names.len());

    let (catalog, matrix, item_column, image_column) = match item_table {
        Some(items) => {
            let (catalog, item_column, image_column) = build_item_catalog(items, choices)?;
            let matrix = choices_from_item_table(&person_names, items)?;
            (catalog, matrix, Some(item_column), image_column)
        }
        None => match &network.nodes {
            NodeData::Table(table) if !table.attributes.is_empty() => (
                Catalog::from_names(table.attributes.iter().cloned()),
                ChoiceMatrix::from_numeric(&table.values)?,
                None,
                None,
            ),
            _ => return Err(DataError::NoChoices),
        },
    };

    let mut dataset = Dataset::new(Roster::from_names(person_names), catalog, matrix)?;
    dataset.person_column = person_column;
    dataset.item_column = item_column;
    dataset.image_column = image_column;

    let (persons, items, chosen) = dataset.counts();
    debug!("Aligned {} persons x {} items ({} choices)", persons, items, chosen);
    Ok(dataset)
}

/// Person names in node order, plus the column they came from (if any).
fn resolve_person_names(
    network: &Network,
    item_table: Option<&Table>,
    choices: &ColumnChoices,
) -> Result<(Vec<String>, Option<String>)> {
    let num_nodes = network.num_nodes();
    match &network.nodes {
        NodeData::Names(names) => {
            if names.len() != num_nodes {
                return Err(DataError::ShapeMismatch(format!(
                    "network has {} nodes but {} labels",
                    num_nodes,
                    names.len()
                )));
            }
            check_unique(names)?;
            if let Some(items) = item_table {
                check_same_names(names, &items.attributes)?;
            }
            Ok((names.clone(), None))
        }
        NodeData::Table(table) => {
            if table.num_rows() != num_nodes {
                return Err(DataError::ShapeMismatch(format!(
                    "network has {} nodes but its table has {} rows",
                    num_nodes,
                    table.num_rows()
                )));
            }
            let candidates = classify_candidate_columns(&table.metas).person_names;
            let applicable: Vec<usize> = match item_table {
                Some(items) => {
                    let declared: HashSet<&str> =
                        items.attributes.iter().map(String::as_str).collect();
                    candidates
                        .into_iter()
                        .filter(|&index| same_name_set(&table.metas[index], &declared))
                        .collect()
                }
                None => candidates,
            };
            let index = resolve_column(
                ColumnRole::PersonName,
                &applicable,
                &table.metas,
                choices.person_column.as_deref(),
                choices.default_to_first_candidate,
            )?;
            let column = &table.metas[index];
            let names = column
                .text_values()
                .ok_or(DataError::NoApplicableNameColumn)?
                .to_vec();
            Ok((names, Some(column.name.clone())))
        }
        NodeData::None => Err(DataError::NoApplicableNameColumn),
    }
}

fn same_name_set(column: &Column, declared: &HashSet<&str>) -> bool {
    match column.text_values() {
        Some(values) => {
            let names: HashSet<&str> = values.iter().map(String::as_str).collect();
            names == *declared
        }
        None => false,
    }
}

fn check_unique(names: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(DataError::DuplicateName(name.clone()));
        }
    }
    Ok(())
}

/// Compare the network's person names with the item table's person columns.
fn check_same_names(persons: &[String], declared: &[String]) -> Result<()> {
    let person_set: HashSet<&str> = persons.iter().map(String::as_str).collect();
    let declared_set: HashSet<&str> = declared.iter().map(String::as_str).collect();

    let missing: Vec<String> = persons
        .iter()
        .filter(|name| !declared_set.contains(name.as_str()))
        .cloned()
        .collect();
    let unexpected: Vec<String> = declared
        .iter()
        .filter(|name| !person_set.contains(name.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(DataError::AlignmentMismatch {
            missing,
            unexpected,
        })
    }
}

/// Transpose the item table into a person x item matrix in node order.
fn choices_from_item_table(person_names: &[String], items: &Table) -> Result<ChoiceMatrix> {
    let mut column_of: HashMap<&str, usize> = HashMap::with_capacity(items.attributes.len());
    for (index, name) in items.attributes.iter().enumerate() {
        if column_of.insert(name.as_str(), index).is_some() {
            return Err(DataError::DuplicateName(name.clone()));
        }
    }

    let order = person_names
        .iter()
        .map(|name| {
            column_of
                .get(name.as_str())
                .copied()
                .ok_or_else(|| DataError::AlignmentMismatch {
                    missing: vec![name.clone()],
                    unexpected: Vec::new(),
                })
        })
        .collect::<Result<Vec<usize>>>()?;

    // The item table has no rows at all: keep the person count right
    if items.num_rows() == 0 {
        return Ok(ChoiceMatrix::unchosen(person_names.len(), 0));
    }

    Ok(ChoiceMatrix::from_numeric(&items.values)?
        .select_columns(&order)?
        .transpose())
}

/// Item names and images from the item table's meta columns.
fn build_item_catalog(items: &Table, choices: &ColumnChoices) -> Result<(Catalog, String, Option<String>)> {
    let candidates = classify_candidate_columns(&items.metas);
    let index = resolve_column(
        ColumnRole::ItemName,
        &candidates.item_names,
        &items.metas,
        choices.item_column.as_deref(),
        choices.default_to_first_candidate,
    )?;
    let name_column = &items.metas[index];
    let names = name_column
        .text_values()
        .ok_or(DataError::NoApplicableItemColumn)?;

    let image_column = candidates.images.first().map(|&image| &items.metas[image]);
    let mut catalog = Catalog::from_names(names.iter().cloned());
    if let Some(images) = image_column.and_then(Column::text_values) {
        catalog = catalog.with_images(images);
    }

    Ok((
        catalog,
        name_column.name.clone(),
        image_column.map(|column| column.name.clone()),
    ))
}
