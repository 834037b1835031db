//! Core domain types for people, items and the input tables.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - Type aliases for domain clarity (PersonIndex, ItemIndex)
//! - Roster and Catalog, the ordered person and item lists
//! - Table and Column, the host-supplied tabular inputs
//! - Network, the social graph together with its node data
//! - Dataset, the aligned result that the recommendation engine consumes

use crate::adjacency::WeightedAdjacency;
use crate::error::{DataError, Result};
use crate::matrix::ChoiceMatrix;
use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up persons with items

/// Position of a person in the roster (and row of the choice matrix)
pub type PersonIndex = usize;

/// Position of an item in the catalog (and column of the choice matrix)
pub type ItemIndex = usize;

// =============================================================================
// Persons and items
// =============================================================================

/// A node in the social graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub index: PersonIndex,
    pub name: Option<String>,
}

impl Person {
    /// Name to show to a user; unnamed persons fall back to their index.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", self.index),
        }
    }
}

/// Ordered, fixed-size list of persons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    persons: Vec<Person>,
}

impl Roster {
    /// Build a roster from display names, in order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let persons = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Person {
                index,
                name: Some(name.into()),
            })
            .collect();
        Self { persons }
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Get a person by index
    pub fn get(&self, index: PersonIndex) -> Result<&Person> {
        self.persons.get(index).ok_or(DataError::InvalidIndex {
            what: "person",
            index,
            len: self.persons.len(),
        })
    }

    /// Display name of the person at `index`.
    pub fn name_of(&self, index: PersonIndex) -> Result<String> {
        Ok(self.get(index)?.display_name())
    }

    /// Display names in node order
    pub fn names(&self) -> Vec<String> {
        self.persons.iter().map(Person::display_name).collect()
    }

    /// Look up a person by exact display name.
    pub fn position(&self, name: &str) -> Option<PersonIndex> {
        self.persons
            .iter()
            .position(|person| person.name.as_deref() == Some(name))
    }

    /// Person indices ordered alphabetically by display name.
    ///
    /// Hosts list persons in this order; the roster itself keeps the
    /// network's node order so indices stay valid for the adjacency.
    pub fn sorted_indices(&self) -> Vec<PersonIndex> {
        let mut indices: Vec<PersonIndex> = (0..self.persons.len()).collect();
        indices.sort_by_key(|&index| self.persons[index].display_name());
        indices
    }
}

/// A choosable entity, e.g. a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub index: ItemIndex,
    pub name: String,
    /// Optional path or URL of an image for this item
    pub image: Option<String>,
}

/// Ordered, fixed-size list of items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Build a catalog from item names without images.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Item {
                index,
                name: name.into(),
                image: None,
            })
            .collect();
        Self { items }
    }

    /// Attach images to the items, in order. Missing trailing entries leave
    /// the image unset; empty strings are treated as "no image".
    pub fn with_images(mut self, images: &[String]) -> Self {
        for (item, image) in self.items.iter_mut().zip(images) {
            item.image = if image.is_empty() {
                None
            } else {
                Some(image.clone())
            };
        }
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by index
    pub fn get(&self, index: ItemIndex) -> Result<&Item> {
        self.items.get(index).ok_or(DataError::InvalidIndex {
            what: "item",
            index,
            len: self.items.len(),
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }
}

// =============================================================================
// Tables
// =============================================================================

/// Values held by a meta column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValues {
    /// Free text, e.g. names or file paths
    Text(Vec<String>),
    /// Real numbers
    Numeric(Vec<f64>),
    /// Values from a fixed set of labels
    Categorical(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Text(values) | ColumnValues::Categorical(values) => values.len(),
            ColumnValues::Numeric(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named, typed column of a table that is not a numeric attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
    /// Declared semantic type, e.g. `image`
    pub type_hint: Option<String>,
}

impl Column {
    /// Shorthand for a text column without a type hint
    pub fn text<S: Into<String>>(name: S, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Text(values),
            type_hint: None,
        }
    }

    /// Shorthand for a numeric column
    pub fn numeric<S: Into<String>>(name: S, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Numeric(values),
            type_hint: None,
        }
    }

    pub fn with_type_hint<S: Into<String>>(mut self, hint: S) -> Self {
        self.type_hint = Some(hint.into());
        self
    }

    /// The string values, if this is a text column
    pub fn text_values(&self) -> Option<&[String]> {
        match &self.values {
            ColumnValues::Text(values) => Some(values),
            _ => None,
        }
    }
}

/// Tabular input: numeric attribute columns plus meta columns.
///
/// `values` is row-major with one entry per attribute in every row. When a
/// table describes persons, attributes are items; when it describes items,
/// attributes are persons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub attributes: Vec<String>,
    pub values: Vec<Vec<f64>>,
    pub metas: Vec<Column>,
}

impl Table {
    /// Create a table, checking that every row and meta column has the
    /// expected length.
    pub fn new(attributes: Vec<String>, values: Vec<Vec<f64>>, metas: Vec<Column>) -> Result<Self> {
        for (row_no, row) in values.iter().enumerate() {
            if row.len() != attributes.len() {
                return Err(DataError::ShapeMismatch(format!(
                    "row {} has {} values but the table has {} attributes",
                    row_no,
                    row.len(),
                    attributes.len()
                )));
            }
        }
        for column in &metas {
            if column.values.len() != values.len() {
                return Err(DataError::ShapeMismatch(format!(
                    "meta column '{}' has {} values but the table has {} rows",
                    column.name,
                    column.values.len(),
                    values.len()
                )));
            }
        }
        Ok(Self {
            attributes,
            values,
            metas,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.values.len()
    }

    /// Find a meta column by name
    pub fn meta(&self, name: &str) -> Option<&Column> {
        self.metas.iter().find(|column| column.name == name)
    }
}

// =============================================================================
// Network
// =============================================================================

/// What the network knows about its nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum NodeData {
    /// Only the graph structure is known
    #[default]
    None,
    /// One label per node
    Names(Vec<String>),
    /// One table row per node; attributes (if any) are item choices
    Table(Table),
}

/// A social graph over persons together with its node data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub adjacency: WeightedAdjacency,
    pub nodes: NodeData,
}

impl Network {
    pub fn new(adjacency: WeightedAdjacency, nodes: NodeData) -> Self {
        Self { adjacency, nodes }
    }

    /// Replace the node data with a table, one row per node.
    pub fn with_node_table(mut self, table: Table) -> Result<Self> {
        if table.num_rows() != self.adjacency.num_nodes() {
            return Err(DataError::ShapeMismatch(format!(
                "node table has {} rows but the network has {} nodes",
                table.num_rows(),
                self.adjacency.num_nodes()
            )));
        }
        self.nodes = NodeData::Table(table);
        Ok(self)
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.num_nodes()
    }
}

// =============================================================================
// Dataset - aligned inputs for the engine
// =============================================================================

/// Roster, catalog and choices with rows and columns aligned to each other.
///
/// Only produced by `alignment::align` or `Dataset::new`, both of which
/// check the shapes, so every index valid for the roster is a valid row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub roster: Roster,
    pub catalog: Catalog,
    pub choices: ChoiceMatrix,
    /// Column the person names were taken from, if any
    pub person_column: Option<String>,
    /// Column the item names were taken from, if any
    pub item_column: Option<String>,
    /// Column the item images were taken from, if any
    pub image_column: Option<String>,
}

impl Dataset {
    pub fn new(roster: Roster, catalog: Catalog, choices: ChoiceMatrix) -> Result<Self> {
        if choices.num_persons() != roster.len() || choices.num_items() != catalog.len() {
            return Err(DataError::ShapeMismatch(format!(
                "choice matrix is {}x{} but there are {} persons and {} items",
                choices.num_persons(),
                choices.num_items(),
                roster.len(),
                catalog.len()
            )));
        }
        Ok(Self {
            roster,
            catalog,
            choices,
            person_column: None,
            item_column: None,
            image_column: None,
        })
    }

    /// Names of the items chosen by a person, in catalog order
    pub fn chosen_item_names(&self, person: PersonIndex) -> Result<Vec<String>> {
        self.choices
            .chosen_items(person)?
            .into_iter()
            .map(|item| Ok(self.catalog.get(item)?.name.clone()))
            .collect()
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.roster.len(), self.catalog.len(), self.choices.count_chosen())
    }
}
