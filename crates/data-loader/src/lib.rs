//! # Data Loader Crate
//!
//! This crate holds the data model for friend-based item recommendation and
//! everything needed to get inputs into it.
//!
//! ## Main Components
//!
//! - **types**: Roster, Catalog, Table, Network, Dataset
//! - **matrix**: the boolean person x item `ChoiceMatrix`
//! - **adjacency**: the sparse `WeightedAdjacency` over persons
//! - **columns**: classification of table columns into candidate roles
//! - **alignment**: matching persons across the network and an item table
//! - **parser** / **loader**: Pajek networks and Orange tab files
//! - **error**: error types for loading and validation
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{align, load_network, ColumnChoices};
//! use std::path::Path;
//!
//! let network = load_network(Path::new("friends.net"), Some(Path::new("friends.tab")))?;
//! let dataset = align(&network, None, &ColumnChoices::default())?;
//!
//! let ema = dataset.roster.position("Ema Novak").unwrap();
//! println!("{:?}", dataset.chosen_item_names(ema)?);
//! ```

// Public modules
pub mod adjacency;
pub mod alignment;
pub mod columns;
pub mod error;
pub mod loader;
pub mod matrix;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use adjacency::{Edge, WeightedAdjacency};
pub use alignment::{ColumnChoices, align};
pub use columns::{ColumnCandidates, ColumnRole, classify_candidate_columns, resolve_column};
pub use error::{DataError, Result};
pub use loader::{InputFiles, load_inputs, load_network};
pub use matrix::ChoiceMatrix;
pub use types::{
    // Type aliases
    ItemIndex,
    PersonIndex,
    // Core types
    Catalog,
    Column,
    ColumnValues,
    Dataset,
    Item,
    Network,
    NodeData,
    Person,
    Roster,
    Table,
};
