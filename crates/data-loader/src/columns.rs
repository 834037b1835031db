//! Classification of table columns by the role they can play.
//!
//! A table may carry several text columns; some hold person names, some
//! item names, some image paths. `classify_candidate_columns` looks only at
//! the columns themselves and returns, per role, the indices of the columns
//! that qualify. `resolve_column` then picks one, honouring an explicit
//! choice from the caller.

use crate::error::{DataError, Result};
use crate::types::Column;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// File extensions that mark a value as an image reference
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "svg", "webp", "tif", "tiff"];

/// What a column can be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnRole {
    /// Unique text labels for persons
    PersonName,
    /// Text labels for items
    ItemName,
    /// Paths or URLs of item images
    Image,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColumnRole::PersonName => "person names",
            ColumnRole::ItemName => "item names",
            ColumnRole::Image => "images",
        };
        f.write_str(label)
    }
}

/// Candidate column indices per role, each list in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCandidates {
    pub person_names: Vec<usize>,
    pub item_names: Vec<usize>,
    pub images: Vec<usize>,
}

impl ColumnCandidates {
    pub fn for_role(&self, role: ColumnRole) -> &[usize] {
        match role {
            ColumnRole::PersonName => &self.person_names,
            ColumnRole::ItemName => &self.item_names,
            ColumnRole::Image => &self.images,
        }
    }

    /// Flattened `(role, column)` view
    pub fn tagged(&self) -> Vec<(ColumnRole, usize)> {
        [ColumnRole::PersonName, ColumnRole::ItemName, ColumnRole::Image]
            .into_iter()
            .flat_map(|role| self.for_role(role).iter().map(move |&column| (role, column)))
            .collect()
    }
}

/// True if `value` ends in a known image file extension.
pub fn looks_like_image(value: &str) -> bool {
    let Some((stem, extension)) = value.trim().rsplit_once('.') else {
        return false;
    };
    !stem.is_empty()
        && IMAGE_EXTENSIONS
            .iter()
            .any(|known| extension.eq_ignore_ascii_case(known))
}

fn is_image_column(column: &Column) -> bool {
    if column.type_hint.as_deref() == Some("image") {
        return column.text_values().is_some();
    }
    match column.text_values() {
        Some(values) => {
            let mut non_empty = values.iter().filter(|value| !value.is_empty()).peekable();
            non_empty.peek().is_some() && non_empty.all(|value| looks_like_image(value))
        }
        None => false,
    }
}

fn has_unique_labels(values: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .iter()
        .all(|value| !value.is_empty() && seen.insert(value.as_str()))
}

/// Classify columns into candidate roles.
///
/// ## Rules
/// - PersonName: text columns with non-empty, pairwise distinct values
/// - Image: text columns hinted as `image`, or whose non-empty values all
///   look like image file names
/// - ItemName: text columns that are not image columns; when there are none,
///   the image columns themselves
///
/// Numeric and categorical columns never qualify.
pub fn classify_candidate_columns(columns: &[Column]) -> ColumnCandidates {
    let mut candidates = ColumnCandidates::default();
    let mut plain_text = Vec::new();

    for (index, column) in columns.iter().enumerate() {
        let Some(values) = column.text_values() else {
            continue;
        };
        if has_unique_labels(values) {
            candidates.person_names.push(index);
        }
        if is_image_column(column) {
            candidates.images.push(index);
        } else {
            plain_text.push(index);
        }
    }

    candidates.item_names = if plain_text.is_empty() {
        candidates.images.clone()
    } else {
        plain_text
    };
    candidates
}

/// Pick the column for `role`.
///
/// ## Algorithm
/// 1. An explicit `choice` naming an applicable column wins. For item names
///    any text column is applicable, so a caller may name items by an image
///    column. A choice that is not applicable is ignored.
/// 2. A single candidate is selected automatically.
/// 3. No candidates is an error (`NoApplicableNameColumn` or
///    `NoApplicableItemColumn`).
/// 4. Several candidates need a choice; with `default_to_first` the first
///    candidate is taken instead of failing with `AmbiguousColumn`.
pub fn resolve_column(
    role: ColumnRole,
    candidates: &[usize],
    columns: &[Column],
    choice: Option<&str>,
    default_to_first: bool,
) -> Result<usize> {
    if let Some(name) = choice {
        let chosen = columns.iter().position(|column| column.name == name);
        let applicable = chosen.filter(|&index| match role {
            ColumnRole::ItemName => columns[index].text_values().is_some(),
            _ => candidates.contains(&index),
        });
        if let Some(index) = applicable {
            return Ok(index);
        }
        tracing::debug!("Ignoring inapplicable {} column choice '{}'", role, name);
    }

    match candidates {
        [] => Err(match role {
            ColumnRole::PersonName => DataError::NoApplicableNameColumn,
            _ => DataError::NoApplicableItemColumn,
        }),
        [only] => Ok(*only),
        [first, ..] if default_to_first => Ok(*first),
        _ => Err(DataError::AmbiguousColumn {
            role: role.to_string(),
            candidates: candidates
                .iter()
                .map(|&index| columns[index].name.clone())
                .collect(),
        }),
    }
}
