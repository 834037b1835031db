//! Boolean person x item choice matrix.
//!
//! Rows correspond 1:1 to the roster and columns 1:1 to the catalog. The
//! matrix is immutable once built; re-deriving it is cheap compared with
//! keeping it in sync with changing inputs.

use crate::error::{DataError, Result};
use crate::types::{ItemIndex, PersonIndex};
use serde::{Deserialize, Serialize};

/// `choice[p][i]` is true iff person `p` has chosen item `i`.
///
/// Stored row-major in a single `Vec<bool>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceMatrix {
    num_persons: usize,
    num_items: usize,
    cells: Vec<bool>,
}

impl ChoiceMatrix {
    /// Build from boolean rows; all rows must have the same length.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let num_items = rows.first().map_or(0, |row| row.len());
        let mut cells = Vec::with_capacity(rows.len() * num_items);
        for (row_no, row) in rows.iter().enumerate() {
            if row.len() != num_items {
                return Err(DataError::ShapeMismatch(format!(
                    "choice row {} has {} entries, expected {}",
                    row_no,
                    row.len(),
                    num_items
                )));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            num_persons: rows.len(),
            num_items,
            cells,
        })
    }

    /// Build from numeric rows; any nonzero value counts as chosen.
    pub fn from_numeric(rows: &[Vec<f64>]) -> Result<Self> {
        let bool_rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.iter().map(|&value| value != 0.0).collect())
            .collect();
        Self::from_rows(&bool_rows)
    }

    /// Matrix of the given shape where nobody has chosen anything.
    pub fn unchosen(num_persons: usize, num_items: usize) -> Self {
        Self {
            num_persons,
            num_items,
            cells: vec![false; num_persons * num_items],
        }
    }

    pub fn num_persons(&self) -> usize {
        self.num_persons
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.num_persons, self.num_items)
    }

    fn check_person(&self, person: PersonIndex) -> Result<()> {
        if person >= self.num_persons {
            return Err(DataError::InvalidIndex {
                what: "person",
                index: person,
                len: self.num_persons,
            });
        }
        Ok(())
    }

    /// The choices of one person
    pub fn row(&self, person: PersonIndex) -> Result<&[bool]> {
        self.check_person(person)?;
        let start = person * self.num_items;
        Ok(&self.cells[start..start + self.num_items])
    }

    /// Whether `person` chose `item`
    pub fn get(&self, person: PersonIndex, item: ItemIndex) -> Result<bool> {
        let row = self.row(person)?;
        row.get(item).copied().ok_or(DataError::InvalidIndex {
            what: "item",
            index: item,
            len: self.num_items,
        })
    }

    /// Indices of the items a person has chosen, in column order
    pub fn chosen_items(&self, person: PersonIndex) -> Result<Vec<ItemIndex>> {
        let row = self.row(person)?;
        Ok(row
            .iter()
            .enumerate()
            .filter(|(_, chosen)| **chosen)
            .map(|(item, _)| item)
            .collect())
    }

    /// Per item, how many of `persons` chose it.
    ///
    /// A person listed twice is counted twice; callers pass distinct indices.
    pub fn column_votes(&self, persons: &[PersonIndex]) -> Result<Vec<usize>> {
        let mut votes = vec![0usize; self.num_items];
        for &person in persons {
            for (count, &chosen) in votes.iter_mut().zip(self.row(person)?) {
                if chosen {
                    *count += 1;
                }
            }
        }
        Ok(votes)
    }

    /// Swap the roles of rows and columns.
    pub fn transpose(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for item in 0..self.num_items {
            for person in 0..self.num_persons {
                cells.push(self.cells[person * self.num_items + item]);
            }
        }
        Self {
            num_persons: self.num_items,
            num_items: self.num_persons,
            cells,
        }
    }

    /// New matrix whose column `j` is this matrix's column `order[j]`.
    pub fn select_columns(&self, order: &[ItemIndex]) -> Result<Self> {
        if let Some(&bad) = order.iter().find(|&&column| column >= self.num_items) {
            return Err(DataError::InvalidIndex {
                what: "item",
                index: bad,
                len: self.num_items,
            });
        }
        let mut cells = Vec::with_capacity(self.num_persons * order.len());
        for person in 0..self.num_persons {
            let start = person * self.num_items;
            cells.extend(order.iter().map(|&column| self.cells[start + column]));
        }
        Ok(Self {
            num_persons: self.num_persons,
            num_items: order.len(),
            cells,
        })
    }

    /// Total number of true cells
    pub fn count_chosen(&self) -> usize {
        self.cells.iter().filter(|&&chosen| chosen).count()
    }
}
