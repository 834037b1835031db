//! Sparse weighted directed graph over persons.
//!
//! Stored in compressed sparse row form: the outgoing edges of node `n` are
//! `targets[offsets[n]..offsets[n + 1]]` with matching `weights`. Within a
//! node, edges are kept in ascending target order. Callers should only rely
//! on `outgoing_edges`; the storage layout is an implementation detail.

use crate::error::{DataError, Result};
use crate::types::PersonIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One directed, weighted edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: PersonIndex,
    pub to: PersonIndex,
    pub weight: f64,
}

impl Edge {
    pub fn new(from: PersonIndex, to: PersonIndex, weight: f64) -> Self {
        Self { from, to, weight }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedAdjacency {
    offsets: Vec<usize>,
    targets: Vec<PersonIndex>,
    weights: Vec<f64>,
}

impl WeightedAdjacency {
    /// Build the graph from an edge list.
    ///
    /// Both endpoints must be below `num_nodes`. If the same edge is listed
    /// more than once the last weight wins.
    pub fn from_edges<I>(num_nodes: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = Edge>,
    {
        // BTreeMap keeps each row sorted by target and collapses duplicates
        let mut rows: Vec<BTreeMap<PersonIndex, f64>> = vec![BTreeMap::new(); num_nodes];
        for edge in edges {
            for endpoint in [edge.from, edge.to] {
                if endpoint >= num_nodes {
                    return Err(DataError::InvalidIndex {
                        what: "node",
                        index: endpoint,
                        len: num_nodes,
                    });
                }
            }
            rows[edge.from].insert(edge.to, edge.weight);
        }

        let mut offsets = Vec::with_capacity(num_nodes + 1);
        let mut targets = Vec::new();
        let mut weights = Vec::new();
        offsets.push(0);
        for row in rows {
            for (to, weight) in row {
                targets.push(to);
                weights.push(weight);
            }
            offsets.push(targets.len());
        }

        Ok(Self {
            offsets,
            targets,
            weights,
        })
    }

    /// Graph with `num_nodes` nodes and no edges
    pub fn empty(num_nodes: usize) -> Self {
        Self {
            offsets: vec![0; num_nodes + 1],
            targets: Vec::new(),
            weights: Vec::new(),
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn num_edges(&self) -> usize {
        self.targets.len()
    }

    fn range(&self, node: PersonIndex) -> Result<std::ops::Range<usize>> {
        if node >= self.num_nodes() {
            return Err(DataError::InvalidIndex {
                what: "node",
                index: node,
                len: self.num_nodes(),
            });
        }
        Ok(self.offsets[node]..self.offsets[node + 1])
    }

    /// Outgoing edges of `node` as `(neighbour, weight)` pairs, in ascending
    /// neighbour order.
    pub fn outgoing_edges(&self, node: PersonIndex) -> Result<Vec<(PersonIndex, f64)>> {
        let range = self.range(node)?;
        Ok(self.targets[range.clone()]
            .iter()
            .copied()
            .zip(self.weights[range].iter().copied())
            .collect())
    }

    /// Just the neighbour indices of `node`, in ascending order
    pub fn neighbours(&self, node: PersonIndex) -> Result<&[PersonIndex]> {
        let range = self.range(node)?;
        Ok(&self.targets[range])
    }
}
