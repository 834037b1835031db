//! Parsers for the input files.
//!
//! - Pajek networks (`.net`):
//!   `*Vertices N`, then `id "label"` lines (ids are 1-based), followed by
//!   `*Arcs` (directed) and/or `*Edges` (undirected) sections with
//!   `from to [weight]` lines. Lines starting with `%` are comments.
//! - Orange tab-delimited tables (`.tab`):
//!   three header rows (names, types, flags) and then one row per instance.
//!   Continuous columns without the `meta` flag become numeric attributes,
//!   everything else becomes a meta column.

use crate::adjacency::{Edge, WeightedAdjacency};
use crate::error::{DataError, Result};
use crate::types::{Column, ColumnValues, Network, NodeData, Table};
use std::fs;
use std::path::Path;

/// Read a whole file, mapping a missing file to `FileNotFound`
fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(DataError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// =============================================================================
// Pajek
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum PajekSection {
    Preamble,
    Vertices,
    Arcs,
    Edges,
}

/// Parse a Pajek network file
pub fn parse_pajek(path: &Path) -> Result<Network> {
    let content = read_file(path)?;
    parse_pajek_str(&content, &file_label(path))
}

/// Parse Pajek content; `file` is only used in error messages.
pub fn parse_pajek_str(content: &str, file: &str) -> Result<Network> {
    let parse_error = |line: usize, reason: String| DataError::ParseError {
        file: file.to_string(),
        line,
        reason,
    };

    let mut section = PajekSection::Preamble;
    let mut num_nodes: Option<usize> = None;
    let mut labels: Vec<Option<String>> = Vec::new();
    let mut edges: Vec<Edge> = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('%') {
            continue;
        }

        if line_trimmed.starts_with('*') {
            let mut parts = line_trimmed.split_whitespace();
            let keyword = parts.next().unwrap_or_default().to_ascii_lowercase();
            section = match keyword.as_str() {
                "*vertices" => {
                    let count = parts
                        .next()
                        .ok_or_else(|| parse_error(line_no, "Missing vertex count".to_string()))?
                        .parse::<usize>()
                        .map_err(|e| parse_error(line_no, format!("Invalid vertex count: {}", e)))?;
                    num_nodes = Some(count);
                    labels = vec![None; count];
                    PajekSection::Vertices
                }
                // Optional network title; carries no data
                "*network" => section,
                "*arcs" => PajekSection::Arcs,
                "*edges" => PajekSection::Edges,
                other => {
                    return Err(parse_error(line_no, format!("Unsupported section {}", other)));
                }
            };
            continue;
        }

        let count = num_nodes
            .ok_or_else(|| parse_error(line_no, "Data before *Vertices".to_string()))?;
        let node_id = |token: Option<&str>, what: &str| -> Result<usize> {
            let token =
                token.ok_or_else(|| parse_error(line_no, format!("Missing {}", what)))?;
            let id: usize = token
                .parse()
                .map_err(|e| parse_error(line_no, format!("Invalid {}: {}", what, e)))?;
            if id == 0 || id > count {
                return Err(parse_error(
                    line_no,
                    format!("{} {} outside 1..={}", what, id, count),
                ));
            }
            Ok(id - 1)
        };

        match section {
            PajekSection::Preamble => {
                return Err(parse_error(line_no, "Data before *Vertices".to_string()));
            }
            PajekSection::Vertices => {
                let (id, rest) = match line_trimmed.split_once(char::is_whitespace) {
                    Some((id, rest)) => (id, rest.trim()),
                    None => (line_trimmed, ""),
                };
                let node = node_id(Some(id), "vertex id")?;
                if !rest.is_empty() {
                    labels[node] = Some(parse_label(rest));
                }
            }
            PajekSection::Arcs | PajekSection::Edges => {
                let mut parts = line_trimmed.split_whitespace();
                let from = node_id(parts.next(), "source vertex")?;
                let to = node_id(parts.next(), "target vertex")?;
                let weight = match parts.next() {
                    Some(token) => token
                        .parse::<f64>()
                        .map_err(|e| parse_error(line_no, format!("Invalid weight: {}", e)))?,
                    None => 1.0,
                };
                edges.push(Edge::new(from, to, weight));
                if section == PajekSection::Edges && from != to {
                    edges.push(Edge::new(to, from, weight));
                }
            }
        }
    }

    let num_nodes = num_nodes.ok_or_else(|| parse_error(0, "Missing *Vertices section".to_string()))?;
    let adjacency = WeightedAdjacency::from_edges(num_nodes, edges)?;

    // Labels are all-or-nothing: a partially labelled network has no names
    let nodes = if num_nodes > 0 && labels.iter().all(Option::is_some) {
        NodeData::Names(labels.into_iter().flatten().collect())
    } else {
        NodeData::None
    };
    Ok(Network::new(adjacency, nodes))
}

/// Strip the quotes from a vertex label; anything after the closing quote
/// (coordinates, shapes) is ignored.
fn parse_label(rest: &str) -> String {
    if let Some(quoted) = rest.strip_prefix('"') {
        match quoted.find('"') {
            Some(end) => quoted[..end].to_string(),
            None => quoted.to_string(),
        }
    } else {
        rest.split_whitespace().next().unwrap_or_default().to_string()
    }
}

// =============================================================================
// Orange .tab
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum TabType {
    Continuous,
    Text,
    Discrete,
}

fn parse_tab_type(s: &str) -> Option<TabType> {
    match s.trim().to_ascii_lowercase().as_str() {
        "c" | "continuous" => Some(TabType::Continuous),
        "s" | "string" | "text" => Some(TabType::Text),
        "d" | "discrete" => Some(TabType::Discrete),
        _ => None,
    }
}

struct ColumnHeader {
    name: String,
    kind: TabType,
    meta: bool,
    type_hint: Option<String>,
}

/// Parse an Orange tab-delimited table
pub fn parse_table(path: &Path) -> Result<Table> {
    let content = read_file(path)?;
    parse_table_str(&content, &file_label(path))
}

/// Parse tab-delimited content; `file` is only used in error messages.
pub fn parse_table_str(content: &str, file: &str) -> Result<Table> {
    let parse_error = |line: usize, reason: String| DataError::ParseError {
        file: file.to_string(),
        line,
        reason,
    };

    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')));

    let (_, names_line) = lines
        .next()
        .ok_or_else(|| parse_error(1, "Missing header row".to_string()))?;
    let names: Vec<&str> = names_line.split('\t').collect();
    let (types_no, types_line) = lines
        .next()
        .ok_or_else(|| parse_error(2, "Missing type row".to_string()))?;
    let types: Vec<&str> = types_line.split('\t').collect();
    let flags_line = lines.next().map(|(_, line)| line).unwrap_or_default();
    let flags: Vec<&str> = flags_line.split('\t').collect();

    let mut headers = Vec::with_capacity(names.len());
    for (position, name) in names.iter().enumerate() {
        let type_str = types.get(position).copied().unwrap_or_default();
        let kind = parse_tab_type(type_str).ok_or_else(|| {
            parse_error(types_no, format!("Unknown type '{}' for column '{}'", type_str, name))
        })?;
        let flag_str = flags.get(position).copied().unwrap_or_default();
        let mut meta = false;
        let mut type_hint = None;
        for flag in flag_str.split_whitespace() {
            if flag == "meta" || flag == "m" {
                meta = true;
            } else if let Some(hint) = flag.strip_prefix("type=") {
                type_hint = Some(hint.to_string());
            }
        }
        headers.push(ColumnHeader {
            name: name.trim().to_string(),
            kind,
            meta,
            type_hint,
        });
    }

    let is_attribute = |header: &ColumnHeader| header.kind == TabType::Continuous && !header.meta;
    let attributes: Vec<String> = headers
        .iter()
        .filter(|header| is_attribute(header))
        .map(|header| header.name.clone())
        .collect();

    let mut values: Vec<Vec<f64>> = Vec::new();
    let mut meta_cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue; // Skip empty lines
        }
        let cells: Vec<&str> = line.split('\t').collect();
        if cells.len() > headers.len() {
            return Err(parse_error(
                line_no,
                format!("Expected {} fields but found {}", headers.len(), cells.len()),
            ));
        }
        let mut row = Vec::with_capacity(attributes.len());
        for (position, header) in headers.iter().enumerate() {
            let cell = cells.get(position).copied().unwrap_or_default().trim();
            if is_attribute(header) {
                row.push(parse_number(cell).map_err(|reason| {
                    parse_error(line_no, format!("Column '{}': {}", header.name, reason))
                })?);
            } else {
                meta_cells[position].push(cell.to_string());
            }
        }
        values.push(row);
    }

    let mut metas = Vec::new();
    for (header, cells) in headers.into_iter().zip(meta_cells) {
        if is_attribute(&header) {
            continue;
        }
        let column_values = match header.kind {
            TabType::Text => ColumnValues::Text(cells),
            TabType::Discrete => ColumnValues::Categorical(cells),
            TabType::Continuous => ColumnValues::Numeric(
                cells
                    .iter()
                    .map(|cell| parse_number(cell).unwrap_or(f64::NAN))
                    .collect(),
            ),
        };
        metas.push(Column {
            name: header.name,
            values: column_values,
            type_hint: header.type_hint,
        });
    }

    Table::new(attributes, values, metas)
}

/// Numbers for choice attributes; missing values (`?` or empty) read as 0.
fn parse_number(cell: &str) -> std::result::Result<f64, String> {
    if cell.is_empty() || cell == "?" {
        return Ok(0.0);
    }
    cell.parse::<f64>()
        .map_err(|e| format!("Invalid number '{}': {}", cell, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORK: &str = "\
% three friends
*Vertices 3
1 \"Ana Kos\" 0.1 0.2
2 \"Jan Horvat\"
3 \"Maja Čeh\"
*Arcs
1 3 0.5
1 2
*Edges
2 3 2.0
";

    #[test]
    fn test_parse_pajek() {
        let network = parse_pajek_str(NETWORK, "test.net").unwrap();
        assert_eq!(network.num_nodes(), 3);
        assert_eq!(
            network.nodes,
            NodeData::Names(vec![
                "Ana Kos".to_string(),
                "Jan Horvat".to_string(),
                "Maja Čeh".to_string()
            ])
        );
        assert_eq!(
            network.adjacency.outgoing_edges(0).unwrap(),
            vec![(1, 1.0), (2, 0.5)]
        );
        // *Edges are undirected
        assert_eq!(network.adjacency.outgoing_edges(1).unwrap(), vec![(2, 2.0)]);
        assert_eq!(network.adjacency.outgoing_edges(2).unwrap(), vec![(1, 2.0)]);
    }

    #[test]
    fn test_pajek_network_title_is_skipped() {
        let content = "*Network friends\n*Vertices 2\n1 \"Ana\"\n2 \"Jan\"\n*Arcs\n1 2\n";
        let network = parse_pajek_str(content, "titled.net").unwrap();
        assert_eq!(network.num_nodes(), 2);
        assert_eq!(network.adjacency.outgoing_edges(0).unwrap(), vec![(1, 1.0)]);
        assert!(matches!(&network.nodes, NodeData::Names(names) if names == &["Ana", "Jan"]));
    }

    #[test]
    fn test_pajek_without_labels() {
        let network = parse_pajek_str("*Vertices 2\n*Arcs\n1 2\n", "bare.net").unwrap();
        assert_eq!(network.nodes, NodeData::None);
        assert_eq!(network.adjacency.num_edges(), 1);
    }

    #[test]
    fn test_pajek_errors_carry_line_numbers() {
        let err = parse_pajek_str("*Vertices 2\n*Arcs\n1 3\n", "bad.net").unwrap_err();
        match err {
            DataError::ParseError { file, line, .. } => {
                assert_eq!(file, "bad.net");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse_pajek_str("1 2\n", "bad.net").is_err());
        assert!(parse_pajek_str("*Vertices 2\n*Arcs\n1 2 heavy\n", "bad.net").is_err());
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label("\"Lilo & Stich\" 0.5 0.5"), "Lilo & Stich");
        assert_eq!(parse_label("plain 0.5"), "plain");
    }

    const TABLE: &str = "\
name\tposter\tMoana\tCoco\tgroup
s\ts\tc\tc\td
meta\tmeta type=image\t\t\tmeta
Ana Kos\tmoana.png\t1\t0\ta
Jan Horvat\t\t?\t1\tb
";

    #[test]
    fn test_parse_table() {
        let table = parse_table_str(TABLE, "test.tab").unwrap();
        assert_eq!(table.attributes, vec!["Moana", "Coco"]);
        assert_eq!(table.values, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert_eq!(table.metas.len(), 3);

        let name = table.meta("name").unwrap();
        assert_eq!(name.text_values().unwrap(), &["Ana Kos", "Jan Horvat"]);
        let poster = table.meta("poster").unwrap();
        assert_eq!(poster.type_hint.as_deref(), Some("image"));
        assert_eq!(
            table.meta("group").unwrap().values,
            ColumnValues::Categorical(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_table_errors() {
        let bad_type = "name\nx\n\nAna\n";
        assert!(parse_table_str(bad_type, "t.tab").is_err());

        let bad_number = "Moana\nc\n\nyes\n";
        match parse_table_str(bad_number, "t.tab").unwrap_err() {
            DataError::ParseError { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }

        let too_many = "Moana\nc\n\n1\t2\n";
        assert!(parse_table_str(too_many, "t.tab").is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = parse_table(Path::new("does/not/exist.tab"));
        assert!(matches!(result, Err(DataError::FileNotFound { .. })));
    }
}
