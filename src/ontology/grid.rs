use serde_json::{json, Map, Value};

use super::{Ontology, ID_TAG};
use crate::kinds::Kind;

/// Zinc format version written in the grid header.
pub const ZINC_VERSION: &str = "3.0";

/// Column-major snapshot of an [`Ontology`]. Columns are `id` then every tag name in first-seen
/// order; rows hold one cell per column, `None` where the entity lacks the tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    columns: Vec<String>,
    rows: Vec<Vec<Option<Kind>>>,
}

impl Grid {
    pub fn new(ontology: &Ontology) -> Self {
        let mut grid = Grid::default();
        for entity in ontology {
            let mut row: Vec<Option<Kind>> = Vec::with_capacity(grid.columns.len());
            set_cell(&mut row, grid.column(ID_TAG), Kind::Ref(entity.id().clone()));
            for tag in entity {
                set_cell(&mut row, grid.column(tag.name()), tag.kind().clone());
            }
            grid.rows.push(row);
        }
        // Rows built before later columns appeared are padded to full width.
        let width = grid.columns.len();
        for row in grid.rows.iter_mut() {
            row.resize(width, None);
        }
        grid
    }

    fn column(&mut self, name: &str) -> usize {
        match self.columns.iter().position(|col| col == name) {
            Some(idx) => idx,
            None => {
                self.columns.push(name.to_string());
                self.columns.len() - 1
            }
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<Kind>>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Kind> {
        let idx = self.columns.iter().position(|col| col == column)?;
        self.rows.get(row)?.get(idx)?.as_ref()
    }

    /// `ver:"3.0"`, the column names, then one line per row with empty fields for absent tags.
    /// Absent cells after a row's last value are left out.
    pub fn to_zinc(&self) -> String {
        let mut zinc = format!("ver:\"{ZINC_VERSION}\"\n");
        zinc.push_str(&self.columns.join(", "));
        zinc.push('\n');
        for row in &self.rows {
            let width = row.iter().rposition(Option::is_some).map_or(0, |idx| idx + 1);
            let line = row[..width]
                .iter()
                .map(|cell| cell.as_ref().map(Kind::to_zinc).unwrap_or_default())
                .collect::<Vec<String>>()
                .join(", ");
            zinc.push_str(&line);
            zinc.push('\n');
        }
        zinc
    }

    pub fn to_json(&self) -> Value {
        let cols = self
            .columns
            .iter()
            .map(|name| json!({ "name": name }))
            .collect::<Vec<Value>>();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let map = self
                    .columns
                    .iter()
                    .zip(row.iter())
                    .filter_map(|(name, cell)| {
                        cell.as_ref().map(|kind| (name.clone(), kind.to_json()))
                    })
                    .collect::<Map<String, Value>>();
                Value::Object(map)
            })
            .collect::<Vec<Value>>();
        json!({
            "_kind": "grid",
            "meta": { "ver": ZINC_VERSION },
            "cols": cols,
            "rows": rows,
        })
    }
}

fn set_cell(row: &mut Vec<Option<Kind>>, idx: usize, kind: Kind) {
    if row.len() <= idx {
        row.resize(idx + 1, None);
    }
    row[idx] = Some(kind);
}
