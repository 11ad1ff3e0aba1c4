//! Row/column view over a `<table>` element.

use super::arena::{Dom, NodeId};

/// Cell matrix of a table: `rows[r][c]` is a `td` or `th` node.
///
/// Rows and cells of nested tables belong to the nested table, not to this
/// one.
#[derive(Debug, Clone, Default)]
pub struct TableRows {
    rows: Vec<Vec<NodeId>>,
}

impl TableRows {
    /// Collect the cell matrix of `table`.
    pub fn new(dom: &Dom, table: NodeId) -> Self {
        let owner_is = |id: NodeId, tag: &'static str, owner: NodeId| {
            dom.parent(id)
                .and_then(|p| dom.closest(p, |d, n| d.is_tag(n, tag)))
                == Some(owner)
        };

        let rows = dom
            .select_all(table, |d, id| d.is_tag(id, "tr") && owner_is(id, "table", table))
            .into_iter()
            .map(|tr| {
                dom.select_all(tr, |d, id| {
                    (d.is_tag(id, "td") || d.is_tag(id, "th")) && owner_is(id, "tr", tr)
                })
            })
            .collect();

        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, col)`, if the table has one there.
    pub fn at(&self, row: usize, col: usize) -> Option<NodeId> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Text of the cell at `(row, col)`; empty when absent.
    pub fn text_at(&self, dom: &Dom, row: usize, col: usize) -> String {
        self.at(row, col)
            .map(|cell| dom.text_content(cell))
            .unwrap_or_default()
    }

    /// Lowercased, trimmed text of the first cell.
    pub fn label(&self, dom: &Dom) -> String {
        self.text_at(dom, 0, 0).trim().to_lowercase()
    }

    /// Second cell of the first row whose first cell reads `name`
    /// (case-insensitive, surrounding whitespace ignored).
    pub fn value(&self, dom: &Dom, name: &str) -> Option<NodeId> {
        self.rows.iter().find_map(|row| {
            let key = row.first()?;
            if dom.text_content(*key).trim().to_lowercase() == name {
                row.get(1).copied()
            } else {
                None
            }
        })
    }

    /// Trimmed text of [`value`](Self::value); empty when absent.
    pub fn value_text(&self, dom: &Dom, name: &str) -> String {
        self.value(dom, name)
            .map(|cell| dom.text_content(cell).trim().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    fn first_table(dom: &Dom) -> NodeId {
        dom.select(dom.document(), |d, id| d.is_tag(id, "table"))
            .expect("table")
    }

    #[test]
    fn test_label_and_values() {
        let dom = parse_fragment(
            "<table><tr><td> Metadata </td></tr>\
             <tr><td>Hed</td><td>Hello</td></tr>\
             <tr><td>byline</td><td> By Jane </td></tr></table>",
        );
        let rows = TableRows::new(&dom, first_table(&dom));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.label(&dom), "metadata");
        assert_eq!(rows.value_text(&dom, "hed"), "Hello");
        assert_eq!(rows.value_text(&dom, "byline"), "By Jane");
        assert_eq!(rows.value_text(&dom, "missing"), "");
        assert!(rows.at(0, 1).is_none());
    }

    #[test]
    fn test_nested_tables_are_separate() {
        let dom = parse_fragment(
            "<table><tr><td>outer<table><tr><td>inner</td><td>x</td></tr></table></td></tr></table>",
        );
        let rows = TableRows::new(&dom, first_table(&dom));
        assert_eq!(rows.len(), 1);
        assert!(rows.at(0, 1).is_none());
    }
}
