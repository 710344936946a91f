use std::fmt::Write as _;

use filtertable_filter::{Cell, FilterSummary, Grid, Row, Term};
use serde::Serialize;

/// A delimited text table: an optional header line plus the filterable grid.
#[derive(Debug, Clone)]
pub struct Table {
    pub header: Option<Vec<String>>,
    pub grid: Grid,
}

#[derive(Debug, Clone, Copy)]
pub struct TableFormat {
    pub delimiter: char,
    pub header: bool,
    /// Cells written as `{tag}text` carry `tag`.
    pub tagged: bool,
}

impl Table {
    pub fn parse(contents: &str, format: TableFormat) -> Self {
        let mut lines = contents.lines().filter(|line| !line.is_empty());

        let header = if format.header {
            lines.next().map(|line| {
                line.split(format.delimiter)
                    .map(|cell| cell.trim().to_string())
                    .collect()
            })
        } else {
            None
        };

        let rows = lines
            .map(|line| {
                let cells = line
                    .split(format.delimiter)
                    .map(|raw| parse_cell(raw.trim(), format.tagged))
                    .collect();
                Row::new(cells)
            })
            .collect();

        Self {
            header,
            grid: Grid::new(rows),
        }
    }

    /// Visible rows only; highlighted cells are wrapped in brackets.
    pub fn render_text(&self, delimiter: char) -> String {
        let mut out = String::new();
        if let Some(header) = &self.header {
            let _ = writeln!(out, "{}", join(header.iter().map(String::as_str), delimiter));
        }

        for (_, row) in self.grid.visible_rows() {
            let cells = row.cells.iter().map(|cell| {
                if cell.highlighted {
                    format!("[{}]", cell.text)
                } else {
                    cell.text.clone()
                }
            });
            let _ = writeln!(out, "{}", join(cells, delimiter));
        }
        out
    }

    pub fn report<'a>(
        &'a self,
        query: &'a str,
        terms: &'a [Term],
        summary: FilterSummary,
    ) -> Report<'a> {
        let rows = self
            .grid
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| RowDecision {
                index,
                visible: row.visible,
                highlighted: row
                    .cells
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.highlighted)
                    .map(|(column, _)| column)
                    .collect(),
            })
            .collect();

        Report {
            query,
            terms,
            summary,
            rows,
        }
    }
}

/// Per-row decisions for hosts that render the table themselves.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub query: &'a str,
    pub terms: &'a [Term],
    pub summary: FilterSummary,
    pub rows: Vec<RowDecision>,
}

#[derive(Debug, Serialize)]
pub struct RowDecision {
    pub index: usize,
    pub visible: bool,
    pub highlighted: Vec<usize>,
}

fn parse_cell(raw: &str, tagged: bool) -> Cell {
    if tagged
        && let Some(rest) = raw.strip_prefix('{')
        && let Some((tag, text)) = rest.split_once('}')
        && !tag.trim().is_empty()
    {
        return Cell::new(text.trim()).with_tag(tag.trim());
    }
    Cell::new(raw)
}

fn join<I, S>(cells: I, delimiter: char) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (index, cell) in cells.into_iter().enumerate() {
        if index > 0 {
            out.push(delimiter);
        }
        out.push_str(cell.as_ref());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use filtertable_filter::{FilterState, Query};

    const FORMAT: TableFormat = TableFormat {
        delimiter: ',',
        header: true,
        tagged: true,
    };

    #[test]
    fn test_parse_table() {
        let table = Table::parse("name,kind\n\nApple,{skip}fruit\nLeek,veg\n", FORMAT);
        assert_eq!(
            table.header,
            Some(vec!["name".to_string(), "kind".to_string()])
        );
        assert_eq!(table.grid.row_count(), 2);
        let cell = &table.grid.rows[0].cells[1];
        assert_eq!(cell.text, "fruit");
        assert!(cell.has_tag("skip"));
    }

    #[test]
    fn test_rows_of_empty_cells_are_kept() {
        let format = TableFormat {
            delimiter: '\t',
            header: false,
            tagged: false,
        };
        let table = Table::parse("a\tb\n\t\nc\td\n", format);
        assert_eq!(table.grid.row_count(), 3);
        assert_eq!(table.grid.rows[1].cells, vec![Cell::new(""), Cell::new("")]);
        assert_eq!(table.grid.rows[2].cells[0].text, "c");
    }

    #[test]
    fn test_untagged_braces_are_text() {
        let format = TableFormat {
            tagged: false,
            ..FORMAT
        };
        let table = Table::parse("h\n{a}b\n", format);
        assert_eq!(table.grid.rows[0].cells[0].text, "{a}b");
    }

    #[test]
    fn test_render_visible_rows_with_highlights() {
        let mut table = Table::parse("name,kind\nApple pie,dessert\nLeek,veg\n", FORMAT);
        let mut state = FilterState::default();
        state.set_query(&mut table.grid, "pie");

        assert_eq!(table.render_text(','), "name,kind\n[Apple pie],dessert\n");
    }

    #[test]
    fn test_report_lists_decisions() {
        let mut table = Table::parse("h\nApple\nLeek\n", FORMAT);
        let query = Query::new("leek");
        let mut state = FilterState::default();
        let summary = state.set_query(&mut table.grid, query.raw());

        let report = table.report(query.raw(), query.terms(), summary);
        assert_eq!(report.rows.len(), 2);
        assert!(!report.rows[0].visible);
        assert!(report.rows[1].visible);
        assert_eq!(report.rows[1].highlighted, vec![0]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["terms"][0]["sign"], "include");
        assert_eq!(json["summary"]["visible_rows"], 1);
    }
}
