use log::debug;
use serde::Serialize;

use crate::config::FilterConfig;
use crate::grid::{Grid, IgnoreSet, Row};
use crate::matcher::{MatchMode, TermMatcher};
use crate::query::{Query, Sign, Term};

/// What the host needs to know after an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterSummary {
    /// False when the query was empty or too short and every row is shown.
    pub active: bool,
    pub total_rows: usize,
    pub visible_rows: usize,
    pub highlighted_cells: usize,
}

impl FilterSummary {
    fn from_grid(grid: &Grid, active: bool) -> Self {
        Self {
            active,
            total_rows: grid.row_count(),
            visible_rows: grid.visible_row_count(),
            highlighted_cells: grid.highlighted_cell_count(),
        }
    }
}

pub struct FilterEngine {
    config: FilterConfig,
}

impl FilterEngine {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn apply(&self, grid: &mut Grid, raw_query: &str) -> FilterSummary {
        self.apply_query(grid, &Query::new(raw_query))
    }

    pub fn apply_query(&self, grid: &mut Grid, query: &Query) -> FilterSummary {
        evaluate(
            grid,
            query,
            self.config.match_mode,
            &self.config.ignore_set(),
            self.config.min_chars,
        )
    }
}

/// Recomputes every row's visibility and every cell's highlight from scratch.
///
/// Terms are applied strictly left to right, each one seeing the visibility
/// left by the previous one. When `ignore` names columns, the raw query is
/// instead matched as a single fragment and signs are not interpreted.
pub fn evaluate(
    grid: &mut Grid,
    query: &Query,
    mode: MatchMode,
    ignore: &IgnoreSet,
    min_chars: usize,
) -> FilterSummary {
    if query.is_degenerate(min_chars) {
        grid.reset(true);
        return FilterSummary::from_grid(grid, false);
    }

    grid.reset(false);

    if ignore.has_columns() {
        apply_combined(grid, query.raw(), mode, ignore);
    } else {
        for term in query.terms() {
            apply_term(grid, term, mode, ignore);
        }
    }

    FilterSummary::from_grid(grid, true)
}

fn apply_term(grid: &mut Grid, term: &Term, mode: MatchMode, ignore: &IgnoreSet) {
    let matcher = TermMatcher::new(&term.fragment, mode);
    let mut changed = 0;

    for row in &mut grid.rows {
        match term.sign {
            Sign::Include => {
                if mark_matches(row, &matcher, ignore) {
                    if !row.visible {
                        changed += 1;
                    }
                    row.visible = true;
                }
            }
            Sign::Exclude => {
                if row.visible && mark_matches(row, &matcher, ignore) {
                    row.visible = false;
                    changed += 1;
                }
            }
            Sign::Constrain => {
                if row.visible && !mark_matches(row, &matcher, ignore) {
                    row.visible = false;
                    changed += 1;
                }
            }
        }
    }

    debug!("term `{term}` changed visibility of {changed} row(s)");
}

fn apply_combined(grid: &mut Grid, raw_query: &str, mode: MatchMode, ignore: &IgnoreSet) {
    let matcher = TermMatcher::new(raw_query, mode);
    for row in &mut grid.rows {
        if mark_matches(row, &matcher, ignore) {
            row.visible = true;
        }
    }

    debug!(
        "column-restricted query {raw_query:?} matched {} row(s)",
        grid.visible_row_count()
    );
}

/// Highlights every non-ignored matching cell in `row`. Returns whether any matched.
fn mark_matches(row: &mut Row, matcher: &TermMatcher, ignore: &IgnoreSet) -> bool {
    let mut matched = false;
    for (column, cell) in row.cells.iter_mut().enumerate() {
        if ignore.contains(column, cell) {
            continue;
        }
        if matcher.is_match(&cell.text) {
            cell.highlighted = true;
            matched = true;
        }
    }
    matched
}
