use crate::config::FilterConfig;
use crate::engine::{FilterEngine, FilterSummary};
use crate::grid::Grid;
use crate::query::{Query, Term};

/// Manages the filter session for one grid
pub struct FilterState {
    engine: FilterEngine,
    query: Query,
    summary: FilterSummary,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

impl FilterState {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            engine: FilterEngine::new(config),
            query: Query::default(),
            summary: FilterSummary::default(),
        }
    }

    pub fn config(&self) -> &FilterConfig {
        self.engine.config()
    }

    /// Get current raw query
    pub fn query(&self) -> &str {
        self.query.raw()
    }

    /// Terms parsed from the current query
    pub fn terms(&self) -> &[Term] {
        self.query.terms()
    }

    /// Result of the last evaluation
    pub fn summary(&self) -> FilterSummary {
        self.summary
    }

    /// Whether the last evaluation actually filtered the grid
    pub fn is_active(&self) -> bool {
        self.summary.active
    }

    /// Update the query and re-filter `grid`
    pub fn set_query(&mut self, grid: &mut Grid, query: &str) -> FilterSummary {
        self.query = Query::new(query);
        self.refresh(grid)
    }

    /// Re-run the current query, e.g. after the grid contents changed
    pub fn refresh(&mut self, grid: &mut Grid) -> FilterSummary {
        self.summary = self.engine.apply_query(grid, &self.query);
        self.summary
    }

    /// Drop the query and show every row
    pub fn clear(&mut self, grid: &mut Grid) {
        self.set_query(grid, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Row;

    #[test]
    fn test_session_lifecycle() {
        let mut grid = Grid::from_texts([["alpha"], ["beta"], ["gamma"]]);
        let mut state = FilterState::default();
        assert!(!state.is_active());

        let summary = state.set_query(&mut grid, "alpha +gamma");
        assert!(state.is_active());
        assert_eq!(summary.visible_rows, 2);
        assert_eq!(state.query(), "alpha +gamma");
        assert_eq!(state.terms().len(), 2);

        state.clear(&mut grid);
        assert!(!state.is_active());
        assert_eq!(grid.visible_row_count(), 3);
        assert!(state.terms().is_empty());
    }

    #[test]
    fn test_refresh_after_grid_change() {
        let mut grid = Grid::from_texts([["alpha"], ["beta"]]);
        let mut state = FilterState::default();
        state.set_query(&mut grid, "beta");
        assert_eq!(state.summary().visible_rows, 1);

        grid.rows.push(Row::from_texts(["beta two"]));
        let summary = state.refresh(&mut grid);
        assert_eq!(summary.visible_rows, 2);
        assert_eq!(summary.total_rows, 3);
    }
}
