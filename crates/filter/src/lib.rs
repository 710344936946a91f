//! Incremental row filtering for text grids.
//!
//! A query such as `apple +pear -/^x/i` is parsed into signed terms which
//! are applied left to right: `+term` reveals matching rows anywhere in the
//! grid, `-term` hides matching visible rows and a bare `term` narrows the
//! visible rows to those that match.

mod config;
mod engine;
mod error;
mod grid;
mod matcher;
mod query;
mod quick_list;
mod state;

pub use config::{CONFIG_KEYS, DEFAULT_CONFIG, DEFAULT_MIN_CHARS, DEFAULT_MIN_ROWS, FilterConfig};
pub use engine::{FilterEngine, FilterSummary, evaluate};
pub use error::{FilterError, Result};
pub use grid::{Cell, Grid, IgnoreSet, Row};
pub use matcher::{MatchMode, TermMatcher, matches, split_regex_literal};
pub use query::{Query, Sign, Term, parse};
pub use quick_list::{QuickListItem, QuickModifiers, compose_query};
pub use state::FilterState;
