use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use log::warn;

use crate::error::{FilterError, Result};
use crate::grid::IgnoreSet;
use crate::matcher::MatchMode;
use crate::quick_list::QuickListItem;

pub const DEFAULT_MIN_CHARS: usize = 1;
pub const DEFAULT_MIN_ROWS: usize = 8;

pub const CONFIG_KEYS: &[&str] = &[
    "match_mode",
    "min_chars",
    "min_rows",
    "ignore_columns",
    "ignore_tag",
    "quick",
];

pub const DEFAULT_CONFIG: &str = "# How each term is matched against a cell: find_first, find_any, find_all\n\
match_mode = find_first\n\
# Filter only once the query has at least this many characters\n\
min_chars = 1\n\
# Grids with fewer rows than this are not filtered (0 = always filter)\n\
min_rows = 8\n\
# Columns (0-based, comma separated) never matched; switches to single-pass matching\n\
# ignore_columns = 0, 3\n\
# Cells carrying this tag are never matched\n\
# ignore_tag = nofilter\n\
# Quick list entries: label | phrase | tooltip\n\
# quick = Errors | /^E\\d+/ | Rows starting with an error code\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub match_mode: MatchMode,
    pub min_chars: usize,
    pub min_rows: usize,
    pub ignore_columns: BTreeSet<usize>,
    pub ignore_tag: Option<String>,
    pub quick_list: Vec<QuickListItem>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            min_chars: DEFAULT_MIN_CHARS,
            min_rows: DEFAULT_MIN_ROWS,
            ignore_columns: BTreeSet::new(),
            ignore_tag: None,
            quick_list: Vec::new(),
        }
    }
}

impl FilterConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_contents(&contents)
    }

    /// Parses `key = value` lines. Unlike query evaluation, any unknown key or
    /// bad value is an error: it is a setup mistake, not user input.
    pub fn from_contents(contents: &str) -> Result<Self> {
        let mut config = Self::default();

        for (index, line) in contents.lines().enumerate() {
            let line_number = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(config_error(line_number, "expected `key = value`"));
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            match key.as_str() {
                "match_mode" => {
                    config.match_mode = value
                        .parse()
                        .map_err(|e: FilterError| config_error(line_number, e.to_string()))?;
                }
                "min_chars" => config.min_chars = parse_usize(line_number, &key, value)?,
                "min_rows" => config.min_rows = parse_usize(line_number, &key, value)?,
                "ignore_columns" => {
                    for column in value.split(',').map(str::trim).filter(|c| !c.is_empty()) {
                        let column = parse_usize(line_number, &key, column)?;
                        if !config.ignore_columns.insert(column) {
                            warn!("line {line_number}: column {column} is ignored more than once");
                        }
                    }
                }
                "ignore_tag" => {
                    config.ignore_tag = (!value.is_empty()).then(|| value.to_string());
                }
                "quick" => {
                    let item = QuickListItem::from_config_value(value).ok_or_else(|| {
                        config_error(line_number, "expected `label | phrase | tooltip`")
                    })?;
                    config.quick_list.push(item);
                }
                _ => {
                    return Err(config_error(
                        line_number,
                        format!(
                            "unknown key `{key}`; expected one of: {}",
                            CONFIG_KEYS.join(", ")
                        ),
                    ));
                }
            }
        }

        Ok(config)
    }

    pub fn ignore_set(&self) -> IgnoreSet {
        IgnoreSet {
            columns: self.ignore_columns.clone(),
            tag: self.ignore_tag.clone(),
        }
    }

    /// Whether a grid with `row_count` rows should be offered filtering.
    pub fn is_eligible(&self, row_count: usize) -> bool {
        self.min_rows == 0 || row_count >= self.min_rows
    }

    pub fn quick_item(&self, label: &str) -> Option<&QuickListItem> {
        self.quick_list
            .iter()
            .find(|item| item.label.eq_ignore_ascii_case(label.trim()))
    }

    /// Renders the config back into the file format.
    pub fn to_contents(&self) -> String {
        let mut out = format!(
            "match_mode = {}\nmin_chars = {}\nmin_rows = {}\n",
            self.match_mode, self.min_chars, self.min_rows
        );
        if !self.ignore_columns.is_empty() {
            let columns: Vec<String> = self
                .ignore_columns
                .iter()
                .map(ToString::to_string)
                .collect();
            out.push_str(&format!("ignore_columns = {}\n", columns.join(", ")));
        }
        if let Some(tag) = &self.ignore_tag {
            out.push_str(&format!("ignore_tag = {tag}\n"));
        }
        for item in &self.quick_list {
            out.push_str(&format!("quick = {}\n", item.to_config_value()));
        }
        out
    }
}

fn parse_usize(line_number: usize, key: &str, value: &str) -> Result<usize> {
    value.parse::<usize>().map_err(|_| {
        config_error(
            line_number,
            format!("`{key}` must be a non-negative integer, got `{value}`"),
        )
    })
}

fn config_error(line: usize, message: impl Into<String>) -> FilterError {
    FilterError::Config {
        line,
        message: message.into(),
    }
}
