use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use filtertable_filter::{FilterConfig, FilterState, MatchMode};
use log::info;

use crate::table::{Table, TableFormat};

#[derive(Args)]
pub struct FilterArgs {
    /// Query, e.g. "apple +pear -pie"
    #[arg(allow_hyphen_values = true)]
    pub query: String,

    /// Table file; reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Cell delimiter
    #[arg(long, default_value_t = '\t')]
    pub delimiter: char,

    /// Treat the first line as a header that is always shown
    #[arg(long)]
    pub header: bool,

    /// Read `{tag}text` cells as tagged
    #[arg(long)]
    pub tagged: bool,

    /// Match mode: find_first, find_any, find_all
    #[arg(long)]
    pub mode: Option<MatchMode>,

    /// Minimum query length before filtering applies
    #[arg(long)]
    pub min_chars: Option<usize>,

    /// Column never matched (0-based, repeatable)
    #[arg(long = "ignore-column")]
    pub ignore_columns: Vec<usize>,

    /// Cells with this tag are never matched
    #[arg(long)]
    pub ignore_tag: Option<String>,

    /// Print per-row decisions as JSON
    #[arg(long)]
    pub json: bool,
}

impl FilterArgs {
    fn apply_overrides(&self, config: &mut FilterConfig) {
        if let Some(mode) = self.mode {
            config.match_mode = mode;
        }
        if let Some(min_chars) = self.min_chars {
            config.min_chars = min_chars;
        }
        config.ignore_columns.extend(self.ignore_columns.iter().copied());
        if let Some(tag) = &self.ignore_tag {
            config.ignore_tag = Some(tag.clone());
        }
    }

    fn read_input(&self) -> Result<String> {
        match &self.file {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            None => {
                let mut contents = String::new();
                io::stdin()
                    .read_to_string(&mut contents)
                    .context("Failed to read stdin")?;
                Ok(contents)
            }
        }
    }
}

pub fn run(args: &FilterArgs, mut config: FilterConfig) -> Result<()> {
    args.apply_overrides(&mut config);

    let format = TableFormat {
        delimiter: args.delimiter,
        header: args.header,
        tagged: args.tagged,
    };
    let mut table = Table::parse(&args.read_input()?, format);

    let row_count = table.grid.row_count();
    let eligible = config.is_eligible(row_count);
    if !eligible {
        info!(
            "table has {row_count} rows, fewer than min_rows = {}; not filtering",
            config.min_rows
        );
    }

    let mut state = FilterState::new(config);
    let query = if eligible { args.query.as_str() } else { "" };
    let summary = state.set_query(&mut table.grid, query);

    if args.json {
        let report = table.report(state.query(), state.terms(), summary);
        serde_json::to_writer_pretty(io::stdout().lock(), &report)
            .context("Failed to write JSON report")?;
        println!();
        return Ok(());
    }

    print!("{}", table.render_text(args.delimiter));
    if !eligible {
        eprintln!("{row_count} rows (below min_rows); filter not applied");
    } else if summary.active {
        eprintln!(
            "{} of {} rows visible, {} cells matched",
            summary.visible_rows, summary.total_rows, summary.highlighted_cells
        );
    } else {
        eprintln!("No filter active ({} rows)", summary.total_rows);
    }
    Ok(())
}
