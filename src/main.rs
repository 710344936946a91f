use std::path::PathBuf;

use clap::{Parser, Subcommand};
use filtertable_filter::QuickModifiers;

mod commands;
mod config;
mod table;

use commands::filter::FilterArgs;

#[derive(Parser)]
#[command(name = "filtertable")]
#[command(about = "Filter rows of a delimited text table", long_about = None)]
#[command(version, disable_help_subcommand = true)]
struct Cli {
    /// Use this config file instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Subcommand)]
enum Action {
    /// Filter a table and print the visible rows
    Filter(FilterArgs),

    /// Show how a query is split into terms
    Parse {
        #[arg(allow_hyphen_values = true)]
        query: String,
    },

    /// Add a quick list phrase to a query
    Compose {
        #[arg(allow_hyphen_values = true)]
        current: String,
        label: String,

        /// Keep the current query and narrow it (alt)
        #[arg(long)]
        add: bool,

        /// Keep the current query and exclude the phrase (shift)
        #[arg(long)]
        subtract: bool,
    },

    /// Write the default config file
    InitConfig,

    /// Display current configuration
    ShowConfig,

    /// Validate configuration file
    ValidateConfig,

    /// Show help and available commands
    Help,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_override = cli.config.as_deref();

    match cli.action {
        Some(Action::Filter(args)) => commands::filter::run(&args, config::load(config_override)?),
        Some(Action::Parse { query }) => {
            commands::parse::run(&query);
            Ok(())
        }
        Some(Action::Compose {
            current,
            label,
            add,
            subtract,
        }) => commands::compose::run(
            &config::load(config_override)?,
            &current,
            &label,
            QuickModifiers { add, subtract },
        ),
        Some(Action::InitConfig) => commands::init_config::run(config_override),
        Some(Action::ShowConfig) => commands::show_config::run(config_override),
        Some(Action::ValidateConfig) => commands::validate_config::run(config_override),
        Some(Action::Help) | None => {
            commands::help::run();
            Ok(())
        }
    }
}
