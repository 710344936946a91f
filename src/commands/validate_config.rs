use std::path::Path;

use anyhow::{Result, bail};
use filtertable_filter::FilterConfig;

use crate::config;

pub fn run(explicit: Option<&Path>) -> Result<()> {
    let Some(path) = config::resolve_path(explicit) else {
        bail!("Could not determine config directory");
    };

    println!("Config file: {}", path.display());

    if !path.exists() {
        if explicit.is_some() {
            bail!("{} does not exist", path.display());
        }
        println!("Status: File does not exist (using defaults)");
        println!("Result: Valid");
        return Ok(());
    }

    match FilterConfig::load(&path) {
        Ok(config) => {
            println!("Match mode: {}", config.match_mode);
            println!("Quick list entries: {}", config.quick_list.len());
            println!("Result: Valid");
            Ok(())
        }
        Err(e) => {
            println!("Error: {e}");
            println!("Result: Invalid");
            bail!("invalid configuration");
        }
    }
}
