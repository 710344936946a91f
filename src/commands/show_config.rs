use std::path::Path;

use anyhow::Result;

use crate::config;

pub fn run(explicit: Option<&Path>) -> Result<()> {
    let Some(path) = config::resolve_path(explicit) else {
        eprintln!("Could not determine config directory");
        return Ok(());
    };

    if path.exists() {
        println!("# Config file: {}", path.display());
    } else {
        println!("# Config file: {} (not created yet)", path.display());
        println!("# Using default configuration");
    }
    println!();

    let config = config::load(explicit)?;
    print!("{}", config.to_contents());
    Ok(())
}
