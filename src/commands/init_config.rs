use std::path::Path;

use anyhow::{Result, bail};

use crate::config;

pub fn run(explicit: Option<&Path>) -> Result<()> {
    let Some(path) = config::resolve_path(explicit) else {
        bail!("Could not determine config directory");
    };

    if config::ensure_config_file(&path)? {
        println!("Created {}", path.display());
    } else {
        println!("{} already exists", path.display());
    }
    Ok(())
}
