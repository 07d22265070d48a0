use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::{config_path, create_default_config};

pub fn run(init: bool) -> Result<()> {
    let path = config_path()?;

    if init {
        if path.exists() {
            println!("{} {}", "Config already exists:".yellow(), path.display());
        } else {
            create_default_config(&path)?;
            println!("{} {}", "Created".green(), path.display());
        }
        return Ok(());
    }

    println!("{}", "Paths".bold());
    println!("  Config:  {}", path.display());
    if !path.exists() {
        println!("  {}", "(not created yet, using defaults)".dimmed());
    }

    Ok(())
}
