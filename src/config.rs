//! CLI configuration file.
//!
//! Calendar options live in ~/.config/millennial/config.toml. A missing file
//! means defaults; command-line flags override whatever the file says.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use millennial_core::CalendarOptions;
use millennial_core::config::{DEFAULT_FIRST_DAY_OF_WEEK, DEFAULT_FORMAT};

/// Get the config directory (~/.config/millennial)
pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("millennial");

    Ok(dir)
}

/// Get the config file path (~/.config/millennial/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load calendar options from `path`, or from the default location.
pub fn load_options(path: Option<&Path>) -> Result<CalendarOptions> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };

    let options = CalendarOptions::load(&path)
        .with_context(|| format!("Failed to load config file at {}", path.display()))?;

    log::debug!("loaded options from {}", path.display());
    Ok(options)
}

/// Write a config file with every option present but commented out.
pub fn create_default_config(path: &Path) -> Result<()> {
    let contents = format!(
        "\
# millennial configuration

# strftime format for typed dates and printed values:
# format = \"{DEFAULT_FORMAT}\"

# First column of the grid, 1 = Monday ... 7 = Sunday:
# first_day_of_week = {DEFAULT_FIRST_DAY_OF_WEEK}

# Allow more than one selected day:
# multiselect = true

# Allow the selection to become empty:
# allow_empty = false

# Months shown side by side (1-12):
# months_to_display = 1

# Days that can never be selected:
# disabled_dates = [\"2025-12-25\"]

# Selectable bounds:
# min = \"2025-01-01\"
# max = \"2025-12-31\"

# Shift-click and shift-hover select from the last selected day:
# range_selection = true

# Select today on startup:
# select_today = true
"
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config file at {}", path.display()))?;

    Ok(())
}
