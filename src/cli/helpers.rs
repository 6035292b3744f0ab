//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use miette::Result;
use std::io::{self, BufRead, IsTerminal};

use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::core::loader::{load_all, load_dir, load_embedded};
use crate::core::{Armory, PartCatalog};

/// Load the config named by the global options (or the default locations)
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    Ok(Config::load(global.config.as_deref())?)
}

/// Load the catalog from the first configured source
///
/// Precedence: `--catalog` files, `--catalog-dir`, config file entries,
/// then the embedded catalog.
pub fn load_catalog(global: &GlobalOpts, config: &Config) -> Result<PartCatalog> {
    let result = if !global.catalog.is_empty() {
        load_all(&global.catalog)
    } else if let Some(dir) = &global.catalog_dir {
        load_dir(dir)
    } else if !config.catalog.is_empty() {
        load_all(&config.catalog_files())
    } else if let Some(dir) = config.catalog_directory() {
        load_dir(&dir)
    } else {
        load_embedded()
    };
    result.map_err(|e| miette::miette!("{}", e))
}

/// Load config and catalog and build the armory
pub fn load_armory(global: &GlobalOpts) -> Result<(Armory, Config)> {
    let config = load_config(global)?;
    let catalog = load_catalog(global, &config)?;
    Ok((Armory::new(catalog), config))
}

/// Format a stat value with at most two decimals, trimming trailing zeros
pub fn format_number(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Read part IDs from stdin if available (Unix philosophy support)
///
/// Returns `Some(Vec<String>)` with IDs if stdin is piped (not a terminal),
/// or `None` if stdin is a terminal (interactive mode).
///
/// This enables pipelines like:
/// ```bash
/// partforge parts --class Pistol --type body --format csv | tail -n +2 | cut -d, -f1 | partforge graph
/// ```
///
/// IDs are read one per line, with empty lines and whitespace-only lines ignored.
pub fn read_ids_from_stdin() -> Option<Vec<String>> {
    let stdin = io::stdin();

    if stdin.is_terminal() {
        return None;
    }

    let ids: Vec<String> = stdin
        .lock()
        .lines()
        .map_while(|line| line.ok())
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.1), "2.1");
        assert_eq!(format_number(4.2000001), "4.2");
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(1.005), "1");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("Jakobs_Pistol_Body", 10), "Jakobs_...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_load_catalog_defaults_to_embedded() {
        let catalog = load_catalog(&GlobalOpts::default(), &Config::default()).unwrap();
        assert!(!catalog.is_empty());
    }
}
