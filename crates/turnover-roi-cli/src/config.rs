use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use turnover_roi_core::inputs::CostParameters;

use crate::OutputFormat;

pub const CONFIG_FILE_NAME: &str = ".turnover-roi.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Contents of `.turnover-roi.toml`.
///
/// ```toml
/// output = "table"
///
/// [parameters]
/// overhead_multiplier = "1.8"
/// turnover_reduction_percent = "25"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub output: Option<OutputFormat>,
    pub parameters: CostParameters,
}

pub fn parse_config(contents: &str) -> Result<CliConfig, String> {
    toml::from_str::<CliConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))
}

/// Load an explicit config file. Errors are fatal here since the user asked
/// for this file.
pub fn load_from(path: &Path) -> Result<CliConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let config = parse_config(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Search the current directory and its ancestors for a config file.
/// Falls back to defaults on any problem.
pub fn discover() -> CliConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!("Failed to get current directory: {}. Using default config.", e);
            return CliConfig::default();
        }
    };

    ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load(&path))
        .unwrap_or_else(|| {
            tracing::debug!("No {} found. Using default config.", CONFIG_FILE_NAME);
            CliConfig::default()
        })
}

fn try_load(path: &Path) -> Option<CliConfig> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

fn ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}
