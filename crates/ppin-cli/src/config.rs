use anyhow::{Context, Result};
use ppin_core::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that overrides `providers.biogrid.access_key`.
pub const BIOGRID_KEY_ENV: &str = "BIOGRID_ACCESS_KEY";

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "ppin.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PpinConfig {
    /// Preferred output mode (`pretty`, `text` or `json`).
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub biogrid: BioGridConfig,
    #[serde(default)]
    pub string: StringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BioGridConfig {
    #[serde(default = "default_biogrid_url")]
    pub url: String,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default = "default_taxon")]
    pub organism: u32,
}

impl Default for BioGridConfig {
    fn default() -> Self {
        Self {
            url: default_biogrid_url(),
            access_key: None,
            organism: default_taxon(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringConfig {
    #[serde(default = "default_string_url")]
    pub url: String,
    #[serde(default = "default_taxon")]
    pub species: u32,
}

impl Default for StringConfig {
    fn default() -> Self {
        Self {
            url: default_string_url(),
            species: default_taxon(),
        }
    }
}

/// Load the effective configuration.
///
/// An explicit path must exist. Otherwise the first of `./ppin.toml` and
/// `<config dir>/ppin/config.toml` that exists is used, falling back to
/// built-in defaults. `BIOGRID_ACCESS_KEY` overrides the file's key.
pub fn load_config(explicit: Option<&Path>) -> Result<PpinConfig> {
    let mut config = if let Some(path) = explicit {
        read_config(path)?
    } else {
        let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("ppin/config.toml"));
        }
        load_first(&candidates)?.unwrap_or_default()
    };

    if let Ok(key) = env::var(BIOGRID_KEY_ENV)
        && !key.trim().is_empty()
    {
        config.providers.biogrid.access_key = Some(key);
    }

    Ok(config)
}

/// Parse the first existing file among `candidates`.
fn load_first(candidates: &[PathBuf]) -> Result<Option<PpinConfig>> {
    for path in candidates {
        if path.exists() {
            return read_config(path).map(Some);
        }
    }
    Ok(None)
}

fn read_config(path: &Path) -> Result<PpinConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = toml::from_str::<PpinConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn default_biogrid_url() -> String {
    "https://webservice.thebiogrid.org/interactions".to_string()
}

fn default_string_url() -> String {
    "https://string-db.org/api/json/network".to_string()
}

/// NCBI taxonomy id for Homo sapiens.
const fn default_taxon() -> u32 {
    9606
}
