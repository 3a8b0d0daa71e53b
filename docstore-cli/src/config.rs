use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use docstore_bucket::MAX_USED_BITS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG_FILE: &str = "docstore.toml";
const GLOBAL_DIR: &str = ".docstore";
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Precision used by `docstore key` when `--used-bits` is not given.
const DEFAULT_USED_BITS: u32 = 16;

/// Contents of `docstore.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocstoreConfig {
    pub bucket: BucketSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BucketSection {
    pub default_used_bits: u32,
}

impl Default for BucketSection {
    fn default() -> Self {
        Self {
            default_used_bits: DEFAULT_USED_BITS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub format: OutputFormat,
}

/// Locate the config file: `--config`, then `./docstore.toml`, then
/// `~/.docstore/config.toml`.
///
/// An explicit `--config` that does not exist is an error; the implicit
/// locations are optional.
fn resolve_config_path(config_override: Option<&Path>) -> CliResult<Option<PathBuf>> {
    if let Some(p) = config_override {
        let resolved = if p.is_absolute() {
            p.to_path_buf()
        } else {
            std::env::current_dir()?.join(p)
        };
        if !resolved.is_file() {
            return Err(CliError::Config(format!(
                "config file not found: {}",
                resolved.display()
            )));
        }
        return Ok(Some(resolved));
    }

    let local = std::env::current_dir()?.join(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(dirs::home_dir()
        .map(|home| home.join(GLOBAL_DIR).join(GLOBAL_CONFIG_FILE))
        .filter(|p| p.is_file()))
}

/// Parse and validate config text.
pub fn parse_config(text: &str) -> CliResult<DocstoreConfig> {
    let config: DocstoreConfig =
        toml::from_str(text).map_err(|e| CliError::Config(format!("invalid config: {e}")))?;
    if config.bucket.default_used_bits > MAX_USED_BITS {
        return Err(CliError::Config(format!(
            "bucket.default_used_bits is {}, max is {MAX_USED_BITS}",
            config.bucket.default_used_bits
        )));
    }
    Ok(config)
}

/// Load the effective config, falling back to defaults when no file exists.
pub fn load_config(config_override: Option<&Path>) -> CliResult<DocstoreConfig> {
    match resolve_config_path(config_override)? {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            let text = fs::read_to_string(&path).map_err(|e| {
                CliError::Config(format!("cannot read {}: {e}", path.display()))
            })?;
            parse_config(&text)
        }
        None => {
            tracing::debug!("no config file found, using defaults");
            Ok(DocstoreConfig::default())
        }
    }
}
