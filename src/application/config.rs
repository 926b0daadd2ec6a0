use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{IdScheme, OverdraftPolicy};

/// Tunables for ledger postings. Every field has a default, so an empty
/// file (or no file) gives the dashboard's original behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub overdraft: OverdraftPolicy,
    pub transaction_ids: IdScheme,
    /// Also post a history entry for moves between the customer's own accounts
    pub record_internal_transfers: bool,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl LedgerConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Load from a TOML file. A path that does not exist yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            info!(
                "No config at {}, using default ledger settings",
                path.display()
            );
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded ledger config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
