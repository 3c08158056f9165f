//! Client configuration and transport selection.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::error::{AdSelError, Result};
use crate::transport::{FixtureTransport, HttpTransport, ServiceHosts, Transport};

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Which transport implementation backs the clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DaoMode {
    Live,
    #[default]
    Mock,
}

impl FromStr for DaoMode {
    type Err = AdSelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(DaoMode::Live),
            "mock" => Ok(DaoMode::Mock),
            other => Err(AdSelError::config(format!(
                "ADSEL_DAO must be Live or Mock, got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdSelConfig {
    pub dao: DaoMode,
    pub fixture_root: PathBuf,
    pub hosts: ServiceHosts,
    pub timeout_secs: u64,
    pub token: Option<String>,
}

impl Default for AdSelConfig {
    fn default() -> Self {
        Self {
            dao: DaoMode::Mock,
            fixture_root: FixtureTransport::bundled().root().to_path_buf(),
            hosts: ServiceHosts::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token: None,
        }
    }
}

impl AdSelConfig {
    /// Reads `ADSEL_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = lookup("ADSEL_DAO") {
            config.dao = mode.parse()?;
        }
        if let Some(root) = lookup("ADSEL_FIXTURE_ROOT") {
            config.fixture_root = PathBuf::from(root);
        }
        config.hosts = ServiceHosts {
            adsel: lookup("ADSEL_HOST"),
            azure_assign: lookup("ADSEL_AZURE_ASSIGN_HOST"),
            azure_merge: lookup("ADSEL_AZURE_MERGE_HOST"),
        };
        if let Some(raw) = lookup("ADSEL_TIMEOUT_SECS") {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                AdSelError::config(format!(
                    "ADSEL_TIMEOUT_SECS must be a whole number, got '{raw}'"
                ))
            })?;
        }
        config.token = lookup("ADSEL_TOKEN");

        if config.dao == DaoMode::Live && config.hosts.adsel.is_none() {
            return Err(AdSelError::config("ADSEL_HOST is required when ADSEL_DAO=Live"));
        }
        Ok(config)
    }
}

/// Builds the transport selected by `config.dao`.
pub fn build_transport(config: &AdSelConfig) -> Result<Box<dyn Transport>> {
    match config.dao {
        DaoMode::Mock => {
            info!(root = %config.fixture_root.display(), "using mock data transport");
            Ok(Box::new(FixtureTransport::new(config.fixture_root.clone())))
        }
        DaoMode::Live => {
            let adsel = config
                .hosts
                .adsel
                .as_deref()
                .ok_or_else(|| AdSelError::config("ADSEL_HOST is required when ADSEL_DAO=Live"))?;
            info!(host = adsel, "using live transport");
            let mut transport =
                HttpTransport::new(config.hosts.clone(), Duration::from_secs(config.timeout_secs));
            if let Some(token) = &config.token {
                transport = transport.with_token(token.clone());
            }
            Ok(Box::new(transport))
        }
    }
}
