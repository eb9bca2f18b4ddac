//! Connection settings: which BoldDesk domain to talk to and with what key.
//!
//! Values come from a TOML file and are overridden by the `BOLDDESK_DOMAIN`
//! and `BOLDDESK_API_KEY` environment variables:
//!
//! ```toml
//! [bolddesk]
//! domain = "acme.bolddesk.com"
//! api_key = "..."
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use bolddesk_api::Client;
use serde::Deserialize;

use crate::error::BoldDeskError;

pub const DOMAIN_ENV: &str = "BOLDDESK_DOMAIN";
pub const API_KEY_ENV: &str = "BOLDDESK_API_KEY";

/// Keys shipped in sample files that must never reach the server.
const PLACEHOLDER_KEYS: &[&str] = &[
    "your-api-key",
    "your_api_key",
    "<api-key>",
    "<your-api-key>",
    "api-key",
    "changeme",
    "replace-me",
];

/// On-disk layout of the config file.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub bolddesk: FileSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileSection {
    pub domain: Option<String>,
    pub api_key: Option<String>,
}

impl ConfigFile {
    pub fn parse(contents: &str) -> Result<Self, BoldDeskError> {
        toml::from_str(contents)
            .map_err(|e| BoldDeskError::Config(format!("invalid config file: {}", e)))
    }
}

/// Resolved connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Bare host name, e.g. `acme.bolddesk.com`.
    pub domain: String,
    pub api_key: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("domain", &self.domain)
            .field("api_key", &"***")
            .finish()
    }
}

impl Config {
    /// Builds a config from explicit values, normalising the domain and
    /// rejecting blank or placeholder keys.
    pub fn new(domain: &str, api_key: &str) -> Result<Self, BoldDeskError> {
        let domain = normalize_domain(domain);
        if domain.is_empty() {
            return Err(BoldDeskError::Config(format!(
                "BoldDesk domain is not set. Set {} or add `domain` to the [bolddesk] section of the config file",
                DOMAIN_ENV
            )));
        }
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(BoldDeskError::Config(format!(
                "BoldDesk API key is not set. Set {} or add `api_key` to the [bolddesk] section of the config file",
                API_KEY_ENV
            )));
        }
        if is_placeholder_key(api_key) {
            return Err(BoldDeskError::Config(
                "BoldDesk API key is still the sample placeholder".to_string(),
            ));
        }
        Ok(Self {
            domain,
            api_key: api_key.to_string(),
        })
    }

    /// `$XDG_CONFIG_HOME/bolddesk/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bolddesk").join("config.toml"))
    }

    /// Loads the config file (the given path, or the default location when
    /// it exists) and applies environment overrides.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn resolve(path: Option<&Path>) -> Result<Self, BoldDeskError> {
        let file = match path {
            Some(path) => Some(read_file(path)?),
            None => match Self::default_path() {
                Some(path) if path.exists() => Some(read_file(&path)?),
                _ => None,
            },
        };
        Self::merge(
            file.unwrap_or_default(),
            env_value(DOMAIN_ENV),
            env_value(API_KEY_ENV),
        )
    }

    /// Combines file values with overrides; an override wins when present.
    pub fn merge(
        file: ConfigFile,
        domain: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self, BoldDeskError> {
        let domain = domain.or(file.bolddesk.domain).unwrap_or_default();
        let api_key = api_key.or(file.bolddesk.api_key).unwrap_or_default();
        Self::new(&domain, &api_key)
    }

    /// API base URL for this domain.
    pub fn base_url(&self) -> String {
        bolddesk_api::api_base_url(&self.domain)
    }

    pub fn client(&self) -> Result<Client, BoldDeskError> {
        Ok(Client::new(&self.domain, &self.api_key)?)
    }
}

fn read_file(path: &Path) -> Result<ConfigFile, BoldDeskError> {
    tracing::debug!("Reading config from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    ConfigFile::parse(&contents)
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Trims whitespace, a leading scheme, the `/api/v1` prefix and trailing slashes.
pub fn normalize_domain(domain: &str) -> String {
    let domain = domain.trim();
    let domain = domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(domain);
    let domain = domain.trim_end_matches('/');
    domain
        .strip_suffix("/api/v1")
        .unwrap_or(domain)
        .trim_end_matches('/')
        .to_ascii_lowercase()
}

fn is_placeholder_key(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    PLACEHOLDER_KEYS.contains(&lower.as_str()) || lower.chars().all(|c| c == 'x' || c == '*')
}
