//! Factory configuration
//!
//! A [`FactoryConfig`] can be built in code or read from YAML:
//!
//! ```yaml
//! blank_node_prefix: node
//! default_prefixes: true
//! base_iri: http://example.org/
//! namespaces:
//!   ex: http://example.org/
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::rdf::DEFAULT_BLANK_PREFIX;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("Failed to parse configuration YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Factory configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Prefix of allocated blank node identifiers
    pub blank_node_prefix: String,
    /// Seed the namespace table with rdf, rdfs, xsd, owl, foaf, dc and dcterms
    pub default_prefixes: bool,
    /// Extra namespace prefixes (prefix -> IRI), registered after the defaults
    pub namespaces: BTreeMap<String, String>,
    /// Base IRI used by loads that do not pass one
    pub base_iri: Option<String>,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            blank_node_prefix: DEFAULT_BLANK_PREFIX.to_string(),
            default_prefixes: true,
            namespaces: BTreeMap::new(),
            base_iri: None,
        }
    }
}

impl FactoryConfig {
    /// Parse a configuration from a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Add a namespace prefix
    pub fn with_namespace(mut self, prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        self.namespaces.insert(prefix.into(), iri.into());
        self
    }
}
