use crate::errors::{Result, SearchError};
use crate::mapping::{FieldNameMapping, TableValueMapper, ValueMappers};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Connection and mapping settings for a Primo brief search installation.
///
/// Loaded from YAML, then overridden from `PRIMO_*` environment variables:
///
/// ```yaml
/// base_url: https://primo.example.org:1701
/// institution: ICE
/// ip_address: 10.0.0.1
/// scopes: ICE01,ICE02
/// field_mapping:
///   term.type: facet_rtype
///   term.language: facet_lang
/// value_maps:
///   facet_lang:
///     eng: English
///     ice: Icelandic
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub base_url: String,
    /// Institution code, relevant for restricted scopes and Primo Central.
    pub institution: String,
    /// Client IP, lets Primo identify the institution by IP range.
    pub ip_address: String,
    /// Comma separated location scopes the search is restricted to.
    pub scopes: Option<String>,
    pub field_mapping: HashMap<String, String>,
    /// Backend field name to `{ backend code: domain value }`.
    pub value_maps: IndexMap<String, IndexMap<String, String>>,
}

impl SearchConfig {
    pub const ENV_BASE_URL: &'static str = "PRIMO_BASE_URL";
    pub const ENV_INSTITUTION: &'static str = "PRIMO_INSTITUTION";
    pub const ENV_IP_ADDRESS: &'static str = "PRIMO_IP_ADDRESS";
    pub const ENV_SCOPES: &'static str = "PRIMO_SCOPES";

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = fs_err::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Loads `.env`, the optional config file and environment overrides, then validates.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;

        tracing::debug!(
            "Loaded Primo config for institution {} at {}",
            config.institution,
            config.base_url
        );
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var(Self::ENV_BASE_URL) {
            self.base_url = value;
        }
        if let Ok(value) = std::env::var(Self::ENV_INSTITUTION) {
            self.institution = value;
        }
        if let Ok(value) = std::env::var(Self::ENV_IP_ADDRESS) {
            self.ip_address = value;
        }
        if let Ok(value) = std::env::var(Self::ENV_SCOPES) {
            self.scopes = Some(value).filter(|s| !s.trim().is_empty());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(SearchError::Config(format!(
                "base_url is required (or set {})",
                Self::ENV_BASE_URL
            )));
        }
        if self.institution.trim().is_empty() {
            return Err(SearchError::Config(format!(
                "institution is required (or set {})",
                Self::ENV_INSTITUTION
            )));
        }
        Ok(())
    }

    pub fn field_names(&self) -> FieldNameMapping {
        self.field_mapping
            .iter()
            .map(|(domain, backend)| (domain.clone(), backend.clone()))
            .collect()
    }

    pub fn value_mappers(&self) -> ValueMappers {
        let mut mappers = ValueMappers::new();
        for (field, table) in &self.value_maps {
            mappers.register(
                field.clone(),
                Arc::new(TableValueMapper::new(
                    table.iter().map(|(code, value)| (code.clone(), value.clone())),
                )),
            );
        }
        mappers
    }
}
