//! Field-name and field-value mapping between the generic search layer and Primo.
//!
//! Both tables are read-only once built and are shared between renders and
//! decodes through `Arc`.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps domain field names to Primo field names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldNameMapping {
    fields: HashMap<String, String>,
}

impl FieldNameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, domain: impl Into<String>, backend: impl Into<String>) {
        self.fields.insert(domain.into(), backend.into());
    }

    /// Primo name for `domain`, or `domain` itself when unmapped.
    pub fn backend_name<'a>(&'a self, domain: &'a str) -> &'a str {
        self.fields.get(domain).map(String::as_str).unwrap_or(domain)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldNameMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Converts a single field's values between Primo codes and domain values.
///
/// Implementations must be pure and fall back to returning the input unchanged.
pub trait ValueMapper: Send + Sync {
    fn to_backend(&self, value: &str) -> String;
    fn from_backend(&self, value: &str) -> String;
}

/// Table driven mapper, e.g. ISO 639-2 language codes to language names.
#[derive(Debug, Clone, Default)]
pub struct TableValueMapper {
    to_domain: HashMap<String, String>,
    to_backend: HashMap<String, String>,
}

impl TableValueMapper {
    /// Builds the mapper from `(backend code, domain value)` pairs.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut mapper = Self::default();
        for (code, value) in pairs {
            let (code, value) = (code.into(), value.into());
            mapper.to_backend.insert(value.clone(), code.clone());
            mapper.to_domain.insert(code, value);
        }
        mapper
    }
}

impl ValueMapper for TableValueMapper {
    fn to_backend(&self, value: &str) -> String {
        self.to_backend
            .get(value)
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }

    fn from_backend(&self, value: &str) -> String {
        self.to_domain
            .get(value)
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }
}

/// Value mappers keyed by Primo field name, e.g. `facet_lang`.
#[derive(Clone, Default)]
pub struct ValueMappers {
    mappers: IndexMap<String, Arc<dyn ValueMapper>>,
}

impl ValueMappers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, field: impl Into<String>, mapper: Arc<dyn ValueMapper>) {
        self.mappers.insert(field.into(), mapper);
    }

    pub fn with(mut self, field: impl Into<String>, mapper: impl ValueMapper + 'static) -> Self {
        self.register(field, Arc::new(mapper));
        self
    }

    pub fn get(&self, field: &str) -> Option<&dyn ValueMapper> {
        self.mappers.get(field).map(|m| m.as_ref())
    }

    pub fn to_backend(&self, field: &str, value: &str) -> String {
        match self.get(field) {
            Some(mapper) => mapper.to_backend(value),
            None => value.to_string(),
        }
    }

    pub fn from_backend(&self, field: &str, value: &str) -> String {
        match self.get(field) {
            Some(mapper) => mapper.from_backend(value),
            None => value.to_string(),
        }
    }
}

impl std::fmt::Debug for ValueMappers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueMappers")
            .field("fields", &self.mappers.keys().collect::<Vec<_>>())
            .finish()
    }
}
