use super::preprocess::preprocess_statements;
use super::types::{NormalizedGroup, Statement};
use crate::errors::{Result, SearchError};
use crate::mapping::{FieldNameMapping, ValueMappers};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// Brief search parameter carrying the rendered field queries.
pub const QUERY_PARAMETER: &str = "query";

/// Primo brief search parameters: name to an ordered list of values.
///
/// Primo AND's repeated `query` parameters, so merging appends values instead
/// of replacing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParameters(IndexMap<String, Vec<String>>);

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.entry(name.into()).or_default().push(value.into());
    }

    /// Replaces whatever values `name` had.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), vec![value.into()]);
    }

    pub fn merge(&mut self, other: QueryParameters) {
        for (name, values) in other.0 {
            self.0.entry(name).or_default().extend(values);
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flattens into `(name, value)` pairs in insertion order, ready for a URL query.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |v| (name.clone(), v.clone())))
            .collect()
    }
}

/// Renders statement trees into Primo brief search `query` parameters.
#[derive(Debug, Clone, Default)]
pub struct StatementRenderer {
    fields: Arc<FieldNameMapping>,
    values: Arc<ValueMappers>,
}

impl StatementRenderer {
    pub fn new(fields: Arc<FieldNameMapping>, values: Arc<ValueMappers>) -> Self {
        Self { fields, values }
    }

    pub fn fields(&self) -> &FieldNameMapping {
        &self.fields
    }

    pub fn value_mappers(&self) -> &ValueMappers {
        &self.values
    }

    /// Compiles a list of top-level (AND'ed) statements.
    ///
    /// Eg. `[rtype=audiobooks, (lang=eng OR lang=ice)]` becomes
    /// `query=rtype,exact,audiobooks&query=lang,exact,eng OR ice`.
    pub fn render_statements(&self, statements: &[Statement]) -> Result<QueryParameters> {
        let groups = preprocess_statements(statements)?;

        let mut parameters = QueryParameters::new();
        for group in &groups {
            parameters.merge(self.render_group(group)?);
        }

        tracing::debug!(
            "Rendered {} statements into {} field queries",
            statements.len(),
            parameters.get(QUERY_PARAMETER).map_or(0, |q| q.len())
        );
        Ok(parameters)
    }

    /// Renders one single-field group into `query=<field>,exact,<values>`.
    pub fn render_group(&self, group: &NormalizedGroup) -> Result<QueryParameters> {
        let field_name = match group.field_name() {
            Some("") => {
                return Err(SearchError::MalformedFilter(
                    "filter has an empty field name".to_string(),
                ))
            }
            Some(name) => name,
            None => {
                return Err(SearchError::MalformedFilter(
                    "group contains no filters".to_string(),
                ))
            }
        };
        if let Some(other) = group.filters().iter().find(|f| f.name != field_name) {
            return Err(SearchError::MalformedFilter(format!(
                "group mixes the fields {} and {}",
                field_name, other.name
            )));
        }

        let field_name = self.fields.backend_name(field_name);

        let values: Vec<String> = group
            .filters()
            .iter()
            .map(|filter| escape_value(&self.values.to_backend(field_name, &filter.value)))
            .collect();
        let values_joined = values.join(&format!(" {} ", group.logic_operator()));

        let mut parameters = QueryParameters::new();
        parameters.push(
            QUERY_PARAMETER,
            format!("{},exact,{}", field_name, values_joined),
        );
        Ok(parameters)
    }
}

/// Replaces the keywords ` AND `, ` OR ` and commas with a single space.
///
/// These are structural in a `query` value. Replacing repeats until the value is
/// stable, so removing one keyword never leaves another behind. Keywords at the
/// edges (`AND x`, `x OR`, a bare `OR`) are neutralized too, since joining values
/// with ` OR ` would complete them.
pub fn escape_value(value: &str) -> String {
    let mut escaped = value.to_string();
    loop {
        let next = strip_edge_keyword(replace_keywords(&escaped));
        if next == escaped {
            return escaped;
        }
        escaped = next;
    }
}

const KEYWORDS: [&str; 2] = ["AND", "OR"];

fn replace_keywords(value: &str) -> String {
    const REPLACED: [&str; 3] = [" AND ", " OR ", ","];

    let mut replaced = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(ch) = rest.chars().next() {
        match REPLACED.iter().find(|token| rest.starts_with(*token)) {
            Some(token) => {
                replaced.push(' ');
                rest = &rest[token.len()..];
            }
            None => {
                replaced.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }
    replaced
}

fn strip_edge_keyword(value: String) -> String {
    for keyword in KEYWORDS {
        if value == keyword {
            return " ".to_string();
        }
        if let Some(rest) = value.strip_prefix(keyword).and_then(|r| r.strip_prefix(' ')) {
            return format!(" {}", rest);
        }
        if let Some(rest) = value.strip_suffix(keyword).and_then(|r| r.strip_suffix(' ')) {
            return format!("{} ", rest);
        }
    }
    value
}
