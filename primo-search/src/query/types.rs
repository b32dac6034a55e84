/// Filter tree types handed to the statement renderer
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicOperator {
    And,
    Or,
}

impl std::fmt::Display for LogicOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicOperator::And => write!(f, "AND"),
            LogicOperator::Or => write!(f, "OR"),
        }
    }
}

/// Equality constraint on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub name: String,
    pub value: String,
}

impl FieldFilter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementGroup {
    pub logic_operator: LogicOperator,
    pub statements: Vec<Statement>,
}

impl StatementGroup {
    pub fn new(logic_operator: LogicOperator, statements: Vec<Statement>) -> Self {
        Self {
            logic_operator,
            statements,
        }
    }

    pub fn and(statements: Vec<Statement>) -> Self {
        Self::new(LogicOperator::And, statements)
    }

    pub fn or(statements: Vec<Statement>) -> Self {
        Self::new(LogicOperator::Or, statements)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    Filter(FieldFilter),
    Group(StatementGroup),
}

impl Statement {
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Filter(_) => "FieldFilter",
            Statement::Group(_) => "StatementGroup",
        }
    }
}

impl From<FieldFilter> for Statement {
    fn from(filter: FieldFilter) -> Self {
        Statement::Filter(filter)
    }
}

impl From<StatementGroup> for Statement {
    fn from(group: StatementGroup) -> Self {
        Statement::Group(group)
    }
}

/// A flat group whose leaves all reference the same field.
///
/// Only the preprocessor builds these, so a renderer never sees nested or
/// cross-field groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedGroup {
    logic_operator: LogicOperator,
    filters: Vec<FieldFilter>,
}

impl NormalizedGroup {
    pub(crate) fn new(logic_operator: LogicOperator, filters: Vec<FieldFilter>) -> Self {
        Self {
            logic_operator,
            filters,
        }
    }

    pub(crate) fn single(filter: FieldFilter) -> Self {
        Self::new(LogicOperator::And, vec![filter])
    }

    pub fn logic_operator(&self) -> LogicOperator {
        self.logic_operator
    }

    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    /// Field name shared by every leaf, `None` for an empty group.
    pub fn field_name(&self) -> Option<&str> {
        self.filters.first().map(|f| f.name.as_str())
    }
}
