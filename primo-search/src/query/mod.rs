mod parser;
mod preprocess;
mod renderer;
mod types;

pub use parser::parse_filter_expression;
pub use preprocess::preprocess_statements;
pub use renderer::{escape_value, QueryParameters, StatementRenderer, QUERY_PARAMETER};
pub use types::{FieldFilter, LogicOperator, NormalizedGroup, Statement, StatementGroup};
