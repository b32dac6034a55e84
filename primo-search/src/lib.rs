pub mod client;
pub mod config;
pub mod errors;
pub mod mapping;
pub mod query;
pub mod response;

pub use client::{BriefSearchClient, HttpTransport, ResponseBody, SearchTransport};
pub use config::SearchConfig;
pub use errors::{Result, SearchError};
pub use mapping::{FieldNameMapping, TableValueMapper, ValueMapper, ValueMappers};
pub use query::{
    parse_filter_expression, FieldFilter, LogicOperator, QueryParameters, Statement,
    StatementGroup, StatementRenderer,
};
pub use response::{BriefSearchResponse, Document, DocumentRecord, Facet, SearchResult};

/// Compiles a statement tree into brief search parameters.
pub fn compile(renderer: &StatementRenderer, statements: &[Statement]) -> Result<QueryParameters> {
    renderer.render_statements(statements)
}
