/// Error types for compiling queries, talking to Primo and decoding responses
#[derive(Debug)]
pub enum SearchError {
    /// The filter tree needs a boolean shape the Primo grammar cannot express.
    UnsupportedQuery(String),
    /// A normalized group that cannot be rendered (no leaves, empty field name).
    MalformedFilter(String),
    /// Failure reported by the transport; never produced by the compiler or decoder.
    Transfer(String),
    /// The response payload is not well-formed XML.
    Decode(String),
    /// Filter expression text that does not parse.
    InvalidExpression(String),
    Config(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;

impl From<roxmltree::Error> for SearchError {
    fn from(err: roxmltree::Error) -> Self {
        SearchError::Decode(err.to_string())
    }
}

impl From<std::str::Utf8Error> for SearchError {
    fn from(err: std::str::Utf8Error) -> Self {
        SearchError::Decode(format!("response is not valid UTF-8: {}", err))
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Transfer(err.to_string())
    }
}

impl From<serde_yaml_ng::Error> for SearchError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        SearchError::Config(err.to_string())
    }
}

impl From<std::io::Error> for SearchError {
    fn from(err: std::io::Error) -> Self {
        SearchError::Config(err.to_string())
    }
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::UnsupportedQuery(msg) => write!(f, "Unsupported query: {}", msg),
            SearchError::MalformedFilter(msg) => write!(f, "Malformed filter: {}", msg),
            SearchError::Transfer(msg) => write!(f, "Transfer error: {}", msg),
            SearchError::Decode(msg) => write!(f, "Decode error: {}", msg),
            SearchError::InvalidExpression(msg) => write!(f, "Invalid filter expression: {}", msg),
            SearchError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for SearchError {}
