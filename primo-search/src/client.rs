use crate::config::SearchConfig;
use crate::errors::{Result, SearchError};
use crate::query::{escape_value, QueryParameters, Statement, StatementRenderer, QUERY_PARAMETER};
use crate::response::{BriefSearchResponse, DocumentRecord};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;

/// Executes a brief search and returns the raw XML response.
///
/// Offsets are 1-based, as in Primo's `indx` parameter.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn search(&self, parameters: &QueryParameters, offset: u64, count: u64)
        -> Result<String>;
}

/// Brief search over HTTP against a Primo X-Services host.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub const SEARCH_PATH: &'static str = "PrimoWebServices/xservice/search/brief";

    /// `base_url` holds protocol, hostname and port of the Primo server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn search_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), Self::SEARCH_PATH)
    }

    /// Checks that a thumbnail url Primo returned really points at an image.
    ///
    /// Primo is known to return thumbnail urls for resources that are not images.
    pub async fn validate_thumbnail(&self, url: &str) -> bool {
        // HEAD, only status and content type matter here.
        let response = match self.client.head(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Thumbnail check for {} failed: {}", url, e);
                return false;
            }
        };

        let status = response.status();
        if !status.is_success() {
            if status != reqwest::StatusCode::NOT_FOUND {
                tracing::warn!("Thumbnail check for {} returned {}", url, status);
            }
            return false;
        }

        response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_ascii_lowercase().starts_with("image"))
            .unwrap_or(false)
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn search(
        &self,
        parameters: &QueryParameters,
        offset: u64,
        count: u64,
    ) -> Result<String> {
        let mut pairs = parameters.to_pairs();
        pairs.push(("indx".to_string(), offset.to_string()));
        pairs.push(("bulkSize".to_string(), count.to_string()));

        let response = self
            .client
            .get(self.search_url())
            .query(&pairs)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Transfer(format!(
                "Primo brief search error ({}): {}",
                status, body
            )));
        }

        Ok(response.text().await?)
    }
}

/// Raw response body of a search, decoded on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseBody(String);

impl ResponseBody {
    pub fn new(xml: String) -> Self {
        Self(xml)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn decode(&self) -> Result<BriefSearchResponse<'_>> {
        BriefSearchResponse::parse(&self.0)
    }
}

/// Client for the Primo brief search service.
///
/// See https://developers.exlibrisgroup.com/primo/apis/webservices/xservices/search/briefsearch
pub struct BriefSearchClient<T> {
    transport: T,
    renderer: StatementRenderer,
    default_parameters: QueryParameters,
}

impl<T: SearchTransport> BriefSearchClient<T> {
    pub fn new(
        transport: T,
        renderer: StatementRenderer,
        institution: &str,
        ip_address: &str,
        scopes: Option<&str>,
    ) -> Self {
        let mut default_parameters = QueryParameters::new();
        default_parameters.push("institution", institution);
        default_parameters.push("ip", ip_address);
        if let Some(scopes) = scopes.filter(|s| !s.trim().is_empty()) {
            default_parameters.push("loc", format!("local,scope:({})", scopes));
        }

        Self {
            transport,
            renderer,
            default_parameters,
        }
    }

    pub fn from_config(config: &SearchConfig, transport: T) -> Self {
        let renderer = StatementRenderer::new(
            Arc::new(config.field_names()),
            Arc::new(config.value_mappers()),
        );
        Self::new(
            transport,
            renderer,
            &config.institution,
            &config.ip_address,
            config.scopes.as_deref(),
        )
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn renderer(&self) -> &StatementRenderer {
        &self.renderer
    }

    /// Renders the statements and adds the static default parameters.
    pub fn compile(&self, statements: &[Statement]) -> Result<QueryParameters> {
        let mut parameters = self.renderer.render_statements(statements)?;
        parameters.merge(self.default_parameters.clone());
        Ok(parameters)
    }

    /// Executes a search. `offset` starts at 1 for the first result.
    pub async fn search(
        &self,
        statements: &[Statement],
        offset: u64,
        count: u64,
    ) -> Result<ResponseBody> {
        let parameters = self.compile(statements)?;
        self.execute(&parameters, offset, count).await
    }

    async fn execute(
        &self,
        parameters: &QueryParameters,
        offset: u64,
        count: u64,
    ) -> Result<ResponseBody> {
        tracing::info!(
            "Primo brief search: {:?} (offset {}, count {})",
            parameters.get(QUERY_PARAMETER).unwrap_or_default(),
            offset,
            count
        );
        let xml = self.transport.search(parameters, offset, count).await?;
        Ok(ResponseBody::new(xml))
    }

    /// Retrieves records by id, keyed by record id.
    pub async fn documents(&self, record_ids: &[String]) -> Result<IndexMap<String, DocumentRecord>> {
        if record_ids.is_empty() {
            return Ok(IndexMap::new());
        }

        let ids: Vec<String> = record_ids.iter().map(|id| escape_value(id)).collect();
        let mut parameters = QueryParameters::new();
        parameters.push(QUERY_PARAMETER, format!("rid,contains,{}", ids.join(" OR ")));
        parameters.merge(self.default_parameters.clone());

        let body = self.execute(&parameters, 1, record_ids.len() as u64).await?;
        let response = body.decode()?;
        let documents = response
            .documents()
            .into_iter()
            .map(|(id, document)| (id, document.to_record()))
            .collect();
        Ok(documents)
    }

    pub async fn document(&self, record_id: &str) -> Result<Option<DocumentRecord>> {
        let mut documents = self.documents(&[record_id.to_string()]).await?;
        Ok(documents.shift_remove(record_id))
    }
}
