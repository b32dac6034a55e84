use super::document::Document;
use super::facet::{Facet, FacetAssembler};
use super::xml::{primo, search, select, text_content, Step};
use crate::errors::Result;
use crate::mapping::ValueMappers;
use indexmap::IndexMap;
use roxmltree::Node;

/// A parsed Primo brief search response.
///
/// The XML is parsed once; documents and facets are views into this tree.
pub struct BriefSearchResponse<'input> {
    dom: roxmltree::Document<'input>,
}

/// Everything a search produced, borrowed from a [`BriefSearchResponse`].
#[derive(Debug, Clone)]
pub struct SearchResult<'a, 'input> {
    pub total_hits: u64,
    pub documents: IndexMap<String, Document<'a, 'input>>,
    pub facets: IndexMap<String, Facet>,
}

impl SearchResult<'_, '_> {
    /// Whether paging further (larger page or count) could yield more records.
    pub fn has_more_results(&self, page: u64, count: u64) -> bool {
        has_more_results(self.total_hits, page, count)
    }
}

pub fn has_more_results(total_hits: u64, page: u64, count: u64) -> bool {
    total_hits > page.saturating_mul(count)
}

impl<'input> BriefSearchResponse<'input> {
    pub fn parse(xml: &'input str) -> Result<Self> {
        let dom = roxmltree::Document::parse(xml)?;
        Ok(Self { dom })
    }

    pub fn from_bytes(bytes: &'input [u8]) -> Result<Self> {
        Self::parse(std::str::from_utf8(bytes)?)
    }

    pub(crate) fn select<'a>(&'a self, path: &[Step]) -> Vec<Node<'a, 'input>> {
        select(self.dom.root(), path)
    }

    /// `TOTALHITS` of the docset, 0 when missing or not a number.
    pub fn total_hits(&self) -> u64 {
        let Some(docset) = self.select(&[search("DOCSET")]).into_iter().next() else {
            tracing::debug!("Response has no DOCSET element, assuming 0 hits");
            return 0;
        };
        match docset.attribute("TOTALHITS") {
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring unparsable TOTALHITS value {:?}", value);
                0
            }),
            None => 0,
        }
    }

    /// Documents keyed by record id, in the order Primo returned them.
    pub fn documents(&self) -> IndexMap<String, Document<'_, 'input>> {
        let mut documents = IndexMap::new();
        for (record_id, node) in self.records() {
            documents.insert(record_id.clone(), Document::new(record_id, node));
        }
        documents
    }

    pub fn document(&self, record_id: &str) -> Option<Document<'_, 'input>> {
        self.records()
            .into_iter()
            .filter(|(id, _)| id == record_id)
            .last()
            .map(|(id, node)| Document::new(id, node))
    }

    /// Record ids paired with their `search:DOC` element.
    fn records(&self) -> Vec<(String, Node<'_, 'input>)> {
        self.select(&[search("DOC")])
            .into_iter()
            .filter_map(|doc| {
                select(doc, &[primo("control"), primo("recordid")])
                    .into_iter()
                    .next()
                    .map(|id| (text_content(id).trim().to_string(), doc))
            })
            .collect()
    }

    pub fn facets(&self, mappers: &ValueMappers) -> IndexMap<String, Facet> {
        FacetAssembler::new(mappers).assemble(self)
    }

    pub fn facet(&self, id: &str, mappers: &ValueMappers) -> Option<Facet> {
        FacetAssembler::new(mappers).facet(self, id)
    }

    pub fn result(&self, mappers: &ValueMappers) -> SearchResult<'_, 'input> {
        let result = SearchResult {
            total_hits: self.total_hits(),
            documents: self.documents(),
            facets: self.facets(mappers),
        };
        tracing::debug!(
            "Decoded response: {} hits, {} documents, {} facets",
            result.total_hits,
            result.documents.len(),
            result.facets.len()
        );
        result
    }
}

impl std::fmt::Debug for BriefSearchResponse<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BriefSearchResponse")
            .field("root", &self.dom.root_element().tag_name().name())
            .finish()
    }
}
