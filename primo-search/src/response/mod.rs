mod decoder;
mod document;
mod facet;
mod xml;

pub use decoder::{has_more_results, BriefSearchResponse, SearchResult};
pub use document::{Document, DocumentRecord};
pub use facet::{facet_key, Facet, FacetAssembler, FACET_PREFIX};
pub use xml::{PRIMO_NS, SEARCH_NS};

#[cfg(test)]
mod tests;
