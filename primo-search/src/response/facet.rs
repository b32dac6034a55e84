use super::decoder::BriefSearchResponse;
use super::xml::search;
use crate::mapping::ValueMappers;
use indexmap::IndexMap;
use serde::Serialize;

/// Prefix turning a facet id into the field name Primo accepts in a query.
pub const FACET_PREFIX: &str = "facet_";

/// One aspect of the result, eg. language, with the frequency of each value.
///
/// The id is the facet `NAME` from the response. Some ids look like names but
/// are not meant for end users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    pub id: String,
    pub terms: IndexMap<String, u64>,
}

impl Facet {
    /// Key of this facet in a search result, also usable as a query field name.
    pub fn key(&self) -> String {
        facet_key(&self.id)
    }

    pub fn frequency(&self, term: &str) -> Option<u64> {
        self.terms.get(term).copied()
    }
}

pub fn facet_key(id: &str) -> String {
    format!("{}{}", FACET_PREFIX, id)
}

/// Extracts facets from a decoded response.
///
/// Term values are passed through the reverse value mapper registered for
/// `facet_<id>`, frequencies are reported as Primo sent them.
#[derive(Debug, Clone, Copy)]
pub struct FacetAssembler<'m> {
    mappers: &'m ValueMappers,
}

impl<'m> FacetAssembler<'m> {
    pub fn new(mappers: &'m ValueMappers) -> Self {
        Self { mappers }
    }

    /// All facets keyed by `facet_<id>`, in response order.
    pub fn assemble(&self, response: &BriefSearchResponse<'_>) -> IndexMap<String, Facet> {
        let mut facets = IndexMap::new();
        for node in response.select(&[search("FACET")]) {
            let Some(id) = node.attribute("NAME") else {
                tracing::warn!("Skipping facet without NAME attribute");
                continue;
            };
            let facet = self.build_facet(id, node);
            facets.insert(facet.key(), facet);
        }
        facets
    }

    /// Looks up a single facet by id.
    pub fn facet(&self, response: &BriefSearchResponse<'_>, id: &str) -> Option<Facet> {
        response
            .select(&[search("FACET")])
            .into_iter()
            .find(|node| node.attribute("NAME") == Some(id))
            .map(|node| self.build_facet(id, node))
    }

    fn build_facet(&self, id: &str, node: roxmltree::Node<'_, '_>) -> Facet {
        let key = facet_key(id);
        let mut terms = IndexMap::new();

        for value_node in node
            .children()
            .filter(|n| n.is_element() && n.has_tag_name(search("FACET_VALUES")))
        {
            let Some(term) = value_node.attribute("KEY") else {
                continue;
            };
            let frequency = value_node
                .attribute("VALUE")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or_else(|| {
                    tracing::warn!("Facet {} term {} has no valid frequency", id, term);
                    0
                });
            terms.insert(self.mappers.from_backend(&key, term), frequency);
        }

        Facet {
            id: id.to_string(),
            terms,
        }
    }
}
