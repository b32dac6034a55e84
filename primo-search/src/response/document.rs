use super::xml::{node_value, node_values, primo, search, select, text_content, Step, PRIMO_NS};
use roxmltree::Node;
use serde::Serialize;

/// A record (`search:DOC`) within a brief search response.
///
/// The document only holds its record id and the `search:DOC` element; every
/// accessor walks the record's subtree again. Most content lives in the PNX
/// record, see the Ex Libris "The PNX Record" technical guide.
#[derive(Debug, Clone)]
pub struct Document<'a, 'input> {
    record_id: String,
    node: Node<'a, 'input>,
}

impl<'a, 'input> Document<'a, 'input> {
    pub(crate) fn new(record_id: String, node: Node<'a, 'input>) -> Self {
        Self { record_id, node }
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    fn value(&self, path: &[Step]) -> Option<String> {
        node_value(self.node, path)
    }

    fn values(&self, path: &[Step]) -> Vec<String> {
        node_values(self.node, path)
    }

    /// Id of the source organization.
    pub fn source_id(&self) -> Option<String> {
        self.value(&[primo("control"), primo("sourceid")])
    }

    /// Id of the record in the source repository, eg. an ALEPH system number.
    pub fn source_record_id(&self) -> Option<String> {
        self.value(&[primo("control"), primo("sourcerecordid")])
    }

    /// Name of the system the record originates from, eg. Aleph.
    pub fn source_system(&self) -> Option<String> {
        self.value(&[primo("control"), primo("sourcesystem")])
    }

    pub fn title(&self) -> Option<String> {
        self.value(&[primo("addata"), primo("btitle")])
    }

    pub fn description(&self) -> Option<String> {
        self.value(&[primo("display"), primo("description")])
    }

    /// Physical format, eg. number of pages and illustrations.
    pub fn display_format(&self) -> Option<String> {
        self.value(&[primo("display"), primo("format")])
    }

    /// All ISBNs of the record, ISBN-10 and ISBN-13 alike.
    pub fn isbns(&self) -> Vec<String> {
        self.values(&[primo("addata"), primo("isbn")])
    }

    /// Thumbnail urls, duplicates removed while keeping order.
    pub fn thumbnail_urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        for url in self.values(&[search("thumbnail")]) {
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
        urls
    }

    pub fn publisher(&self) -> Option<String> {
        self.value(&[primo("addata"), primo("pub")])
    }

    pub fn year(&self) -> Option<String> {
        self.value(&[primo("addata"), primo("date")])
    }

    /// Language as a three letter ISO 639-2 code.
    pub fn language(&self) -> Option<String> {
        self.value(&[primo("display"), primo("language")])
    }

    /// Material type, eg. `book`.
    pub fn material_type(&self) -> Option<String> {
        self.value(&[primo("display"), primo("type")])
    }

    /// Local display field `ldsNN`, the number zero padded to two digits.
    pub fn local_display_field(&self, number: u32) -> Option<String> {
        let name = format!("lds{:02}", number);
        self.walk_value(&[primo("display")], &name)
    }

    /// Local search field `lsrN`.
    pub fn local_search_field(&self, number: u32) -> Vec<String> {
        let name = format!("lsr{}", number);
        self.walk_values(&[primo("search")], &name)
    }

    /// Names of the creators split into name parts, first name first.
    ///
    /// "Tolkien, J. R. R." becomes `["J. R. R.", "Tolkien"]`; names without a
    /// ", " separator are returned as a single part.
    pub fn creators(&self) -> Vec<Vec<String>> {
        self.values(&[primo("addata"), primo("au")])
            .into_iter()
            .map(|name| match name.split_once(", ") {
                Some((last, first)) => vec![first.to_string(), last.to_string()],
                None => vec![name],
            })
            .collect()
    }

    /// Contributors, eg. translators.
    pub fn contributors(&self) -> Vec<String> {
        self.values(&[primo("addata"), primo("addau")])
    }

    /// All subjects as one string, separated by semicolons.
    pub fn subjects(&self) -> Option<String> {
        self.value(&[primo("display"), primo("subject")])
    }

    /// Series data, usually `<title>; <number>`.
    pub fn series_data(&self) -> Option<String> {
        self.value(&[primo("addata"), primo("seriestitle")])
    }

    pub fn online_url(&self) -> Option<String> {
        self.value(&[search("LINKS"), search("linktorsrc")])
    }

    // Local fields have numbered names, so they cannot be static path steps.
    fn walk_values(&self, parent: &[Step], name: &str) -> Vec<String> {
        select(self.node, parent)
            .into_iter()
            .flat_map(|n| n.children())
            .filter(|n| n.is_element() && n.has_tag_name((PRIMO_NS, name)))
            .map(text_content)
            .collect()
    }

    fn walk_value(&self, parent: &[Step], name: &str) -> Option<String> {
        self.walk_values(parent, name).into_iter().next()
    }

    /// Owned copy of every field, for callers that outlive the response.
    pub fn to_record(&self) -> DocumentRecord {
        DocumentRecord {
            record_id: self.record_id.clone(),
            source_id: self.source_id(),
            source_record_id: self.source_record_id(),
            source_system: self.source_system(),
            title: self.title(),
            description: self.description(),
            display_format: self.display_format(),
            isbns: self.isbns(),
            thumbnail_urls: self.thumbnail_urls(),
            publisher: self.publisher(),
            year: self.year(),
            language: self.language(),
            material_type: self.material_type(),
            creators: self.creators(),
            contributors: self.contributors(),
            subjects: self.subjects(),
            series_data: self.series_data(),
            online_url: self.online_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    pub record_id: String,
    pub source_id: Option<String>,
    pub source_record_id: Option<String>,
    pub source_system: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub display_format: Option<String>,
    pub isbns: Vec<String>,
    pub thumbnail_urls: Vec<String>,
    pub publisher: Option<String>,
    pub year: Option<String>,
    pub language: Option<String>,
    pub material_type: Option<String>,
    pub creators: Vec<Vec<String>>,
    pub contributors: Vec<String>,
    pub subjects: Option<String>,
    pub series_data: Option<String>,
    pub online_url: Option<String>,
}
