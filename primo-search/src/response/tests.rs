use super::*;
use crate::errors::SearchError;
use crate::mapping::{TableValueMapper, ValueMappers};

const FIXTURE: &str = include_str!("../../tests/fixtures/brief_search.xml");

fn docset(attributes: &str, body: &str) -> String {
    format!(
        r#"<search:SEGMENTS xmlns:search="{}" xmlns:primo="{}"><search:DOCSET {}>{}</search:DOCSET></search:SEGMENTS>"#,
        SEARCH_NS, PRIMO_NS, attributes, body
    )
}

fn doc(record_id: &str, title: &str) -> String {
    format!(
        "<search:DOC><primo:record><primo:control><primo:recordid>{}</primo:recordid></primo:control>\
         <primo:addata><primo:btitle>{}</primo:btitle></primo:addata></primo:record></search:DOC>",
        record_id, title
    )
}

#[test]
fn test_total_hits_and_documents() {
    let xml = docset(
        r#"TOTALHITS="42""#,
        &format!("{}{}", doc("rec1", "One"), doc("rec2", "Two")),
    );
    let response = BriefSearchResponse::parse(&xml).unwrap();
    assert_eq!(response.total_hits(), 42);

    let documents = response.documents();
    assert_eq!(documents.len(), 2);
    assert_eq!(
        documents.keys().collect::<Vec<_>>(),
        vec!["rec1", "rec2"]
    );
    assert_eq!(documents["rec2"].record_id(), "rec2");
}

#[test]
fn test_missing_total_hits_defaults_to_zero() {
    let xml = docset("", &doc("rec1", "One"));
    let response = BriefSearchResponse::parse(&xml).unwrap();
    assert_eq!(response.total_hits(), 0);
    assert_eq!(response.documents().len(), 1);
}

#[test]
fn test_unparsable_total_hits_defaults_to_zero() {
    let xml = docset(r#"TOTALHITS="many""#, "");
    let response = BriefSearchResponse::parse(&xml).unwrap();
    assert_eq!(response.total_hits(), 0);
}

#[test]
fn test_response_without_docset() {
    let xml = format!(r#"<search:SEGMENTS xmlns:search="{}"/>"#, SEARCH_NS);
    let response = BriefSearchResponse::parse(&xml).unwrap();
    assert_eq!(response.total_hits(), 0);
    assert!(response.documents().is_empty());
    assert!(response.facets(&ValueMappers::new()).is_empty());
}

#[test]
fn test_malformed_xml_is_decode_error() {
    let result = BriefSearchResponse::parse("<search:DOCSET TOTALHITS=\"1\">");
    assert!(matches!(result, Err(SearchError::Decode(_))));
}

#[test]
fn test_invalid_utf8_is_decode_error() {
    let result = BriefSearchResponse::from_bytes(&[0x3c, 0x61, 0xff, 0x3e]);
    assert!(matches!(result, Err(SearchError::Decode(_))));
}

#[test]
fn test_duplicate_record_id_last_wins() {
    let xml = docset(
        r#"TOTALHITS="2""#,
        &format!("{}{}", doc("rec1", "First"), doc("rec1", "Second")),
    );
    let response = BriefSearchResponse::parse(&xml).unwrap();
    let documents = response.documents();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents["rec1"].title().as_deref(), Some("Second"));
    assert_eq!(
        response.document("rec1").unwrap().title().as_deref(),
        Some("Second")
    );
}

#[test]
fn test_doc_without_record_id_is_skipped() {
    let xml = docset(
        r#"TOTALHITS="2""#,
        &format!("<search:DOC/>{}", doc("rec1", "One")),
    );
    let response = BriefSearchResponse::parse(&xml).unwrap();
    assert_eq!(response.documents().len(), 1);
}

#[test]
fn test_fixture_documents_in_order() {
    let response = BriefSearchResponse::parse(FIXTURE).unwrap();
    assert_eq!(response.total_hits(), 42);
    let ids: Vec<_> = response.documents().into_keys().collect();
    assert_eq!(ids, vec!["ICE01000123456", "ICE01000654321"]);
}

#[test]
fn test_document_accessors() {
    let response = BriefSearchResponse::parse(FIXTURE).unwrap();
    let document = response.document("ICE01000123456").unwrap();

    assert_eq!(document.title().as_deref(), Some("The Hobbit"));
    assert_eq!(document.source_id().as_deref(), Some("ICE01"));
    assert_eq!(document.source_record_id().as_deref(), Some("000123456"));
    assert_eq!(document.source_system().as_deref(), Some("Aleph"));
    assert_eq!(
        document.description().as_deref(),
        Some("A hobbit goes on an adventure.")
    );
    assert_eq!(document.display_format().as_deref(), Some("310 p. : ill."));
    assert_eq!(document.isbns(), vec!["0261102214", "9780261102217"]);
    assert_eq!(document.publisher().as_deref(), Some("Allen & Unwin"));
    assert_eq!(document.year().as_deref(), Some("1937"));
    assert_eq!(document.language().as_deref(), Some("eng"));
    assert_eq!(document.material_type().as_deref(), Some("book"));
    assert_eq!(document.subjects().as_deref(), Some("Fantasy; Dragons"));
    assert_eq!(document.series_data().as_deref(), Some("Middle-earth; 1"));
    assert_eq!(
        document.online_url().as_deref(),
        Some("http://library.example.org/hobbit")
    );
    assert_eq!(document.contributors(), vec!["Olsen, Ulla"]);
}

#[test]
fn test_creators_are_split_first_name_first() {
    let response = BriefSearchResponse::parse(FIXTURE).unwrap();
    let document = response.document("ICE01000123456").unwrap();
    assert_eq!(
        document.creators(),
        vec![
            vec!["J. R. R.".to_string(), "Tolkien".to_string()],
            vec!["Anonymous".to_string()],
        ]
    );
}

#[test]
fn test_thumbnails_are_deduplicated() {
    let response = BriefSearchResponse::parse(FIXTURE).unwrap();
    let document = response.document("ICE01000123456").unwrap();
    assert_eq!(
        document.thumbnail_urls(),
        vec![
            "http://covers.example.org/hobbit.jpg",
            "http://covers.example.org/hobbit-large.jpg",
        ]
    );
}

#[test]
fn test_local_fields() {
    let response = BriefSearchResponse::parse(FIXTURE).unwrap();
    let document = response.document("ICE01000123456").unwrap();
    assert_eq!(
        document.local_display_field(1).as_deref(),
        Some("Local display one")
    );
    assert_eq!(document.local_display_field(2), None);
    assert_eq!(document.local_search_field(5), vec!["Shelf A", "Shelf B"]);
    assert!(document.local_search_field(6).is_empty());
}

#[test]
fn test_accessors_are_scoped_to_their_record() {
    let response = BriefSearchResponse::parse(FIXTURE).unwrap();
    let document = response.document("ICE01000654321").unwrap();
    assert_eq!(document.title().as_deref(), Some("Sjálfstætt fólk"));
    assert_eq!(document.language().as_deref(), Some("ice"));
    assert!(document.isbns().is_empty());
    assert!(document.thumbnail_urls().is_empty());
    assert_eq!(document.publisher(), None);
    assert_eq!(document.online_url(), None);
}

#[test]
fn test_repeated_accessor_calls_agree() {
    let response = BriefSearchResponse::parse(FIXTURE).unwrap();
    let document = response.document("ICE01000123456").unwrap();
    assert_eq!(document.isbns(), document.isbns());
    assert_eq!(document.to_record(), document.to_record());
}

#[test]
fn test_to_record_snapshot() {
    let response = BriefSearchResponse::parse(FIXTURE).unwrap();
    let record = response.document("ICE01000654321").unwrap().to_record();
    assert_eq!(record.record_id, "ICE01000654321");
    assert_eq!(record.year.as_deref(), Some("1934"));
    assert_eq!(
        record.creators,
        vec![vec!["Halldór".to_string(), "Laxness".to_string()]]
    );
}

#[test]
fn test_missing_document() {
    let response = BriefSearchResponse::parse(FIXTURE).unwrap();
    assert!(response.document("nope").is_none());
}

#[test]
fn test_facets_raw() {
    let response = BriefSearchResponse::parse(FIXTURE).unwrap();
    let facets = response.facets(&ValueMappers::new());
    assert_eq!(
        facets.keys().collect::<Vec<_>>(),
        vec!["facet_lang", "facet_rtype"]
    );

    let lang = &facets["facet_lang"];
    assert_eq!(lang.id, "lang");
    assert_eq!(lang.key(), "facet_lang");
    assert_eq!(lang.frequency("eng"), Some(10));
    assert_eq!(lang.frequency("ice"), Some(3));
    assert_eq!(lang.terms.len(), 2);
}

#[test]
fn test_facets_reverse_mapped() {
    let mappers = ValueMappers::new().with(
        "facet_lang",
        TableValueMapper::new([("eng", "English"), ("ice", "Icelandic")]),
    );
    let response = BriefSearchResponse::parse(FIXTURE).unwrap();
    let facets = response.facets(&mappers);

    let lang = &facets["facet_lang"];
    assert_eq!(lang.frequency("English"), Some(10));
    assert_eq!(lang.frequency("Icelandic"), Some(3));
    assert_eq!(lang.frequency("eng"), None);

    // No mapper registered for rtype, values pass through.
    assert_eq!(facets["facet_rtype"].frequency("books"), Some(9));
}

#[test]
fn test_facet_lookup_by_id() {
    let response = BriefSearchResponse::parse(FIXTURE).unwrap();
    let mappers = ValueMappers::new();
    let rtype = response.facet("rtype", &mappers).unwrap();
    assert_eq!(rtype.id, "rtype");
    assert_eq!(rtype.frequency("audiobooks"), Some(4));
    assert!(response.facet("creator", &mappers).is_none());
}

#[test]
fn test_facet_bad_frequency_and_missing_key() {
    let xml = format!(
        r#"<search:FACETLIST xmlns:search="{}"><search:FACET NAME="genre"><search:FACET_VALUES KEY="fiction" VALUE="lots"/><search:FACET_VALUES VALUE="2"/><search:FACET_VALUES KEY="poetry" VALUE="5"/></search:FACET></search:FACETLIST>"#,
        SEARCH_NS
    );
    let response = BriefSearchResponse::parse(&xml).unwrap();
    let facets = response.facets(&ValueMappers::new());
    let genre = &facets["facet_genre"];
    assert_eq!(genre.frequency("fiction"), Some(0));
    assert_eq!(genre.frequency("poetry"), Some(5));
    assert_eq!(genre.terms.len(), 2);
}

#[test]
fn test_search_result() {
    let response = BriefSearchResponse::parse(FIXTURE).unwrap();
    let result = response.result(&ValueMappers::new());
    assert_eq!(result.total_hits, 42);
    assert_eq!(result.documents.len(), 2);
    assert_eq!(result.facets.len(), 2);
    assert!(result.has_more_results(1, 10));
    assert!(!result.has_more_results(5, 10));
}

#[test]
fn test_has_more_results() {
    assert!(has_more_results(11, 1, 10));
    assert!(!has_more_results(10, 1, 10));
    assert!(!has_more_results(0, 0, 10));
}
