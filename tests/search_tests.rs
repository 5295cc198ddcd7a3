//! Integration tests for the search endpoint against a mocked Scopus API.

use scopus_client::{Identifier, ScopusClient, ScopusError, SearchView};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_client(server: &MockServer) -> ScopusClient {
    ScopusClient::new("test-key").with_base_url(server.uri())
}

fn search_body() -> serde_json::Value {
    json!({
        "search-results": {
            "opensearch:totalResults": "1862",
            "opensearch:startIndex": "0",
            "opensearch:itemsPerPage": "2",
            "opensearch:Query": {"@role": "request", "@searchTerms": "TITLE-ABS-KEY(neuromodulation)"},
            "link": [
                {"@_fa": "true", "@ref": "self", "@href": "https://api.elsevier.com/content/search/scopus?start=0"},
                {"@_fa": "true", "@ref": "next", "@href": "https://api.elsevier.com/content/search/scopus?start=2"}
            ],
            "entry": [
                {
                    "@_fa": "true",
                    "eid": "2-s2.0-85059373952",
                    "dc:title": "Neuromodulation for chronic pain",
                    "prism:doi": "10.1016/S0140-6736(21)00794-7",
                    "citedby-count": "147",
                    "author": [
                        {"@_fa": "true", "authname": "Knotkova H."},
                        {"@_fa": "true", "authname": "Hamani C."}
                    ]
                },
                {
                    "@_fa": "true",
                    "eid": "2-s2.0-85100012345",
                    "dc:title": "Spinal cord stimulation revisited",
                    "citedby-count": "12"
                }
            ]
        }
    })
}

#[tokio::test]
async fn test_search_standard_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/scopus"))
        .and(query_param("query", "TITLE-ABS-KEY(neuromodulation)"))
        .and(query_param("view", "STANDARD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let results = mock_client(&server)
        .search("TITLE-ABS-KEY(neuromodulation)")
        .await
        .unwrap();
    assert_eq!(results.total_results(), Some(1862));
    assert_eq!(results.items_per_page(), Some(2));

    let entries = results.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0].title().as_deref(),
        Some("Neuromodulation for chronic pain")
    );
    assert_eq!(entries[0].cited_by_count(), Some(147));
    assert_eq!(entries[0].authors(), vec!["Knotkova H.", "Hamani C."]);
    assert_eq!(entries[1].doi(), None);

    assert!(results.links().next.is_some());
    assert_eq!(results.links().last, None);
}

#[tokio::test]
async fn test_search_with_date_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/scopus"))
        .and(query_param("query", "AUTH(suresh)"))
        .and(query_param("view", "COMPLETE"))
        .and(query_param("date", "2010-2015"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let results = mock_client(&server)
        .search_with_options("AUTH(suresh)", SearchView::Complete, Some("2010-2015"))
        .await
        .unwrap();
    assert_eq!(results.entries().len(), 2);
}

#[tokio::test]
async fn test_search_omits_date_param_when_unset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/scopus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&server)
        .await;

    mock_client(&server)
        .search("AUTH(suresh)")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].url.query_pairs().any(|(k, _)| k == "date"));
}

#[tokio::test]
async fn test_search_raw_returns_envelope_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/scopus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&server)
        .await;

    let raw = mock_client(&server)
        .search_raw("TITLE-ABS-KEY(neuromodulation)", SearchView::Standard, None)
        .await
        .unwrap();
    assert_eq!(raw["opensearch:totalResults"], json!("1862"));
    assert_eq!(raw["entry"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_search_missing_envelope_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/scopus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"noise": true})))
        .mount(&server)
        .await;

    let err = mock_client(&server).search("anything").await.unwrap_err();
    assert!(matches!(err, ScopusError::Parse(_)));
}

#[tokio::test]
async fn test_search_entry_feeds_retrieval() {
    // an EID plucked from search results works as a retrieval identifier
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/scopus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/abstract/eid/2-s2.0-85059373952"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "abstracts-retrieval-response": {
                "coredata": {"dc:description": "Stimulation of neural tissue."}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let results = client.search("TITLE-ABS-KEY(neuromodulation)").await.unwrap();
    let eid = results.entries()[0].eid().unwrap();

    let text = client
        .abstract_by(&Identifier::eid(eid))
        .await
        .unwrap();
    assert_eq!(text.as_deref(), Some("Stimulation of neural tissue."));
}
