//! Wire-level behaviour of `HttpClient` against a mock backend.

use api::{
    ApiError, CreateCollectionRequest, DeleteCollectionRequest, DetailsRequest, DetailsResponse,
    HttpClient, InsertRequest, ResourcesQuery, ResourcesResponse, SearchOptions, SearchRequest,
    VectorBackend,
};
use core_types::{MetricType, product_schema};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(server.uri()).expect("client")
}

fn search_request() -> SearchRequest {
    SearchRequest {
        id: 1,
        pc: "node-a".into(),
        collection: "products".into(),
        vector_field: "embedding".into(),
        embeddings: vec![0.5, 1.0],
        options: Some(SearchOptions {
            limit: Some(3),
            metric_type: Some(MetricType::L2),
        }),
    }
}

#[tokio::test]
async fn search_posts_expected_body_and_decodes_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search-vectors/"))
        .and(body_json(json!({
            "id": 1,
            "pc": "node-a",
            "collection": "products",
            "vectorField": "embedding",
            "embeddings": [0.5, 1.0],
            "options": { "limit": 3, "metricType": "l2" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "id": 7, "name": "lamp", "description": "desk lamp", "image_url": "u", "similarity": 0.9 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server).search(search_request()).await.unwrap();
    assert_eq!(resp.results.len(), 1);
    assert_eq!(resp.results[0].id, Some(7));
    assert_eq!(resp.results[0].similarity, Some(0.9));
}

#[tokio::test]
async fn search_with_unexpected_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search-vectors/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rows": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(search_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }), "{err}");
}

#[tokio::test]
async fn non_success_status_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/insert-data/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("relation does not exist"))
        .expect(1)
        .mount(&server)
        .await;

    let req = InsertRequest {
        id: 1,
        pc: String::new(),
        collection: "missing".into(),
        data: vec![],
    };
    let err = client_for(&server).insert(req).await.unwrap_err();
    match err {
        ApiError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "relation does not exist");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn create_collection_sends_schema_fields() {
    let server = MockServer::start().await;
    let schema = product_schema(384).unwrap();
    let fields = schema.into_fields();
    Mock::given(method("POST"))
        .and(path("/create-collection/"))
        .and(body_json(json!({
            "id": 2,
            "pc": "pc",
            "name": "products",
            "fields": serde_json::to_value(&fields).unwrap()
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Collection 'products' created successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ack = client_for(&server)
        .create_collection(CreateCollectionRequest {
            id: 2,
            pc: "pc".into(),
            name: "products".into(),
            fields,
        })
        .await
        .unwrap();
    assert_eq!(
        ack.message.as_deref(),
        Some("Collection 'products' created successfully")
    );
}

#[tokio::test]
async fn delete_collection_tolerates_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/delete-collection/"))
        .and(body_json(json!({ "id": 1, "pc": "", "name": "old" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client_for(&server)
        .delete_collection(DeleteCollectionRequest {
            id: 1,
            pc: String::new(),
            name: "old".into(),
        })
        .await
        .unwrap();
    assert!(ack.message.is_none());
}

#[tokio::test]
async fn details_wraps_cids_in_body_member() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/details/"))
        .and(body_json(json!({ "body": ["a", "", " b"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["one", "two", "three"])))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .details(DetailsRequest {
            body: vec!["a".into(), String::new(), " b".into()],
        })
        .await
        .unwrap();
    assert_eq!(
        resp,
        DetailsResponse::Contents(vec!["one".into(), "two".into(), "three".into()])
    );
}

#[tokio::test]
async fn resources_is_a_get_with_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources/"))
        .and(query_param("id", "5"))
        .and(query_param("pc", "10.1.1.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resource": [5, "10.1.1.1"] })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .resources(ResourcesQuery {
            id: Some(5),
            pc: Some("10.1.1.1".into()),
        })
        .await
        .unwrap();
    assert!(matches!(resp, ResourcesResponse::One { .. }));
}

#[tokio::test]
async fn resources_without_filters_sends_no_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources/"))
        .and(query_param_is_missing("id"))
        .and(query_param_is_missing("pc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resources": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .resources(ResourcesQuery::default())
        .await
        .unwrap();
    assert_eq!(resp, ResourcesResponse::Many { resources: vec![] });
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Nothing listens on the discard port.
    let client = HttpClient::new("http://127.0.0.1:9")
        .unwrap()
        .with_connect_timeout(Duration::from_millis(200))
        .unwrap();
    let err = client.search(search_request()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err}");
}

#[tokio::test]
async fn slow_backend_hits_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search-vectors/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "results": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server)
        .with_request_timeout(Duration::from_millis(100))
        .unwrap();
    let err = client.search(search_request()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err}");
}
