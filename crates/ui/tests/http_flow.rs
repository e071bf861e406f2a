//! Form → store → HTTP, against a wiremock backend.

use api::HttpClient;
use core_types::config::ConcurrencyPolicy;
use serde_json::json;
use ui::{ActionKind, FormController, FormField, FormState, Notifier, VectorStore};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Silent;

impl Notifier for Silent {
    fn notify(&self, _message: &str) {}
}

fn controller_for(server: &MockServer) -> FormController<HttpClient, Silent> {
    let client = HttpClient::new(server.uri()).unwrap();
    let store = VectorStore::new(client, ConcurrencyPolicy::Race);
    let mut form = FormState::default();
    form.set(FormField::Pc, "10.0.0.1").unwrap();
    form.set(FormField::Collection, "products").unwrap();
    form.set(FormField::VectorField, "embedding").unwrap();
    form.set(FormField::Embeddings, "0.1,x,0.3").unwrap();
    FormController::new(form, store, Silent)
}

#[tokio::test]
async fn search_button_sends_form_values_and_stores_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search-vectors/"))
        .and(body_json(json!({
            "id": 1,
            "pc": "10.0.0.1",
            "collection": "products",
            "vectorField": "embedding",
            "embeddings": [0.1, null, 0.3],
            "options": { "limit": 10, "metricType": "cosine" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "id": 1, "name": "a", "description": "da", "image_url": "ia", "similarity": 0.7 },
                { "id": 2, "name": "b", "description": "db", "image_url": "ib", "similarity": 0.6 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    assert!(controller.press_and_wait(ActionKind::Search).await);
    let names: Vec<String> = controller
        .store()
        .results()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[tokio::test]
async fn server_error_is_swallowed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-collection/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("syntax error at or near \"(\""))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    assert!(controller.press_and_wait(ActionKind::CreateCollection).await);
    assert!(controller.store().collections().is_empty());
}

#[tokio::test]
async fn create_then_delete_collection_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-collection/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "created" })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/delete-collection/"))
        .and(body_json(json!({ "id": 1, "pc": "10.0.0.1", "name": "products" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    controller.press_and_wait(ActionKind::CreateCollection).await;
    controller.press_and_wait(ActionKind::CreateCollection).await;
    assert_eq!(controller.store().collections(), vec!["products", "products"]);

    controller.press_and_wait(ActionKind::DeleteCollection).await;
    assert!(controller.store().collections().is_empty());
}

#[tokio::test]
async fn malformed_conditions_never_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/delete-data/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    controller.form.set(FormField::Conditions, "{'id': 1}").unwrap();
    assert!(!controller.press_and_wait(ActionKind::Delete).await);
}
