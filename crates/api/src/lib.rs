//! HTTP protocol models for the vector-store backend.
//!
//! Every endpoint exchanges JSON. The request types here serialize to the exact
//! member names the service expects (`vectorField`, `metricType`, ...); the
//! response types only model what the client consumes or logs.

use core_types::{CollectionField, MetricType, Product};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod client;
pub mod endpoint;
pub mod error;

pub use client::{HttpClient, VectorBackend};
pub use endpoint::Endpoint;
pub use error::ApiError;

/// A JSON object as typed into the data/conditions fields.
pub type JsonObject = Map<String, Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<MetricType>,
}

/// Body of `POST /search-vectors/`.
///
/// Non-finite embedding components are written as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub id: i64,
    pub pc: String,
    pub collection: String,
    pub vector_field: String,
    pub embeddings: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<SearchOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Product>,
}

/// Body of `POST /insert-data/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertRequest {
    pub id: i64,
    pub pc: String,
    pub collection: String,
    pub data: Vec<JsonObject>,
}

/// Body of `POST /delete-data/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: i64,
    pub pc: String,
    pub collection: String,
    pub conditions: JsonObject,
}

/// Body of `POST /create-collection/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCollectionRequest {
    pub id: i64,
    pub pc: String,
    pub name: String,
    pub fields: Vec<CollectionField>,
}

/// Body of `POST /delete-collection/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCollectionRequest {
    pub id: i64,
    pub pc: String,
    pub name: String,
}

/// Body of `POST /details/`: the CIDs travel under a `body` member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsRequest {
    pub body: Vec<String>,
}

/// Query string of `GET /resources/`; absent members are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcesQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pc: Option<String>,
}

/// Acknowledgement returned by the mutating endpoints (`{"message": ...}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AckResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailsResponse {
    /// File contents, one entry per CID.
    Contents(Vec<String>),
    Error { error: String },
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourcesResponse {
    /// Lookup by id and address.
    One { resource: Value },
    /// Full listing.
    Many { resources: Vec<Value> },
    Other(Value),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_body_uses_service_member_names() {
        let req = SearchRequest {
            id: 1,
            pc: "10.0.0.2".into(),
            collection: "products".into(),
            vector_field: "embedding".into(),
            embeddings: vec![1.0, f64::NAN, 3.5],
            options: Some(SearchOptions {
                limit: Some(10),
                metric_type: Some(MetricType::Cosine),
            }),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({
                "id": 1,
                "pc": "10.0.0.2",
                "collection": "products",
                "vectorField": "embedding",
                "embeddings": [1.0, null, 3.5],
                "options": { "limit": 10, "metricType": "cosine" }
            })
        );
    }

    #[test]
    fn resources_query_omits_absent_members() {
        let q = ResourcesQuery {
            id: Some(4),
            pc: None,
        };
        assert_eq!(serde_json::to_value(&q).unwrap(), json!({ "id": 4 }));
    }

    #[test]
    fn details_response_shapes() {
        let ok: DetailsResponse = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(ok, DetailsResponse::Contents(vec!["a".into(), "b".into()]));

        let err: DetailsResponse =
            serde_json::from_value(json!({ "error": "File for CID x not found" })).unwrap();
        assert!(matches!(err, DetailsResponse::Error { .. }));
    }

    #[test]
    fn resources_response_shapes() {
        let one: ResourcesResponse =
            serde_json::from_value(json!({ "resource": [1, "pc-1"] })).unwrap();
        assert!(matches!(one, ResourcesResponse::One { .. }));

        let many: ResourcesResponse =
            serde_json::from_value(json!({ "resources": [[1, "a"], [2, "b"]] })).unwrap();
        match many {
            ResourcesResponse::Many { resources } => assert_eq!(resources.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ack_keeps_unknown_members() {
        let ack: AckResponse =
            serde_json::from_value(json!({ "message": "ok", "rows": 3 })).unwrap();
        assert_eq!(ack.message.as_deref(), Some("ok"));
        assert_eq!(ack.extra.get("rows"), Some(&json!(3)));
    }
}
