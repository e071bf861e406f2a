//! Core records and shared lightweight types for VectorDesk.
//!
//! These types mirror the JSON shapes exchanged with the vector-store service
//! and carry no behaviour beyond (de)serialization and schema validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod config;
pub mod schema;

pub use schema::{CollectionSchema, SchemaError, product_schema};

/// Dimension of the embedding column in the product schema.
pub const DEFAULT_VECTOR_DIMENSION: u32 = 384;

/// A catalogue item as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

/// Column types understood by the collection endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    String,
    Integer32,
    Integer64,
    Float,
    Vector,
    Boolean,
}

impl FieldType {
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Integer32 | Self::Integer64)
    }
}

/// Optional per-field modifiers. Absent members are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_increment: Option<bool>,
}

impl FieldProperties {
    pub fn primary(&self) -> bool {
        self.is_primary.unwrap_or(false)
    }

    pub fn auto_increment(&self) -> bool {
        self.auto_increment.unwrap_or(false)
    }
}

/// One column of a collection schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<FieldProperties>,
}

impl CollectionField {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            properties: None,
        }
    }

    pub fn with_properties(mut self, properties: FieldProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn is_primary(&self) -> bool {
        self.properties.as_ref().is_some_and(FieldProperties::primary)
    }

    pub fn dimension(&self) -> Option<u32> {
        self.properties.as_ref().and_then(|p| p.dimension)
    }
}

/// Distance/similarity function used by the search endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    L2,
    Ip,
    #[default]
    Cosine,
    Jaccard,
    Hamming,
}

impl MetricType {
    pub const ALL: [Self; 5] = [
        Self::L2,
        Self::Ip,
        Self::Cosine,
        Self::Jaccard,
        Self::Hamming,
    ];

    /// Wire tag of the metric.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::L2 => "l2",
            Self::Ip => "ip",
            Self::Cosine => "cosine",
            Self::Jaccard => "jaccard",
            Self::Hamming => "hamming",
        }
    }

    /// Human label, as shown next to the metric selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::L2 => "L2 Distance",
            Self::Ip => "Inner Product",
            Self::Cosine => "Cosine Similarity",
            Self::Jaccard => "Jaccard Similarity",
            Self::Hamming => "Hamming Distance",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric type `{0}` (expected one of l2, ip, cosine, jaccard, hamming)")]
pub struct UnknownMetric(pub String);

impl FromStr for MetricType {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}
