//! The form: ten independent text/number fields and seven actions.

use std::fmt;
use std::str::FromStr;

use api::SearchOptions;
use core_types::config::FormDefaults;
use core_types::{MetricType, product_schema};

use super::action::{ActionKind, StoreAction};
use super::input::{
    InputError, parse_conditions, parse_embeddings, parse_insert_data, split_cids,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Id,
    Pc,
    Collection,
    VectorField,
    Embeddings,
    MetricType,
    Limit,
    Data,
    Conditions,
    Cids,
}

impl FormField {
    pub const ALL: [Self; 10] = [
        Self::Id,
        Self::Pc,
        Self::Collection,
        Self::VectorField,
        Self::Embeddings,
        Self::MetricType,
        Self::Limit,
        Self::Data,
        Self::Conditions,
        Self::Cids,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Pc => "pc",
            Self::Collection => "collection",
            Self::VectorField => "vector-field",
            Self::Embeddings => "embeddings",
            Self::MetricType => "metric",
            Self::Limit => "limit",
            Self::Data => "data",
            Self::Conditions => "conditions",
            Self::Cids => "cids",
        }
    }

    /// Placeholder text of the field.
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Pc => "PC Address",
            Self::Collection => "Collection Name",
            Self::VectorField => "Vector Field",
            Self::Embeddings => "Embeddings (comma-separated)",
            Self::MetricType => "l2 | ip | cosine | jaccard | hamming",
            Self::Limit => "Limit",
            Self::Data => "Data (JSON format)",
            Self::Conditions => "Conditions (JSON format)",
            Self::Cids => "CIDs (comma-separated)",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        let needle = match needle.as_str() {
            "vectorfield" => "vector-field",
            "metric-type" | "metrictype" => "metric",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|f| f.name() == needle)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Current field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub id: i64,
    pub pc: String,
    pub collection: String,
    pub vector_field: String,
    pub embeddings: String,
    pub metric_type: MetricType,
    pub limit: u32,
    pub data: String,
    pub conditions: String,
    pub cids: String,
    /// Dimension of the embedding column in created collections.
    pub vector_dimension: u32,
}

impl Default for FormState {
    fn default() -> Self {
        Self::with_defaults(&FormDefaults::default())
    }
}

impl FormState {
    pub fn with_defaults(defaults: &FormDefaults) -> Self {
        Self {
            id: defaults.id,
            pc: String::new(),
            collection: String::new(),
            vector_field: String::new(),
            embeddings: String::new(),
            metric_type: defaults.metric,
            limit: defaults.limit,
            data: String::new(),
            conditions: String::new(),
            cids: String::new(),
            vector_dimension: defaults.vector_dimension,
        }
    }

    /// Assign raw text to a field, as typing into the input would.
    pub fn set(&mut self, field: FormField, value: &str) -> Result<(), InputError> {
        match field {
            FormField::Id => self.id = parse_int(field, value, "an integer")?,
            FormField::Limit => {
                self.limit = parse_int(field, value, "a non-negative integer")?;
            }
            FormField::MetricType => {
                self.metric_type = value.parse().map_err(|_| InputError::Field {
                    field: field.name(),
                    expected: "one of l2, ip, cosine, jaccard, hamming",
                    value: value.to_string(),
                })?;
            }
            FormField::Pc => self.pc = value.to_string(),
            FormField::Collection => self.collection = value.to_string(),
            FormField::VectorField => self.vector_field = value.to_string(),
            FormField::Embeddings => self.embeddings = value.to_string(),
            FormField::Data => self.data = value.to_string(),
            FormField::Conditions => self.conditions = value.to_string(),
            FormField::Cids => self.cids = value.to_string(),
        }
        Ok(())
    }

    pub fn get(&self, field: FormField) -> String {
        match field {
            FormField::Id => self.id.to_string(),
            FormField::Pc => self.pc.clone(),
            FormField::Collection => self.collection.clone(),
            FormField::VectorField => self.vector_field.clone(),
            FormField::Embeddings => self.embeddings.clone(),
            FormField::MetricType => self.metric_type.to_string(),
            FormField::Limit => self.limit.to_string(),
            FormField::Data => self.data.clone(),
            FormField::Conditions => self.conditions.clone(),
            FormField::Cids => self.cids.clone(),
        }
    }

    /// Turn the current field values into the store call for `action`.
    pub fn build(&self, action: ActionKind) -> Result<StoreAction, InputError> {
        let built = match action {
            ActionKind::Search => StoreAction::Search {
                id: self.id,
                pc: self.pc.clone(),
                collection: self.collection.clone(),
                vector_field: self.vector_field.clone(),
                embeddings: parse_embeddings(&self.embeddings),
                options: Some(SearchOptions {
                    limit: Some(self.limit),
                    metric_type: Some(self.metric_type),
                }),
            },
            ActionKind::Insert => StoreAction::Insert {
                id: self.id,
                pc: self.pc.clone(),
                collection: self.collection.clone(),
                data: parse_insert_data(&self.data)?,
            },
            ActionKind::Delete => StoreAction::Delete {
                id: self.id,
                pc: self.pc.clone(),
                collection: self.collection.clone(),
                conditions: parse_conditions(&self.conditions)?,
            },
            ActionKind::CreateCollection => StoreAction::CreateCollection {
                id: self.id,
                pc: self.pc.clone(),
                name: self.collection.clone(),
                schema: product_schema(self.vector_dimension)?,
            },
            ActionKind::DeleteCollection => StoreAction::DeleteCollection {
                id: self.id,
                pc: self.pc.clone(),
                name: self.collection.clone(),
            },
            ActionKind::GetDetails => StoreAction::GetDetails {
                cids: split_cids(&self.cids),
            },
            ActionKind::GetResources => StoreAction::GetResources {
                id: Some(self.id),
                pc: Some(self.pc.clone()),
            },
        };
        Ok(built)
    }
}

/// Integer fields: blank means zero, like an emptied number input.
fn parse_int<T>(field: FormField, value: &str, expected: &'static str) -> Result<T, InputError>
where
    T: FromStr + Default,
{
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed.parse().map_err(|_| InputError::Field {
        field: field.name(),
        expected,
        value: value.to_string(),
    })
}
