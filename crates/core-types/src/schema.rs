//! Validated collection schemas.
//!
//! A `CollectionSchema` can only be built from a field list that the
//! collection endpoint can turn into a table, so malformed shapes are rejected
//! before anything is sent.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::{CollectionField, FieldProperties, FieldType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema has no fields")]
    Empty,
    #[error("field #{0} has an empty name")]
    EmptyName(usize),
    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),
    #[error("more than one primary key: `{first}` and `{second}`")]
    MultiplePrimaryKeys { first: String, second: String },
    #[error("vector field `{0}` needs a positive dimension")]
    MissingDimension(String),
    #[error("field `{0}` is not a vector but declares a dimension")]
    UnexpectedDimension(String),
    #[error("field `{0}` is auto-increment but not an integer primary key")]
    InvalidAutoIncrement(String),
}

/// Field list accepted by the create-collection endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CollectionSchema {
    fields: Vec<CollectionField>,
}

impl CollectionSchema {
    pub fn new(fields: Vec<CollectionField>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::with_capacity(fields.len());
        let mut primary: Option<&str> = None;

        for (idx, field) in fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyName(idx));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }

            if field.is_primary() {
                if let Some(first) = primary {
                    return Err(SchemaError::MultiplePrimaryKeys {
                        first: first.to_string(),
                        second: field.name.clone(),
                    });
                }
                primary = Some(field.name.as_str());
            }

            match (field.field_type, field.dimension()) {
                (FieldType::Vector, None | Some(0)) => {
                    return Err(SchemaError::MissingDimension(field.name.clone()));
                }
                (FieldType::Vector, Some(_)) | (_, None) => {}
                (_, Some(_)) => return Err(SchemaError::UnexpectedDimension(field.name.clone())),
            }

            let auto = field
                .properties
                .as_ref()
                .is_some_and(FieldProperties::auto_increment);
            if auto && !(field.is_primary() && field.field_type.is_integer()) {
                return Err(SchemaError::InvalidAutoIncrement(field.name.clone()));
            }
        }

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[CollectionField] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<CollectionField> {
        self.fields
    }
}

/// The five-column product table the form always creates.
pub fn product_schema(dimension: u32) -> Result<CollectionSchema, SchemaError> {
    CollectionSchema::new(vec![
        CollectionField::new("id", FieldType::Integer32).with_properties(FieldProperties {
            is_primary: Some(true),
            auto_increment: Some(true),
            ..FieldProperties::default()
        }),
        CollectionField::new("name", FieldType::String),
        CollectionField::new("description", FieldType::String),
        CollectionField::new("image_url", FieldType::String),
        CollectionField::new("embedding", FieldType::Vector).with_properties(FieldProperties {
            dimension: Some(dimension),
            ..FieldProperties::default()
        }),
    ])
}
