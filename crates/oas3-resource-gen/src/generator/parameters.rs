//! Standard query and path parameters derived from a resource's attributes.

use std::collections::BTreeMap;

use itertools::Itertools;
use oas3::spec::{ObjectOrReference, ObjectSchema, Parameter, ParameterIn, SchemaType, SchemaTypeSet};
use oas3_resource_model::MetaResource;

use crate::generator::{
  error::{GenerationError, GenerationResult},
  type_mapper::{ReferenceResolver, TypeMapper},
};

pub const FIELDS_PARAMETER: &str = "fields";
pub const INCLUDE_PARAMETER: &str = "include";
pub const SORT_PARAMETER: &str = "sort";
pub const PAGE_OFFSET_PARAMETER: &str = "page[offset]";
pub const PAGE_LIMIT_PARAMETER: &str = "page[limit]";

fn parameter(
  name: impl Into<String>,
  location: ParameterIn,
  description: Option<String>,
  schema: ObjectOrReference<ObjectSchema>,
) -> Parameter {
  Parameter {
    name: name.into(),
    required: matches!(location, ParameterIn::Path).then_some(true),
    location,
    schema: Some(schema),
    description,
    deprecated: None,
    allow_empty_value: None,
    allow_reserved: None,
    explode: None,
    style: None,
    content: None,
    example: None,
    examples: BTreeMap::default(),
    extensions: BTreeMap::default(),
  }
}

fn string_schema(default: Option<String>) -> ObjectOrReference<ObjectSchema> {
  ObjectOrReference::Object(ObjectSchema {
    schema_type: Some(SchemaTypeSet::Single(SchemaType::String)),
    default: default.map(serde_json::Value::String),
    ..Default::default()
  })
}

fn non_negative_int64_schema() -> ObjectOrReference<ObjectSchema> {
  ObjectOrReference::Object(ObjectSchema {
    schema_type: Some(SchemaTypeSet::Single(SchemaType::Integer)),
    format: Some("int64".to_string()),
    minimum: Some(serde_json::Number::from(0)),
    ..Default::default()
  })
}

/// `fields` query parameter; defaults to every direct attribute, in declared order.
#[must_use]
pub fn fields(resource: &MetaResource) -> Parameter {
  parameter(
    FIELDS_PARAMETER,
    ParameterIn::Query,
    Some(format!("{} fields to include (csv)", resource.resource_type)),
    string_schema(Some(resource.attribute_names().join(","))),
  )
}

/// Path parameter for the resource's primary key.
///
/// Exactly one attribute must be flagged; zero or several is a configuration
/// error rather than a guess.
pub fn primary_key<R>(resource: &MetaResource, mapper: &TypeMapper, resolver: &mut R) -> GenerationResult<Parameter>
where
  R: ReferenceResolver + ?Sized,
{
  let key = match resource.primary_keys().collect::<Vec<_>>().as_slice() {
    [] => {
      return Err(GenerationError::MissingPrimaryKey {
        resource: resource.id.clone(),
      });
    }
    [key] => *key,
    keys => {
      return Err(GenerationError::AmbiguousPrimaryKey {
        resource: resource.id.clone(),
        attributes: keys.iter().map(|key| key.name.clone()).collect(),
      });
    }
  };

  let schema = mapper.map_type(&key.ty, resolver).to_schema();
  Ok(parameter(&key.name, ParameterIn::Path, None, schema))
}

/// `include` query parameter listing the resource's relationships, if it has any.
#[must_use]
pub fn include(resource: &MetaResource) -> Option<Parameter> {
  let relationships = resource.associations().map(|attribute| attribute.name.as_str()).join(",");
  if relationships.is_empty() {
    return None;
  }
  Some(parameter(
    INCLUDE_PARAMETER,
    ParameterIn::Query,
    Some(format!("{} relationships to include (csv)", resource.resource_type)),
    string_schema(Some(relationships)),
  ))
}

#[must_use]
pub fn sort(resource: &MetaResource) -> Parameter {
  let sortable = resource
    .attributes
    .iter()
    .filter(|attribute| !attribute.association)
    .map(|attribute| attribute.name.as_str())
    .join(", ");
  parameter(
    SORT_PARAMETER,
    ParameterIn::Query,
    Some(format!(
      "{} sort order (csv, prefix '-' for descending) by: {sortable}",
      resource.resource_type
    )),
    string_schema(None),
  )
}

#[must_use]
pub fn page_offset() -> Parameter {
  parameter(
    PAGE_OFFSET_PARAMETER,
    ParameterIn::Query,
    Some("Index of the first result to return".to_string()),
    non_negative_int64_schema(),
  )
}

#[must_use]
pub fn page_limit() -> Parameter {
  parameter(
    PAGE_LIMIT_PARAMETER,
    ParameterIn::Query,
    Some("Maximum number of results to return".to_string()),
    non_negative_int64_schema(),
  )
}
