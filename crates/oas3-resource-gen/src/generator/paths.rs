use std::collections::BTreeMap;

use http::{Method, StatusCode};
use oas3::spec::{MediaType, ObjectOrReference, Operation, Parameter, RequestBody, Response};
use oas3_resource_model::{MetaAttribute, MetaResource, MetaType};

use crate::generator::{
  ast::SchemaNode,
  error::GenerationResult,
  merge::ResponseMap,
  naming::{operation_id, plural},
  parameters,
  type_mapper::{ReferenceResolver, TypeMapper},
};

const RESPONSE_REF_PREFIX: &str = "#/components/responses/";

/// Error statuses every generated operation refers to through `components.responses`.
pub const STANDARD_ERROR_STATUSES: [StatusCode; 4] = [
  StatusCode::BAD_REQUEST,
  StatusCode::NOT_FOUND,
  StatusCode::CONFLICT,
  StatusCode::INTERNAL_SERVER_ERROR,
];

/// True when the attribute holds many values: any collection wrapper or a map.
#[must_use]
pub fn one_to_many(attribute: &MetaAttribute) -> bool {
  attribute.ty.is_collection() || attribute.ty.is_map()
}

#[derive(Debug, Clone)]
pub struct GeneratedOperation {
  pub path: String,
  pub method: Method,
  pub operation: Operation,
}

/// Shared error responses keyed by status code, for `components.responses`.
#[must_use]
pub fn standard_responses() -> ResponseMap {
  STANDARD_ERROR_STATUSES
    .iter()
    .map(|status| {
      let response = Response {
        description: status.canonical_reason().map(str::to_string),
        ..Default::default()
      };
      (status.as_str().to_string(), ObjectOrReference::Object(response))
    })
    .collect()
}

/// Builds the standard operations of one resource.
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder<'a> {
  mapper: &'a TypeMapper,
  media_type: &'a str,
}

impl<'a> PathBuilder<'a> {
  #[must_use]
  pub const fn new(mapper: &'a TypeMapper, media_type: &'a str) -> Self {
    Self { mapper, media_type }
  }

  /// List, create, get, update and delete, plus a read of every association.
  ///
  /// Fails without producing anything when the resource has no usable
  /// primary key, since every item path depends on it.
  pub fn build<R>(&self, resource: &MetaResource, resolver: &mut R) -> GenerationResult<Vec<GeneratedOperation>>
  where
    R: ReferenceResolver + ?Sized,
  {
    let key = parameters::primary_key(resource, self.mapper, resolver)?;
    let collection_path = resource.path();
    let item_path = format!("{collection_path}/{{{}}}", key.name);
    let schema = resolver.resolve(&resource.id);
    let subject = resource.resource_type.as_str();
    let singular = resource.name.as_str();

    let mut list_parameters = vec![parameters::fields(resource)];
    list_parameters.extend(parameters::include(resource));
    list_parameters.extend([
      parameters::sort(resource),
      parameters::page_offset(),
      parameters::page_limit(),
    ]);

    let mut get_parameters = vec![key.clone(), parameters::fields(resource)];
    get_parameters.extend(parameters::include(resource));

    let mut operations = vec![
      GeneratedOperation {
        path: collection_path.clone(),
        method: Method::GET,
        operation: self.operation(
          operation_id("list", &plural(singular)),
          format!("List {subject}"),
          subject,
          list_parameters,
          None,
          self.success(StatusCode::OK, Some(SchemaNode::array(schema.clone(), Some(false)))),
        ),
      },
      GeneratedOperation {
        path: collection_path,
        method: Method::POST,
        operation: self.operation(
          operation_id("create", singular),
          format!("Create a {singular}"),
          subject,
          vec![],
          Some(self.request_body(&schema)),
          self.success(StatusCode::CREATED, Some(schema.clone())),
        ),
      },
      GeneratedOperation {
        path: item_path.clone(),
        method: Method::GET,
        operation: self.operation(
          operation_id("get", singular),
          format!("Get a {singular}"),
          subject,
          get_parameters,
          None,
          self.success(StatusCode::OK, Some(schema.clone())),
        ),
      },
      GeneratedOperation {
        path: item_path.clone(),
        method: Method::PATCH,
        operation: self.operation(
          operation_id("update", singular),
          format!("Update a {singular}"),
          subject,
          vec![key.clone()],
          Some(self.request_body(&schema)),
          self.success(StatusCode::OK, Some(schema.clone())),
        ),
      },
      GeneratedOperation {
        path: item_path.clone(),
        method: Method::DELETE,
        operation: self.operation(
          operation_id("delete", singular),
          format!("Delete a {singular}"),
          subject,
          vec![key.clone()],
          None,
          self.success(StatusCode::NO_CONTENT, None),
        ),
      },
    ];

    for attribute in resource.associations() {
      let target = self.mapper.map_type(attribute.ty.element_type(), resolver);
      let body = if one_to_many(attribute) {
        SchemaNode::array(target, Some(matches!(attribute.ty, MetaType::Set { .. })))
      } else {
        target
      };
      operations.push(GeneratedOperation {
        path: format!("{item_path}/{}", attribute.name),
        method: Method::GET,
        operation: self.operation(
          operation_id("get", &format!("{singular}_{}", attribute.name)),
          format!("Get the {} of a {singular}", attribute.name),
          subject,
          vec![key.clone()],
          None,
          self.success(StatusCode::OK, Some(body)),
        ),
      });
    }

    Ok(operations)
  }

  fn operation(
    &self,
    id: String,
    summary: String,
    tag: &str,
    parameters: Vec<Parameter>,
    request_body: Option<RequestBody>,
    success: (String, Response),
  ) -> Operation {
    let mut responses = ResponseMap::new();
    let (status, response) = success;
    responses.insert(status, ObjectOrReference::Object(response));
    for status in STANDARD_ERROR_STATUSES {
      responses.insert(
        status.as_str().to_string(),
        ObjectOrReference::Ref {
          ref_path: format!("{RESPONSE_REF_PREFIX}{}", status.as_str()),
          summary: None,
          description: None,
        },
      );
    }

    Operation {
      tags: vec![tag.to_string()],
      operation_id: Some(id),
      summary: Some(summary),
      parameters: parameters.into_iter().map(ObjectOrReference::Object).collect(),
      request_body: request_body.map(ObjectOrReference::Object),
      responses: Some(responses),
      ..Default::default()
    }
  }

  fn content(&self, schema: &SchemaNode) -> BTreeMap<String, MediaType> {
    BTreeMap::from([(
      self.media_type.to_string(),
      MediaType {
        schema: Some(schema.to_schema()),
        ..Default::default()
      },
    )])
  }

  fn request_body(&self, schema: &SchemaNode) -> RequestBody {
    RequestBody {
      content: self.content(schema),
      required: Some(true),
      ..Default::default()
    }
  }

  fn success(&self, status: StatusCode, schema: Option<SchemaNode>) -> (String, Response) {
    let response = Response {
      description: status.canonical_reason().map(str::to_string),
      content: schema.map(|schema| self.content(&schema)).unwrap_or_default(),
      ..Default::default()
    };
    (status.as_str().to_string(), response)
  }
}
