use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{MetaAttribute, ModelError};

/// Stable identity of a resource within a [`MetaModel`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ResourceId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ResourceId {
  fn from(value: &str) -> Self {
    Self(value.to_string())
  }
}

impl From<String> for ResourceId {
  fn from(value: String) -> Self {
    Self(value)
  }
}

/// An addressable entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct MetaResource {
  #[builder(into)]
  pub id: ResourceId,
  /// Type name, e.g. `Task`.
  #[builder(into)]
  pub name: String,
  /// JSON:API resource type, e.g. `tasks`.
  #[builder(into)]
  pub resource_type: String,
  /// Endpoint path; defaults to `/<resource_type>`.
  #[builder(into)]
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub resource_path: Option<String>,
  #[builder(default)]
  #[serde(default)]
  pub attributes: Vec<MetaAttribute>,
}

impl MetaResource {
  #[must_use]
  pub fn path(&self) -> String {
    match &self.resource_path {
      Some(path) if path.starts_with('/') => path.clone(),
      Some(path) => format!("/{path}"),
      None => format!("/{}", self.resource_type),
    }
  }

  pub fn primary_keys(&self) -> impl Iterator<Item = &MetaAttribute> {
    self.attributes.iter().filter(|attribute| attribute.primary_key)
  }

  pub fn associations(&self) -> impl Iterator<Item = &MetaAttribute> {
    self.attributes.iter().filter(|attribute| attribute.association)
  }

  pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
    self.attributes.iter().map(|attribute| attribute.name.as_str())
  }
}

/// Insertion-ordered arena of resources keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaModel {
  resources: IndexMap<ResourceId, MetaResource>,
}

#[derive(Deserialize, Serialize)]
struct MetaModelDocument {
  resources: Vec<MetaResource>,
}

impl MetaModel {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a model and checks that every resource reference resolves.
  pub fn from_resources(resources: impl IntoIterator<Item = MetaResource>) -> Result<Self, ModelError> {
    let mut model = Self::new();
    for resource in resources {
      model.insert(resource)?;
    }
    model.validate()?;
    Ok(model)
  }

  /// Parses the JSON document form: `{ "resources": [ ... ] }`.
  pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
    let deserializer = &mut serde_json::Deserializer::from_str(json);
    let document: MetaModelDocument = serde_path_to_error::deserialize(deserializer)?;
    Self::from_resources(document.resources)
  }

  pub fn from_json_slice(json: &[u8]) -> Result<Self, ModelError> {
    let deserializer = &mut serde_json::Deserializer::from_slice(json);
    let document: MetaModelDocument = serde_path_to_error::deserialize(deserializer)?;
    Self::from_resources(document.resources)
  }

  pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
    let document = MetaModelDocument {
      resources: self.resources.values().cloned().collect(),
    };
    serde_json::to_string_pretty(&document)
  }

  pub fn insert(&mut self, resource: MetaResource) -> Result<(), ModelError> {
    if self.resources.contains_key(&resource.id) {
      return Err(ModelError::DuplicateResource { id: resource.id });
    }
    self.resources.insert(resource.id.clone(), resource);
    Ok(())
  }

  #[must_use]
  pub fn get(&self, id: &ResourceId) -> Option<&MetaResource> {
    self.resources.get(id)
  }

  pub fn resources(&self) -> impl Iterator<Item = &MetaResource> {
    self.resources.values()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.resources.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.resources.is_empty()
  }

  /// Reports the first attribute whose type points at a resource missing from the model.
  pub fn validate(&self) -> Result<(), ModelError> {
    for resource in self.resources.values() {
      for attribute in &resource.attributes {
        if let Some(target) = attribute
          .ty
          .referenced_resources()
          .into_iter()
          .find(|target| !self.resources.contains_key(*target))
        {
          return Err(ModelError::UnknownResource {
            resource: resource.id.clone(),
            attribute: attribute.name.clone(),
            target: target.clone(),
          });
        }
      }
    }
    Ok(())
  }
}
