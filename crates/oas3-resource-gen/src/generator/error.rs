use oas3_resource_model::ResourceId;

/// Failure scoped to a single resource; the run continues without it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
  #[error("resource '{resource}' has no primary-key attribute")]
  MissingPrimaryKey { resource: ResourceId },
  #[error("resource '{resource}' flags more than one primary key: {}", .attributes.join(", "))]
  AmbiguousPrimaryKey {
    resource: ResourceId,
    attributes: Vec<String>,
  },
  #[error("resource '{resource}' is not part of the meta-model")]
  UnknownResource { resource: ResourceId },
  #[error("resource '{resource}' generates {method} {path}, already generated for resource '{owner}'")]
  OperationConflict {
    resource: ResourceId,
    owner: ResourceId,
    method: String,
    path: String,
  },
}

impl GenerationError {
  #[must_use]
  pub fn resource(&self) -> &ResourceId {
    match self {
      Self::MissingPrimaryKey { resource }
      | Self::AmbiguousPrimaryKey { resource, .. }
      | Self::UnknownResource { resource }
      | Self::OperationConflict { resource, .. } => resource,
    }
  }
}

pub type GenerationResult<T> = Result<T, GenerationError>;
