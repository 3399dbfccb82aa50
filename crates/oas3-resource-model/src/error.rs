use crate::ResourceId;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
  #[error("invalid meta-model at '{}': {}", .0.path(), .0.inner())]
  Json(#[from] serde_path_to_error::Error<serde_json::Error>),
  #[error("resource '{id}' is defined more than once")]
  DuplicateResource { id: ResourceId },
  #[error("attribute '{resource}.{attribute}' references unknown resource '{target}'")]
  UnknownResource {
    resource: ResourceId,
    attribute: String,
    target: ResourceId,
  },
}
