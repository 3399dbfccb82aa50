//! Resource meta-model: entities, their attributes and the types of those
//! attributes, as handed to the OpenAPI generator by a meta-model provider.

mod error;
mod model;
mod types;

pub use error::ModelError;
pub use model::{MetaModel, MetaResource, ResourceId};
pub use types::{MetaAttribute, MetaElement, MetaEnum, MetaEnumMember, MetaJsonObject, MetaType, MetaTypeKind};

#[cfg(test)]
mod tests;
