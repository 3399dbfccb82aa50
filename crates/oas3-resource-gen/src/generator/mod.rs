pub mod ast;
pub mod config;
pub mod error;
pub mod merge;
pub mod metrics;
pub(crate) mod naming;
pub mod orchestrator;
pub mod parameters;
pub mod paths;
pub mod schema_registry;
pub mod type_mapper;

pub use ast::SchemaNode;
pub use config::{GeneratorConfig, MapStrategy};
pub use error::{GenerationError, GenerationResult};
pub use merge::{ResponseMap, merge_operations, merge_responses};
pub use metrics::{GenerationStats, GenerationWarning};
pub use orchestrator::Orchestrator;
pub use paths::{GeneratedOperation, PathBuilder, one_to_many};
pub use schema_registry::ComponentRegistry;
pub use type_mapper::{ReferenceResolver, TypeMapper};

#[cfg(test)]
mod tests;
