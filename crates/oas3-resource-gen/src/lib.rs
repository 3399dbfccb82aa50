#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
//! OpenAPI document generation for resource-oriented APIs.
//!
//! A [`MetaModel`](oas3_resource_model::MetaModel) describes resources, their
//! attributes and relationships. The [`generator`] turns it into an
//! [`oas3::Spec`] with one shared schema component per resource and the
//! standard list/create/get/update/delete paths, then overlays the narrative
//! fields of a previously authored template so hand edits survive
//! regeneration.

pub mod generator;
pub mod utils;

pub use generator::{GenerationStats, GeneratorConfig, MapStrategy, Orchestrator};
