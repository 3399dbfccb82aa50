use oas3_resource_model::{MetaAttribute, MetaModel, MetaResource, MetaType, ResourceId};

use crate::generator::{ast::SchemaNode, type_mapper::ReferenceResolver};

/// Resolver that hands out references named after the raw id and records every call.
#[derive(Debug, Default)]
pub(super) struct RecordingResolver {
  pub(super) resolved: Vec<ResourceId>,
}

impl ReferenceResolver for RecordingResolver {
  fn resolve(&mut self, id: &ResourceId) -> SchemaNode {
    self.resolved.push(id.clone());
    SchemaNode::reference(id.as_str())
  }
}

pub(super) fn attribute(name: &str, ty: MetaType) -> MetaAttribute {
  MetaAttribute::builder().name(name).ty(ty).build()
}

pub(super) fn key(name: &str, ty: MetaType) -> MetaAttribute {
  MetaAttribute::builder().name(name).ty(ty).primary_key(true).build()
}

pub(super) fn association(name: &str, ty: MetaType) -> MetaAttribute {
  MetaAttribute::builder().name(name).ty(ty).association(true).build()
}

pub(super) fn resource(id: &str, name: &str, attributes: Vec<MetaAttribute>) -> MetaResource {
  MetaResource::builder()
    .id(id)
    .name(name)
    .resource_type(id)
    .attributes(attributes)
    .build()
}

pub(super) fn task_resource() -> MetaResource {
  resource(
    "tasks",
    "Task",
    vec![
      key("id", MetaType::primitive("long")),
      attribute("name", MetaType::primitive("string")),
      attribute("dueDate", MetaType::primitive("localDate")),
      association("project", MetaType::resource("projects")),
    ],
  )
}

pub(super) fn project_resource() -> MetaResource {
  resource(
    "projects",
    "Project",
    vec![
      key("id", MetaType::primitive("uuid")),
      attribute("title", MetaType::primitive("string")),
      association("tasks", MetaType::collection(MetaType::resource("tasks"))),
    ],
  )
}

/// `tasks` and `projects` referencing each other.
pub(super) fn cyclic_model() -> MetaModel {
  MetaModel::from_resources([task_resource(), project_resource()]).unwrap()
}

pub(super) fn fixture_model() -> MetaModel {
  MetaModel::from_json_str(include_str!("../../../fixtures/project_tracker.json")).unwrap()
}
