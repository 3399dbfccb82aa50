use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::Itertools;
use oas3_resource_gen::{
  generator::{ComponentRegistry, one_to_many},
  utils::load_model,
};
use oas3_resource_model::MetaModel;

use crate::ui::{Colors, colors::IntoComfyColor, term_width};

/// One table row per resource, in model order.
fn resource_rows(model: &MetaModel) -> Vec<[String; 5]> {
  let registry = ComponentRegistry::new(model);
  model
    .resources()
    .map(|resource| {
      let component = registry.component_name(&resource.id).unwrap_or_default().to_string();
      let keys = resource.primary_keys().map(|key| key.name.as_str()).join(", ");
      let relationships = resource
        .associations()
        .map(|attribute| {
          if one_to_many(attribute) {
            format!("{}[]", attribute.name)
          } else {
            attribute.name.clone()
          }
        })
        .join(", ");
      [resource.id.to_string(), component, resource.path(), keys, relationships]
    })
    .collect()
}

pub async fn list_resources(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let model = load_model(input).await?;

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in ["RESOURCE", "COMPONENT", "PATH", "PRIMARY KEY", "RELATIONSHIPS"] {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);

  for [id, component, path, keys, relationships] in resource_rows(&model) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(id)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(component).fg(IntoComfyColor::into(colors.info())));
    row.add_cell(Cell::new(path).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(
      Cell::new(keys)
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(relationships).fg(IntoComfyColor::into(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}

#[cfg(test)]
mod tests {
  use oas3_resource_model::{MetaAttribute, MetaResource, MetaType};

  use super::*;

  #[test]
  fn test_resource_rows() {
    let model = MetaModel::from_resources([
      MetaResource::builder()
        .id("projects")
        .name("Project")
        .resource_type("projects")
        .attributes(vec![
          MetaAttribute::builder()
            .name("id")
            .ty(MetaType::primitive("long"))
            .primary_key(true)
            .build(),
          MetaAttribute::builder()
            .name("tasks")
            .ty(MetaType::collection(MetaType::resource("tasks")))
            .association(true)
            .build(),
        ])
        .build(),
      MetaResource::builder()
        .id("tasks")
        .name("task item")
        .resource_type("tasks")
        .resource_path("api/tasks")
        .attributes(vec![
          MetaAttribute::builder()
            .name("project")
            .ty(MetaType::resource("projects"))
            .association(true)
            .build(),
        ])
        .build(),
    ])
    .unwrap();

    let rows = resource_rows(&model);
    assert_eq!(
      rows[0],
      ["projects", "Project", "/projects", "id", "tasks[]"].map(String::from)
    );
    assert_eq!(rows[1], ["tasks", "TaskItem", "/api/tasks", "", "project"].map(String::from));
  }
}
