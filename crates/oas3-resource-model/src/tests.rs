use crate::{MetaAttribute, MetaEnum, MetaModel, MetaResource, MetaType, MetaTypeKind, ModelError, ResourceId};

fn task_resource() -> MetaResource {
  MetaResource::builder()
    .id("tasks")
    .name("Task")
    .resource_type("tasks")
    .attributes(vec![
      MetaAttribute::builder()
        .name("id")
        .ty(MetaType::primitive("long"))
        .primary_key(true)
        .build(),
      MetaAttribute::builder().name("name").ty(MetaType::primitive("string")).build(),
      MetaAttribute::builder()
        .name("project")
        .ty(MetaType::resource("projects"))
        .association(true)
        .build(),
    ])
    .build()
}

fn project_resource() -> MetaResource {
  MetaResource::builder()
    .id("projects")
    .name("Project")
    .resource_type("projects")
    .resource_path("api/projects")
    .attributes(vec![
      MetaAttribute::builder()
        .name("id")
        .ty(MetaType::primitive("string"))
        .primary_key(true)
        .build(),
      MetaAttribute::builder()
        .name("tasks")
        .ty(MetaType::set(MetaType::resource("tasks")))
        .association(true)
        .build(),
    ])
    .build()
}

#[test]
fn test_element_type_unwraps_wrappers() {
  let cases = [
    (MetaType::collection(MetaType::primitive("string")), "string"),
    (MetaType::set(MetaType::primitive("long")), "long"),
    (MetaType::array(MetaType::primitive("byte")), "byte"),
    (
      MetaType::map(MetaType::primitive("string"), MetaType::primitive("double")),
      "double",
    ),
    (MetaType::primitive("uuid"), "uuid"),
  ];

  for (meta_type, expected) in cases {
    assert_eq!(meta_type.element_type().name(), expected, "failed for {meta_type:?}");
  }
}

#[test]
fn test_wrapper_names_report_kind() {
  assert_eq!(MetaType::set(MetaType::primitive("string")).name(), "set");
  assert_eq!(
    MetaType::map(MetaType::primitive("string"), MetaType::primitive("string")).name(),
    "map"
  );
  assert_eq!(MetaType::resource("tasks").kind(), MetaTypeKind::Resource);
}

#[test]
fn test_collection_and_map_predicates() {
  assert!(MetaType::collection(MetaType::primitive("string")).is_collection());
  assert!(MetaType::set(MetaType::primitive("string")).is_collection());
  assert!(MetaType::array(MetaType::primitive("string")).is_collection());
  assert!(!MetaType::primitive("string").is_collection());
  assert!(MetaType::map(MetaType::primitive("string"), MetaType::primitive("long")).is_map());
  assert!(!MetaType::resource("tasks").is_map());
}

#[test]
fn test_resource_path_defaults_to_type() {
  assert_eq!(task_resource().path(), "/tasks");
  assert_eq!(project_resource().path(), "/api/projects");
}

#[test]
fn test_model_rejects_duplicate_ids() {
  let result = MetaModel::from_resources([project_resource(), task_resource(), task_resource()]);
  assert!(matches!(result, Err(ModelError::DuplicateResource { id }) if id == ResourceId::from("tasks")));
}

#[test]
fn test_model_rejects_dangling_reference() {
  let result = MetaModel::from_resources([task_resource()]);
  let Err(ModelError::UnknownResource {
    resource,
    attribute,
    target,
  }) = result
  else {
    panic!("expected unknown resource error, got {result:?}");
  };
  assert_eq!(resource.as_str(), "tasks");
  assert_eq!(attribute, "project");
  assert_eq!(target.as_str(), "projects");
}

#[test]
fn test_model_preserves_insertion_order() {
  let model = MetaModel::from_resources([task_resource(), project_resource()]).unwrap();
  let ids: Vec<_> = model.resources().map(|resource| resource.id.as_str()).collect();
  assert_eq!(ids, ["tasks", "projects"]);
  assert_eq!(model.len(), 2);
}

#[test]
fn test_model_json_round_trip() {
  let model = MetaModel::from_resources([task_resource(), project_resource()]).unwrap();
  let json = model.to_json_string().unwrap();
  let parsed = MetaModel::from_json_str(&json).unwrap();
  assert_eq!(parsed, model);
}

#[test]
fn test_model_json_form() {
  let json = r#"{
    "resources": [{
      "id": "people",
      "name": "Person",
      "resourceType": "people",
      "attributes": [
        { "name": "id", "type": { "kind": "primitive", "name": "uuid" }, "primaryKey": true },
        { "name": "status", "type": { "kind": "enum", "name": "Status", "children": [
          { "kind": "literal", "name": "ACTIVE" },
          { "kind": "literal", "name": "CLOSED" }
        ] } },
        { "name": "tags", "type": { "kind": "array", "element": { "kind": "primitive", "name": "string" } } }
      ]
    }]
  }"#;

  let model = MetaModel::from_json_str(json).unwrap();
  let person = model.get(&ResourceId::from("people")).unwrap();
  assert_eq!(person.attribute_names().collect::<Vec<_>>(), ["id", "status", "tags"]);
  assert_eq!(
    person.attributes[1].ty,
    MetaType::Enum(MetaEnum::of_literals("Status", ["ACTIVE", "CLOSED"]))
  );
  assert_eq!(person.primary_keys().count(), 1);
}

#[test]
fn test_model_json_error_reports_path() {
  let json = r#"{ "resources": [{ "id": "a", "name": "A", "resourceType": "a",
    "attributes": [{ "name": "x", "type": { "kind": "primitive" } }] }] }"#;

  let err = MetaModel::from_json_str(json).unwrap_err();
  assert!(matches!(err, ModelError::Json(_)));
  assert!(
    err.to_string().contains("resources[0].attributes[0].type"),
    "unexpected message: {err}"
  );
}
