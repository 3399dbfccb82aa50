use indexmap::IndexMap;
use oas3_resource_model::{MetaElement, MetaEnum, MetaEnumMember, MetaJsonObject, MetaType, ResourceId};

use super::support::{RecordingResolver, attribute};
use crate::generator::{
  ast::{AdditionalProperties, IntegerFormat, NumberFormat, ObjectNode, SchemaNode, StringFormat},
  config::MapStrategy,
  type_mapper::TypeMapper,
};

fn map(meta_type: &MetaType) -> SchemaNode {
  TypeMapper::default().map_type(meta_type, &mut RecordingResolver::default())
}

#[test]
fn test_recognized_primitives() {
  let cases = [
    ("boolean", SchemaNode::Boolean),
    ("byte", SchemaNode::string_with_format(StringFormat::Byte)),
    ("date", SchemaNode::string_with_format(StringFormat::Date)),
    ("localDate", SchemaNode::string_with_format(StringFormat::Date)),
    ("offsetDateTime", SchemaNode::string_with_format(StringFormat::DateTime)),
    ("localDateTime", SchemaNode::string_with_format(StringFormat::DateTime)),
    ("double", SchemaNode::number(NumberFormat::Double)),
    ("float", SchemaNode::number(NumberFormat::Float)),
    ("integer", SchemaNode::integer(IntegerFormat::Int32)),
    ("long", SchemaNode::integer(IntegerFormat::Int64)),
    ("short", SchemaNode::bounded_integer(-32768, 32767)),
    ("json", SchemaNode::open_object()),
    ("json.object", SchemaNode::open_object()),
    ("object", SchemaNode::open_object()),
    ("json.array", SchemaNode::array(SchemaNode::Any, None)),
    ("string", SchemaNode::string()),
    ("uuid", SchemaNode::string_with_format(StringFormat::Uuid)),
  ];

  for (name, expected) in cases {
    assert_eq!(map(&MetaType::primitive(name)), expected, "primitive '{name}'");
  }
}

#[test]
fn test_unknown_primitive_falls_back_to_named() {
  assert_eq!(
    map(&MetaType::primitive("char")),
    SchemaNode::Named {
      type_name: "char".to_string()
    }
  );
}

#[test]
fn test_set_of_strings_is_unique_array() {
  assert_eq!(
    map(&MetaType::set(MetaType::primitive("string"))),
    SchemaNode::array(SchemaNode::string(), Some(true))
  );
}

#[test]
fn test_collection_and_array_are_not_unique() {
  let expected = SchemaNode::array(SchemaNode::integer(IntegerFormat::Int64), Some(false));
  assert_eq!(map(&MetaType::collection(MetaType::primitive("long"))), expected);
  assert_eq!(map(&MetaType::array(MetaType::primitive("long"))), expected);
}

#[test]
fn test_nested_collections() {
  let nested = MetaType::array(MetaType::set(MetaType::primitive("uuid")));
  assert_eq!(
    map(&nested),
    SchemaNode::array(
      SchemaNode::array(SchemaNode::string_with_format(StringFormat::Uuid), Some(true)),
      Some(false)
    )
  );
}

#[test]
fn test_map_erases_keys_by_default() {
  let meta_type = MetaType::map(MetaType::primitive("string"), MetaType::primitive("integer"));
  assert_eq!(map(&meta_type), SchemaNode::integer(IntegerFormat::Int32));
}

#[test]
fn test_map_with_additional_properties_strategy() {
  let mapper = TypeMapper::new(MapStrategy::AdditionalProperties);
  let meta_type = MetaType::map(MetaType::primitive("string"), MetaType::primitive("integer"));

  let schema = mapper.map_type(&meta_type, &mut RecordingResolver::default());
  assert_eq!(
    schema,
    SchemaNode::Object(ObjectNode {
      properties: IndexMap::new(),
      additional_properties: Some(AdditionalProperties::Schema(Box::new(SchemaNode::integer(
        IntegerFormat::Int32
      )))),
    })
  );
}

#[test]
fn test_literal_enum_keeps_order() {
  let meta_type = MetaType::Enum(MetaEnum::of_literals("Status", ["OPEN", "CLOSED"]));
  assert_eq!(
    map(&meta_type),
    SchemaNode::StringEnum {
      values: vec!["OPEN".to_string(), "CLOSED".to_string()]
    }
  );
}

#[test]
fn test_enum_with_non_literal_child_is_free_form() {
  let meta_type = MetaType::Enum(
    MetaEnum::builder()
      .name("Mixed")
      .children(vec![
        MetaEnumMember::Literal {
          name: "A".to_string(),
        },
        MetaEnumMember::Other {
          name: "nested".to_string(),
        },
      ])
      .build(),
  );

  let schema = map(&meta_type);
  assert_eq!(schema, SchemaNode::free_form_object());
  assert!(!matches!(schema, SchemaNode::StringEnum { .. }));
}

#[test]
fn test_enum_named_like_a_primitive_stays_an_enum() {
  let meta_type = MetaType::Enum(MetaEnum::of_literals("string", ["X"]));
  assert_eq!(
    map(&meta_type),
    SchemaNode::StringEnum {
      values: vec!["X".to_string()]
    }
  );
}

#[test]
fn test_object_maps_only_attribute_children() {
  let object = MetaJsonObject::builder()
    .name("Address")
    .children(vec![
      MetaElement::Attribute(attribute("street", MetaType::primitive("string"))),
      MetaElement::Other {
        name: "comment".to_string(),
      },
      MetaElement::Attribute(attribute("zip", MetaType::primitive("short"))),
    ])
    .build();

  let SchemaNode::Object(node) = map(&MetaType::Object(object)) else {
    panic!("expected object schema");
  };
  assert_eq!(node.properties.keys().collect::<Vec<_>>(), ["street", "zip"]);
  assert_eq!(node.properties["street"], SchemaNode::string());
  assert_eq!(node.additional_properties, None);
}

#[test]
fn test_resource_is_resolved_not_inlined() {
  let mut resolver = RecordingResolver::default();
  let schema = TypeMapper::default().map_type(
    &MetaType::collection(MetaType::resource("tasks")),
    &mut resolver,
  );

  assert_eq!(schema, SchemaNode::array(SchemaNode::reference("tasks"), Some(false)));
  assert_eq!(resolver.resolved, vec![ResourceId::from("tasks")]);
}

#[test]
fn test_lowered_short_carries_bounds() {
  let lowered = map(&MetaType::primitive("short")).to_schema();
  let json = serde_json::to_value(&lowered).unwrap();
  assert_eq!(json["type"], "integer");
  assert_eq!(json["minimum"], -32768);
  assert_eq!(json["maximum"], 32767);
}

#[test]
fn test_lowered_reference_points_at_components() {
  let json = serde_json::to_value(SchemaNode::reference("Task").to_schema()).unwrap();
  assert_eq!(json["$ref"], "#/components/schemas/Task");
}

#[test]
fn test_lowered_named_schema() {
  let known = serde_json::to_value(
    SchemaNode::Named {
      type_name: "string".to_string(),
    }
    .to_schema(),
  )
  .unwrap();
  assert_eq!(known["type"], "string");

  let unknown = serde_json::to_value(
    SchemaNode::Named {
      type_name: "char".to_string(),
    }
    .to_schema(),
  )
  .unwrap();
  assert_eq!(unknown["title"], "char");
  assert!(unknown.get("type").is_none());
}
