use indexmap::IndexMap;
use oas3_resource_model::{MetaEnum, MetaJsonObject, MetaType, ResourceId};

use crate::generator::{
  ast::{AdditionalProperties, IntegerFormat, NumberFormat, ObjectNode, SchemaNode, StringFormat},
  config::MapStrategy,
};

/// Hands out references to shared resource components.
///
/// Implementations must be idempotent: resolving the same id twice yields
/// the same component name.
pub trait ReferenceResolver {
  fn resolve(&mut self, id: &ResourceId) -> SchemaNode;
}

/// Maps meta-types to schema nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMapper {
  map_strategy: MapStrategy,
}

impl TypeMapper {
  #[must_use]
  pub const fn new(map_strategy: MapStrategy) -> Self {
    Self { map_strategy }
  }

  /// Total over every meta-type; resources come back as references from `resolver`.
  pub fn map_type<R>(&self, meta_type: &MetaType, resolver: &mut R) -> SchemaNode
  where
    R: ReferenceResolver + ?Sized,
  {
    match meta_type {
      MetaType::Resource { id } => resolver.resolve(id),
      MetaType::Collection { element } => SchemaNode::array(self.map_type(element, resolver), Some(false)),
      MetaType::Set { element } => SchemaNode::array(self.map_type(element, resolver), Some(true)),
      MetaType::Array { element } => SchemaNode::array(self.map_type(element, resolver), Some(false)),
      MetaType::Object(object) => self.map_object(object, resolver),
      MetaType::Map { value, .. } => self.map_map(value, resolver),
      MetaType::Enum(meta_enum) => map_enum(meta_enum),
      MetaType::Primitive { name } => map_primitive(name).unwrap_or_else(|| SchemaNode::Named {
        type_name: meta_type.element_type().name().to_string(),
      }),
    }
  }

  fn map_object<R>(&self, object: &MetaJsonObject, resolver: &mut R) -> SchemaNode
  where
    R: ReferenceResolver + ?Sized,
  {
    let mut properties = IndexMap::new();
    for attribute in object.attributes() {
      properties.insert(attribute.name.clone(), self.map_type(&attribute.ty, resolver));
    }
    SchemaNode::Object(ObjectNode {
      properties,
      additional_properties: None,
    })
  }

  fn map_map<R>(&self, value: &MetaType, resolver: &mut R) -> SchemaNode
  where
    R: ReferenceResolver + ?Sized,
  {
    let value_schema = self.map_type(value, resolver);
    match self.map_strategy {
      MapStrategy::EraseKeys => value_schema,
      MapStrategy::AdditionalProperties => SchemaNode::Object(ObjectNode {
        properties: IndexMap::new(),
        additional_properties: Some(AdditionalProperties::Schema(Box::new(value_schema))),
      }),
    }
  }
}

/// Scalar schema for a recognized primitive name.
pub(crate) fn map_primitive(name: &str) -> Option<SchemaNode> {
  let schema = match name {
    "boolean" => SchemaNode::Boolean,
    "byte" => SchemaNode::string_with_format(StringFormat::Byte),
    "date" | "localDate" => SchemaNode::string_with_format(StringFormat::Date),
    "offsetDateTime" | "localDateTime" => SchemaNode::string_with_format(StringFormat::DateTime),
    "double" => SchemaNode::number(NumberFormat::Double),
    "float" => SchemaNode::number(NumberFormat::Float),
    "integer" => SchemaNode::integer(IntegerFormat::Int32),
    "long" => SchemaNode::integer(IntegerFormat::Int64),
    "short" => SchemaNode::bounded_integer(i64::from(i16::MIN), i64::from(i16::MAX)),
    "json" | "json.object" | "object" => SchemaNode::open_object(),
    "json.array" => SchemaNode::array(SchemaNode::Any, None),
    "string" => SchemaNode::string(),
    "uuid" => SchemaNode::string_with_format(StringFormat::Uuid),
    _ => return None,
  };
  Some(schema)
}

// Any non-literal child turns the whole enum into a free-form object.
fn map_enum(meta_enum: &MetaEnum) -> SchemaNode {
  meta_enum
    .children
    .iter()
    .map(|child| child.as_literal().map(str::to_string))
    .collect::<Option<Vec<_>>>()
    .map_or_else(SchemaNode::free_form_object, |values| SchemaNode::StringEnum { values })
}
