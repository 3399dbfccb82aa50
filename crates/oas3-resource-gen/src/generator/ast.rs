use std::collections::BTreeMap;

use indexmap::IndexMap;
use oas3::spec::{BooleanSchema, ObjectOrReference, ObjectSchema, Schema, SchemaType, SchemaTypeSet};
use strum::Display;

pub(crate) const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Schema tree produced by the type mapper.
///
/// It mirrors the subset of the OpenAPI schema object the generator emits and
/// is lowered to `oas3` types only when the document is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
  Object(ObjectNode),
  Array(ArrayNode),
  String { format: Option<StringFormat> },
  Number { format: Option<NumberFormat> },
  Integer(IntegerNode),
  Boolean,
  StringEnum { values: Vec<String> },
  /// Named pointer into `components.schemas`; never carries the target body.
  Reference { component: String },
  /// Untyped schema (`{}`).
  Any,
  /// Schema typed by an arbitrary meta-type name.
  ///
  /// Only names that are JSON Schema types (`string`, `integer`, ...) are
  /// emitted as `type`. Any other name is emitted as the schema `title` and
  /// the lowered schema carries no `type`.
  Named { type_name: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectNode {
  pub properties: IndexMap<String, SchemaNode>,
  pub additional_properties: Option<AdditionalProperties>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdditionalProperties {
  Allowed(bool),
  Schema(Box<SchemaNode>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayNode {
  pub items: Box<SchemaNode>,
  /// `None` leaves `uniqueItems` unset.
  pub unique_items: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegerNode {
  pub format: Option<IntegerFormat>,
  pub minimum: Option<i64>,
  pub maximum: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StringFormat {
  #[strum(serialize = "byte")]
  Byte,
  #[strum(serialize = "date")]
  Date,
  #[strum(serialize = "date-time")]
  DateTime,
  #[strum(serialize = "uuid")]
  Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NumberFormat {
  #[strum(serialize = "float")]
  Float,
  #[strum(serialize = "double")]
  Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IntegerFormat {
  #[strum(serialize = "int32")]
  Int32,
  #[strum(serialize = "int64")]
  Int64,
}

impl SchemaNode {
  #[must_use]
  pub fn string() -> Self {
    Self::String { format: None }
  }

  #[must_use]
  pub fn string_with_format(format: StringFormat) -> Self {
    Self::String { format: Some(format) }
  }

  #[must_use]
  pub fn number(format: NumberFormat) -> Self {
    Self::Number { format: Some(format) }
  }

  #[must_use]
  pub fn integer(format: IntegerFormat) -> Self {
    Self::Integer(IntegerNode {
      format: Some(format),
      ..IntegerNode::default()
    })
  }

  #[must_use]
  pub fn bounded_integer(minimum: i64, maximum: i64) -> Self {
    Self::Integer(IntegerNode {
      format: None,
      minimum: Some(minimum),
      maximum: Some(maximum),
    })
  }

  /// `type: object` with no declared properties.
  #[must_use]
  pub fn open_object() -> Self {
    Self::Object(ObjectNode::default())
  }

  /// `type: object` with `additionalProperties: true`.
  #[must_use]
  pub fn free_form_object() -> Self {
    Self::Object(ObjectNode {
      properties: IndexMap::new(),
      additional_properties: Some(AdditionalProperties::Allowed(true)),
    })
  }

  #[must_use]
  pub fn array(items: SchemaNode, unique_items: Option<bool>) -> Self {
    Self::Array(ArrayNode {
      items: Box::new(items),
      unique_items,
    })
  }

  pub fn reference(component: impl Into<String>) -> Self {
    Self::Reference {
      component: component.into(),
    }
  }

  #[must_use]
  pub fn component_name(&self) -> Option<&str> {
    match self {
      Self::Reference { component } => Some(component),
      _ => None,
    }
  }

  #[must_use]
  pub fn is_reference(&self) -> bool {
    matches!(self, Self::Reference { .. })
  }

  /// Lowers the node into the `oas3` document model.
  #[must_use]
  pub fn to_schema(&self) -> ObjectOrReference<ObjectSchema> {
    match self {
      Self::Reference { component } => ObjectOrReference::Ref {
        ref_path: format!("{SCHEMA_REF_PREFIX}{component}"),
        summary: None,
        description: None,
      },
      _ => ObjectOrReference::Object(self.to_object_schema()),
    }
  }

  fn to_object_schema(&self) -> ObjectSchema {
    match self {
      Self::Object(object) => ObjectSchema {
        schema_type: single_type(SchemaType::Object),
        properties: object
          .properties
          .iter()
          .map(|(name, node)| (name.clone(), node.to_schema()))
          .collect::<BTreeMap<_, _>>(),
        additional_properties: object.additional_properties.as_ref().map(|additional| match additional {
          AdditionalProperties::Allowed(allowed) => Schema::Boolean(BooleanSchema(*allowed)),
          AdditionalProperties::Schema(node) => Schema::Object(Box::new(node.to_schema())),
        }),
        ..Default::default()
      },
      Self::Array(array) => ObjectSchema {
        schema_type: single_type(SchemaType::Array),
        items: Some(Box::new(Schema::Object(Box::new(array.items.to_schema())))),
        unique_items: array.unique_items,
        ..Default::default()
      },
      Self::String { format } => ObjectSchema {
        schema_type: single_type(SchemaType::String),
        format: format.map(|format| format.to_string()),
        ..Default::default()
      },
      Self::Number { format } => ObjectSchema {
        schema_type: single_type(SchemaType::Number),
        format: format.map(|format| format.to_string()),
        ..Default::default()
      },
      Self::Integer(integer) => ObjectSchema {
        schema_type: single_type(SchemaType::Integer),
        format: integer.format.map(|format| format.to_string()),
        minimum: integer.minimum.map(serde_json::Number::from),
        maximum: integer.maximum.map(serde_json::Number::from),
        ..Default::default()
      },
      Self::Boolean => ObjectSchema {
        schema_type: single_type(SchemaType::Boolean),
        ..Default::default()
      },
      Self::StringEnum { values } => ObjectSchema {
        schema_type: single_type(SchemaType::String),
        enum_values: values.iter().cloned().map(serde_json::Value::String).collect(),
        ..Default::default()
      },
      Self::Named { type_name } => named_schema(type_name),
      Self::Any | Self::Reference { .. } => ObjectSchema::default(),
    }
  }
}

fn single_type(schema_type: SchemaType) -> Option<SchemaTypeSet> {
  Some(SchemaTypeSet::Single(schema_type))
}

// `SchemaType` is closed, so names outside the JSON Schema keywords are kept as the title.
fn named_schema(type_name: &str) -> ObjectSchema {
  match serde_json::from_value::<SchemaType>(serde_json::Value::String(type_name.to_string())) {
    Ok(schema_type) => ObjectSchema {
      schema_type: single_type(schema_type),
      ..Default::default()
    },
    Err(_) => ObjectSchema {
      title: Some(type_name.to_string()),
      ..Default::default()
    },
  }
}
