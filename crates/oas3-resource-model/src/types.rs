use serde::{Deserialize, Serialize};
use strum::{Display, EnumDiscriminants, IntoStaticStr};

use crate::ResourceId;

/// A node of the meta-type graph.
///
/// Resource edges are stored by id, so a resource that (transitively)
/// references itself is still a finite value. Everything else nests by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumDiscriminants)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[strum_discriminants(name(MetaTypeKind), derive(Display, IntoStaticStr), strum(serialize_all = "camelCase"))]
pub enum MetaType {
  Resource { id: ResourceId },
  Collection { element: Box<MetaType> },
  Set { element: Box<MetaType> },
  Array { element: Box<MetaType> },
  Map { key: Box<MetaType>, value: Box<MetaType> },
  Enum(MetaEnum),
  Object(MetaJsonObject),
  Primitive { name: String },
}

impl MetaType {
  pub fn primitive(name: impl Into<String>) -> Self {
    Self::Primitive { name: name.into() }
  }

  pub fn resource(id: impl Into<ResourceId>) -> Self {
    Self::Resource { id: id.into() }
  }

  pub fn collection(element: MetaType) -> Self {
    Self::Collection {
      element: Box::new(element),
    }
  }

  pub fn set(element: MetaType) -> Self {
    Self::Set {
      element: Box::new(element),
    }
  }

  pub fn array(element: MetaType) -> Self {
    Self::Array {
      element: Box::new(element),
    }
  }

  pub fn map(key: MetaType, value: MetaType) -> Self {
    Self::Map {
      key: Box::new(key),
      value: Box::new(value),
    }
  }

  /// The type's own name.
  ///
  /// Wrappers have no name of their own and report their variant kind
  /// (`collection`, `set`, `array`, `map`); resources report their id.
  #[must_use]
  pub fn name(&self) -> &str {
    match self {
      Self::Resource { id } => id.as_str(),
      Self::Enum(meta_enum) => &meta_enum.name,
      Self::Object(object) => &object.name,
      Self::Primitive { name } => name,
      Self::Collection { .. } | Self::Set { .. } | Self::Array { .. } | Self::Map { .. } => {
        let kind: &'static str = self.kind().into();
        kind
      }
    }
  }

  /// The element type of a wrapper, or the type itself when it wraps nothing.
  ///
  /// For maps this is the value type.
  #[must_use]
  pub fn element_type(&self) -> &MetaType {
    match self {
      Self::Collection { element } | Self::Set { element } | Self::Array { element } => element,
      Self::Map { value, .. } => value,
      _ => self,
    }
  }

  #[must_use]
  pub fn kind(&self) -> MetaTypeKind {
    MetaTypeKind::from(self)
  }

  /// Collections, sets and arrays.
  #[must_use]
  pub fn is_collection(&self) -> bool {
    matches!(self, Self::Collection { .. } | Self::Set { .. } | Self::Array { .. })
  }

  #[must_use]
  pub fn is_map(&self) -> bool {
    matches!(self, Self::Map { .. })
  }

  /// Ids of every resource this type points at, without following resource edges.
  pub fn referenced_resources(&self) -> Vec<&ResourceId> {
    let mut refs = Vec::new();
    self.collect_resources(&mut refs);
    refs
  }

  fn collect_resources<'a>(&'a self, refs: &mut Vec<&'a ResourceId>) {
    match self {
      Self::Resource { id } => refs.push(id),
      Self::Collection { element } | Self::Set { element } | Self::Array { element } => {
        element.collect_resources(refs);
      }
      Self::Map { key, value } => {
        key.collect_resources(refs);
        value.collect_resources(refs);
      }
      Self::Object(object) => {
        for attribute in object.attributes() {
          attribute.ty.collect_resources(refs);
        }
      }
      Self::Enum(_) | Self::Primitive { .. } => {}
    }
  }
}

/// An enumeration type. Well-formed enums hold only literals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct MetaEnum {
  #[builder(into)]
  pub name: String,
  #[builder(default)]
  #[serde(default)]
  pub children: Vec<MetaEnumMember>,
}

impl MetaEnum {
  /// Builds an enum made only of literals.
  pub fn of_literals<I, S>(name: impl Into<String>, literals: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      name: name.into(),
      children: literals
        .into_iter()
        .map(|literal| MetaEnumMember::Literal { name: literal.into() })
        .collect(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MetaEnumMember {
  Literal { name: String },
  Other { name: String },
}

impl MetaEnumMember {
  #[must_use]
  pub fn name(&self) -> &str {
    match self {
      Self::Literal { name } | Self::Other { name } => name,
    }
  }

  #[must_use]
  pub fn as_literal(&self) -> Option<&str> {
    match self {
      Self::Literal { name } => Some(name),
      Self::Other { .. } => None,
    }
  }
}

/// A nested, JSON-structured type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct MetaJsonObject {
  #[builder(into)]
  pub name: String,
  #[builder(default)]
  #[serde(default)]
  pub children: Vec<MetaElement>,
}

impl MetaJsonObject {
  /// Attribute children in declared order; other children are skipped.
  pub fn attributes(&self) -> impl Iterator<Item = &MetaAttribute> {
    self.children.iter().filter_map(|child| match child {
      MetaElement::Attribute(attribute) => Some(attribute),
      MetaElement::Other { .. } => None,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MetaElement {
  Attribute(MetaAttribute),
  Other { name: String },
}

/// A named, typed member of a resource or JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct MetaAttribute {
  #[builder(into)]
  pub name: String,
  #[serde(rename = "type")]
  pub ty: MetaType,
  #[builder(default)]
  #[serde(default)]
  pub primary_key: bool,
  /// Relationship to another resource rather than a plain attribute.
  #[builder(default)]
  #[serde(default)]
  pub association: bool,
}
