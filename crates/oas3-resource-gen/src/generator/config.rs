use strum::{Display, EnumString};

pub const DEFAULT_TITLE: &str = "Generated Title";
pub const DEFAULT_VERSION: &str = "0.1.0";
pub const DEFAULT_DESCRIPTION: &str = "Generated Description";
pub const DEFAULT_MEDIA_TYPE: &str = "application/vnd.api+json";

/// How `Map` meta-types are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum MapStrategy {
  /// Map the value type only; the key type is dropped.
  #[default]
  EraseKeys,
  /// `type: object` with the value type as `additionalProperties`.
  AdditionalProperties,
}

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct GeneratorConfig {
  #[builder(into, default = DEFAULT_TITLE.to_string())]
  pub title: String,
  #[builder(into, default = DEFAULT_VERSION.to_string())]
  pub version: String,
  #[builder(into, default = DEFAULT_DESCRIPTION.to_string())]
  pub description: String,
  #[builder(default)]
  pub map_strategy: MapStrategy,
  #[builder(into, default = DEFAULT_MEDIA_TYPE.to_string())]
  pub media_type: String,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}
