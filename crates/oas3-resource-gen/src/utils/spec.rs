use std::{ffi::OsStr, path::Path};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use oas3_resource_model::MetaModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }

  /// Serializes a document in this format.
  pub fn render(self, spec: &oas3::Spec) -> anyhow::Result<String> {
    match self {
      Self::Json => Ok(serde_json::to_string_pretty(spec)?),
      Self::Yaml => Ok(oas3::to_yaml(spec)?),
    }
  }
}

/// Memory-mapped input file: a meta-model or a template document.
pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self {
      file,
      format: SpecFormat::from_path(path),
    })
  }

  #[must_use]
  pub fn format(&self) -> SpecFormat {
    self.format
  }

  pub fn parse(&self) -> anyhow::Result<oas3::Spec> {
    match self.format {
      SpecFormat::Json => Ok(serde_json::from_slice::<oas3::Spec>(self.file.as_slice())?),
      SpecFormat::Yaml => {
        let content = std::str::from_utf8(self.file.as_slice())?;
        Ok(oas3::from_yaml(content)?)
      }
    }
  }

  pub fn parse_model(&self) -> anyhow::Result<MetaModel> {
    match self.format {
      SpecFormat::Json => Ok(MetaModel::from_json_slice(self.file.as_slice())?),
      SpecFormat::Yaml => anyhow::bail!("meta-models are read from JSON only"),
    }
  }
}

pub async fn load_model(path: &Path) -> anyhow::Result<MetaModel> {
  SpecLoader::open(path)
    .await?
    .parse_model()
    .with_context(|| format!("failed to load meta-model from {}", path.display()))
}

pub async fn load_template(path: &Path) -> anyhow::Result<oas3::Spec> {
  SpecLoader::open(path)
    .await?
    .parse()
    .with_context(|| format!("failed to load template from {}", path.display()))
}

/// Writes `spec` as JSON or YAML depending on the extension of `path`.
pub async fn write_spec(path: &Path, spec: &oas3::Spec) -> anyhow::Result<()> {
  let rendered = SpecFormat::from_path(path).render(spec)?;
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    tokio::fs::create_dir_all(parent).await?;
  }
  tokio::fs::write(path, rendered)
    .await
    .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
  use super::*;

  const MODEL: &str = r#"{
    "resources": [
      {
        "id": "tasks",
        "name": "Task",
        "resourceType": "tasks",
        "attributes": [
          { "name": "id", "type": { "kind": "primitive", "name": "long" }, "primaryKey": true }
        ]
      }
    ]
  }"#;

  const TEMPLATE: &str = "openapi: 3.1.0\ninfo:\n  title: Tasks API\n  version: 2.0.0\npaths: {}\n";

  #[test]
  fn test_format_from_extension() {
    assert_eq!(SpecFormat::from_extension("yaml"), SpecFormat::Yaml);
    assert_eq!(SpecFormat::from_extension("yml"), SpecFormat::Yaml);
    assert_eq!(SpecFormat::from_extension("json"), SpecFormat::Json);
    assert_eq!(SpecFormat::from_path(Path::new("openapi")), SpecFormat::Json);
  }

  #[tokio::test]
  async fn test_load_model_from_json() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("model.json");
    tokio::fs::write(&path, MODEL).await?;

    let model = load_model(&path).await?;
    assert_eq!(model.len(), 1);
    Ok(())
  }

  #[tokio::test]
  async fn test_load_model_rejects_yaml() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("model.yaml");
    tokio::fs::write(&path, "resources: []\n").await?;

    assert!(load_model(&path).await.is_err());
    Ok(())
  }

  #[tokio::test]
  async fn test_template_yaml_round_trips_through_json_output() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let template_path = dir.path().join("template.yaml");
    tokio::fs::write(&template_path, TEMPLATE).await?;

    let template = load_template(&template_path).await?;
    assert_eq!(template.info.title, "Tasks API");

    let output = dir.path().join("out").join("openapi.json");
    write_spec(&output, &template).await?;

    let written = load_template(&output).await?;
    assert_eq!(written.info.version, "2.0.0");
    Ok(())
  }
}
