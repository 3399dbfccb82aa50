//! Generation driver: meta-model in, `oas3::Spec` out.
//!
//! ## Usage
//!
//! ```no_run
//! use oas3_resource_gen::generator::{GeneratorConfig, Orchestrator};
//! use oas3_resource_model::{MetaModel, ResourceId};
//!
//! # fn example() -> anyhow::Result<()> {
//! let model = MetaModel::from_json_str(&std::fs::read_to_string("model.json")?)?;
//! let orchestrator = Orchestrator::new(model, GeneratorConfig::default());
//!
//! let (spec, stats) = orchestrator.generate(None);
//! println!("{} components, {} warnings", stats.components_generated, stats.warnings.len());
//! std::fs::write("openapi.yaml", oas3::to_yaml(&spec)?)?;
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, BTreeSet};

use http::Method;
use oas3::{
  Spec,
  spec::{Info, Operation, PathItem},
};
use oas3_resource_model::{MetaModel, ResourceId};

use crate::generator::{
  config::GeneratorConfig,
  error::{GenerationError, GenerationResult},
  merge::{merge_operations, merge_responses},
  metrics::{GenerationStats, GenerationWarning},
  naming::ensure_unique,
  paths::{GeneratedOperation, PathBuilder, standard_responses},
  schema_registry::ComponentRegistry,
  type_mapper::{ReferenceResolver, TypeMapper},
};

pub const OPENAPI_VERSION: &str = "3.1.0";

/// Builds a complete document for a meta-model, optionally merged against a
/// previously authored template.
#[derive(Debug, Clone)]
pub struct Orchestrator {
  model: MetaModel,
  config: GeneratorConfig,
}

impl Orchestrator {
  #[must_use]
  pub fn new(model: MetaModel, config: GeneratorConfig) -> Self {
    Self { model, config }
  }

  #[must_use]
  pub fn model(&self) -> &MetaModel {
    &self.model
  }

  #[must_use]
  pub fn config(&self) -> &GeneratorConfig {
    &self.config
  }

  /// Runs one generation pass.
  ///
  /// Resources that cannot be turned into paths, or whose routes an earlier
  /// resource already produced, are skipped and reported in the returned
  /// stats; the remaining document is still produced. Operation ids are
  /// suffixed in model order until they are unique. When a
  /// template is given, everything it carries outside the generated paths,
  /// schemas and responses is kept, including its `info`.
  #[tracing::instrument(skip_all, fields(resources = self.model.len(), template = template.is_some()))]
  pub fn generate(&self, template: Option<&Spec>) -> (Spec, GenerationStats) {
    let mapper = TypeMapper::new(self.config.map_strategy);
    let builder = PathBuilder::new(&mapper, &self.config.media_type);
    let mut registry = ComponentRegistry::new(&self.model);
    let mut stats = GenerationStats::default();
    let mut index = OperationIndex::default();

    let mut spec = template.cloned().unwrap_or_else(|| self.default_spec());
    let mut paths = spec.paths.take().unwrap_or_default();
    let template_paths = template.and_then(|template| template.paths.as_ref());

    for resource in self.model.resources() {
      stats.record_resource();
      registry.resolve(&resource.id);

      let built = builder
        .build(resource, &mut registry)
        .and_then(|operations| index.check(&resource.id, &operations).map(|()| operations));
      let operations = match built {
        Ok(operations) => operations,
        Err(error) => {
          tracing::warn!(resource = %resource.id, %error, "skipping resource");
          stats.record_warning(GenerationWarning::from(&error));
          continue;
        }
      };
      tracing::debug!(resource = %resource.id, operations = operations.len(), "built resource paths");

      for mut generated in operations {
        index.claim(&resource.id, &mut generated);
        let existing = template_paths
          .and_then(|paths| paths.get(&generated.path))
          .and_then(|item| operation(item, &generated.method));
        stats.record_operation(existing.is_some());

        let merged = merge_operations(generated.operation, existing);
        let item = paths.entry(generated.path).or_default();
        if let Some(slot) = operation_slot(item, &generated.method) {
          *slot = Some(merged);
        }
      }
    }

    let errors = registry.drain(&mapper);
    stats.record_warnings(errors.iter().map(GenerationWarning::from));
    stats.record_cycles(registry.detect_cycles());
    stats.record_components(registry.len());
    stats.record_paths(paths.len());

    let mut components = spec.components.take().unwrap_or_default();
    components.schemas.extend(registry.to_schemas());
    components.responses = merge_responses([standard_responses(), std::mem::take(&mut components.responses)]);

    spec.paths = Some(paths);
    spec.components = Some(components);
    (spec, stats)
  }

  fn default_spec(&self) -> Spec {
    Spec {
      openapi: OPENAPI_VERSION.to_string(),
      info: Info {
        title: self.config.title.clone(),
        summary: None,
        description: Some(self.config.description.clone()),
        terms_of_service: None,
        version: self.config.version.clone(),
        contact: None,
        license: None,
        extensions: BTreeMap::default(),
      },
      servers: vec![],
      paths: None,
      webhooks: BTreeMap::default(),
      components: None,
      security: vec![],
      tags: vec![],
      external_docs: None,
      extensions: BTreeMap::default(),
    }
  }
}

/// Routes and operation ids handed out so far in one run.
#[derive(Debug, Default)]
struct OperationIndex {
  owners: BTreeMap<(String, String), ResourceId>,
  ids: BTreeSet<String>,
}

impl OperationIndex {
  /// Fails when any of `operations` sits on a route another resource already owns.
  fn check(&self, resource: &ResourceId, operations: &[GeneratedOperation]) -> GenerationResult<()> {
    let conflict = operations.iter().find_map(|generated| {
      self
        .owners
        .get(&route(generated))
        .map(|owner| GenerationError::OperationConflict {
          resource: resource.clone(),
          owner: owner.clone(),
          method: generated.method.to_string(),
          path: generated.path.clone(),
        })
    });
    conflict.map_or(Ok(()), Err)
  }

  /// Records the route and suffixes the operation id until it is unique in the run.
  fn claim(&mut self, resource: &ResourceId, generated: &mut GeneratedOperation) {
    self.owners.insert(route(generated), resource.clone());
    if let Some(id) = generated.operation.operation_id.as_mut() {
      let unique = ensure_unique(id, &self.ids);
      self.ids.insert(unique.clone());
      *id = unique;
    }
  }
}

fn route(generated: &GeneratedOperation) -> (String, String) {
  (generated.path.clone(), generated.method.to_string())
}

fn operation<'a>(item: &'a PathItem, method: &Method) -> Option<&'a Operation> {
  if *method == Method::GET {
    item.get.as_ref()
  } else if *method == Method::POST {
    item.post.as_ref()
  } else if *method == Method::PUT {
    item.put.as_ref()
  } else if *method == Method::PATCH {
    item.patch.as_ref()
  } else if *method == Method::DELETE {
    item.delete.as_ref()
  } else {
    None
  }
}

fn operation_slot<'a>(item: &'a mut PathItem, method: &Method) -> Option<&'a mut Option<Operation>> {
  if *method == Method::GET {
    Some(&mut item.get)
  } else if *method == Method::POST {
    Some(&mut item.post)
  } else if *method == Method::PUT {
    Some(&mut item.put)
  } else if *method == Method::PATCH {
    Some(&mut item.patch)
  } else if *method == Method::DELETE {
    Some(&mut item.delete)
  } else {
    None
  }
}
