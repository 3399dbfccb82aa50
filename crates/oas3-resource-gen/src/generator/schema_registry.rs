use std::collections::{BTreeMap, BTreeSet, VecDeque};

use indexmap::IndexMap;
use oas3::spec::{ObjectOrReference, ObjectSchema};
use oas3_resource_model::{MetaModel, MetaResource, ResourceId};
use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use crate::generator::{
  ast::{ObjectNode, SchemaNode},
  error::GenerationError,
  naming::{ensure_unique, to_component_name},
  type_mapper::{ReferenceResolver, TypeMapper},
};

fn detect_cycles(dependencies: &BTreeMap<String, BTreeSet<String>>) -> Vec<Vec<String>> {
  let mut graph = DiGraphMap::<&str, ()>::new();
  for (node, deps) in dependencies {
    graph.add_node(node.as_str());
    for dep in deps {
      graph.add_edge(node.as_str(), dep.as_str(), ());
    }
  }

  let mut cycles = kosaraju_scc(&graph)
    .into_iter()
    .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
    .map(|scc| {
      let mut cycle = scc.into_iter().map(String::from).collect::<Vec<_>>();
      cycle.sort();
      cycle
    })
    .collect::<Vec<_>>();
  cycles.sort();
  cycles
}

/// Component table for one generation run.
///
/// Every resource gets a component name up front, derived from its type name
/// in model order, so names do not depend on which resource is reached first.
/// Bodies are stored flat, keyed by that name; edges between resources are
/// always [`SchemaNode::Reference`] values. A resource is queued for body
/// construction the first time it is resolved and built at most once, which is
/// what lets cyclic resource graphs terminate.
#[derive(Debug)]
pub struct ComponentRegistry<'m> {
  model: &'m MetaModel,
  names: BTreeMap<ResourceId, String>,
  components: BTreeMap<String, SchemaNode>,
  queued: BTreeSet<ResourceId>,
  pending: VecDeque<ResourceId>,
  dependencies: BTreeMap<String, BTreeSet<String>>,
}

impl<'m> ComponentRegistry<'m> {
  #[must_use]
  pub fn new(model: &'m MetaModel) -> Self {
    let mut used = BTreeSet::new();
    let mut names = BTreeMap::new();
    for resource in model.resources() {
      let name = ensure_unique(&to_component_name(&resource.name), &used);
      used.insert(name.clone());
      names.insert(resource.id.clone(), name);
    }

    Self {
      model,
      names,
      components: BTreeMap::new(),
      queued: BTreeSet::new(),
      pending: VecDeque::new(),
      dependencies: BTreeMap::new(),
    }
  }

  #[must_use]
  pub fn component_name(&self, id: &ResourceId) -> Option<&str> {
    self.names.get(id).map(String::as_str)
  }

  /// Builds the body of every queued resource, returning one error per
  /// resource that could not be built.
  pub fn drain(&mut self, mapper: &TypeMapper) -> Vec<GenerationError> {
    let model = self.model;
    let mut errors = Vec::new();
    while let Some(id) = self.pending.pop_front() {
      let Some(resource) = model.get(&id) else {
        tracing::warn!(resource = %id, "reference to a resource outside the meta-model");
        errors.push(GenerationError::UnknownResource { resource: id });
        continue;
      };
      let name = self.name_for(&id);
      tracing::debug!(resource = %id, component = %name, "building component schema");

      let body = self.build_body(resource, mapper);
      let deps = resource
        .attributes
        .iter()
        .flat_map(|attribute| attribute.ty.referenced_resources())
        .map(|target| self.name_for(target))
        .collect::<BTreeSet<_>>();

      self.dependencies.insert(name.clone(), deps);
      self.components.insert(name, body);
    }
    errors
  }

  fn build_body(&mut self, resource: &MetaResource, mapper: &TypeMapper) -> SchemaNode {
    let mut properties = IndexMap::new();
    for attribute in &resource.attributes {
      properties.insert(attribute.name.clone(), mapper.map_type(&attribute.ty, self));
    }
    SchemaNode::Object(ObjectNode {
      properties,
      additional_properties: None,
    })
  }

  fn name_for(&self, id: &ResourceId) -> String {
    self
      .names
      .get(id)
      .cloned()
      .unwrap_or_else(|| to_component_name(id.as_str()))
  }

  #[must_use]
  pub fn get(&self, component: &str) -> Option<&SchemaNode> {
    self.components.get(component)
  }

  #[must_use]
  pub fn components(&self) -> &BTreeMap<String, SchemaNode> {
    &self.components
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.components.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.components.is_empty()
  }

  /// Strongly connected groups of components that reference each other.
  #[must_use]
  pub fn detect_cycles(&self) -> Vec<Vec<String>> {
    detect_cycles(&self.dependencies)
  }

  /// Lowers every registered component for `components.schemas`.
  #[must_use]
  pub fn to_schemas(&self) -> BTreeMap<String, ObjectOrReference<ObjectSchema>> {
    self
      .components
      .iter()
      .map(|(name, node)| (name.clone(), node.to_schema()))
      .collect()
  }
}

impl ReferenceResolver for ComponentRegistry<'_> {
  fn resolve(&mut self, id: &ResourceId) -> SchemaNode {
    if self.queued.insert(id.clone()) {
      self.pending.push_back(id.clone());
    }
    SchemaNode::reference(self.name_for(id))
  }
}
