//! Overlay of previously authored operations onto freshly generated ones.
//!
//! The generated document owns structure (parameters, bodies, responses); the
//! existing document owns prose (id, summary, description, extensions). The
//! merge is shallow: hand edits nested inside parameters or schemas of the
//! existing operation are replaced on every regeneration.

use std::collections::BTreeMap;

use oas3::spec::{ObjectOrReference, Operation, Response};

pub type ResponseMap = BTreeMap<String, ObjectOrReference<Response>>;

fn non_empty(value: Option<&String>) -> Option<String> {
  value.filter(|value| !value.is_empty()).cloned()
}

/// Takes `generated` as the base and copies the narrative fields of
/// `existing` over it wherever `existing` has a non-empty value.
#[must_use]
pub fn merge_operations(generated: Operation, existing: Option<&Operation>) -> Operation {
  let Some(existing) = existing else {
    return generated;
  };

  Operation {
    operation_id: non_empty(existing.operation_id.as_ref()).or(generated.operation_id),
    summary: non_empty(existing.summary.as_ref()).or(generated.summary),
    description: non_empty(existing.description.as_ref()).or(generated.description),
    extensions: if existing.extensions.is_empty() {
      generated.extensions
    } else {
      existing.extensions.clone()
    },
    ..generated
  }
}

/// Union of response maps keyed by status code; later maps win per key.
pub fn merge_responses<I>(maps: I) -> ResponseMap
where
  I: IntoIterator<Item = ResponseMap>,
{
  maps.into_iter().fold(ResponseMap::new(), |mut merged, map| {
    merged.extend(map);
    merged
  })
}
