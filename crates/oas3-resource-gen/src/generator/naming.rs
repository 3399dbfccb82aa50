use std::{collections::BTreeSet, sync::LazyLock};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

const FALLBACK_COMPONENT_NAME: &str = "Resource";

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Transliterates to ASCII, replaces invalid characters with underscores,
/// collapses consecutive underscores and trims leading or trailing ones.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Component key for a resource type name.
///
/// The result only uses `[A-Za-z0-9]`, which is a subset of the alphabet
/// OpenAPI allows for component keys.
pub(crate) fn to_component_name(name: &str) -> String {
  let pascal = sanitize(name).to_pascal_case();
  if pascal.is_empty() {
    FALLBACK_COMPONENT_NAME.to_string()
  } else {
    pascal
  }
}

/// Ensures a name is unique within a set of used names, appending a numeric suffix if needed.
pub(crate) fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  if !used_names.contains(base_name) {
    return base_name.to_string();
  }
  let mut i = 2;
  loop {
    let new_name = format!("{base_name}{i}");
    if !used_names.contains(&new_name) {
      return new_name;
    }
    i += 1;
  }
}

/// `verb` + PascalCase(`subject`), e.g. `("get", "task")` becomes `getTask`.
pub(crate) fn operation_id(verb: &str, subject: &str) -> String {
  format!("{verb}{}", to_component_name(subject))
}

pub(crate) fn plural(name: &str) -> String {
  cruet::to_plural(name)
}
