use std::collections::BTreeSet;

use crate::generator::naming::{ensure_unique, operation_id, plural, sanitize, to_component_name};

#[test]
fn test_sanitize() {
  let cases = [
    ("task", "task"),
    ("task item", "task_item"),
    ("  --task--  ", "task"),
    ("Größe", "Grosse"),
    ("a..b//c", "a_b_c"),
    ("", ""),
  ];
  for (input, expected) in cases {
    assert_eq!(sanitize(input), expected, "sanitize({input:?})");
  }
}

#[test]
fn test_to_component_name() {
  let cases = [
    ("task", "Task"),
    ("task_item", "TaskItem"),
    ("project-member", "ProjectMember"),
    ("io.crnk.Task", "IoCrnkTask"),
    ("???", "Resource"),
  ];
  for (input, expected) in cases {
    assert_eq!(to_component_name(input), expected, "to_component_name({input:?})");
  }
}

#[test]
fn test_component_names_use_key_alphabet() {
  for input in ["Été 2024", "a b$c", "x/y\\z"] {
    let name = to_component_name(input);
    assert!(
      name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')),
      "{name}"
    );
  }
}

#[test]
fn test_ensure_unique() {
  let mut used = BTreeSet::new();
  assert_eq!(ensure_unique("Task", &used), "Task");
  used.insert("Task".to_string());
  assert_eq!(ensure_unique("Task", &used), "Task2");
  used.insert("Task2".to_string());
  assert_eq!(ensure_unique("Task", &used), "Task3");
}

#[test]
fn test_operation_ids() {
  assert_eq!(operation_id("get", "task"), "getTask");
  assert_eq!(operation_id("list", &plural("Task")), "listTasks");
  assert_eq!(operation_id("get", "Task_assignee"), "getTaskAssignee");
}
