use strum::Display;

use crate::generator::error::GenerationError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub resources_processed: usize,
  pub resources_skipped: usize,
  pub components_generated: usize,
  pub paths_generated: usize,
  pub operations_generated: usize,
  pub operations_merged: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_resource(&mut self) {
    self.resources_processed += 1;
  }

  pub fn record_components(&mut self, count: usize) {
    self.components_generated += count;
  }

  pub fn record_paths(&mut self, count: usize) {
    self.paths_generated += count;
  }

  pub fn record_operation(&mut self, merged: bool) {
    self.operations_generated += 1;
    if merged {
      self.operations_merged += 1;
    }
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    if warning.is_skipped_item() {
      self.resources_skipped += 1;
    }
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    for warning in warnings {
      self.record_warning(warning);
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Skipped resource '{resource}': {error}")]
  ResourceSkipped { resource: String, error: String },
  #[strum(to_string = "Component '{component}' was not generated: {error}")]
  ComponentUnresolved { component: String, error: String },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::ResourceSkipped { .. })
  }
}

impl From<&GenerationError> for GenerationWarning {
  fn from(error: &GenerationError) -> Self {
    match error {
      GenerationError::UnknownResource { resource } => Self::ComponentUnresolved {
        component: resource.to_string(),
        error: error.to_string(),
      },
      GenerationError::MissingPrimaryKey { resource }
      | GenerationError::AmbiguousPrimaryKey { resource, .. }
      | GenerationError::OperationConflict { resource, .. } => {
        Self::ResourceSkipped {
          resource: resource.to_string(),
          error: error.to_string(),
        }
      }
    }
  }
}
