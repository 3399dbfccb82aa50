use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use oas3_resource_gen::{
  generator::{GenerationStats, GeneratorConfig, MapStrategy, Orchestrator},
  utils::{load_model, load_template, write_spec},
};

use crate::ui::{Colors, GenerateCommand};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub template: Option<PathBuf>,
  pub output: PathBuf,
  pub generator: GeneratorConfig,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      template,
      output,
      title,
      api_version,
      description,
      map_strategy,
      verbose,
      quiet,
    } = command;

    if verbose && quiet {
      anyhow::bail!("--verbose and --quiet cannot be combined");
    }

    let generator = GeneratorConfig::builder()
      .map_strategy(map_strategy)
      .maybe_title(title)
      .maybe_version(api_version)
      .maybe_description(description)
      .build();

    Ok(Self {
      input,
      template,
      output,
      generator,
      verbose,
      quiet,
    })
  }

  /// `tracing` filter for the CLI when `RUST_LOG` is unset.
  pub fn log_filter(&self) -> &'static str {
    match (self.verbose, self.quiet) {
      (true, _) => "debug",
      (_, true) => "error",
      _ => "warn",
    }
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading meta-model from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
    if let Some(template) = &self.config.template {
      self.info(
        &format!("Merging against template: {}", template.display())
          .with(self.colors.primary())
          .to_string(),
      );
    }
  }

  fn log_generating(&self, map_strategy: MapStrategy) {
    self.info(
      &format!("Generating OpenAPI document (maps: {map_strategy})...")
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Resources processed:", stats.resources_processed.to_string());
    if stats.resources_skipped > 0 {
      self.stat("", format!("{} skipped", stats.resources_skipped));
    }
    self.stat("Components generated:", stats.components_generated.to_string());
    self.stat("Paths generated:", stats.paths_generated.to_string());
    self.stat("Operations generated:", stats.operations_generated.to_string());
    if stats.operations_merged > 0 {
      self.stat("", format!("{} merged with template", stats.operations_merged));
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || self.config.quiet {
      return;
    }

    let mut printed_header = false;
    for warning in &stats.warnings {
      let should_print = warning.is_skipped_item() || self.config.verbose;
      if !should_print {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() {
        "Skipped:"
      } else {
        "Warning:"
      };
      eprintln!(
        "{} {}",
        label.with(self.colors.accent()),
        format!("{warning}").with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated OpenAPI document".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_document(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let model = load_model(&config.input).await?;
  let template = match &config.template {
    Some(path) => Some(load_template(path).await?),
    None => None,
  };

  logger.log_generating(config.generator.map_strategy);
  let orchestrator = Orchestrator::new(model, config.generator.clone());
  let (spec, stats) = orchestrator.generate(template.as_ref());
  logger.print_statistics(&stats);

  logger.log_writing();
  write_spec(&config.output, &spec).await?;

  logger.log_success();
  Ok(())
}
