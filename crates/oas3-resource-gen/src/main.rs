#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod ui;

fn init_tracing(default_filter: &str) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Resources { input } => {
        init_tracing("warn");
        ui::commands::list_resources(&input, &colors).await?;
      }
    },
    Commands::Generate(command) => {
      let config = ui::commands::GenerateConfig::from_command(command)?;
      init_tracing(config.log_filter());
      ui::commands::generate_document(config, &colors).await?;
    }
  }

  Ok(())
}
