#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod ui;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_tracing(&cli);

  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));
  let options = cli.slug_options();

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Operations { input } => ui::commands::list_operations(&input, options, &colors).await?,
    },
    Commands::Sidebar { input } => ui::commands::print_sidebar(&input, options).await?,
    Commands::Build {
      input,
      output,
      with_sidebar,
    } => {
      let config = ui::commands::BuildConfig {
        input,
        output,
        with_sidebar,
        options,
        verbose: cli.verbose,
        quiet: cli.quiet,
      };
      ui::commands::build_artifact(&config, &colors).await?;
    }
  }

  Ok(())
}

fn init_tracing(cli: &Cli) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}
