#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;

use crate::ui::{Cli, Colors};

mod generator;
mod ui;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::detect();

  let config = ui::commands::GenerateConfig::from_cli(cli);
  ui::commands::generate_code(config, &colors).await?;

  Ok(())
}
