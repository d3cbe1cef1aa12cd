use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use tokio::io::AsyncWriteExt;

use crate::{
  generator::{
    converter::CodegenConfig, ir::SwaggerDocument, metrics::GenerationStats, orchestrator::Orchestrator,
  },
  ui::{Cli, Colors},
  utils::spec::SpecLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  /// `None` writes the script to standard output.
  pub output: Option<PathBuf>,
  pub codegen: CodegenConfig,
}

impl GenerateConfig {
  pub fn from_cli(cli: Cli) -> Self {
    let Cli { input, output } = cli;
    Self {
      input,
      output,
      codegen: CodegenConfig::default(),
    }
  }

  async fn load_document(&self) -> anyhow::Result<SwaggerDocument> {
    let loader = SpecLoader::open(&self.input).await?;
    Ok(loader.parse()?)
  }

  fn destination(&self) -> String {
    self
      .output
      .as_ref()
      .map_or_else(|| "standard output".to_string(), |path| path.display().to_string())
  }

  async fn write_output(&self, code: &str) -> anyhow::Result<()> {
    match &self.output {
      Some(path) => {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
          tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("unable to create {}", parent.display()))?;
        }
        tokio::fs::write(path, code)
          .await
          .with_context(|| format!("unable to write {}", path.display()))?;
      }
      None => {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(code.as_bytes()).await.context("unable to write to standard output")?;
        stdout.flush().await?;
      }
    }
    Ok(())
  }
}

/// Progress and diagnostics, always on stderr so stdout can carry the script.
struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    eprintln!("{} {message}", format_timestamp().with(self.colors.timestamp()));
  }

  fn stat(&self, label: &str, value: String) {
    eprintln!(
      "           {:<24} {}",
      label.with(self.colors.label()),
      value.with(self.colors.value())
    );
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading Swagger document from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self) {
    self.info(&"Generating GDScript client...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    self.stat("Types generated:", stats.types_generated.to_string());
    self.stat("", format!("{} classes", stats.classes_generated));
    self.stat("", format!("{} enums", stats.enums_generated));
    self.stat("Operations converted:", stats.operations_converted.to_string());
    if stats.session_operations > 0 {
      self.stat("", format!("{} with session refresh", stats.session_operations));
    }
    self.stat("Methods generated:", stats.client_methods_generated.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }
    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() {
      return;
    }

    eprintln!();
    for warning in &stats.warnings {
      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.accent()),
        warning.to_string().with(self.colors.info())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.destination())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    eprintln!();
    eprintln!(
      "{} {}",
      format_timestamp().with(self.colors.timestamp()),
      "Successfully generated GDScript client".with(self.colors.success())
    );
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let document = config.load_document().await?;

  logger.log_generating();
  let orchestrator = Orchestrator::new(document, config.codegen.clone());
  let source_path = config.input.display().to_string();
  let (code, stats) = orchestrator.generate_with_header(&source_path)?;
  logger.print_statistics(&stats);

  logger.log_writing();
  config.write_output(&code).await?;

  logger.log_success();
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_from_cli_uses_default_codegen() {
    let config = GenerateConfig::from_cli(Cli {
      input: PathBuf::from("api.json"),
      output: None,
    });
    assert_eq!(config.codegen, CodegenConfig::default());
    assert_eq!(config.destination(), "standard output");
  }

  #[test]
  fn test_destination_names_output_file() {
    let config = GenerateConfig::from_cli(Cli {
      input: PathBuf::from("api.json"),
      output: Some(PathBuf::from("out/api.gd")),
    });
    assert_eq!(config.destination(), "out/api.gd");
  }

  #[tokio::test]
  async fn test_write_output_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("api.gd");
    let config = GenerateConfig::from_cli(Cli {
      input: PathBuf::from("api.json"),
      output: Some(path.clone()),
    });

    config.write_output("extends Reference\n").await.unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), "extends Reference\n");
  }
}
