use std::path::PathBuf;

use clap::Parser;

use super::colors::Colors;

#[derive(Parser, Debug)]
#[command(name = "godot-client-gen")]
#[command(author, version, about = "Swagger to GDScript client generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  /// Path to the Swagger 2.0 JSON document
  #[arg(value_name = "INPUT")]
  pub input: PathBuf,

  /// Path where the generated GDScript will be written (standard output when omitted)
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,
}
