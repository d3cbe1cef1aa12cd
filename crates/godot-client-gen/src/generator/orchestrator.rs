//! Orchestration for the Swagger to GDScript client generation pipeline.
//!
//! ## Usage
//!
//! ```no_run
//! use godot_client_gen::generator::{converter::CodegenConfig, orchestrator::Orchestrator};
//!
//! # fn example() -> anyhow::Result<()> {
//! let json = std::fs::read_to_string("apigrpc.swagger.json")?;
//! let document = serde_json::from_str(&json)?;
//!
//! let orchestrator = Orchestrator::new(document, CodegenConfig::default());
//! let (code, stats) = orchestrator.generate_with_header("apigrpc.swagger.json")?;
//!
//! println!("Generated {} types with {} warnings", stats.types_generated, stats.warnings.len());
//! std::fs::write("api.gd", code)?;
//! # Ok(())
//! # }
//! ```

use anyhow::Context;
use indexmap::IndexSet;

use crate::generator::{
  codegen::{NoSnippets, ScriptFragment, ScriptHeader, SnippetProvider},
  converter::{CodegenConfig, SchemaConverter, operations::OperationConverter, type_resolver::TypeResolver},
  ir::SwaggerDocument,
  metrics::GenerationStats,
  schema_registry::SchemaRegistry,
};

/// Runs the whole pipeline over one decoded document: registry, definition
/// conversion, operation conversion, rendering.
pub struct Orchestrator<S = NoSnippets> {
  document: SwaggerDocument,
  config: CodegenConfig,
  snippets: S,
}

/// Document metadata used for the generated file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeMetadata {
  pub title: Option<String>,
  pub version: Option<String>,
  pub description: Option<String>,
}

impl Orchestrator<NoSnippets> {
  pub fn new(document: SwaggerDocument, config: CodegenConfig) -> Self {
    Self {
      document,
      config,
      snippets: NoSnippets,
    }
  }
}

impl<S: SnippetProvider> Orchestrator<S> {
  /// Replaces the source of hand-written class members.
  #[cfg(test)]
  pub fn with_snippets<T: SnippetProvider>(self, snippets: T) -> Orchestrator<T> {
    Orchestrator {
      document: self.document,
      config: self.config,
      snippets,
    }
  }

  pub fn metadata(&self) -> CodeMetadata {
    let info = self.document.info.as_ref();
    CodeMetadata {
      title: info.map(|i| i.title.clone()).filter(|t| !t.is_empty()),
      version: info.map(|i| i.version.clone()).filter(|v| !v.is_empty()),
      description: info.and_then(|i| i.description.clone()),
    }
  }

  /// Generates the script with a header naming only the document title.
  #[cfg(test)]
  pub fn generate(&self) -> anyhow::Result<(String, GenerationStats)> {
    self.generate_inner(None)
  }

  /// Generates the script with a header that also records `source_path`.
  ///
  /// # Errors
  ///
  /// Returns an error if rendering fails.
  pub fn generate_with_header(&self, source_path: &str) -> anyhow::Result<(String, GenerationStats)> {
    self.generate_inner(Some(source_path))
  }

  fn generate_inner(&self, source_path: Option<&str>) -> anyhow::Result<(String, GenerationStats)> {
    let registry = SchemaRegistry::new(self.document.definitions.clone());
    let type_resolver = TypeResolver::new(&registry);
    let mut stats = GenerationStats::default();
    let mut warnings = vec![];

    let types = SchemaConverter::new(&registry, &type_resolver, &self.snippets)
      .convert_all()
      .into_result(&mut warnings);
    stats.record_types(&types);

    let client = OperationConverter::new(&type_resolver, &self.config)
      .convert_client(&self.document)
      .into_result(&mut warnings);
    stats.record_client(&client);

    stats.record_warnings(warnings.into_iter().collect::<IndexSet<_>>());

    let metadata = self.metadata();
    let header = ScriptHeader {
      source: source_path.map(ToString::to_string),
      title: metadata.title,
      version: metadata.version,
    };

    let code = ScriptFragment::new(&header, &self.config, &types, &client)
      .render()
      .context("failed to render generated script")?;

    Ok((code, stats))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_orchestrator_empty_document() {
    let document: SwaggerDocument = serde_json::from_str(
      r#"{
        "swagger": "2.0",
        "info": { "title": "Empty API", "version": "1.0.0" },
        "paths": {}
      }"#,
    )
    .unwrap();
    let orchestrator = Orchestrator::new(document, CodegenConfig::default());

    let metadata = orchestrator.metadata();
    assert_eq!(metadata.title.as_deref(), Some("Empty API"));
    assert_eq!(metadata.version.as_deref(), Some("1.0.0"));

    let (code, stats) = orchestrator.generate_with_header("empty.json").unwrap();
    assert!(code.starts_with("### Code generated by godot-client-gen. DO NOT EDIT. ###\n"));
    assert!(code.contains("### Source: empty.json\n"));
    assert!(code.contains("### Empty API 1.0.0\n"));
    assert!(code.contains("class_name NakamaAPI\n"));
    assert!(code.contains("class ApiClient extends Reference:\n"));
    assert!(!code.contains("_refresh_session"));
    assert_eq!(stats.types_generated, 0);
    assert!(stats.warnings.is_empty());
  }
}
