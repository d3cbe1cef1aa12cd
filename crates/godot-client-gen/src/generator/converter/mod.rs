mod common;
mod enums;
pub(crate) mod operations;
mod parameters;
mod structs;
pub(crate) mod type_resolver;

#[cfg(test)]
mod tests;

pub(crate) use common::ConversionOutput;

use self::{enums::EnumConverter, structs::StructConverter, type_resolver::TypeResolver};
use super::{ast::GeneratedType, codegen::SnippetProvider, schema_registry::SchemaRegistry};

pub const DEFAULT_API_CLASS_NAME: &str = "NakamaAPI";
pub const DEFAULT_RESULT_BASE_CLASS: &str = "NakamaAsyncResult";
/// Length of the `Nakama_` namespace token stripped from operation ids.
pub const DEFAULT_OPERATION_PREFIX_LEN: usize = 7;
pub const DEFAULT_ARGUMENT_PREFIX: &str = "p_";
pub const DEFAULT_SESSION_REFRESH_OPERATION: &str = "session_refresh";
pub const DEFAULT_AUTO_REFRESH_SECONDS: u32 = 300;
pub const DEFAULT_TIMEOUT_SECONDS: u32 = 10;

/// Knobs controlling the names and constants baked into generated code.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct CodegenConfig {
  /// `class_name` of the generated script.
  #[builder(into, default = DEFAULT_API_CLASS_NAME.to_string())]
  pub api_class_name: String,
  /// Base class of every generated data class and of untyped results.
  #[builder(into, default = DEFAULT_RESULT_BASE_CLASS.to_string())]
  pub result_base_class: String,
  #[builder(default = DEFAULT_OPERATION_PREFIX_LEN)]
  pub operation_prefix_len: usize,
  #[builder(into, default = DEFAULT_ARGUMENT_PREFIX.to_string())]
  pub argument_prefix: String,
  /// Client method (without `_async`) called to refresh expiring sessions.
  #[builder(into, default = DEFAULT_SESSION_REFRESH_OPERATION.to_string())]
  pub session_refresh_operation: String,
  /// Lead time before expiry at which sessions are refreshed.
  #[builder(default = DEFAULT_AUTO_REFRESH_SECONDS)]
  pub auto_refresh_seconds: u32,
  #[builder(default = DEFAULT_TIMEOUT_SECONDS)]
  pub default_timeout: u32,
}

impl Default for CodegenConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}

/// Converts the definitions table into classes and enums, in declaration order.
pub(crate) struct SchemaConverter<'a> {
  registry: &'a SchemaRegistry,
  type_resolver: &'a TypeResolver<'a>,
  snippets: &'a dyn SnippetProvider,
}

impl<'a> SchemaConverter<'a> {
  pub(crate) fn new(
    registry: &'a SchemaRegistry,
    type_resolver: &'a TypeResolver<'a>,
    snippets: &'a dyn SnippetProvider,
  ) -> Self {
    Self {
      registry,
      type_resolver,
      snippets,
    }
  }

  pub(crate) fn convert_all(&self) -> ConversionOutput<Vec<GeneratedType>> {
    let struct_converter = StructConverter::new(self.type_resolver, self.snippets);
    let mut warnings = vec![];

    let types = self
      .registry
      .definitions()
      .map(|(name, definition)| {
        if definition.is_enum() {
          GeneratedType::Enum(EnumConverter::convert(name, definition))
        } else {
          GeneratedType::Class(struct_converter.convert(name, definition).into_result(&mut warnings))
        }
      })
      .collect();

    ConversionOutput::with_warnings(types, warnings)
  }
}
