use strum::Display;

use crate::generator::ast::{ClientDef, GeneratedType};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub types_generated: usize,
  pub classes_generated: usize,
  pub enums_generated: usize,
  pub operations_converted: usize,
  pub session_operations: usize,
  pub client_methods_generated: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_class(&mut self) {
    self.classes_generated += 1;
    self.types_generated += 1;
  }

  pub fn record_enum(&mut self) {
    self.enums_generated += 1;
    self.types_generated += 1;
  }

  pub fn record_type(&mut self, generated: &GeneratedType) {
    match generated {
      GeneratedType::Class(_) => self.record_class(),
      GeneratedType::Enum(_) => self.record_enum(),
    }
  }

  pub fn record_types(&mut self, types: &[GeneratedType]) {
    for generated in types {
      self.record_type(generated);
    }
  }

  pub fn record_client(&mut self, client: &ClientDef) {
    self.operations_converted += client.operations.len();
    self.client_methods_generated += client.operations.len();
    self.session_operations += client.operations.iter().filter(|op| op.uses_session()).count();
    if client.refresh.is_some() {
      self.client_methods_generated += 1;
    }
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

/// Non-fatal schema-shape anomalies. Generation always continues past these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Reference '{reference}' matches no definition; treating it as a class")]
  UnresolvedReference { reference: String },
  #[strum(to_string = "Reference '{reference}' matches several definitions ({candidates}); using '{chosen}'")]
  AmbiguousReference {
    reference: String,
    candidates: String,
    chosen: String,
  },
  #[strum(to_string = "{context}: unrecognized type '{type_tag}'")]
  UnrecognizedType { context: String, type_tag: String },
  #[strum(to_string = "[{operation_id}] unknown security scheme '{scheme}'; no credentials will be sent")]
  UnknownSecurityScheme { operation_id: String, scheme: String },
  #[strum(to_string = "Failed to convert operation '{method} {path}': {error}")]
  OperationConversionFailed {
    method: String,
    path: String,
    error: String,
  },
  #[strum(to_string = "[{operation_id}] {message}")]
  OperationSpecific { operation_id: String, message: String },
  #[strum(to_string = "Session refresh operation '{method_name}' {message}; sessions will not be refreshed")]
  MissingRefreshOperation { method_name: String, message: String },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::OperationConversionFailed { .. })
  }
}
