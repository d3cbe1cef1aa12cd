use crate::generator::metrics::GenerationWarning;

/// A converted value plus the diagnostics raised while producing it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ConversionOutput<T> {
  pub result: T,
  pub warnings: Vec<GenerationWarning>,
}

impl<T> ConversionOutput<T> {
  pub(crate) fn new(result: T) -> Self {
    Self {
      result,
      warnings: vec![],
    }
  }

  pub(crate) fn with_warnings(result: T, warnings: Vec<GenerationWarning>) -> Self {
    Self { result, warnings }
  }

  pub(crate) fn with_warning(result: T, warning: Option<GenerationWarning>) -> Self {
    Self {
      result,
      warnings: warning.into_iter().collect(),
    }
  }

  pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> ConversionOutput<U> {
    ConversionOutput {
      result: f(self.result),
      warnings: self.warnings,
    }
  }

  /// Moves the warnings into `sink` and returns the value.
  pub(crate) fn into_result(self, sink: &mut Vec<GenerationWarning>) -> T {
    sink.extend(self.warnings);
    self.result
  }
}
