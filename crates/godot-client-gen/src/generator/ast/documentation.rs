use crate::generator::naming::identifiers::strip_newlines;

/// Single-line summary rendered as a `### <summary>` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
  text: String,
}

impl Documentation {
  #[must_use]
  pub fn from_raw(input: &str) -> Self {
    Self {
      text: strip_newlines(input.trim()),
    }
  }

  #[must_use]
  pub fn from_optional(desc: Option<&str>) -> Self {
    desc.map_or_else(Self::default, Self::from_raw)
  }

  #[must_use]
  pub fn text(&self) -> &str {
    &self.text
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }
}
