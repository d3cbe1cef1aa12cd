#[cfg(test)]
use std::collections::HashMap;

/// Source of hand-written members appended verbatim to generated classes.
///
/// Members are written at class-body indentation; each string may span
/// several lines.
pub trait SnippetProvider {
  fn members(&self, class_name: &str) -> Vec<String>;
}

/// Generates classes with schema-derived members only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnippets;

impl SnippetProvider for NoSnippets {
  fn members(&self, _class_name: &str) -> Vec<String> {
    vec![]
  }
}

/// Snippets keyed by generated class name.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StaticSnippets {
  members: HashMap<String, Vec<String>>,
}

#[cfg(test)]
impl StaticSnippets {
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with_member(mut self, class_name: impl Into<String>, member: impl Into<String>) -> Self {
    self.members.entry(class_name.into()).or_default().push(member.into());
    self
  }
}

#[cfg(test)]
impl SnippetProvider for StaticSnippets {
  fn members(&self, class_name: &str) -> Vec<String> {
    self.members.get(class_name).cloned().unwrap_or_default()
  }
}

impl<S: SnippetProvider + ?Sized> SnippetProvider for &S {
  fn members(&self, class_name: &str) -> Vec<String> {
    (**self).members(class_name)
  }
}
