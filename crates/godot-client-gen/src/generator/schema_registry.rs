use std::collections::HashMap;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::generator::{
  ir::Definition,
  metrics::GenerationWarning,
  naming::identifiers::{camel_to_pascal, clean_ref, pascal_to_camel},
};

/// What a `$ref` turned out to name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ReferenceKind<'a> {
  Enum { name: &'a str, definition: &'a Definition },
  Object { name: &'a str },
  Unresolved,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Resolution<'a> {
  pub kind: ReferenceKind<'a>,
  pub warning: Option<GenerationWarning>,
}

impl<'a> Resolution<'a> {
  fn found(name: &'a str, definition: &'a Definition) -> Self {
    let kind = if definition.is_enum() {
      ReferenceKind::Enum { name, definition }
    } else {
      ReferenceKind::Object { name }
    };
    Self { kind, warning: None }
  }

  pub fn is_enum(&self) -> bool {
    matches!(self.kind, ReferenceKind::Enum { .. })
  }
}

/// The definitions table plus a case-insensitive index over its keys.
///
/// Documents reference definitions with inconsistent casing (`userRole` vs
/// `UserRole`), so every key is also indexed under its ASCII-lowercased form
/// when the registry is built.
pub(crate) struct SchemaRegistry {
  definitions: IndexMap<String, Definition>,
  canonical: HashMap<String, Vec<usize>>,
}

impl SchemaRegistry {
  pub(crate) fn new(definitions: IndexMap<String, Definition>) -> Self {
    let mut canonical: HashMap<String, Vec<usize>> = HashMap::new();
    for (index, name) in definitions.keys().enumerate() {
      canonical.entry(Self::canonical_key(name)).or_default().push(index);
    }
    Self { definitions, canonical }
  }

  fn canonical_key(name: &str) -> String {
    name.to_ascii_lowercase()
  }

  pub(crate) fn definitions(&self) -> impl Iterator<Item = (&str, &Definition)> {
    self.definitions.iter().map(|(name, def)| (name.as_str(), def))
  }

  fn entry(&self, index: usize) -> Option<(&str, &Definition)> {
    self.definitions.get_index(index).map(|(name, def)| (name.as_str(), def))
  }

  /// Resolves a `$ref` (with or without the `#/definitions/` prefix).
  ///
  /// Exact and first-letter casing variants win over the case-insensitive
  /// index. A reference matching nothing resolves to [`ReferenceKind::Unresolved`]
  /// together with a warning; callers emit it as a plain class reference.
  pub(crate) fn resolve(&self, reference: &str) -> Resolution<'_> {
    let name = clean_ref(reference);

    for candidate in [name.to_string(), pascal_to_camel(name), camel_to_pascal(name)] {
      if let Some((key, definition)) = self.definitions.get_key_value(candidate.as_str()) {
        return Resolution::found(key, definition);
      }
    }

    let matches = self
      .canonical
      .get(&Self::canonical_key(name))
      .map(Vec::as_slice)
      .unwrap_or_default();

    match matches {
      [] => Resolution {
        kind: ReferenceKind::Unresolved,
        warning: Some(GenerationWarning::UnresolvedReference {
          reference: name.to_string(),
        }),
      },
      [only] => match self.entry(*only) {
        Some((key, definition)) => Resolution::found(key, definition),
        None => Resolution {
          kind: ReferenceKind::Unresolved,
          warning: None,
        },
      },
      [first, ..] => {
        let candidates = matches.iter().filter_map(|i| self.entry(*i)).map(|(key, _)| key).join(", ");
        match self.entry(*first) {
          Some((key, definition)) => Resolution {
            warning: Some(GenerationWarning::AmbiguousReference {
              reference: name.to_string(),
              candidates,
              chosen: key.to_string(),
            }),
            ..Resolution::found(key, definition)
          },
          None => Resolution {
            kind: ReferenceKind::Unresolved,
            warning: None,
          },
        }
      }
    }
  }
}
