use std::{collections::HashSet, sync::LazyLock};

use any_ascii::any_ascii;
use regex::Regex;

/// Prefix stripped from every `$ref` before it is turned into a class name.
pub(crate) const DEFINITIONS_REF_PREFIX: &str = "#/definitions/";

pub(crate) static GDSCRIPT_KEYWORDS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "and", "as", "assert", "break", "breakpoint", "class", "class_name", "const", "continue", "elif", "else", "enum",
    "export", "extends", "false", "for", "func", "if", "in", "is", "master", "match", "not", "null", "onready", "or",
    "pass", "preload", "puppet", "remote", "remotesync", "return", "self", "setget", "signal", "static", "tool",
    "true", "var", "while", "yield", "PI", "TAU", "INF", "NAN",
  ]
  .into_iter()
  .collect()
});

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Transliterates to ASCII, replaces invalid characters with underscores, collapses
/// consecutive underscores, and trims any leading or trailing underscores.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

fn map_first_char(input: &str, f: impl FnOnce(char) -> char) -> String {
  let mut chars = input.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => {
      let mut out = String::with_capacity(input.len());
      out.push(f(first));
      out.push_str(chars.as_str());
      out
    }
  }
}

/// Capitalizes a definition name into a class name (`apiAccount` -> `ApiAccount`).
///
/// Only the leading character changes; underscores are not word separators.
pub(crate) fn to_title_case(name: &str) -> String {
  map_first_char(name, |c| c.to_ascii_uppercase())
}

/// `userRole` -> `UserRole`.
pub(crate) fn camel_to_pascal(name: &str) -> String {
  to_title_case(name)
}

/// `UserRole` -> `userRole`.
pub(crate) fn pascal_to_camel(name: &str) -> String {
  map_first_char(name, |c| c.to_ascii_lowercase())
}

/// Converts `PascalCase`/`camelCase` to `snake_case`.
///
/// A separator is only inserted where an uppercase letter directly follows a
/// lowercase one, so runs of capitals stay together (`HTTPKeyAuth` ->
/// `httpkey_auth`). Applying it to its own output is a no-op.
pub(crate) fn pascal_to_snake(input: &str) -> String {
  let mut output = String::with_capacity(input.len() + 4);
  let mut prev_lower = false;

  for c in input.chars() {
    if c.is_ascii_uppercase() && prev_lower {
      output.push('_');
    }
    output.push(c.to_ascii_lowercase());
    prev_lower = c.is_ascii_lowercase();
  }

  output
}

/// Formal argument name for a parameter: `prefix` + snake-cased name.
pub(crate) fn prepend_argument_prefix(prefix: &str, name: &str) -> String {
  format!("{prefix}{}", pascal_to_snake(name))
}

/// Drops the first `prefix_len` characters of an operation id (the service
/// namespace, e.g. `Nakama_`) and snake-cases the rest.
pub(crate) fn operation_method_name(operation_id: &str, prefix_len: usize) -> String {
  let stripped = operation_id
    .char_indices()
    .nth(prefix_len)
    .map_or("", |(idx, _)| &operation_id[idx..]);
  pascal_to_snake(stripped)
}

/// `#/definitions/apiAccount` -> `apiAccount`.
pub(crate) fn clean_ref(reference: &str) -> &str {
  reference.strip_prefix(DEFINITIONS_REF_PREFIX).unwrap_or(reference)
}

/// Class name a `$ref` points at.
pub(crate) fn ref_to_class_name(reference: &str) -> String {
  to_title_case(clean_ref(reference))
}

pub(crate) fn strip_newlines(input: &str) -> String {
  input.replace("\r\n", " ").replace('\n', " ")
}

/// Turns an enum variant into a GDScript identifier.
///
/// # Rules:
/// 1. Sanitizes the variant (ASCII transliteration, invalid characters become `_`).
/// 2. An empty result becomes `UNNAMED`.
/// 3. A leading digit gets a `_` prefix.
/// 4. A GDScript keyword gets a `_` suffix.
pub(crate) fn to_enum_member_name(variant: &str) -> String {
  to_identifier(variant, "UNNAMED")
}

/// Turns a property name into a class member identifier, with the same rules
/// as [`to_enum_member_name`] and `unnamed` for an empty result.
pub(crate) fn to_field_name(property: &str) -> String {
  to_identifier(property, "unnamed")
}

fn to_identifier(input: &str, fallback: &str) -> String {
  let mut ident = sanitize(input);

  if ident.is_empty() {
    return fallback.to_string();
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, '_');
  }

  if GDSCRIPT_KEYWORDS.contains(ident.as_str()) {
    ident.push('_');
  }

  ident
}

/// Records `ident` in `used`. A taken name gets the first free `_{n}` suffix,
/// counting from `ordinal`.
pub(crate) fn claim_unique(used: &mut HashSet<String>, ident: String, ordinal: usize) -> String {
  if used.contains(&ident) {
    let ident = (ordinal..)
      .map(|n| format!("{ident}_{n}"))
      .find(|candidate| !used.contains(candidate))
      .unwrap_or_default();
    used.insert(ident.clone());
    return ident;
  }
  used.insert(ident.clone());
  ident
}
