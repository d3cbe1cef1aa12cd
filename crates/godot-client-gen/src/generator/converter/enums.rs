use std::collections::{HashMap, HashSet};

use crate::generator::{
  ast::{ClassToken, Documentation, EnumDef, EnumVariant},
  ir::Definition,
  naming::identifiers::{claim_unique, to_enum_member_name, to_title_case},
};

const MEMBER_DOC_MARKER: &str = "- ";

/// Converts enum definitions into ordered [`EnumDef`]s.
///
/// Ordinals follow the declared `enum` list. Descriptions in the
/// ` - VALUE: text` layout produced by protobuf-derived documents are split
/// into a block summary plus per-member summaries.
pub(crate) struct EnumConverter;

impl EnumConverter {
  pub(crate) fn convert(name: &str, definition: &Definition) -> EnumDef {
    let description = definition.description.as_deref().unwrap_or_default();
    let (preamble, member_docs) = split_member_docs(description);

    let docs = if preamble.is_empty() {
      Documentation::from_optional(definition.title.as_deref())
    } else {
      Documentation::from_raw(&preamble)
    };

    let mut used = HashSet::new();
    let variants = definition
      .enum_values
      .iter()
      .enumerate()
      .map(|(ordinal, value)| EnumVariant {
        name: claim_unique(&mut used, to_enum_member_name(value), ordinal),
        value: value.clone(),
        docs: Documentation::from_raw(member_docs.get(value.as_str()).copied().unwrap_or(value.as_str())),
      })
      .collect();

    EnumDef::builder()
      .name(ClassToken::new(to_title_case(name)))
      .docs(docs)
      .variants(variants)
      .build()
  }
}

/// Splits a description into its leading prose and a `value -> text` table.
fn split_member_docs(description: &str) -> (String, HashMap<&str, &str>) {
  let mut preamble = vec![];
  let mut members = HashMap::new();

  for line in description.lines() {
    let trimmed = line.trim();
    if let Some(entry) = trimmed.strip_prefix(MEMBER_DOC_MARKER)
      && let Some((value, text)) = entry.split_once(':')
    {
      members.insert(value.trim(), text.trim());
    } else if members.is_empty() && !trimmed.is_empty() {
      preamble.push(trimmed);
    }
  }

  (preamble.join(" "), members)
}
