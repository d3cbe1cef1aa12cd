use std::collections::HashSet;

use crate::generator::{
  ast::{ClassDef, ClassToken, Documentation, FieldDef},
  codegen::SnippetProvider,
  converter::{ConversionOutput, type_resolver::TypeResolver},
  ir::{Definition, PropertySpec},
  naming::identifiers::{claim_unique, to_field_name, to_title_case},
};

/// Converts object definitions into [`ClassDef`]s, one field per property in
/// declaration order.
pub(crate) struct StructConverter<'a> {
  type_resolver: &'a TypeResolver<'a>,
  snippets: &'a dyn SnippetProvider,
}

impl<'a> StructConverter<'a> {
  pub(crate) fn new(type_resolver: &'a TypeResolver<'a>, snippets: &'a dyn SnippetProvider) -> Self {
    Self {
      type_resolver,
      snippets,
    }
  }

  pub(crate) fn convert(&self, name: &str, definition: &Definition) -> ConversionOutput<ClassDef> {
    let class_name = ClassToken::new(to_title_case(name));
    let mut warnings = vec![];

    let mut used = HashSet::new();
    let fields = definition
      .properties
      .iter()
      .enumerate()
      .map(|(ordinal, (prop_name, property))| {
        let context = format!("{class_name}.{prop_name}");
        let ty = self
          .type_resolver
          .resolve_property(&context, property)
          .into_result(&mut warnings);
        let ident = claim_unique(&mut used, to_field_name(prop_name), ordinal);
        FieldDef::builder()
          .maybe_wire_name((ident != *prop_name).then(|| prop_name.clone()))
          .name(ident)
          .docs(Self::field_docs(property))
          .ty(ty)
          .build()
      })
      .collect();

    let class = ClassDef::builder()
      .docs(Documentation::from_raw(definition.summary()))
      .fields(fields)
      .extra_members(self.snippets.members(class_name.as_str()))
      .name(class_name)
      .build();

    ConversionOutput::with_warnings(class, warnings)
  }

  fn field_docs(property: &PropertySpec) -> Documentation {
    Documentation::from_optional(
      property
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .or(property.title.as_deref()),
    )
  }
}
