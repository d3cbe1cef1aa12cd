use crate::generator::{
  ast::{ClassToken, ScalarKind, TypeDescriptor},
  converter::ConversionOutput,
  ir::{Parameter, PropertySpec, SchemaRef},
  metrics::GenerationWarning,
  naming::identifiers::to_title_case,
  schema_registry::{ReferenceKind, SchemaRegistry},
};

const ARRAY_TAG: &str = "array";
const OBJECT_TAG: &str = "object";

/// The type-relevant fields of a property, parameter or nested schema.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TypeInput<'a> {
  pub type_tag: Option<&'a str>,
  pub reference: Option<&'a str>,
  pub items: Option<&'a SchemaRef>,
  pub map_values: Option<&'a SchemaRef>,
}

impl<'a> TypeInput<'a> {
  pub(crate) fn from_property(property: &'a PropertySpec) -> Self {
    Self {
      type_tag: property.schema_type.as_deref(),
      reference: property.reference.as_deref(),
      items: property.items.as_ref(),
      map_values: property.additional_properties.as_ref().and_then(|ap| ap.schema()),
    }
  }

  pub(crate) fn from_schema(schema: &'a SchemaRef) -> Self {
    Self {
      type_tag: schema.schema_type.as_deref(),
      reference: schema.reference.as_deref(),
      items: schema.items.as_deref(),
      map_values: None,
    }
  }

  /// Body parameters carry their type in `schema`; all others inline.
  pub(crate) fn from_parameter(parameter: &'a Parameter) -> Self {
    match &parameter.schema {
      Some(schema) if parameter.schema_type.is_none() => Self::from_schema(schema),
      _ => Self {
        type_tag: parameter.schema_type.as_deref(),
        reference: parameter.schema.as_ref().and_then(|s| s.reference.as_deref()),
        items: parameter.items.as_ref(),
        map_values: None,
      },
    }
  }

  fn reference(&self) -> Option<&'a str> {
    self.reference.filter(|r| !r.is_empty())
  }
}

/// Maps declared schema types onto [`TypeDescriptor`]s.
///
/// References are looked up in the [`SchemaRegistry`] so that enum
/// definitions become ordinals regardless of how the reference is cased.
pub(crate) struct TypeResolver<'a> {
  registry: &'a SchemaRegistry,
}

impl<'a> TypeResolver<'a> {
  pub(crate) fn new(registry: &'a SchemaRegistry) -> Self {
    Self { registry }
  }

  pub(crate) fn resolve_property(&self, context: &str, property: &PropertySpec) -> ConversionOutput<TypeDescriptor> {
    self.resolve(context, TypeInput::from_property(property))
  }

  pub(crate) fn resolve_parameter(&self, context: &str, parameter: &Parameter) -> ConversionOutput<TypeDescriptor> {
    self.resolve(context, TypeInput::from_parameter(parameter))
  }

  /// Applies the mapping rules in precedence order: scalar tags, arrays,
  /// free-form objects, references, then the unrecognized fallback.
  pub(crate) fn resolve(&self, context: &str, input: TypeInput<'_>) -> ConversionOutput<TypeDescriptor> {
    if let Some(kind) = input.type_tag.and_then(ScalarKind::from_tag) {
      return ConversionOutput::new(TypeDescriptor::scalar(kind));
    }

    match (input.type_tag, input.reference()) {
      (Some(ARRAY_TAG), _) => self.resolve_array(context, input.items),
      (Some(OBJECT_TAG), None) => self
        .resolve_element(context, input.map_values)
        .map(TypeDescriptor::Map),
      (_, Some(reference)) => self.resolve_reference(reference),
      (tag, None) => Self::unrecognized(context, tag.unwrap_or_default()),
    }
  }

  fn resolve_array(&self, context: &str, items: Option<&SchemaRef>) -> ConversionOutput<TypeDescriptor> {
    let element_kind = items
      .and_then(|item| item.schema_type.as_deref())
      .and_then(ScalarKind::from_tag);

    match element_kind {
      Some(kind) => ConversionOutput::new(TypeDescriptor::TypedArray(kind)),
      None => self.resolve_element(context, items).map(TypeDescriptor::Array),
    }
  }

  /// Resolves an array element or map value without descending further.
  fn resolve_element(
    &self,
    context: &str,
    schema: Option<&SchemaRef>,
  ) -> ConversionOutput<Option<Box<TypeDescriptor>>> {
    let Some(schema) = schema else {
      return ConversionOutput::new(None);
    };
    let input = TypeInput::from_schema(schema);

    let element = match (input.type_tag, input.reference()) {
      (Some(tag), _) if ScalarKind::from_tag(tag).is_some() => self.resolve(context, input),
      (Some(ARRAY_TAG), _) => ConversionOutput::new(TypeDescriptor::Array(None)),
      (Some(OBJECT_TAG), None) => ConversionOutput::new(TypeDescriptor::Map(None)),
      (_, Some(reference)) => self.resolve_reference(reference),
      (None, None) => return ConversionOutput::new(None),
      (Some(tag), None) => Self::unrecognized(context, tag),
    };
    element.map(|ty| Some(Box::new(ty)))
  }

  pub(crate) fn resolve_reference(&self, reference: &str) -> ConversionOutput<TypeDescriptor> {
    let resolution = self.registry.resolve(reference);
    let ty = match resolution.kind {
      ReferenceKind::Enum { name, definition } => TypeDescriptor::Enum {
        name: ClassToken::new(to_title_case(name)),
        variants: definition.enum_values.len(),
      },
      ReferenceKind::Object { name } => TypeDescriptor::Object(ClassToken::new(to_title_case(name))),
      ReferenceKind::Unresolved => TypeDescriptor::Object(ClassToken::from_ref(reference)),
    };
    ConversionOutput::with_warning(ty, resolution.warning)
  }

  fn unrecognized(context: &str, tag: &str) -> ConversionOutput<TypeDescriptor> {
    ConversionOutput::with_warning(
      TypeDescriptor::Unrecognized(tag.to_string()),
      Some(GenerationWarning::UnrecognizedType {
        context: context.to_string(),
        type_tag: tag.to_string(),
      }),
    )
  }
}
