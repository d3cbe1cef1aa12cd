use crate::generator::{
  ast::{ArgumentToken, ParamDef, ParamLocation, TypeDescriptor},
  converter::{ConversionOutput, type_resolver::TypeResolver},
  ir::{Parameter, ParameterLocation},
  metrics::GenerationWarning,
};

/// Path-level parameters first, unless the operation redeclares the same
/// `(name, in)` slot, followed by the operation's own parameters.
pub(crate) fn merge_parameters<'a>(path_level: &'a [Parameter], own: &'a [Parameter]) -> Vec<&'a Parameter> {
  path_level
    .iter()
    .filter(|shared| !own.iter().any(|p| p.same_slot(shared)))
    .chain(own)
    .collect()
}

pub(crate) struct ParameterConverter<'a> {
  type_resolver: &'a TypeResolver<'a>,
  argument_prefix: &'a str,
}

impl<'a> ParameterConverter<'a> {
  pub(crate) fn new(type_resolver: &'a TypeResolver<'a>, argument_prefix: &'a str) -> Self {
    Self {
      type_resolver,
      argument_prefix,
    }
  }

  /// Returns `None` for locations the client does not send (headers, form data).
  pub(crate) fn convert(&self, operation_id: &str, parameter: &Parameter) -> ConversionOutput<Option<ParamDef>> {
    let location = match parameter.location {
      ParameterLocation::Path => ParamLocation::Path,
      ParameterLocation::Query => ParamLocation::Query,
      ParameterLocation::Body => ParamLocation::Body,
      ParameterLocation::Other => {
        return ConversionOutput::with_warning(
          None,
          Some(GenerationWarning::OperationSpecific {
            operation_id: operation_id.to_string(),
            message: format!("parameter '{}' has an unsupported location and is ignored", parameter.name),
          }),
        );
      }
    };

    let context = format!("{operation_id} parameter '{}'", parameter.name);
    let mut warnings = vec![];
    let ty = self
      .type_resolver
      .resolve_parameter(&context, parameter)
      .into_result(&mut warnings);

    if location == ParamLocation::Query && !is_query_encodable(&ty) {
      warnings.push(GenerationWarning::OperationSpecific {
        operation_id: operation_id.to_string(),
        message: format!(
          "query parameter '{}' of type '{}' cannot be encoded",
          parameter.name,
          ty.type_name()
        ),
      });
    }

    let def = ParamDef::builder()
      .name(&parameter.name)
      .argument(ArgumentToken::from_parameter(self.argument_prefix, &parameter.name))
      .location(location)
      .required(parameter.required || location == ParamLocation::Path)
      .ty(ty)
      .build();
    ConversionOutput::with_warnings(Some(def), warnings)
  }
}

/// Scalars, enums and arrays have a `name=value&` form. Unrecognized types
/// are already reported by the type resolver.
fn is_query_encodable(ty: &TypeDescriptor) -> bool {
  !matches!(ty, TypeDescriptor::Map(_) | TypeDescriptor::Object(_))
}
