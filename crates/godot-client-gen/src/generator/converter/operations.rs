use std::collections::HashSet;

use http::Method;

use crate::generator::{
  ast::{
    ArgumentToken, AuthScheme, ClassToken, ClientDef, Documentation, MethodNameToken, OperationDef, ParamDef,
    ParamLocation, ParsedPath, RefreshDef, TypeDescriptor,
  },
  codegen::client::METHOD_LOCALS,
  converter::{
    CodegenConfig, ConversionOutput,
    parameters::{ParameterConverter, merge_parameters},
    type_resolver::TypeResolver,
  },
  ir::{Operation, PathItem, SwaggerDocument},
  metrics::GenerationWarning,
  naming::identifiers::claim_unique,
};

/// Converts path items into client operations.
pub(crate) struct OperationConverter<'a> {
  type_resolver: &'a TypeResolver<'a>,
  config: &'a CodegenConfig,
}

impl<'a> OperationConverter<'a> {
  pub(crate) fn new(type_resolver: &'a TypeResolver<'a>, config: &'a CodegenConfig) -> Self {
    Self { type_resolver, config }
  }

  /// Converts every operation in document order and locates the session
  /// refresh operation used by the generated refresh helper.
  pub(crate) fn convert_client(&self, document: &SwaggerDocument) -> ConversionOutput<ClientDef> {
    let mut warnings = vec![];
    let mut operations = vec![];

    for (path, item) in &document.paths {
      for (method, operation) in item.methods() {
        if let Some(def) = self
          .convert(path, &method, item, operation)
          .into_result(&mut warnings)
        {
          operations.push(def);
        }
      }
    }

    warnings.extend(Self::unique_method_names(&mut operations));

    let mut client = ClientDef {
      operations,
      refresh: None,
    };
    if client.needs_refresh_helper() {
      client.refresh = self.find_refresh(&client.operations).into_result(&mut warnings);
    }

    ConversionOutput::with_warnings(client, warnings)
  }

  pub(crate) fn convert(
    &self,
    path: &str,
    method: &Method,
    item: &PathItem,
    operation: &Operation,
  ) -> ConversionOutput<Option<OperationDef>> {
    let skipped = |error: String| {
      ConversionOutput::with_warning(
        None,
        Some(GenerationWarning::OperationConversionFailed {
          method: method.to_string(),
          path: path.to_string(),
          error,
        }),
      )
    };

    let Some(operation_id) = operation.operation_id.as_deref().filter(|id| !id.is_empty()) else {
      return skipped("missing operationId".to_string());
    };
    let parsed_path = match ParsedPath::parse(path) {
      Ok(parsed) => parsed,
      Err(e) => return skipped(e.to_string()),
    };

    let mut warnings = vec![];
    let auth = Self::auth_scheme(operation_id, operation).into_result(&mut warnings);

    let param_converter = ParameterConverter::new(self.type_resolver, &self.config.argument_prefix);
    let params = merge_parameters(&item.parameters, &operation.parameters)
      .into_iter()
      .filter_map(|p| param_converter.convert(operation_id, p).into_result(&mut warnings))
      .collect::<Vec<_>>();
    let params = Self::unique_arguments(operation_id, auth, params).into_result(&mut warnings);
    let method_name = self.method_name(operation_id).into_result(&mut warnings);

    let response = operation
      .success_reference()
      .and_then(|reference| self.response_class(operation_id, reference).into_result(&mut warnings));

    let def = OperationDef::builder()
      .operation_id(operation_id)
      .method(method.clone())
      .path_template(path)
      .method_name(method_name)
      .docs(Documentation::from_optional(
        operation
          .summary
          .as_deref()
          .filter(|s| !s.trim().is_empty())
          .or(operation.description.as_deref()),
      ))
      .auth(auth)
      .params(params)
      .maybe_response(response)
      .build();

    warnings.extend(Self::check_placeholders(operation_id, &parsed_path, &def));
    ConversionOutput::with_warnings(Some(def), warnings)
  }

  /// Enum responses fall back to the base result class; GDScript enums have
  /// no constructor.
  fn response_class(&self, operation_id: &str, reference: &str) -> ConversionOutput<Option<ClassToken>> {
    let mut warnings = vec![];
    let class = match self.type_resolver.resolve_reference(reference).into_result(&mut warnings) {
      TypeDescriptor::Object(name) => Some(name),
      TypeDescriptor::Enum { name, .. } => {
        warnings.push(GenerationWarning::OperationSpecific {
          operation_id: operation_id.to_string(),
          message: format!(
            "response enum '{name}' cannot be returned as a class; returning {}",
            self.config.result_base_class
          ),
        });
        None
      }
      _ => Some(ClassToken::from_ref(reference)),
    };
    ConversionOutput::with_warnings(class, warnings)
  }

  /// Strips the namespace prefix; an id no longer than the prefix keeps its
  /// full snake-cased form.
  fn method_name(&self, operation_id: &str) -> ConversionOutput<MethodNameToken> {
    let name = MethodNameToken::from_operation_id(operation_id, self.config.operation_prefix_len);
    if !name.as_str().is_empty() {
      return ConversionOutput::new(name);
    }

    let fallback = MethodNameToken::from_operation_id(operation_id, 0);
    ConversionOutput::with_warning(
      fallback.clone(),
      Some(GenerationWarning::OperationSpecific {
        operation_id: operation_id.to_string(),
        message: format!(
          "operation id is not longer than the {}-character prefix; method named '{fallback}'",
          self.config.operation_prefix_len
        ),
      }),
    )
  }

  /// Renames arguments that repeat an authentication argument, a method
  /// local or an earlier parameter.
  fn unique_arguments(operation_id: &str, auth: AuthScheme, params: Vec<ParamDef>) -> ConversionOutput<Vec<ParamDef>> {
    let mut used = auth
      .arguments()
      .iter()
      .chain(METHOD_LOCALS)
      .map(ToString::to_string)
      .collect::<HashSet<_>>();
    let mut warnings = vec![];

    let params = params
      .into_iter()
      .map(|mut param| {
        let argument = claim_unique(&mut used, param.argument.to_string(), 1);
        if param.argument != argument.as_str() {
          warnings.push(GenerationWarning::OperationSpecific {
            operation_id: operation_id.to_string(),
            message: format!(
              "argument '{}' for parameter '{}' is already taken; renamed to '{argument}'",
              param.argument, param.name
            ),
          });
          param.argument = ArgumentToken::new(argument);
        }
        param
      })
      .collect();

    ConversionOutput::with_warnings(params, warnings)
  }

  /// Later operations whose method name is taken get a numeric suffix.
  fn unique_method_names(operations: &mut [OperationDef]) -> Vec<GenerationWarning> {
    let mut used = HashSet::new();
    let mut warnings = vec![];

    for op in operations {
      let name = claim_unique(&mut used, op.method_name.to_string(), 1);
      if op.method_name != name.as_str() {
        warnings.push(GenerationWarning::OperationSpecific {
          operation_id: op.operation_id.clone(),
          message: format!(
            "method '{}_async' is already generated; renamed to '{name}_async'",
            op.method_name
          ),
        });
        op.method_name = MethodNameToken::new(name);
      }
    }
    warnings
  }

  /// Honors only the first security alternative; no alternative means the
  /// caller passes a session.
  fn auth_scheme(operation_id: &str, operation: &Operation) -> ConversionOutput<AuthScheme> {
    let Some(schemes) = operation.first_security_alternative() else {
      return ConversionOutput::new(AuthScheme::Session);
    };

    let mut unknown = vec![];
    for scheme in schemes {
      match AuthScheme::from_scheme_name(scheme) {
        Some(auth) => return ConversionOutput::new(auth),
        None => unknown.push(GenerationWarning::UnknownSecurityScheme {
          operation_id: operation_id.to_string(),
          scheme: scheme.to_string(),
        }),
      }
    }
    ConversionOutput::with_warnings(AuthScheme::Unauthenticated, unknown)
  }

  fn check_placeholders(operation_id: &str, parsed: &ParsedPath, def: &OperationDef) -> Vec<GenerationWarning> {
    let placeholders = parsed.placeholders();
    let declared = def
      .params_at(ParamLocation::Path)
      .map(|p| p.name.as_str())
      .collect::<HashSet<_>>();
    let warning = |message: String| GenerationWarning::OperationSpecific {
      operation_id: operation_id.to_string(),
      message,
    };

    let mut warnings = placeholders
      .iter()
      .filter(|name| !declared.contains(*name))
      .map(|name| warning(format!("path placeholder '{{{name}}}' has no matching path parameter")))
      .collect::<Vec<_>>();
    warnings.extend(
      def
        .params_at(ParamLocation::Path)
        .filter(|p| !parsed.has_placeholder(&p.name))
        .map(|p| warning(format!("path parameter '{}' does not appear in the path template", p.name))),
    );
    warnings
  }

  fn find_refresh(&self, operations: &[OperationDef]) -> ConversionOutput<Option<RefreshDef>> {
    let target = &self.config.session_refresh_operation;
    let missing = |message: &str| {
      ConversionOutput::with_warning(
        None,
        Some(GenerationWarning::MissingRefreshOperation {
          method_name: target.clone(),
          message: message.to_string(),
        }),
      )
    };

    let Some(operation) = operations.iter().find(|op| op.method_name == target.as_str()) else {
      return missing("is not declared");
    };
    if operation.uses_session() {
      return missing("must declare a security scheme");
    }
    let Some(TypeDescriptor::Object(request_class)) = operation.body_param().map(|p| &p.ty) else {
      return missing("has no object request body");
    };

    ConversionOutput::new(Some(RefreshDef {
      method_name: operation.method_name.clone(),
      auth: operation.auth,
      request_class: request_class.clone(),
    }))
  }
}
