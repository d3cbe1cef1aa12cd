mod documentation;
mod parsed_path;
pub mod tokens;
pub(super) mod types;


pub use documentation::Documentation;
use http::Method;
pub use parsed_path::ParsedPath;
pub use tokens::{ArgumentToken, ClassToken, MethodNameToken};
pub use types::{ScalarKind, TypeDescriptor};

/// One member of a generated enum block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
  /// GDScript identifier emitted for the member.
  pub name: String,
  /// Value as it appears on the wire.
  pub value: String,
  pub docs: Documentation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder)]
pub struct EnumDef {
  pub name: ClassToken,
  #[builder(default)]
  pub docs: Documentation,
  #[builder(default)]
  pub variants: Vec<EnumVariant>,
}

#[cfg(test)]
impl EnumDef {
  /// Ordinal assigned to a wire value; ordinals follow declaration order.
  pub fn ordinal_of(&self, value: &str) -> Option<usize> {
    self.variants.iter().position(|v| v.value == value)
  }

  pub fn variant_at(&self, ordinal: usize) -> Option<&EnumVariant> {
    self.variants.get(ordinal)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct FieldDef {
  /// GDScript member identifier.
  #[builder(into)]
  pub name: String,
  /// Property name as declared in the document, when it differs from `name`.
  #[builder(into)]
  pub wire_name: Option<String>,
  #[builder(default)]
  pub docs: Documentation,
  pub ty: TypeDescriptor,
}

impl FieldDef {
  /// Private slot holding the raw deserialized value.
  pub fn backing_name(&self) -> String {
    format!("_{}", self.name)
  }

  /// Key of the `_SCHEMA` entry, matching the serialized payload.
  pub fn schema_key(&self) -> &str {
    self.wire_name.as_deref().unwrap_or(&self.name)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder)]
pub struct ClassDef {
  pub name: ClassToken,
  #[builder(default)]
  pub docs: Documentation,
  #[builder(default)]
  pub fields: Vec<FieldDef>,
  /// Verbatim members supplied by a [`SnippetProvider`](crate::generator::codegen::SnippetProvider).
  #[builder(default)]
  pub extra_members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedType {
  Class(ClassDef),
  Enum(EnumDef),
}

/// Authentication branch taken by a generated client method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthScheme {
  /// `BasicAuth`: username and password arguments.
  Basic,
  /// `HttpKeyAuth`: a bearer token argument.
  Bearer,
  /// No security declared: a session argument with automatic refresh.
  Session,
  /// A security alternative naming no scheme the generator knows.
  Unauthenticated,
}

impl AuthScheme {
  pub const BASIC_SCHEME: &'static str = "BasicAuth";
  pub const BEARER_SCHEME: &'static str = "HttpKeyAuth";
  pub const BASIC_USERNAME_ARG: &'static str = "p_basic_auth_username";
  pub const BASIC_PASSWORD_ARG: &'static str = "p_basic_auth_password";
  pub const BEARER_TOKEN_ARG: &'static str = "p_bearer_token";
  pub const SESSION_ARG: &'static str = "p_session";

  pub fn from_scheme_name(name: &str) -> Option<Self> {
    match name {
      Self::BASIC_SCHEME => Some(Self::Basic),
      Self::BEARER_SCHEME => Some(Self::Bearer),
      _ => None,
    }
  }

  /// Formal arguments placed ahead of the operation's parameters.
  pub fn arguments(self) -> &'static [&'static str] {
    match self {
      Self::Basic => &[Self::BASIC_USERNAME_ARG, Self::BASIC_PASSWORD_ARG],
      Self::Bearer => &[Self::BEARER_TOKEN_ARG],
      Self::Session => &[Self::SESSION_ARG],
      Self::Unauthenticated => &[],
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
  Path,
  Query,
  Body,
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct ParamDef {
  /// Name as declared; used for placeholders and query keys.
  #[builder(into)]
  pub name: String,
  pub argument: ArgumentToken,
  pub location: ParamLocation,
  #[builder(default)]
  pub required: bool,
  pub ty: TypeDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct OperationDef {
  /// `operationId` as declared; names the operation in diagnostics.
  #[builder(into, default)]
  pub operation_id: String,
  pub method: Method,
  #[builder(into)]
  pub path_template: String,
  pub method_name: MethodNameToken,
  #[builder(default)]
  pub docs: Documentation,
  pub auth: AuthScheme,
  #[builder(default)]
  pub params: Vec<ParamDef>,
  /// Class deserialized from a successful response; `None` means no typed payload.
  pub response: Option<ClassToken>,
}

impl OperationDef {
  pub fn body_param(&self) -> Option<&ParamDef> {
    self.params.iter().find(|p| p.location == ParamLocation::Body)
  }

  pub fn params_at(&self, location: ParamLocation) -> impl Iterator<Item = &ParamDef> {
    self.params.iter().filter(move |p| p.location == location)
  }

  pub fn uses_session(&self) -> bool {
    self.auth == AuthScheme::Session
  }
}

/// How `ApiClient` refreshes a session before unsecured calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshDef {
  pub method_name: MethodNameToken,
  pub auth: AuthScheme,
  /// Class of the body carrying the refresh token.
  pub request_class: ClassToken,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDef {
  pub operations: Vec<OperationDef>,
  pub refresh: Option<RefreshDef>,
}

impl ClientDef {
  pub fn needs_refresh_helper(&self) -> bool {
    self.operations.iter().any(OperationDef::uses_session)
  }
}
