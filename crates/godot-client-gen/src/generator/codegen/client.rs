use std::fmt::{self, Write};

use super::{ScriptWriter, ToScript};
use crate::generator::{
  ast::{AuthScheme, ClientDef, OperationDef, ParamDef, ParamLocation, RefreshDef, ScalarKind, TypeDescriptor},
  converter::CodegenConfig,
};

const BASIC_USERNAME_ARG: &str = AuthScheme::BASIC_USERNAME_ARG;
const BASIC_PASSWORD_ARG: &str = AuthScheme::BASIC_PASSWORD_ARG;
const BEARER_TOKEN_ARG: &str = AuthScheme::BEARER_TOKEN_ARG;
const SESSION_ARG: &str = AuthScheme::SESSION_ARG;
const SESSION_CLASS: &str = "NakamaSession";
const EXCEPTION_CLASS: &str = "NakamaException";

/// Locals declared in every generated method body; arguments must not shadow them.
pub(crate) const METHOD_LOCALS: &[&str] = &[
  "session",
  "try_refresh",
  "refreshed",
  "urlpath",
  "query_params",
  "elem",
  "uri",
  "method",
  "headers",
  "credentials",
  "header",
  "content",
  "result",
  "out",
];

/// `class ApiClient`: transport state, the session refresh helper and one
/// `<name>_async` method per operation.
pub(crate) struct ClientFragment<'a> {
  def: &'a ClientDef,
  config: &'a CodegenConfig,
}

impl<'a> ClientFragment<'a> {
  pub(crate) fn new(def: &'a ClientDef, config: &'a CodegenConfig) -> Self {
    Self { def, config }
  }

  fn write_shell(&self, out: &mut ScriptWriter) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "var _base_uri : String")?;
    writeln!(out, "var _timeout : int")?;
    writeln!(out, "var _http_adapter")?;
    writeln!(out, "var _namespace : GDScript")?;
    writeln!(out, "var _server_key : String")?;
    writeln!(out, "var auto_refresh := true")?;
    writeln!(out, "var auto_refresh_time : int = {}", self.config.auto_refresh_seconds)?;
    writeln!(out)?;
    writeln!(
      out,
      "func _init(p_base_uri : String, p_http_adapter, p_namespace : GDScript, p_server_key : String, p_timeout : int = {}):",
      self.config.default_timeout
    )?;
    out.indented(|out| {
      writeln!(out, "_base_uri = p_base_uri")?;
      writeln!(out, "_timeout = p_timeout")?;
      writeln!(out, "_http_adapter = p_http_adapter")?;
      writeln!(out, "_namespace = p_namespace")?;
      writeln!(out, "_server_key = p_server_key")
    })
  }
}

impl ToScript for ClientFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    writeln!(out, "### <summary>")?;
    writeln!(out, "### The low level client for the {} API.", self.config.api_class_name)?;
    writeln!(out, "### </summary>")?;
    writeln!(out, "class ApiClient extends Reference:")?;
    out.indented(|out| {
      self.write_shell(out)?;
      if self.def.needs_refresh_helper() {
        out.emit(&RefreshHelperFragment::new(self.def.refresh.as_ref()))?;
      }
      for operation in &self.def.operations {
        out.emit(&MethodFragment::new(operation, &self.config.result_base_class))?;
      }
      Ok(())
    })
  }
}

/// `_refresh_session(p_session)`: returns `null` when no refresh is due,
/// otherwise a function state resolving to a new session or an exception.
pub(crate) struct RefreshHelperFragment<'a> {
  refresh: Option<&'a RefreshDef>,
}

impl<'a> RefreshHelperFragment<'a> {
  pub(crate) fn new(refresh: Option<&'a RefreshDef>) -> Self {
    Self { refresh }
  }

  fn credentials(refresh: &RefreshDef) -> &'static str {
    match refresh.auth {
      AuthScheme::Basic => "_server_key, \"\", ",
      AuthScheme::Bearer => "p_session.token, ",
      AuthScheme::Session | AuthScheme::Unauthenticated => "",
    }
  }
}

impl ToScript for RefreshHelperFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "func _refresh_session({SESSION_ARG} : {SESSION_CLASS}):")?;
    out.indented(|out| {
      let Some(refresh) = self.refresh else {
        return writeln!(out, "return null");
      };

      writeln!(
        out,
        "if auto_refresh and {SESSION_ARG}.is_valid() and {SESSION_ARG}.refresh_token and not {SESSION_ARG}.is_refresh_expired():"
      )?;
      out.indented(|out| {
        writeln!(out, "if {SESSION_ARG}.would_expire_in(auto_refresh_time):")?;
        out.indented(|out| {
          writeln!(out, "var request = {}.new()", refresh.request_class)?;
          writeln!(out, "request._token = {SESSION_ARG}.refresh_token")?;
          writeln!(
            out,
            "var result = yield({}_async({}request), \"completed\")",
            refresh.method_name,
            Self::credentials(refresh)
          )?;
          writeln!(out, "if result.is_exception():")?;
          out.indented(|out| writeln!(out, "return result.get_exception()"))?;
          writeln!(
            out,
            "return {SESSION_CLASS}.new(result.token, result.created, result.refresh_token)"
          )
        })
      })?;
      writeln!(out, "return null")
    })
  }
}

/// One `<name>_async` client method.
pub(crate) struct MethodFragment<'a> {
  op: &'a OperationDef,
  base_class: &'a str,
}

impl<'a> MethodFragment<'a> {
  pub(crate) fn new(op: &'a OperationDef, base_class: &'a str) -> Self {
    Self { op, base_class }
  }

  /// Class returned by the method, both on success and wrapped around errors.
  fn return_class(&self) -> &str {
    self.op.response.as_ref().map_or(self.base_class, |r| r.as_str())
  }

  fn write_request(&self, out: &mut ScriptWriter) -> fmt::Result {
    let return_class = self.return_class();
    writeln!(
      out,
      "var result = yield(_http_adapter.send_async(method, uri, headers, content, _timeout), \"completed\")"
    )?;
    writeln!(out, "if result is {EXCEPTION_CLASS}:")?;
    out.indented(|out| writeln!(out, "return {return_class}.new(result)"))?;
    match &self.op.response {
      Some(class) => {
        writeln!(
          out,
          "var out : {class} = NakamaSerializer.deserialize(_namespace, \"{class}\", result)"
        )?;
        writeln!(out, "return out")
      }
      None => writeln!(out, "return {}.new()", self.base_class),
    }
  }
}

impl ToScript for MethodFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    writeln!(out)?;
    out.emit(&self.op.docs)?;
    out.emit(&SignatureFragment::new(self.op, self.return_class()))?;
    out.indented(|out| {
      if self.op.uses_session() {
        out.emit(&RefreshPrologueFragment::new(self.return_class()))?;
      }
      out.emit(&PathFragment::new(self.op))?;
      out.emit(&QueryFragment::new(self.op))?;
      writeln!(
        out,
        "var uri = \"%s%s%s\" % [_base_uri, urlpath, \"?\" + query_params if query_params else \"\"]"
      )?;
      writeln!(out, "var method = \"{}\"", self.op.method)?;
      writeln!(out, "var headers = {{}}")?;
      out.emit(&AuthHeaderFragment::new(self.op.auth))?;
      writeln!(out)?;
      out.emit(&BodyFragment::new(self.op.body_param()))?;
      writeln!(out)?;
      self.write_request(out)
    })
  }
}

/// `func name_async(...) -> Type:` with authentication arguments first, then
/// required parameters, then optional ones (GDScript requires defaulted
/// arguments last).
pub(crate) struct SignatureFragment<'a> {
  op: &'a OperationDef,
  return_class: &'a str,
}

impl<'a> SignatureFragment<'a> {
  pub(crate) fn new(op: &'a OperationDef, return_class: &'a str) -> Self {
    Self { op, return_class }
  }

  fn auth_arguments(&self) -> Vec<String> {
    let type_name = if self.op.uses_session() { SESSION_CLASS } else { "String" };
    self
      .op
      .auth
      .arguments()
      .iter()
      .map(|argument| format!("{argument} : {type_name}"))
      .collect()
  }

  fn parameter_argument(param: &ParamDef) -> String {
    if param.required {
      format!("{} : {}", param.argument, param.ty.type_name())
    } else {
      format!("{} = null # : {}", param.argument, param.ty.type_name())
    }
  }
}

impl ToScript for SignatureFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    let (required, optional): (Vec<_>, Vec<_>) = self.op.params.iter().partition(|p| p.required);
    let arguments = self
      .auth_arguments()
      .into_iter()
      .chain(required.into_iter().chain(optional).map(Self::parameter_argument))
      .collect::<Vec<_>>();

    writeln!(out, "func {}_async(", self.op.method_name)?;
    out.indented(|out| {
      arguments.iter().enumerate().try_for_each(|(i, argument)| {
        if i == 0 {
          writeln!(out, "{argument}")
        } else {
          writeln!(out, ", {argument}")
        }
      })
    })?;
    writeln!(out, ") -> {}:", self.return_class)
  }
}

/// Refreshes the caller's session into a local before the request is built.
pub(crate) struct RefreshPrologueFragment<'a> {
  return_class: &'a str,
}

impl<'a> RefreshPrologueFragment<'a> {
  pub(crate) fn new(return_class: &'a str) -> Self {
    Self { return_class }
  }
}

impl ToScript for RefreshPrologueFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    writeln!(out, "var session := {SESSION_ARG}")?;
    writeln!(out, "var try_refresh = _refresh_session({SESSION_ARG})")?;
    writeln!(out, "if try_refresh != null:")?;
    out.indented(|out| {
      writeln!(out, "var refreshed = yield(try_refresh, \"completed\")")?;
      writeln!(out, "if refreshed is {EXCEPTION_CLASS}:")?;
      out.indented(|out| writeln!(out, "return {}.new(refreshed)", self.return_class))?;
      writeln!(out, "session = refreshed")
    })
  }
}

/// `urlpath` with every `{placeholder}` replaced by its escaped argument.
pub(crate) struct PathFragment<'a> {
  op: &'a OperationDef,
}

impl<'a> PathFragment<'a> {
  pub(crate) fn new(op: &'a OperationDef) -> Self {
    Self { op }
  }
}

impl ToScript for PathFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    writeln!(out, "var urlpath : String = \"{}\"", self.op.path_template)?;
    for param in self.op.params_at(ParamLocation::Path) {
      let value = match param.ty {
        TypeDescriptor::String => param.argument.to_string(),
        _ => format!("str({})", param.argument),
      };
      writeln!(
        out,
        "urlpath = urlpath.replace(\"{{{}}}\", NakamaSerializer.escape_http({value}))",
        param.name
      )?;
    }
    Ok(())
  }
}

/// Builds `query_params` from `name=value&` fragments.
pub(crate) struct QueryFragment<'a> {
  op: &'a OperationDef,
}

impl<'a> QueryFragment<'a> {
  pub(crate) fn new(op: &'a OperationDef) -> Self {
    Self { op }
  }

  fn write_append(out: &mut ScriptWriter, param: &ParamDef) -> fmt::Result {
    let name = &param.name;
    let arg = &param.argument;
    match &param.ty {
      TypeDescriptor::Int | TypeDescriptor::Enum { .. } => {
        writeln!(out, "query_params += \"{name}=%d&\" % {arg}")
      }
      TypeDescriptor::String => {
        writeln!(out, "query_params += \"{name}=%s&\" % NakamaSerializer.escape_http({arg})")
      }
      TypeDescriptor::Bool => writeln!(out, "query_params += \"{name}=%s&\" % str(bool({arg})).to_lower()"),
      ty @ (TypeDescriptor::TypedArray(_) | TypeDescriptor::Array(_)) => {
        let element = match ty {
          TypeDescriptor::TypedArray(ScalarKind::String) => "elem",
          _ => "str(elem)",
        };
        writeln!(out, "for elem in {arg}:")?;
        out.indented(|out| {
          writeln!(
            out,
            "query_params += \"{name}=%s&\" % NakamaSerializer.escape_http({element})"
          )
        })
      }
      TypeDescriptor::Unrecognized(tag) => writeln!(out, "{}", TypeDescriptor::unrecognized_marker(tag)),
      ty @ (TypeDescriptor::Map(_) | TypeDescriptor::Object(_)) => writeln!(
        out,
        "<ERROR: query parameter '{name}' of type '{}' cannot be encoded>",
        ty.type_name()
      ),
    }
  }
}

impl ToScript for QueryFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    writeln!(out, "var query_params = \"\"")?;
    for param in self.op.params_at(ParamLocation::Query) {
      if param.required {
        Self::write_append(out, param)?;
      } else {
        writeln!(out, "if {} != null:", param.argument)?;
        out.indented(|out| Self::write_append(out, param))?;
      }
    }
    Ok(())
  }
}

/// Sets the `Authorization` header for the method's auth branch.
pub(crate) struct AuthHeaderFragment {
  auth: AuthScheme,
}

impl AuthHeaderFragment {
  pub(crate) fn new(auth: AuthScheme) -> Self {
    Self { auth }
  }
}

impl ToScript for AuthHeaderFragment {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    match self.auth {
      AuthScheme::Basic => {
        writeln!(
          out,
          "var credentials = Marshalls.utf8_to_base64({BASIC_USERNAME_ARG} + \":\" + {BASIC_PASSWORD_ARG})"
        )?;
        writeln!(out, "var header = \"Basic %s\" % credentials")?;
        writeln!(out, "headers[\"Authorization\"] = header")
      }
      AuthScheme::Bearer => {
        writeln!(out, "if ({BEARER_TOKEN_ARG}):")?;
        out.indented(|out| {
          writeln!(out, "var header = \"Bearer %s\" % {BEARER_TOKEN_ARG}")?;
          writeln!(out, "headers[\"Authorization\"] = header")
        })
      }
      AuthScheme::Session => {
        writeln!(out, "var header = \"Bearer %s\" % session.token")?;
        writeln!(out, "headers[\"Authorization\"] = header")
      }
      AuthScheme::Unauthenticated => Ok(()),
    }
  }
}

/// `content`: the UTF-8 JSON encoding of the body argument, if any.
pub(crate) struct BodyFragment<'a> {
  body: Option<&'a ParamDef>,
}

impl<'a> BodyFragment<'a> {
  pub(crate) fn new(body: Option<&'a ParamDef>) -> Self {
    Self { body }
  }
}

impl ToScript for BodyFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    writeln!(out, "var content : PoolByteArray")?;
    let Some(body) = self.body else {
      return Ok(());
    };
    let arg = &body.argument;
    let encode = |out: &mut ScriptWriter| match body.ty {
      TypeDescriptor::Object(_) => writeln!(out, "content = JSON.print({arg}.serialize()).to_utf8()"),
      _ => writeln!(out, "content = JSON.print({arg}).to_utf8()"),
    };
    if body.required {
      return encode(out);
    }
    writeln!(out, "if {arg} != null:")?;
    out.indented(encode)
  }
}

