//! In-memory representation of a decoded Swagger 2.0 document.
//!
//! Only the parts of the document the generator reads are modelled; unknown
//! keys are ignored during decoding. Mappings use [`IndexMap`] so that
//! iteration follows document declaration order, which keeps generated output
//! reproducible for a fixed input.

use http::Method;
use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerDocument {
  #[serde(default)]
  pub info: Option<Info>,
  #[serde(default)]
  pub paths: IndexMap<String, PathItem>,
  #[serde(default)]
  pub definitions: IndexMap<String, Definition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub version: String,
  #[serde(default)]
  pub description: Option<String>,
}

/// A named type: an enum when `enum_values` is non-empty, an object otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Definition {
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub properties: IndexMap<String, PropertySpec>,
  #[serde(default, rename = "enum")]
  pub enum_values: Vec<String>,
}

impl Definition {
  pub fn is_enum(&self) -> bool {
    !self.enum_values.is_empty()
  }

  /// Description, falling back to the title.
  pub fn summary(&self) -> &str {
    self
      .description
      .as_deref()
      .filter(|d| !d.is_empty())
      .or(self.title.as_deref())
      .unwrap_or_default()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
  #[serde(default, rename = "type")]
  pub schema_type: Option<String>,
  #[serde(default, rename = "$ref")]
  pub reference: Option<String>,
  #[serde(default)]
  pub items: Option<SchemaRef>,
  #[serde(default)]
  pub additional_properties: Option<AdditionalProperties>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub title: Option<String>,
}

/// The `{type, $ref}` pair used by array items, map values, body schemas
/// and response schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SchemaRef {
  #[serde(default, rename = "type")]
  pub schema_type: Option<String>,
  #[serde(default, rename = "$ref")]
  pub reference: Option<String>,
  #[serde(default)]
  pub items: Option<Box<SchemaRef>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
  Flag(bool),
  Schema(SchemaRef),
}

impl AdditionalProperties {
  pub fn schema(&self) -> Option<&SchemaRef> {
    match self {
      Self::Flag(_) => None,
      Self::Schema(schema) => Some(schema),
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
  #[serde(default)]
  pub get: Option<Operation>,
  #[serde(default)]
  pub put: Option<Operation>,
  #[serde(default)]
  pub post: Option<Operation>,
  #[serde(default)]
  pub delete: Option<Operation>,
  #[serde(default)]
  pub options: Option<Operation>,
  #[serde(default)]
  pub head: Option<Operation>,
  #[serde(default)]
  pub patch: Option<Operation>,
  #[serde(default)]
  pub parameters: Vec<Parameter>,
}

impl PathItem {
  /// Operations in the fixed order get, put, post, delete, options, head, patch.
  pub fn methods(&self) -> Vec<(Method, &Operation)> {
    [
      (Method::GET, &self.get),
      (Method::PUT, &self.put),
      (Method::POST, &self.post),
      (Method::DELETE, &self.delete),
      (Method::OPTIONS, &self.options),
      (Method::HEAD, &self.head),
      (Method::PATCH, &self.patch),
    ]
    .into_iter()
    .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    .collect()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
  #[serde(default)]
  pub summary: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub operation_id: Option<String>,
  #[serde(default)]
  pub parameters: Vec<Parameter>,
  #[serde(default)]
  pub responses: IndexMap<String, Response>,
  #[serde(default)]
  pub security: Vec<IndexMap<String, Vec<String>>>,
}

impl Operation {
  /// The `$ref` of the `200` response schema, if any.
  pub fn success_reference(&self) -> Option<&str> {
    self
      .responses
      .get("200")
      .and_then(|r| r.schema.as_ref())
      .and_then(|s| s.reference.as_deref())
      .filter(|r| !r.is_empty())
  }

  /// Scheme names of the first security alternative. Later alternatives are ignored.
  pub fn first_security_alternative(&self) -> Option<impl Iterator<Item = &str>> {
    self.security.first().map(|alt| alt.keys().map(String::as_str))
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
  #[serde(default)]
  pub schema: Option<SchemaRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
  Path,
  Query,
  Body,
  #[serde(other)]
  Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
  pub name: String,
  #[serde(rename = "in")]
  pub location: ParameterLocation,
  #[serde(default)]
  pub required: bool,
  #[serde(default, rename = "type")]
  pub schema_type: Option<String>,
  #[serde(default)]
  pub items: Option<SchemaRef>,
  #[serde(default)]
  pub schema: Option<SchemaRef>,
}

impl Parameter {
  pub fn same_slot(&self, other: &Parameter) -> bool {
    self.name == other.name && self.location == other.location
  }
}
