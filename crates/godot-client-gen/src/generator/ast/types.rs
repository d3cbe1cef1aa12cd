use std::fmt::{Display, Formatter};

use super::tokens::ClassToken;

/// Element kinds that map to Godot's packed arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
  Int,
  String,
  Bool,
}

impl ScalarKind {
  pub fn from_tag(tag: &str) -> Option<Self> {
    match tag {
      "integer" => Some(Self::Int),
      "string" => Some(Self::String),
      "boolean" => Some(Self::Bool),
      _ => None,
    }
  }

  pub fn schema_tag(self) -> SchemaTag {
    match self {
      Self::Int => SchemaTag::Int,
      Self::String => SchemaTag::String,
      Self::Bool => SchemaTag::Bool,
    }
  }
}

/// Target representation of a property or parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
  Int,
  String,
  Bool,
  /// `PoolIntArray` (integers and booleans) or `PoolStringArray`.
  TypedArray(ScalarKind),
  /// Plain `Array`; the element is resolved one level deep when known.
  Array(Option<Box<TypeDescriptor>>),
  /// `Dictionary`; the value is resolved one level deep when known.
  Map(Option<Box<TypeDescriptor>>),
  Object(ClassToken),
  /// Enum values travel as their ordinal.
  Enum {
    name: ClassToken,
    variants: usize,
  },
  /// A type tag the generator does not understand, kept so that the output
  /// shows a visible marker instead of silently guessing.
  Unrecognized(String),
}

impl TypeDescriptor {
  pub fn scalar(kind: ScalarKind) -> Self {
    match kind {
      ScalarKind::Int => Self::Int,
      ScalarKind::String => Self::String,
      ScalarKind::Bool => Self::Bool,
    }
  }

  pub fn unrecognized_marker(tag: &str) -> String {
    format!("<ERROR: unrecognized type '{tag}'>")
  }

  /// GDScript static type used for fields and required arguments.
  pub fn type_name(&self) -> String {
    match self {
      Self::Int | Self::Enum { .. } => "int".to_string(),
      Self::String => "String".to_string(),
      Self::Bool => "bool".to_string(),
      Self::TypedArray(ScalarKind::Int | ScalarKind::Bool) => "PoolIntArray".to_string(),
      Self::TypedArray(ScalarKind::String) => "PoolStringArray".to_string(),
      Self::Array(_) => "Array".to_string(),
      Self::Map(_) => "Dictionary".to_string(),
      Self::Object(name) => name.to_string(),
      Self::Unrecognized(tag) => Self::unrecognized_marker(tag),
    }
  }

  /// Type used for `is` checks; packed arrays arrive from JSON as plain arrays.
  pub fn loose_type_name(&self) -> String {
    match self {
      Self::TypedArray(_) => "Array".to_string(),
      _ => self.type_name(),
    }
  }

  pub fn default_literal(&self) -> String {
    match self {
      Self::Bool => "false".to_string(),
      Self::Int | Self::Enum { .. } => "0".to_string(),
      Self::String => "\"\"".to_string(),
      Self::TypedArray(_) | Self::Array(_) | Self::Map(_) => format!("{}()", self.type_name()),
      Self::Object(_) => "null".to_string(),
      Self::Unrecognized(tag) => Self::unrecognized_marker(tag),
    }
  }

  pub fn schema_tag(&self) -> SchemaTag {
    match self {
      Self::Bool => SchemaTag::Bool,
      Self::Int | Self::Enum { .. } => SchemaTag::Int,
      Self::String => SchemaTag::String,
      Self::TypedArray(_) | Self::Array(_) => SchemaTag::Array,
      Self::Map(_) => SchemaTag::Dictionary,
      Self::Object(name) => SchemaTag::Object(name.clone()),
      Self::Unrecognized(tag) => SchemaTag::Unrecognized(tag.clone()),
    }
  }

  /// Runtime-schema tag of array elements or map values.
  pub fn content_tag(&self) -> Option<SchemaTag> {
    match self {
      Self::TypedArray(kind) => Some(kind.schema_tag()),
      Self::Array(Some(inner)) | Self::Map(Some(inner)) => Some(inner.schema_tag()),
      _ => None,
    }
  }

  pub fn is_array(&self) -> bool {
    matches!(self, Self::TypedArray(_) | Self::Array(_))
  }

  pub fn is_map(&self) -> bool {
    matches!(self, Self::Map(_))
  }

  #[cfg(test)]
  pub fn is_unrecognized(&self) -> bool {
    matches!(self, Self::Unrecognized(_))
  }
}

/// Value stored in a generated class's `_SCHEMA` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaTag {
  Bool,
  Int,
  String,
  Array,
  Dictionary,
  Object(ClassToken),
  Unrecognized(String),
}

impl Display for SchemaTag {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Bool => f.write_str("TYPE_BOOL"),
      Self::Int => f.write_str("TYPE_INT"),
      Self::String => f.write_str("TYPE_STRING"),
      Self::Array => f.write_str("TYPE_ARRAY"),
      Self::Dictionary => f.write_str("TYPE_DICTIONARY"),
      Self::Object(name) => write!(f, "\"{name}\""),
      Self::Unrecognized(tag) => f.write_str(&TypeDescriptor::unrecognized_marker(tag)),
    }
  }
}
