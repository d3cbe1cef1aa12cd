use serde_json::json;

use super::support::{parameter, property, registry};
use crate::generator::{
  ast::{ClassToken, ScalarKind, TypeDescriptor, types::SchemaTag},
  converter::type_resolver::TypeResolver,
  metrics::GenerationWarning,
  schema_registry::SchemaRegistry,
};

fn nakama_registry() -> SchemaRegistry {
  registry(json!({
    "apiAccount": { "type": "object", "properties": { "email": { "type": "string" } } },
    "UserRole": { "type": "string", "enum": ["ADMIN", "MEMBER", "GUEST"] }
  }))
}

#[test]
fn test_primitive_tags_win_over_other_fields() {
  struct Case {
    tag: &'static str,
    expected: TypeDescriptor,
    default: &'static str,
    schema_tag: &'static str,
  }

  let cases = [
    Case {
      tag: "integer",
      expected: TypeDescriptor::Int,
      default: "0",
      schema_tag: "TYPE_INT",
    },
    Case {
      tag: "string",
      expected: TypeDescriptor::String,
      default: "\"\"",
      schema_tag: "TYPE_STRING",
    },
    Case {
      tag: "boolean",
      expected: TypeDescriptor::Bool,
      default: "false",
      schema_tag: "TYPE_BOOL",
    },
  ];

  let registry = nakama_registry();
  let resolver = TypeResolver::new(&registry);
  for case in cases {
    let prop = property(json!({
      "type": case.tag,
      "$ref": "#/definitions/UserRole",
      "items": { "type": "string" },
      "additionalProperties": { "type": "integer" }
    }));
    let output = resolver.resolve_property("Test.field", &prop);
    assert_eq!(output.result, case.expected, "tag {}", case.tag);
    assert_eq!(output.result.default_literal(), case.default, "tag {}", case.tag);
    assert_eq!(output.result.schema_tag().to_string(), case.schema_tag, "tag {}", case.tag);
    assert!(output.warnings.is_empty());
  }
}

#[test]
fn test_array_element_kinds() {
  struct Case {
    items: serde_json::Value,
    expected: TypeDescriptor,
    type_name: &'static str,
    content: Option<&'static str>,
  }

  let cases = [
    Case {
      items: json!({ "type": "integer" }),
      expected: TypeDescriptor::TypedArray(ScalarKind::Int),
      type_name: "PoolIntArray",
      content: Some("TYPE_INT"),
    },
    Case {
      items: json!({ "type": "boolean" }),
      expected: TypeDescriptor::TypedArray(ScalarKind::Bool),
      type_name: "PoolIntArray",
      content: Some("TYPE_BOOL"),
    },
    Case {
      items: json!({ "type": "string" }),
      expected: TypeDescriptor::TypedArray(ScalarKind::String),
      type_name: "PoolStringArray",
      content: Some("TYPE_STRING"),
    },
    Case {
      items: json!({ "$ref": "#/definitions/apiAccount" }),
      expected: TypeDescriptor::Array(Some(Box::new(TypeDescriptor::Object(ClassToken::new("ApiAccount"))))),
      type_name: "Array",
      content: Some("\"ApiAccount\""),
    },
    Case {
      items: json!({ "$ref": "#/definitions/userRole" }),
      expected: TypeDescriptor::Array(Some(Box::new(TypeDescriptor::Enum {
        name: ClassToken::new("UserRole"),
        variants: 3,
      }))),
      type_name: "Array",
      content: Some("TYPE_INT"),
    },
    Case {
      items: json!({ "type": "array", "items": { "type": "string" } }),
      expected: TypeDescriptor::Array(Some(Box::new(TypeDescriptor::Array(None)))),
      type_name: "Array",
      content: Some("TYPE_ARRAY"),
    },
    Case {
      items: json!({ "type": "object" }),
      expected: TypeDescriptor::Array(Some(Box::new(TypeDescriptor::Map(None)))),
      type_name: "Array",
      content: Some("TYPE_DICTIONARY"),
    },
    Case {
      items: json!({}),
      expected: TypeDescriptor::Array(None),
      type_name: "Array",
      content: None,
    },
  ];

  let registry = nakama_registry();
  let resolver = TypeResolver::new(&registry);
  for case in cases {
    let prop = property(json!({ "type": "array", "items": case.items }));
    let output = resolver.resolve_property("Test.list", &prop);
    assert_eq!(output.result, case.expected);
    assert_eq!(output.result.type_name(), case.type_name);
    assert_eq!(output.result.schema_tag(), SchemaTag::Array);
    assert_eq!(output.result.content_tag().map(|t| t.to_string()).as_deref(), case.content);
    assert!(output.warnings.is_empty(), "unexpected warnings: {:?}", output.warnings);
  }
}

#[test]
fn test_array_without_items_is_generic() {
  let registry = nakama_registry();
  let resolver = TypeResolver::new(&registry);
  let output = resolver.resolve_property("Test.list", &property(json!({ "type": "array" })));
  assert_eq!(output.result, TypeDescriptor::Array(None));
  assert_eq!(output.result.default_literal(), "Array()");
}

#[test]
fn test_object_without_reference_is_map() {
  let registry = nakama_registry();
  let resolver = TypeResolver::new(&registry);

  let typed = resolver.resolve_property(
    "Test.vars",
    &property(json!({ "type": "object", "additionalProperties": { "type": "string" } })),
  );
  assert_eq!(typed.result, TypeDescriptor::Map(Some(Box::new(TypeDescriptor::String))));
  assert_eq!(typed.result.content_tag(), Some(SchemaTag::String));
  assert_eq!(typed.result.default_literal(), "Dictionary()");

  let free_form = resolver.resolve_property(
    "Test.extra",
    &property(json!({ "type": "object", "additionalProperties": true })),
  );
  assert_eq!(free_form.result, TypeDescriptor::Map(None));
  assert_eq!(free_form.result.content_tag(), None);
}

#[test]
fn test_references_resolve_to_objects_and_enums() {
  let registry = nakama_registry();
  let resolver = TypeResolver::new(&registry);

  let object = resolver.resolve_property("Test.account", &property(json!({ "$ref": "#/definitions/apiAccount" })));
  assert_eq!(object.result, TypeDescriptor::Object(ClassToken::new("ApiAccount")));
  assert_eq!(object.result.default_literal(), "null");
  assert_eq!(object.result.schema_tag().to_string(), "\"ApiAccount\"");

  let enumeration = resolver.resolve_property("Test.role", &property(json!({ "$ref": "#/definitions/userRole" })));
  assert_eq!(
    enumeration.result,
    TypeDescriptor::Enum {
      name: ClassToken::new("UserRole"),
      variants: 3
    }
  );
  assert_eq!(enumeration.result.type_name(), "int");
  assert_eq!(enumeration.result.default_literal(), "0");
  assert_eq!(enumeration.result.schema_tag(), SchemaTag::Int);
}

#[test]
fn test_object_tag_with_reference_uses_reference() {
  let registry = nakama_registry();
  let resolver = TypeResolver::new(&registry);
  let output = resolver.resolve_property(
    "Test.account",
    &property(json!({ "type": "object", "$ref": "#/definitions/apiAccount" })),
  );
  assert_eq!(output.result, TypeDescriptor::Object(ClassToken::new("ApiAccount")));
}

#[test]
fn test_unresolved_reference_is_an_object_with_warning() {
  let registry = nakama_registry();
  let resolver = TypeResolver::new(&registry);
  let output = resolver.resolve_property("Test.friend", &property(json!({ "$ref": "#/definitions/apiFriend" })));
  assert_eq!(output.result, TypeDescriptor::Object(ClassToken::new("ApiFriend")));
  assert_eq!(
    output.warnings,
    vec![GenerationWarning::UnresolvedReference {
      reference: "apiFriend".to_string()
    }]
  );
}

#[test]
fn test_unrecognized_tag_keeps_marker_and_warns() {
  let registry = nakama_registry();
  let resolver = TypeResolver::new(&registry);

  let output = resolver.resolve_property("ApiLeaderboard.score", &property(json!({ "type": "number" })));
  assert_eq!(output.result, TypeDescriptor::Unrecognized("number".to_string()));
  assert_eq!(output.result.type_name(), "<ERROR: unrecognized type 'number'>");
  assert_eq!(
    output.warnings,
    vec![GenerationWarning::UnrecognizedType {
      context: "ApiLeaderboard.score".to_string(),
      type_tag: "number".to_string()
    }]
  );

  let untyped = resolver.resolve_property("ApiLeaderboard.metadata", &property(json!({})));
  assert_eq!(untyped.result, TypeDescriptor::Unrecognized(String::new()));
  assert_eq!(untyped.warnings.len(), 1);
}

#[test]
fn test_parameter_types() {
  let registry = nakama_registry();
  let resolver = TypeResolver::new(&registry);

  let body = parameter(json!({
    "name": "body", "in": "body", "required": true,
    "schema": { "$ref": "#/definitions/apiAccount" }
  }));
  assert_eq!(
    resolver.resolve_parameter("op", &body).result,
    TypeDescriptor::Object(ClassToken::new("ApiAccount"))
  );

  let string_body = parameter(json!({
    "name": "body", "in": "body", "required": true,
    "schema": { "type": "string" }
  }));
  assert_eq!(resolver.resolve_parameter("op", &string_body).result, TypeDescriptor::String);

  let ids = parameter(json!({
    "name": "ids", "in": "query", "type": "array", "items": { "type": "string" }
  }));
  assert_eq!(
    resolver.resolve_parameter("op", &ids).result,
    TypeDescriptor::TypedArray(ScalarKind::String)
  );

  let limit = parameter(json!({ "name": "limit", "in": "query", "type": "integer", "format": "int32" }));
  assert_eq!(resolver.resolve_parameter("op", &limit).result, TypeDescriptor::Int);
}
