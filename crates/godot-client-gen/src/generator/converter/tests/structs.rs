use serde_json::json;

use super::support::{definition, registry};
use crate::generator::{
  ast::{ClassToken, TypeDescriptor},
  codegen::{NoSnippets, StaticSnippets},
  converter::{structs::StructConverter, type_resolver::TypeResolver},
  metrics::GenerationWarning,
};

#[test]
fn test_fields_follow_declaration_order() {
  let registry = registry(json!({}));
  let resolver = TypeResolver::new(&registry);
  let converter = StructConverter::new(&resolver, &NoSnippets);

  let output = converter.convert(
    "apiAccount",
    &definition(json!({
      "type": "object",
      "description": "A user with additional account details.",
      "properties": {
        "wallet": { "type": "string", "description": "The user's wallet data." },
        "email": { "type": "string", "title": "Email address" },
        "verify_time": { "type": "string" },
        "custom_id": { "type": "string", "description": "  ", "title": "Custom id" }
      }
    })),
  );

  let class = output.result;
  assert!(output.warnings.is_empty());
  assert_eq!(class.name, "ApiAccount");
  assert_eq!(class.docs.text(), "A user with additional account details.");
  let names: Vec<_> = class.fields.iter().map(|f| f.name.as_str()).collect();
  assert_eq!(names, ["wallet", "email", "verify_time", "custom_id"]);
  assert_eq!(class.fields[0].docs.text(), "The user's wallet data.");
  assert_eq!(class.fields[1].docs.text(), "Email address");
  assert!(class.fields[2].docs.is_empty());
  assert_eq!(class.fields[3].docs.text(), "Custom id");
  assert_eq!(class.fields[1].backing_name(), "_email");
  assert!(class.extra_members.is_empty());
}

#[test]
fn test_field_warnings_name_class_and_property() {
  let registry = registry(json!({}));
  let resolver = TypeResolver::new(&registry);
  let converter = StructConverter::new(&resolver, &NoSnippets);

  let output = converter.convert(
    "apiLeaderboardRecord",
    &definition(json!({
      "properties": {
        "score": { "type": "number" },
        "owner": { "$ref": "#/definitions/apiUser" }
      }
    })),
  );

  assert_eq!(output.result.fields[0].ty, TypeDescriptor::Unrecognized("number".to_string()));
  assert_eq!(output.result.fields[1].ty, TypeDescriptor::Object(ClassToken::new("ApiUser")));
  assert_eq!(
    output.warnings,
    vec![
      GenerationWarning::UnrecognizedType {
        context: "ApiLeaderboardRecord.score".to_string(),
        type_tag: "number".to_string(),
      },
      GenerationWarning::UnresolvedReference {
        reference: "apiUser".to_string(),
      },
    ]
  );
}

#[test]
fn test_snippet_members_are_attached_by_class_name() {
  let registry = registry(json!({}));
  let resolver = TypeResolver::new(&registry);
  let snippets = StaticSnippets::new()
    .with_member("ApiSession", "func is_expired() -> bool:\n\treturn false")
    .with_member("ApiAccount", "var unused");
  let converter = StructConverter::new(&resolver, &snippets);

  let session = converter
    .convert("apiSession", &definition(json!({ "properties": { "token": { "type": "string" } } })))
    .result;
  assert_eq!(session.extra_members, ["func is_expired() -> bool:\n\treturn false"]);

  let other = converter.convert("apiGroup", &definition(json!({}))).result;
  assert!(other.extra_members.is_empty());
  assert!(other.fields.is_empty());
}

#[test]
fn test_property_names_become_unique_identifiers() {
  let registry = registry(json!({}));
  let resolver = TypeResolver::new(&registry);
  let converter = StructConverter::new(&resolver, &NoSnippets);

  let output = converter.convert(
    "apiGroup",
    &definition(json!({
      "properties": {
        "class": { "type": "string" },
        "2fa": { "type": "boolean" },
        "user-id": { "type": "string" },
        "user_id": { "type": "string" },
        "_": { "type": "string" },
        "name": { "type": "string" }
      }
    })),
  );

  let fields = output.result.fields;
  let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
  assert_eq!(names, ["class_", "_2fa", "user_id", "user_id_3", "unnamed", "name"]);
  let keys: Vec<_> = fields.iter().map(|f| f.schema_key()).collect();
  assert_eq!(keys, ["class", "2fa", "user-id", "user_id", "_", "name"]);
  assert_eq!(fields[0].backing_name(), "_class_");
  assert!(fields[5].wire_name.is_none());
  assert!(output.warnings.is_empty());
}
