use crate::generator::{
  codegen::StaticSnippets,
  converter::CodegenConfig,
  ir::SwaggerDocument,
  metrics::GenerationWarning,
  orchestrator::Orchestrator,
};

fn nakama_document() -> SwaggerDocument {
  serde_json::from_str(include_str!("../../../fixtures/nakama_api.json")).unwrap()
}

fn generate() -> (String, crate::generator::metrics::GenerationStats) {
  Orchestrator::new(nakama_document(), CodegenConfig::default())
    .generate_with_header("fixtures/nakama_api.json")
    .unwrap()
}

#[test]
fn test_orchestrator_metadata() {
  let orchestrator = Orchestrator::new(nakama_document(), CodegenConfig::default());
  let metadata = orchestrator.metadata();
  assert_eq!(metadata.title.as_deref(), Some("Nakama API v2"));
  assert_eq!(metadata.version.as_deref(), Some("2.0"));
  assert_eq!(metadata.description.as_deref(), Some("The REST API of the Nakama server."));
}

#[test]
fn test_orchestrator_statistics() {
  let (_, stats) = generate();
  assert_eq!(stats.types_generated, 12);
  assert_eq!(stats.classes_generated, 11);
  assert_eq!(stats.enums_generated, 1);
  assert_eq!(stats.operations_converted, 8);
  assert_eq!(stats.session_operations, 4);
  assert_eq!(stats.client_methods_generated, 9);
  assert_eq!(
    stats.warnings,
    vec![GenerationWarning::UnrecognizedType {
      context: "ApiLeaderboardRecord.score".to_string(),
      type_tag: "number".to_string(),
    }]
  );
}

#[test]
fn test_get_account_end_to_end() {
  let (code, _) = generate();

  assert!(code.starts_with(
    "### Code generated by godot-client-gen. DO NOT EDIT. ###\n### Source: fixtures/nakama_api.json\n### Nakama API v2 2.0\n\nextends Reference\nclass_name NakamaAPI\n"
  ));
  assert!(code.contains("class ApiAccount extends NakamaAsyncResult:\n"));
  assert!(code.contains("\tvar email : String setget , _get_email\n\tvar _email = null\n"));
  assert!(code.contains("\t\treturn \"\" if not _email is String else String(_email)\n"));
  assert!(code.contains("\t\"devices\": {\"name\": \"_devices\", \"type\": TYPE_ARRAY, \"required\": false, \"content\": \"ApiAccountDevice\"},\n"));

  let method_start = code.find("\tfunc get_account_async(\n").expect("get_account_async");
  let method = &code[method_start..];
  let method = &method[..method[1..].find("\n\t###").map_or(method.len(), |end| end + 1)];
  assert!(method.contains("\t\tp_session : NakamaSession\n\t) -> ApiAccount:\n"));
  assert!(method.contains("var try_refresh = _refresh_session(p_session)"));
  assert!(method.contains("\t\tvar urlpath : String = \"/v2/account\"\n"));
  assert!(method.contains("\t\tvar method = \"GET\"\n"));
  assert!(method.contains("\t\t\treturn ApiAccount.new(result)\n"));
  assert!(method.contains("\t\tvar out : ApiAccount = NakamaSerializer.deserialize(_namespace, \"ApiAccount\", result)\n"));
}

#[test]
fn test_refresh_helper_uses_session_refresh() {
  let (code, _) = generate();
  assert!(code.contains("\tfunc _refresh_session(p_session : NakamaSession):\n"));
  assert!(code.contains("var request = ApiSessionRefreshRequest.new()"));
  assert!(code.contains("var result = yield(session_refresh_async(_server_key, \"\", request), \"completed\")"));
  assert!(code.contains("\tfunc session_refresh_async(\n\t\tp_basic_auth_username : String\n\t\t, p_basic_auth_password : String\n\t\t, p_body : ApiSessionRefreshRequest\n\t) -> ApiSession:\n"));
}

#[test]
fn test_enum_block_and_usage() {
  let (code, _) = generate();
  assert!(code.contains("### Operator that can be used to override the one set in the leaderboard.\n### </summary>\nenum ApiOperator {\n"));
  assert!(code.contains("\t### Do not override the leaderboard operator.\n\t### </summary>\n\tNO_OVERRIDE = 0,\n"));
  assert!(code.contains("\tDECREMENT = 4,\n}\n"));
  assert!(code.contains("\t\treturn 0 if not _operator is int or _operator < 0 or _operator >= 5 else _operator\n"));
}

#[test]
fn test_unrecognized_type_is_marked_in_output() {
  let (code, _) = generate();
  assert!(code.contains("\tvar score : <ERROR: unrecognized type 'number'> setget , _get_score\n"));
  assert!(code.contains("\t\treturn _score\n"));
}

#[test]
fn test_types_follow_declaration_order() {
  let (code, _) = generate();
  let positions: Vec<_> = [
    "class GroupUserListGroupUser ",
    "class ApiAccount ",
    "class ApiAccountDevice ",
    "class ApiGroupUserList ",
    "class ApiLeaderboardRecord ",
    "enum ApiOperator ",
    "class ApiRpc ",
    "class ApiSession ",
    "class ApiSessionRefreshRequest ",
    "class ApiUpdateAccountRequest ",
    "class ApiUser ",
    "class ApiUsers ",
    "class ApiClient ",
  ]
  .iter()
  .map(|needle| code.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
  .collect();
  assert!(positions.windows(2).all(|w| w[0] < w[1]), "out of order: {positions:?}");
}

#[test]
fn test_methods_follow_path_and_verb_order() {
  let (code, _) = generate();
  let positions: Vec<_> = [
    "func get_account_async(",
    "func update_account_async(",
    "func authenticate_device_async(",
    "func session_refresh_async(",
    "func list_group_users_async(",
    "func get_users_async(",
    "func rpc_func_async(",
    "func healthcheck_async(",
  ]
  .iter()
  .map(|needle| code.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
  .collect();
  assert!(positions.windows(2).all(|w| w[0] < w[1]), "out of order: {positions:?}");
}

#[test]
fn test_query_and_path_encoding_in_context() {
  let (code, _) = generate();
  assert!(code.contains(
    "\t\tif p_ids != null:\n\t\t\tfor elem in p_ids:\n\t\t\t\tquery_params += \"ids=%s&\" % NakamaSerializer.escape_http(elem)\n"
  ));
  assert!(code.contains("\t\t\tquery_params += \"limit=%d&\" % p_limit\n"));
  assert!(code.contains("\t\t\tquery_params += \"create=%s&\" % str(bool(p_create)).to_lower()\n"));
  assert!(code.contains("urlpath.replace(\"{groupId}\", NakamaSerializer.escape_http(p_group_id))"));
  assert!(code.contains("\t\tcontent = JSON.print(p_body).to_utf8()\n"));
  assert!(code.contains("\t\tcontent = JSON.print(p_account.serialize()).to_utf8()\n"));
  assert!(code.contains("\t\tif (p_bearer_token):\n"));
}

#[test]
fn test_generation_is_deterministic() {
  let (first, first_stats) = generate();
  let (second, second_stats) = generate();
  assert_eq!(first, second);
  assert_eq!(first_stats, second_stats);
}

#[test]
fn test_snippets_and_custom_config() {
  let config = CodegenConfig::builder()
    .api_class_name("GameAPI")
    .result_base_class("GameResult")
    .build();
  let snippets = StaticSnippets::new().with_member("ApiSession", "func is_expired() -> bool:\n\treturn false");

  let (code, _) = Orchestrator::new(nakama_document(), config)
    .with_snippets(snippets)
    .generate()
    .unwrap();

  assert!(!code.contains("### Source:"));
  assert!(code.contains("class_name GameAPI\n"));
  assert!(code.contains("class ApiSession extends GameResult:\n"));
  assert!(code.contains("\n\n\tfunc is_expired() -> bool:\n\t\treturn false\n"));
  assert!(code.contains("\t\treturn GameResult.new()\n"));
}

#[test]
fn test_colliding_names_render_distinct_identifiers() {
  let document: SwaggerDocument = serde_json::from_value(serde_json::json!({
    "paths": {
      "/v2/thing/{userId}": {
        "get": {
          "operationId": "Nakama_DoThing",
          "parameters": [
            { "name": "userId", "in": "path", "required": true, "type": "string" },
            { "name": "user_id", "in": "query", "type": "string" },
            { "name": "session", "in": "query", "type": "string" }
          ],
          "responses": {}
        },
        "post": { "operationId": "Nakama_do_thing", "security": [{ "HttpKeyAuth": [] }], "responses": {} }
      },
      "/v2/ping": {
        "get": { "operationId": "Ping", "security": [{ "HttpKeyAuth": [] }], "responses": {} }
      }
    },
    "definitions": {
      "apiThing": { "type": "object", "properties": { "class": { "type": "string" } } }
    }
  }))
  .unwrap();

  let (code, stats) = Orchestrator::new(document, CodegenConfig::default()).generate().unwrap();

  assert_eq!(code.matches("\tfunc do_thing_async(\n").count(), 1);
  assert!(code.contains("\tfunc do_thing_1_async(\n"));
  assert!(code.contains("\tfunc ping_async(\n"));
  assert!(!code.contains("func _async("));
  assert!(code.contains("\t\tp_session : NakamaSession\n\t\t, p_user_id : String\n\t\t, p_user_id_1 = null # : String\n\t\t, p_session_1 = null # : String\n"));
  assert!(code.contains("query_params += \"user_id=%s&\" % NakamaSerializer.escape_http(p_user_id_1)"));
  assert!(code.contains("\tvar class_ : String setget , _get_class_\n"));
  assert!(code.contains("\t\t\"class\": {\"name\": \"_class_\", \"type\": TYPE_STRING, \"required\": false},\n"));

  let renames = stats
    .warnings
    .iter()
    .filter(|w| matches!(w, GenerationWarning::OperationSpecific { .. }))
    .count();
  assert_eq!(renames, 4);
}
