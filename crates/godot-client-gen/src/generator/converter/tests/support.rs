use serde_json::Value;

use crate::generator::{
  ir::{Definition, Parameter, PropertySpec, SwaggerDocument},
  schema_registry::SchemaRegistry,
};

pub(super) fn registry(definitions: Value) -> SchemaRegistry {
  SchemaRegistry::new(serde_json::from_value(definitions).expect("valid definitions"))
}

pub(super) fn property(json: Value) -> PropertySpec {
  serde_json::from_value(json).expect("valid property")
}

pub(super) fn parameter(json: Value) -> Parameter {
  serde_json::from_value(json).expect("valid parameter")
}

pub(super) fn definition(json: Value) -> Definition {
  serde_json::from_value(json).expect("valid definition")
}

pub(super) fn document(json: Value) -> SwaggerDocument {
  serde_json::from_value(json).expect("valid document")
}
