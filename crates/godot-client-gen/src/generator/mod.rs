pub(crate) mod ast;
pub(crate) mod codegen;
pub(crate) mod converter;
pub(crate) mod ir;
pub(crate) mod metrics;
pub(crate) mod naming;
pub mod orchestrator;
pub(crate) mod schema_registry;

#[cfg(test)]
mod tests;
