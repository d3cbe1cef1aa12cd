use std::fmt::{self, Write};

use super::{
  ast::{ClientDef, Documentation, GeneratedType},
  converter::CodegenConfig,
};

pub mod client;
pub mod enums;
mod snippets;
pub mod structs;

#[cfg(test)]
mod tests;

#[cfg(test)]
pub use snippets::StaticSnippets;
pub use snippets::{NoSnippets, SnippetProvider};

use self::{client::ClientFragment, enums::EnumFragment, structs::ClassFragment};

pub const GENERATED_MARKER: &str = "### Code generated by godot-client-gen. DO NOT EDIT. ###";
const INDENT: char = '\t';

/// Something that renders itself as GDScript source.
pub trait ToScript {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result;
}

/// Text sink that indents every line it receives to the current block depth.
#[derive(Debug)]
pub struct ScriptWriter {
  buffer: String,
  depth: usize,
  at_line_start: bool,
}

impl Default for ScriptWriter {
  fn default() -> Self {
    Self::new()
  }
}

impl ScriptWriter {
  pub fn new() -> Self {
    Self {
      buffer: String::new(),
      depth: 0,
      at_line_start: true,
    }
  }

  /// Runs `body` one indentation level deeper.
  pub fn indented(&mut self, body: impl FnOnce(&mut Self) -> fmt::Result) -> fmt::Result {
    self.depth += 1;
    let result = body(self);
    self.depth -= 1;
    result
  }

  pub fn emit(&mut self, item: &impl ToScript) -> fmt::Result {
    item.to_script(self)
  }

  /// Writes `text` followed by a newline unless it already ends in one.
  pub fn verbatim(&mut self, text: &str) -> fmt::Result {
    self.write_str(text)?;
    if text.ends_with('\n') { Ok(()) } else { self.write_char('\n') }
  }

  pub fn finish(self) -> String {
    self.buffer
  }
}

impl Write for ScriptWriter {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    for chunk in s.split_inclusive('\n') {
      if self.at_line_start && chunk != "\n" {
        self.buffer.extend(std::iter::repeat_n(INDENT, self.depth));
      }
      self.buffer.push_str(chunk);
      self.at_line_start = chunk.ends_with('\n');
    }
    Ok(())
  }
}

impl ToScript for Documentation {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    writeln!(out, "### <summary>")?;
    if self.is_empty() {
      writeln!(out, "###")?;
    } else {
      writeln!(out, "### {}", self.text())?;
    }
    writeln!(out, "### </summary>")
  }
}

/// Provenance lines written at the top of the generated script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptHeader {
  pub source: Option<String>,
  pub title: Option<String>,
  pub version: Option<String>,
}

impl ToScript for ScriptHeader {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    writeln!(out, "{GENERATED_MARKER}")?;
    if let Some(source) = &self.source {
      writeln!(out, "### Source: {source}")?;
    }
    match (self.title.as_deref(), self.version.as_deref()) {
      (Some(title), Some(version)) if !version.is_empty() => writeln!(out, "### {title} {version}")?,
      (Some(title), _) => writeln!(out, "### {title}")?,
      _ => {}
    }
    Ok(())
  }
}

/// The complete generated script: header, enums and classes in declaration
/// order, then the `ApiClient`.
pub(crate) struct ScriptFragment<'a> {
  header: &'a ScriptHeader,
  config: &'a CodegenConfig,
  types: &'a [GeneratedType],
  client: &'a ClientDef,
}

impl<'a> ScriptFragment<'a> {
  pub(crate) fn new(
    header: &'a ScriptHeader,
    config: &'a CodegenConfig,
    types: &'a [GeneratedType],
    client: &'a ClientDef,
  ) -> Self {
    Self {
      header,
      config,
      types,
      client,
    }
  }

  pub(crate) fn render(&self) -> Result<String, fmt::Error> {
    let mut out = ScriptWriter::new();
    self.to_script(&mut out)?;
    Ok(out.finish())
  }
}

impl ToScript for ScriptFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    out.emit(self.header)?;
    writeln!(out)?;
    writeln!(out, "extends Reference")?;
    writeln!(out, "class_name {}", self.config.api_class_name)?;

    for generated in self.types {
      writeln!(out)?;
      match generated {
        GeneratedType::Enum(def) => out.emit(&EnumFragment::new(def))?,
        GeneratedType::Class(def) => out.emit(&ClassFragment::new(def, &self.config.result_base_class))?,
      }
    }

    writeln!(out)?;
    out.emit(&ClientFragment::new(self.client, self.config))
  }
}
