use std::fmt::{self, Write};

use super::{ScriptWriter, ToScript};
use crate::generator::ast::{ClassDef, FieldDef, TypeDescriptor};

/// A data class: schema table, typed accessors and the (de)serialization
/// entry points used by `NakamaSerializer`.
pub(crate) struct ClassFragment<'a> {
  def: &'a ClassDef,
  base_class: &'a str,
}

impl<'a> ClassFragment<'a> {
  pub(crate) fn new(def: &'a ClassDef, base_class: &'a str) -> Self {
    Self { def, base_class }
  }

  fn write_lifecycle(&self, out: &mut ScriptWriter) -> fmt::Result {
    let name = &self.def.name;

    writeln!(out)?;
    writeln!(out, "func _init(p_exception = null).(p_exception):")?;
    out.indented(|out| writeln!(out, "pass"))?;

    writeln!(out)?;
    writeln!(out, "static func create(p_ns : GDScript, p_dict : Dictionary) -> {name}:")?;
    out.indented(|out| {
      writeln!(
        out,
        "return _safe_ret(NakamaSerializer.deserialize(p_ns, \"{name}\", p_dict), {name}) as {name}"
      )
    })?;

    writeln!(out)?;
    writeln!(out, "func serialize() -> Dictionary:")?;
    out.indented(|out| writeln!(out, "return NakamaSerializer.serialize(self)"))
  }

  fn write_to_string(&self, out: &mut ScriptWriter) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "func _to_string() -> String:")?;
    out.indented(|out| {
      writeln!(out, "if is_exception():")?;
      out.indented(|out| writeln!(out, "return get_exception()._to_string()"))?;
      writeln!(out, "var output : String = \"\"")?;
      for field in &self.def.fields {
        out.emit(&DisplayFragment(field))?;
      }
      writeln!(out, "return output")
    })
  }
}

impl ToScript for ClassFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    out.emit(&self.def.docs)?;
    writeln!(out, "class {} extends {}:", self.def.name, self.base_class)?;
    out.indented(|out| {
      writeln!(out)?;
      out.emit(&SchemaTableFragment(&self.def.fields))?;
      for field in &self.def.fields {
        out.emit(&FieldFragment(field))?;
      }
      self.write_lifecycle(out)?;
      self.write_to_string(out)?;
      for member in &self.def.extra_members {
        writeln!(out)?;
        out.verbatim(member)?;
      }
      Ok(())
    })
  }
}

/// `const _SCHEMA`: the runtime type table consumed by the serializer.
struct SchemaTableFragment<'a>(&'a [FieldDef]);

impl ToScript for SchemaTableFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    writeln!(out, "const _SCHEMA = {{")?;
    out.indented(|out| {
      for field in self.0 {
        write!(
          out,
          "\"{}\": {{\"name\": \"{}\", \"type\": {}, \"required\": false",
          field.schema_key(),
          field.backing_name(),
          field.ty.schema_tag()
        )?;
        if let Some(content) = field.ty.content_tag() {
          write!(out, ", \"content\": {content}")?;
        }
        writeln!(out, "}},")?;
      }
      Ok(())
    })?;
    writeln!(out, "}}")
  }
}

/// Public property, raw backing slot and the coercing getter.
struct FieldFragment<'a>(&'a FieldDef);

impl ToScript for FieldFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    let field = self.0;
    let name = &field.name;
    let backing = field.backing_name();
    let type_name = field.ty.type_name();

    writeln!(out)?;
    out.emit(&field.docs)?;
    writeln!(out, "var {name} : {type_name} setget , _get_{name}")?;
    writeln!(out, "var {backing} = null")?;
    writeln!(out, "func _get_{name}() -> {type_name}:")?;
    out.indented(|out| match &field.ty {
      TypeDescriptor::Object(_) => writeln!(out, "return {backing} as {type_name}"),
      TypeDescriptor::Map(_) => writeln!(
        out,
        "return Dictionary() if not {backing} is Dictionary else {backing}.duplicate()"
      ),
      TypeDescriptor::Enum { variants, .. } => writeln!(
        out,
        "return {} if not {backing} is int or {backing} < 0 or {backing} >= {variants} else {backing}",
        field.ty.default_literal()
      ),
      TypeDescriptor::Unrecognized(_) => writeln!(out, "return {backing}"),
      ty => writeln!(
        out,
        "return {} if not {backing} is {} else {type_name}({backing})",
        ty.default_literal(),
        ty.loose_type_name()
      ),
    })
  }
}

/// One `field: value, ` segment of `_to_string()`.
struct DisplayFragment<'a>(&'a FieldDef);

impl ToScript for DisplayFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    let field = self.0;
    let name = &field.name;
    let backing = field.backing_name();

    if field.ty.is_array() {
      writeln!(out, "output += \"{name}: %s, \" % [{backing}]")
    } else if field.ty.is_map() {
      let map_string = format!("{name}_map_string");
      writeln!(out, "var {map_string} : String = \"\"")?;
      writeln!(out, "if typeof({backing}) == TYPE_DICTIONARY:")?;
      out.indented(|out| {
        writeln!(out, "for k in {backing}:")?;
        out.indented(|out| writeln!(out, "{map_string} += \"{{%s=%s}}, \" % [k, {backing}[k]]"))
      })?;
      writeln!(out, "output += \"{name}: [%s], \" % {map_string}")
    } else {
      writeln!(out, "output += \"{name}: %s, \" % {backing}")
    }
  }
}
