use std::fmt::{self, Write};

use super::{ScriptWriter, ToScript};
use crate::generator::ast::{EnumDef, EnumVariant};

/// `enum Name { A = 0, B = 1 }` with one doc block per member.
pub(crate) struct EnumFragment<'a> {
  def: &'a EnumDef,
}

impl<'a> EnumFragment<'a> {
  pub(crate) fn new(def: &'a EnumDef) -> Self {
    Self { def }
  }
}

impl ToScript for EnumFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    out.emit(&self.def.docs)?;
    writeln!(out, "enum {} {{", self.def.name)?;
    out.indented(|out| {
      self
        .def
        .variants
        .iter()
        .enumerate()
        .try_for_each(|(ordinal, variant)| out.emit(&VariantFragment { ordinal, variant }))
    })?;
    writeln!(out, "}}")
  }
}

struct VariantFragment<'a> {
  ordinal: usize,
  variant: &'a EnumVariant,
}

impl ToScript for VariantFragment<'_> {
  fn to_script(&self, out: &mut ScriptWriter) -> fmt::Result {
    out.emit(&self.variant.docs)?;
    writeln!(out, "{} = {},", self.variant.name, self.ordinal)
  }
}
