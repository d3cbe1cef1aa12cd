use super::{ScriptWriter, ToScript};


fn render(item: &impl ToScript) -> String {
  let mut out = ScriptWriter::new();
  out.emit(item).expect("render");
  out.finish()
}
