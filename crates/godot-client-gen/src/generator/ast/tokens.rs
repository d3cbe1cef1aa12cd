use std::fmt::{Display, Formatter};

use string_cache::DefaultAtom;

use crate::generator::naming::identifiers::{operation_method_name, prepend_argument_prefix, ref_to_class_name};

macro_rules! atom_token {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct $name(DefaultAtom);

    impl $name {
      pub fn new(value: impl AsRef<str>) -> Self {
        Self(DefaultAtom::from(value.as_ref()))
      }

      #[allow(dead_code)]
      pub fn as_str(&self) -> &str {
        &self.0
      }
    }

    impl Display for $name {
      fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl PartialEq<&str> for $name {
      fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
      }
    }
  };
}

atom_token!(
  /// Name of a generated class or enum (`ApiAccount`).
  ClassToken
);

atom_token!(
  /// Name of a generated client method, without the `_async` suffix.
  MethodNameToken
);

atom_token!(
  /// Formal argument of a generated client method (`p_group_id`).
  ArgumentToken
);

impl ClassToken {
  pub fn from_ref(reference: &str) -> Self {
    Self::new(ref_to_class_name(reference))
  }
}

impl MethodNameToken {
  pub fn from_operation_id(operation_id: &str, prefix_len: usize) -> Self {
    Self::new(operation_method_name(operation_id, prefix_len))
  }
}

impl ArgumentToken {
  pub fn from_parameter(prefix: &str, name: &str) -> Self {
    Self::new(prepend_argument_prefix(prefix, name))
  }
}
