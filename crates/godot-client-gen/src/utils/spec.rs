use std::path::{Path, PathBuf};

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

use crate::generator::ir::SwaggerDocument;

/// Failure to turn an input path into a [`SwaggerDocument`].
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
  #[error("unable to read {}: {message}", path.display())]
  Open { path: PathBuf, message: String },
  #[error("unable to decode {} at '{location}': {source}", path.display())]
  Decode {
    path: PathBuf,
    location: String,
    #[source]
    source: serde_json::Error,
  },
}

/// Memory-maps a Swagger JSON document and decodes it.
pub struct SpecLoader {
  file: AsyncMmapFile,
  path: PathBuf,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> Result<Self, DocumentError> {
    let file = AsyncMmapFile::open(path).await.map_err(|e| DocumentError::Open {
      path: path.to_path_buf(),
      message: e.to_string(),
    })?;

    Ok(Self {
      file,
      path: path.to_path_buf(),
    })
  }

  /// Decodes the mapped bytes, reporting the JSON path of the first failure.
  pub fn parse(&self) -> Result<SwaggerDocument, DocumentError> {
    decode(&self.path, self.file.as_slice())
  }
}

pub(crate) fn decode(path: &Path, bytes: &[u8]) -> Result<SwaggerDocument, DocumentError> {
  let mut deserializer = serde_json::Deserializer::from_slice(bytes);
  let document = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| DocumentError::Decode {
    path: path.to_path_buf(),
    location: e.path().to_string(),
    source: e.into_inner(),
  })?;
  deserializer.end().map_err(|source| DocumentError::Decode {
    path: path.to_path_buf(),
    location: ".".to_string(),
    source,
  })?;
  Ok(document)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_decode_reports_json_path() {
    let json = br#"{ "definitions": { "apiAccount": { "properties": { "email": { "type": 7 } } } } }"#;
    let err = decode(Path::new("api.json"), json).unwrap_err();
    let DocumentError::Decode { location, .. } = &err else {
      panic!("expected decode error, got {err:?}");
    };
    assert_eq!(location, "definitions.apiAccount.properties.email.type");
    assert!(err.to_string().starts_with("unable to decode api.json at 'definitions.apiAccount.properties.email.type'"));
  }

  #[test]
  fn test_decode_rejects_trailing_content() {
    let err = decode(Path::new("api.json"), b"{} {}").unwrap_err();
    assert!(matches!(err, DocumentError::Decode { .. }));
  }

  #[test]
  fn test_decode_accepts_minimal_document() {
    let document = decode(Path::new("api.json"), br#"{ "swagger": "2.0" }"#).unwrap();
    assert!(document.paths.is_empty());
    assert!(document.definitions.is_empty());
  }
}
