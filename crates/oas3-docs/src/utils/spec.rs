use std::{
  ffi::OsStr,
  path::{Path, PathBuf},
};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use oas3_docs_core::{ApiReference, OpenApiDocument, SlugOptions};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }
}

/// A memory-mapped spec file waiting to be parsed.
pub struct SpecLoader {
  path: PathBuf,
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open spec file: {}", path.display()))?;

    Ok(Self {
      path: path.to_path_buf(),
      file,
      format: SpecFormat::from_path(path),
    })
  }

  #[must_use]
  pub fn format(&self) -> SpecFormat {
    self.format
  }

  /// Parses the file into raw JSON.
  ///
  /// YAML mapping keys that are not strings (`200:`) are converted to their
  /// string form, matching what a JSON document would carry.
  pub fn parse(&self) -> anyhow::Result<Value> {
    let bytes = self.file.as_slice();
    let raw = match self.format {
      SpecFormat::Json => serde_json::from_slice::<Value>(bytes)
        .with_context(|| format!("invalid JSON in {}", self.path.display()))?,
      SpecFormat::Yaml => {
        let yaml = serde_yaml::from_slice::<serde_yaml::Value>(bytes)
          .with_context(|| format!("invalid YAML in {}", self.path.display()))?;
        serde_json::to_value(yaml).with_context(|| format!("unsupported YAML structure in {}", self.path.display()))?
      }
    };
    Ok(raw)
  }

  /// Parses and validates the file, returning a session over it.
  pub fn load(&self, options: SlugOptions) -> anyhow::Result<ApiReference> {
    let document = OpenApiDocument::from_value(self.parse()?)
      .with_context(|| format!("not a usable OpenAPI document: {}", self.path.display()))?;

    tracing::debug!(
      path = %self.path.display(),
      operations = document.operations().count(),
      "loaded OpenAPI document"
    );
    Ok(ApiReference::with_options(document, options))
  }
}

/// Opens and loads `path` in one step.
pub async fn load_reference(path: &Path, options: SlugOptions) -> anyhow::Result<ApiReference> {
  SpecLoader::open(path).await?.load(options)
}
