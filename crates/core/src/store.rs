use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// A whole-document JSON file on local disk.
///
/// A missing, unreadable or syntactically broken file reads as the
/// document's default. Well-formed JSON that does not fit the document type
/// is an error naming the file and the offending field. Saving overwrites
/// the file wholesale.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load<T: DeserializeOwned + Default>(&self) -> Result<T> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "file not found, using empty document");
                return Ok(T::default());
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read file, using empty document");
                return Ok(T::default());
            }
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }

        let mut de = serde_json::Deserializer::from_slice(&data);
        let parsed = serde_path_to_error::deserialize::<_, T>(&mut de).map_err(|e| {
            let field = e.path().to_string();
            (field, e.into_inner())
        });
        let err = match parsed.map(|doc| (doc, de.end())) {
            Ok((doc, Ok(()))) => return Ok(doc),
            Ok((_, Err(e))) => e,
            Err((field, e)) if e.is_data() => {
                return Err(anyhow::Error::new(e).context(format!(
                    "{}: unexpected value at `{field}`",
                    self.path.display()
                )));
            }
            Err((_, e)) => e,
        };
        warn!(path = %self.path.display(), error = %err, "malformed JSON, using empty document");
        Ok(T::default())
    }

    pub async fn save<T: Serialize>(&self, doc: &T) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let data = to_pretty_json(doc)?;
        tokio::fs::write(&self.path, data)
            .await
            .with_context(|| format!("failed to write: {}", self.path.display()))
    }

    /// Overwrites the file with an empty JSON object.
    pub async fn clear(&self) -> Result<()> {
        self.save(&serde_json::Map::new()).await
    }
}

/// UTF-8 JSON indented by four spaces, non-ASCII left unescaped.
pub fn to_pretty_json<T: Serialize>(doc: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    doc.serialize(&mut ser).context("failed to serialize JSON document")?;
    Ok(out)
}
