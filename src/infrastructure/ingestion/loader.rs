//! File-system document loader and source discovery

use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, warn};

use crate::domain::ingestion::{
    Document, DocumentLoader, SourceKind, SourceLoadError, SourceSpec, SOURCE_KEY,
};
use crate::domain::DomainError;

/// Metadata key holding a JSON array item's position
pub const ITEM_INDEX_KEY: &str = "item_index";

/// Loads `.txt`, `.md` and `.json` files from disk
#[derive(Debug, Clone, Default)]
pub struct FileDocumentLoader;

impl FileDocumentLoader {
    pub fn new() -> Self {
        Self
    }

    fn load_json(source: &SourceSpec, raw: &str) -> Result<Vec<Document>, SourceLoadError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| SourceLoadError::Decode {
                path: source.path.clone(),
                message: e.to_string(),
            })?;

        let origin = source.display_path();

        match value {
            serde_json::Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    Ok(Document::new(Self::to_json_text(source, item)?)
                        .with_metadata(SOURCE_KEY, origin.as_str())
                        .with_metadata(ITEM_INDEX_KEY, index.to_string()))
                })
                .collect(),
            object @ serde_json::Value::Object(_) => {
                let content = Self::to_json_text(source, &object)?;
                Ok(vec![Document::new(content).with_metadata(SOURCE_KEY, origin)])
            }
            _ => {
                warn!(source = %origin, "JSON source is neither an array nor an object, skipping");
                Ok(vec![])
            }
        }
    }

    fn to_json_text(source: &SourceSpec, value: &serde_json::Value) -> Result<String, SourceLoadError> {
        serde_json::to_string(value).map_err(|e| SourceLoadError::Decode {
            path: source.path.clone(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl DocumentLoader for FileDocumentLoader {
    async fn load(&self, source: &SourceSpec) -> Result<Vec<Document>, SourceLoadError> {
        let raw = tokio::fs::read_to_string(&source.path)
            .await
            .map_err(|e| SourceLoadError::Read {
                path: source.path.clone(),
                message: e.to_string(),
            })?;

        let documents = match source.kind {
            SourceKind::Text => {
                vec![Document::new(raw).with_metadata(SOURCE_KEY, source.display_path())]
            }
            SourceKind::Json => Self::load_json(source, &raw)?,
        };

        debug!(source = %source.display_path(), documents = documents.len(), "Loaded source");
        Ok(documents)
    }
}

/// List the loadable files directly inside `data_dir`, sorted by path.
/// A missing directory yields no sources.
pub async fn discover_sources(data_dir: &Path) -> Result<Vec<SourceSpec>, DomainError> {
    let mut entries = match tokio::fs::read_dir(data_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(data_dir = %data_dir.display(), "Data directory does not exist");
            return Ok(vec![]);
        }
        Err(e) => {
            return Err(DomainError::storage(format!(
                "Failed to read data directory {}: {}",
                data_dir.display(),
                e
            )));
        }
    };

    let mut sources = Vec::new();

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list {}: {}", data_dir.display(), e)))?
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        match SourceSpec::from_path(path) {
            Ok(spec) => sources.push(spec),
            Err(e) => debug!(error = %e, "Ignoring file"),
        }
    }

    sources.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> SourceSpec {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        SourceSpec::from_path(path).unwrap()
    }

    #[tokio::test]
    async fn test_text_file_is_one_document() {
        let dir = TempDir::new().unwrap();
        let source = write(&dir, "policies.txt", "Employees get 20 days of leave.");

        let docs = FileDocumentLoader::new().load(&source).await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content(), "Employees get 20 days of leave.");
        assert_eq!(docs[0].source(), Some(source.display_path().as_str()));
    }

    #[tokio::test]
    async fn test_json_array_yields_one_document_per_item() {
        let dir = TempDir::new().unwrap();
        let source = write(
            &dir,
            "faq.json",
            r#"[{"q": "Dress code?", "a": "Business casual"}, {"q": "Parking?", "a": "Free"}]"#,
        );

        let docs = FileDocumentLoader::new().load(&source).await.unwrap();

        assert_eq!(docs.len(), 2);
        let first: serde_json::Value = serde_json::from_str(docs[0].content()).unwrap();
        assert_eq!(first, serde_json::json!({"q": "Dress code?", "a": "Business casual"}));
        assert!(!docs[0].content().contains('\n'));
        assert_eq!(docs[1].metadata().get(ITEM_INDEX_KEY).map(String::as_str), Some("1"));
    }

    #[tokio::test]
    async fn test_json_object_is_one_document() {
        let dir = TempDir::new().unwrap();
        let source = write(&dir, "org.json", r#"{"ceo": "Jane"}"#);

        let docs = FileDocumentLoader::new().load(&source).await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].metadata().get(ITEM_INDEX_KEY), None);
    }

    #[tokio::test]
    async fn test_json_scalar_is_skipped() {
        let dir = TempDir::new().unwrap();
        let source = write(&dir, "number.json", "42");

        let docs = FileDocumentLoader::new().load(&source).await.unwrap();

        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let source = write(&dir, "broken.json", "{not json");

        let err = FileDocumentLoader::new().load(&source).await.unwrap_err();

        assert!(matches!(err, SourceLoadError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let source = SourceSpec::from_path("/nonexistent/handbook.txt").unwrap();

        let err = FileDocumentLoader::new().load(&source).await.unwrap_err();

        assert!(matches!(err, SourceLoadError::Read { .. }));
    }

    #[tokio::test]
    async fn test_discover_sources_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.txt", "b");
        write(&dir, "a.json", "[]");
        std::fs::write(dir.path().join("notes.docx"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let sources = discover_sources(dir.path()).await.unwrap();
        let names: Vec<_> = sources
            .iter()
            .map(|s| s.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.json", "b.txt"]);
    }

    #[tokio::test]
    async fn test_discover_missing_dir_is_empty() {
        let sources = discover_sources(Path::new("/nonexistent/data")).await.unwrap();
        assert!(sources.is_empty());
    }
}
