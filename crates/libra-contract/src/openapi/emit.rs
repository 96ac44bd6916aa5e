//! Rendering and writing generated documents.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use libra_schema::FileUpload;
use serde_json::Value;
use tokio::task::JoinSet;

use super::TRACING_TARGET;
use super::document::OpenApiDocument;
use crate::{Error, Result};

/// Default output locations, relative to the working directory.
pub const DEFAULT_OUTPUT_PATHS: [&str; 2] =
    ["./openapi.json", "../../apps/api/static/openapi.json"];

/// OpenAPI representation of an uploaded file.
pub const BINARY_FILE_SCHEMA: &str = r#"{"type":"string","format":"binary"}"#;

/// Serializes a document as pretty-printed JSON.
///
/// Every schema equal to the file upload marker is replaced by the OpenAPI
/// binary string format. Object comparison ignores key order.
pub fn render_document(document: &OpenApiDocument) -> Result<String> {
    let marker = serde_json::to_value(FileUpload::marker_schema())?;
    let binary: Value = serde_json::from_str(BINARY_FILE_SCHEMA)?;

    let mut value = serde_json::to_value(document)?;
    replace_schema(&mut value, &marker, &binary);
    Ok(serde_json::to_string_pretty(&value)?)
}

fn replace_schema(value: &mut Value, marker: &Value, replacement: &Value) {
    if value == marker {
        *value = replacement.clone();
        return;
    }

    match value {
        Value::Object(map) => {
            for child in map.values_mut() {
                replace_schema(child, marker, replacement);
            }
        }
        Value::Array(items) => {
            for item in items {
                replace_schema(item, marker, replacement);
            }
        }
        _ => {}
    }
}

/// Writes `contents` to every path concurrently.
///
/// Each write logs its own outcome and never aborts its siblings. Fails once
/// all writes have completed if any of them failed.
pub async fn write_document<P>(contents: &str, paths: &[P]) -> Result<()>
where
    P: AsRef<Path>,
{
    let contents: Arc<str> = Arc::from(contents);
    let mut writes = JoinSet::new();

    for path in paths {
        let path: PathBuf = path.as_ref().to_path_buf();
        let contents = Arc::clone(&contents);
        writes.spawn(async move {
            let result = tokio::fs::write(&path, contents.as_bytes()).await;
            (path, result)
        });
    }

    let mut failed = 0usize;
    while let Some(joined) = writes.join_next().await {
        match joined {
            Ok((path, Ok(()))) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    path = %path.display(),
                    "OpenAPI document written"
                );
            }
            Ok((path, Err(error))) => {
                failed += 1;
                tracing::error!(
                    target: TRACING_TARGET,
                    path = %path.display(),
                    error = %error,
                    "Failed to write OpenAPI document"
                );
            }
            Err(error) => {
                failed += 1;
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "OpenAPI write task failed"
                );
            }
        }
    }

    if failed > 0 {
        return Err(Error::io(format!(
            "failed to write {failed} of {} OpenAPI documents",
            paths.len()
        )));
    }

    Ok(())
}
