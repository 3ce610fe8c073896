//! Filesystem tools
//!
//! File read/write and directory listing, confined to a workspace root.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::core::{AnaError, Result};
use crate::tools::registry::Tool;

/// Resolve a tool-supplied path against the workspace root
///
/// Only plain relative paths are accepted; absolute paths and `..`
/// components are rejected so observations cannot leak files outside the
/// workspace.
fn resolve(root: &Path, raw: &str) -> Result<PathBuf> {
    let path = Path::new(raw);

    if path.is_absolute() {
        return Err(AnaError::tool(format!(
            "path '{}' must be relative to the workspace root",
            raw
        )));
    }

    for component in path.components() {
        if matches!(component, Component::ParentDir) {
            return Err(AnaError::tool(format!(
                "path '{}' escapes the workspace root",
                raw
            )));
        }
    }

    Ok(root.join(path))
}

fn require_path(args: &serde_json::Value) -> Result<&str> {
    args.get("path")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AnaError::tool("missing 'path' argument"))
}

/// Tool that reads a file and returns its (possibly truncated) content
pub struct ReadFileTool {
    root: PathBuf,
    default_limit: usize,
}

impl ReadFileTool {
    /// Create a read tool rooted at the given workspace
    pub fn new(root: impl Into<PathBuf>, default_limit: usize) -> Self {
        Self {
            root: root.into(),
            default_limit,
        }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read a text file. Args: path (relative), optional limit (max characters returned)"
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path relative to the workspace root"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum characters to return"
                }
            },
            "required": ["path"]
        })
    }

    async fn invoke(&self, args: &serde_json::Value) -> Result<String> {
        let raw = require_path(args)?;
        let path = resolve(&self.root, raw)?;
        let limit = args
            .get("limit")
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(self.default_limit);

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| AnaError::tool(format!("cannot read '{}': {}", raw, e)))?;

        if content.chars().count() <= limit {
            return Ok(content);
        }

        let truncated: String = content.chars().take(limit).collect();
        Ok(format!(
            "{}\n... (truncated at {} of {} characters)",
            truncated,
            limit,
            content.chars().count()
        ))
    }
}

/// Tool that writes content to a file
pub struct WriteFileTool {
    root: PathBuf,
}

impl WriteFileTool {
    /// Create a write tool rooted at the given workspace
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file, replacing it if present. Args: path (relative), content"
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path relative to the workspace root"
                },
                "content": {
                    "type": "string",
                    "description": "Text to write"
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn invoke(&self, args: &serde_json::Value) -> Result<String> {
        let raw = require_path(args)?;
        let content = args
            .get("content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AnaError::tool("missing 'content' argument"))?;
        let path = resolve(&self.root, raw)?;

        tokio::fs::write(&path, content)
            .await
            .map_err(|e| AnaError::tool(format!("cannot write '{}': {}", raw, e)))?;

        Ok(format!("Wrote {} bytes to {}", content.len(), raw))
    }
}

/// Tool that lists the entries of a directory
pub struct ListDirectoryTool {
    root: PathBuf,
}

impl ListDirectoryTool {
    /// Create a listing tool rooted at the given workspace
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &str {
        "list_directory"
    }

    fn description(&self) -> &str {
        "List directory entries, one per line, directories suffixed with '/'. Args: path (relative)"
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Directory path relative to the workspace root"
                }
            },
            "required": ["path"]
        })
    }

    async fn invoke(&self, args: &serde_json::Value) -> Result<String> {
        let raw = require_path(args)?;
        let path = resolve(&self.root, raw)?;

        let mut reader = tokio::fs::read_dir(&path)
            .await
            .map_err(|e| AnaError::tool(format!("cannot list '{}': {}", raw, e)))?;

        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| AnaError::tool(format!("cannot list '{}': {}", raw, e)))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            entries.push(if is_dir { format!("{}/", name) } else { name });
        }

        entries.sort();

        if entries.is_empty() {
            Ok("(empty)".to_string())
        } else {
            Ok(entries.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> tempfile::TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let root = Path::new("/workspace");
        assert!(resolve(root, "notes.txt").is_ok());
        assert!(resolve(root, "sub/notes.txt").is_ok());
        assert!(resolve(root, "../etc/passwd").is_err());
        assert!(resolve(root, "sub/../../etc").is_err());
        assert!(resolve(root, "/etc/passwd").is_err());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = workspace();
        let write = WriteFileTool::new(dir.path());
        let read = ReadFileTool::new(dir.path(), 4000);

        let out = write
            .invoke(&serde_json::json!({"path": "notes.txt", "content": "hello ana"}))
            .await
            .unwrap();
        assert!(out.contains("9 bytes"));

        let content = read
            .invoke(&serde_json::json!({"path": "notes.txt"}))
            .await
            .unwrap();
        assert_eq!(content, "hello ana");
    }

    #[tokio::test]
    async fn test_read_truncates_at_limit() {
        let dir = workspace();
        std::fs::write(dir.path().join("big.txt"), "a".repeat(100)).unwrap();
        let read = ReadFileTool::new(dir.path(), 4000);

        let content = read
            .invoke(&serde_json::json!({"path": "big.txt", "limit": 10}))
            .await
            .unwrap();
        assert!(content.starts_with("aaaaaaaaaa\n"));
        assert!(content.contains("truncated at 10 of 100 characters"));
    }

    #[tokio::test]
    async fn test_read_missing_file_is_descriptive() {
        let dir = workspace();
        let read = ReadFileTool::new(dir.path(), 4000);

        let err = read
            .invoke(&serde_json::json!({"path": "absent.txt"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }

    #[tokio::test]
    async fn test_missing_path_argument() {
        let dir = workspace();
        let read = ReadFileTool::new(dir.path(), 4000);

        let err = read.invoke(&serde_json::json!({})).await.unwrap_err();
        assert!(err.to_string().contains("missing 'path'"));
    }

    #[tokio::test]
    async fn test_list_directory_marks_subdirs() {
        let dir = workspace();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("file.txt"), "x").unwrap();
        let list = ListDirectoryTool::new(dir.path());

        let listing = list.invoke(&serde_json::json!({"path": "."})).await.unwrap();
        assert_eq!(listing, "file.txt\nsub/");
    }

    #[tokio::test]
    async fn test_list_empty_directory() {
        let dir = workspace();
        let list = ListDirectoryTool::new(dir.path());
        let listing = list.invoke(&serde_json::json!({"path": "."})).await.unwrap();
        assert_eq!(listing, "(empty)");
    }
}
