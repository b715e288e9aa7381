//! Virtual filesystem for in-memory compilation
//!
//! Templates, QR images, the logo and the BOL manifest are all mounted here, so
//! a compilation never reads from the real filesystem.

use std::collections::HashMap;

use typst::foundations::Bytes;
use typst::syntax::{FileId, Source, VirtualPath};

use crate::compiler::errors::RenderError;

pub const MAIN_PATH: &str = "/main.typ";

/// A virtual filesystem for in-memory compilation
#[derive(Debug, Default)]
pub struct VirtualFilesystem {
    files: HashMap<FileId, Bytes>,
    paths: HashMap<String, FileId>,
}

impl VirtualFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the main source file, returning its id
    pub fn mount_main(&mut self, source: String) -> FileId {
        let id = FileId::new(None, VirtualPath::new(MAIN_PATH));
        self.files.insert(id, Bytes::from(source.into_bytes()));
        self.paths.insert(MAIN_PATH.to_string(), id);
        id
    }

    /// Mount an additional file such as an image or a data file
    pub fn mount_file(&mut self, path: &str, content: Bytes) -> Result<FileId, RenderError> {
        if path.split(['/', '\\']).any(|part| part == "..") {
            return Err(RenderError::PathSecurityViolation(format!(
                "path traversal is not allowed: {}",
                path
            )));
        }

        let normalized = normalize_path(path);
        let id = FileId::new(None, VirtualPath::new(&normalized));
        self.files.insert(id, content);
        self.paths.insert(normalized, id);
        Ok(id)
    }

    /// Get a source file by ID (for .typ files)
    pub fn source(&self, id: FileId) -> Option<Source> {
        let bytes = self.files.get(&id)?;
        let text = std::str::from_utf8(bytes).ok()?;
        Some(Source::new(id, text.to_string()))
    }

    /// Get a binary file by ID (for images and data)
    pub fn file(&self, id: FileId) -> Option<&Bytes> {
        self.files.get(&id)
    }

    /// Look up a file by path
    pub fn lookup(&self, path: &str) -> Option<FileId> {
        self.paths.get(&normalize_path(path)).copied()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Rooted path with single slashes
fn normalize_path(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    format!("/{}", parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_main() {
        let mut fs = VirtualFilesystem::new();
        let id = fs.mount_main("Hello, World!".to_string());

        assert_eq!(fs.lookup(MAIN_PATH), Some(id));
        assert!(fs.source(id).unwrap().text().contains("Hello"));
    }

    #[test]
    fn test_path_traversal_blocked() {
        let mut fs = VirtualFilesystem::new();
        let result = fs.mount_file("../../../etc/passwd", Bytes::from_static(&[]));

        assert!(matches!(result, Err(RenderError::PathSecurityViolation(_))));
        assert!(fs.is_empty());
    }

    #[test]
    fn test_mount_asset_normalized() {
        let mut fs = VirtualFilesystem::new();
        let content = Bytes::from(b"<svg/>".to_vec());
        let id = fs.mount_file("qr//1001.svg", content.clone()).unwrap();

        assert_eq!(fs.lookup("/qr/1001.svg"), Some(id));
        assert_eq!(fs.file(id), Some(&content));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("bol.json"), "/bol.json");
        assert_eq!(normalize_path("/a//b/"), "/a/b");
    }
}
