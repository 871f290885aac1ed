// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Opaque binary blobs

use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::error::{Error, Result};

/// Fallback MIME type for untyped data
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Binary data with a MIME type.
///
/// Either held in memory or backed by a file that is read lazily, so a blob
/// pointing at a large upload costs nothing until someone reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    source: BlobSource,
    mime_type: String,
}

#[derive(Debug, Clone, PartialEq)]
enum BlobSource {
    Memory(Bytes),
    File(PathBuf),
}

impl Blob {
    /// Create an in-memory blob
    pub fn new(data: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            source: BlobSource::Memory(data.into()),
            mime_type: mime_type.into(),
        }
    }

    /// Create a file-backed blob; the MIME type is guessed from the extension
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            mime_type: mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
            source: BlobSource::File(path.to_path_buf()),
        }
    }

    /// Override the MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Declared MIME type (may be empty)
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            BlobSource::File(path) => Some(path),
            BlobSource::Memory(_) => None,
        }
    }

    /// Size in bytes, when known without I/O
    pub fn len(&self) -> Option<usize> {
        match &self.source {
            BlobSource::Memory(data) => Some(data.len()),
            BlobSource::File(_) => None,
        }
    }

    /// Whether an in-memory blob is empty
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Load the contents
    pub async fn bytes(&self) -> Result<Bytes> {
        match &self.source {
            BlobSource::Memory(data) => Ok(data.clone()),
            BlobSource::File(path) => tokio::fs::read(path)
                .await
                .map(Bytes::from)
                .map_err(|e| Error::file_read(format!("{}: {}", path.display(), e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_memory_blob() {
        let blob = Blob::new("hello", "text/plain");
        assert_eq!(blob.len(), Some(5));
        assert_eq!(blob.mime_type(), "text/plain");
        assert!(blob.path().is_none());
    }

    #[test]
    fn test_mime_guess() {
        assert_eq!(Blob::from_path("a/b/photo.JPG").mime_type(), "image/jpeg");
        assert_eq!(Blob::from_path("data.bin").mime_type(), OCTET_STREAM);
        assert_eq!(Blob::from_path("no_extension").mime_type(), OCTET_STREAM);
    }

    #[test]
    fn test_mime_guess_media_and_documents() {
        assert_eq!(Blob::from_path("clip.mp4").mime_type(), "video/mp4");
        assert_eq!(Blob::from_path("song.mp3").mime_type(), "audio/mpeg");
        assert_eq!(Blob::from_path("archive.zip").mime_type(), "application/zip");
        assert_eq!(Blob::from_path("app.wasm").mime_type(), "application/wasm");
        assert_eq!(
            Blob::from_path("doc.docx").mime_type(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_ne!(Blob::from_path("font.woff2").mime_type(), OCTET_STREAM);
    }

    #[tokio::test]
    async fn test_file_blob_reads_lazily() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"on disk").unwrap();

        let blob = Blob::from_path(file.path());
        assert_eq!(blob.len(), None);
        assert_eq!(blob.bytes().await.unwrap(), Bytes::from_static(b"on disk"));
    }

    #[tokio::test]
    async fn test_missing_file_is_file_read_error() {
        let blob = Blob::from_path("/definitely/not/here.txt");
        let err = blob.bytes().await.unwrap_err();
        assert!(matches!(err, Error::FileRead(_)));
    }
}
