//! Storage adapter trait for pluggable file storage backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;
use crate::types::FileId;

/// A byte stream type used for reading file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// A file visible in the storage root.
#[derive(Debug, Clone)]
pub struct ChildFile {
    /// File name as stored on the backend.
    pub name: String,
    /// Current version of the file.
    pub version: String,
}

/// The storage root directory and its direct file children.
#[derive(Debug, Clone)]
pub struct RootDirectory {
    /// Directory name, compared case-insensitively against folder ids.
    pub name: String,
    /// Files directly under the root.
    pub children: Vec<ChildFile>,
}

/// Trait for the file store a WOPI host serves documents from.
///
/// Backends resolve ids case-insensitively; errors equivalent to "access
/// denied" are reported as absence rather than surfaced to clients.
#[async_trait]
pub trait WopiStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Size of the file in bytes, or `None` if the file does not exist
    /// (or is unreadable, which callers must treat identically).
    async fn size(&self, id: &FileId) -> AppResult<Option<i64>>;

    /// Whether the file is marked read-only on the backend.
    async fn read_only(&self, id: &FileId) -> AppResult<bool>;

    /// Current version string of the file.
    async fn version(&self, id: &FileId) -> AppResult<String>;

    /// Open the file for reading and return its byte stream.
    async fn open(&self, id: &FileId) -> AppResult<ByteStream>;

    /// Replace the file's contents, returning the number of bytes written.
    async fn upload(&self, id: &FileId, data: Bytes) -> AppResult<u64>;

    /// Create a file with the given name, overwriting any existing one.
    async fn create_or_overwrite(&self, name: &str, data: Bytes) -> AppResult<()>;

    /// Delete the file.
    async fn delete(&self, id: &FileId) -> AppResult<()>;

    /// Rename the file to `requested`. Returns the final name, or `None`
    /// when the target name is already taken.
    async fn rename(&self, id: &FileId, requested: &str) -> AppResult<Option<String>>;

    /// The storage root and its file children.
    async fn root(&self) -> AppResult<RootDirectory>;
}
