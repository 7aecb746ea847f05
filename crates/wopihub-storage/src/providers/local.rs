//! Local filesystem storage backend.
//!
//! Files live flat under a single root directory. Ids are lower-case while
//! on-disk names keep their original casing, so every lookup resolves the
//! id case-insensitively against the directory entries.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;
use uuid::Uuid;

use wopihub_core::error::{AppError, ErrorKind};
use wopihub_core::result::AppResult;
use wopihub_core::traits::storage::{ByteStream, ChildFile, RootDirectory, WopiStorage};
use wopihub_core::types::FileId;

/// Local filesystem storage backend serving a flat directory of files.
#[derive(Debug, Clone)]
pub struct LocalWopiStorage {
    /// Root directory for all served files.
    root: PathBuf,
}

impl LocalWopiStorage {
    /// Create a backend rooted at the given path, creating it if missing.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a file id to its on-disk path, matching directory entries
    /// case-insensitively. Returns `None` when no entry matches or the
    /// directory is unreadable (access-denied maps to absence).
    async fn resolve(&self, id: &FileId) -> AppResult<Option<PathBuf>> {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if is_absence(&e) => return Ok(None),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    "Failed to list storage root",
                    e,
                ));
            }
        };

        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.to_lowercase() == id.as_str() {
                return Ok(Some(entry.path()));
            }
        }

        Ok(None)
    }

    /// Like `resolve`, but 404s when the file is absent.
    async fn resolve_required(&self, id: &FileId) -> AppResult<PathBuf> {
        self.resolve(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File not found: {id}")))
    }

    fn target_path(&self, name: &str) -> AppResult<PathBuf> {
        if !is_valid_name(name) {
            return Err(AppError::bad_request(format!("Invalid file name: {name}")));
        }
        Ok(self.root.join(name))
    }

    /// Write `data` to `path` through a temp file so readers never observe
    /// a half-written file.
    async fn write_atomic(&self, path: &Path, data: &Bytes) -> AppResult<()> {
        let tmp = self.root.join(format!(".{}.part", Uuid::new_v4()));

        fs::write(&tmp, data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {}", path.display()),
                e,
            )
        })?;

        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace file: {}", path.display()),
                e,
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl WopiStorage for LocalWopiStorage {
    async fn size(&self, id: &FileId) -> AppResult<Option<i64>> {
        let Some(path) = self.resolve(id).await? else {
            return Ok(None);
        };

        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(Some(meta.len() as i64)),
            Ok(_) => Ok(None),
            Err(e) if is_absence(&e) => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stat file: {id}"),
                e,
            )),
        }
    }

    async fn read_only(&self, id: &FileId) -> AppResult<bool> {
        let path = self.resolve_required(id).await?;
        let meta = fs::metadata(&path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to stat file: {id}"), e)
        })?;
        Ok(meta.permissions().readonly())
    }

    async fn version(&self, id: &FileId) -> AppResult<String> {
        let path = self.resolve_required(id).await?;
        let meta = fs::metadata(&path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to stat file: {id}"), e)
        })?;
        Ok(version_of(&meta))
    }

    async fn open(&self, id: &FileId) -> AppResult<ByteStream> {
        let path = self.resolve_required(id).await?;
        let file = fs::File::open(&path).await.map_err(|e| {
            if is_absence(&e) {
                AppError::not_found(format!("File not found: {id}"))
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to open file: {id}"), e)
            }
        })?;

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(|b| b.into()))))
    }

    async fn upload(&self, id: &FileId, data: Bytes) -> AppResult<u64> {
        // Keep the existing on-disk casing when the file already exists.
        let path = match self.resolve(id).await? {
            Some(path) => path,
            None => self.target_path(id.as_str())?,
        };

        let len = data.len() as u64;
        self.write_atomic(&path, &data).await?;

        debug!(id = %id, bytes = len, "Wrote file");
        Ok(len)
    }

    async fn create_or_overwrite(&self, name: &str, data: Bytes) -> AppResult<()> {
        let path = self.target_path(name)?;
        self.write_atomic(&path, &data).await?;

        debug!(name, bytes = data.len(), "Created file");
        Ok(())
    }

    async fn delete(&self, id: &FileId) -> AppResult<()> {
        let path = self.resolve_required(id).await?;
        fs::remove_file(&path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {id}"),
                e,
            )
        })?;

        debug!(id = %id, "Deleted file");
        Ok(())
    }

    async fn rename(&self, id: &FileId, requested: &str) -> AppResult<Option<String>> {
        let source = self.resolve_required(id).await?;
        let target = self.target_path(requested)?;

        // Conflict when another entry already answers to the target name.
        let target_id = FileId::parse(requested);
        if target_id != *id {
            if let Some(existing) = self.resolve(&target_id).await? {
                if existing != source {
                    return Ok(None);
                }
            }
        }

        fs::rename(&source, &target).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to rename {id} -> {requested}"),
                e,
            )
        })?;

        debug!(id = %id, to = requested, "Renamed file");
        Ok(Some(requested.to_string()))
    }

    async fn root(&self) -> AppResult<RootDirectory> {
        let name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.root.display().to_string());

        let mut children = Vec::new();
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to list storage root", e)
        })?;

        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let file_name = entry.file_name().to_string_lossy().to_string();
            if file_name.starts_with('.') {
                continue;
            }

            let meta = entry.metadata().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to get entry metadata", e)
            })?;
            if !meta.is_file() {
                continue;
            }

            children.push(ChildFile {
                name: file_name,
                version: version_of(&meta),
            });
        }

        children.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(RootDirectory { name, children })
    }
}

/// Version a file by its modification time in unix seconds.
fn version_of(meta: &std::fs::Metadata) -> String {
    meta.modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|| "0".to_string())
}

/// Access-denied is reported as absence, the same as not-found.
fn is_absence(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        IoErrorKind::NotFound | IoErrorKind::PermissionDenied
    )
}

/// File names must be a single path segment.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}
