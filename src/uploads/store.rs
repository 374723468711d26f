use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::types::{ItemId, RemoteObjectId};

/// A file saved in the local upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    /// Name recorded on the item and reused for the remote object.
    pub file_name: String,
    pub content_type: Option<String>,
}

/// Work item handed to the upload workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub item_id: ItemId,
    pub file: LocalFile,
}

#[derive(Debug, Error)]
pub enum RemoteStoreError {
    #[error("credentials file not found at {0}")]
    MissingCredentials(PathBuf),
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("failed to read local file: {0}")]
    Io(#[from] std::io::Error),
    #[error("request to remote store failed: {0}")]
    Transport(String),
    #[error("remote store responded with {status}: {message}")]
    Api { status: u16, message: String },
    #[error("remote store did not return an object id")]
    MissingObjectId,
    #[error("remote store returned an unusable object id: {0}")]
    InvalidObjectId(String),
}

/// Minimal surface of the remote object store used by the reconciler.
#[async_trait]
pub trait RemoteObjectStore: Send + Sync {
    /// Upload `file` into `folder_id` and return the new object's id.
    async fn upload(
        &self,
        file: &LocalFile,
        folder_id: &str,
    ) -> Result<RemoteObjectId, RemoteStoreError>;

    /// Grant anonymous read access to an uploaded object.
    async fn set_publicly_readable(
        &self,
        object_id: &RemoteObjectId,
    ) -> Result<(), RemoteStoreError>;
}
