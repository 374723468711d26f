use std::path::PathBuf;

use serde::Deserialize;

/// Configuration options for the inventory service.
///
/// Built once at startup from `config/*.yaml` and `APP__*` environment
/// variables and handed to handlers and upload workers by reference.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Directory where uploaded images are stored before reconciliation.
    pub upload_dir: PathBuf,
    /// Prefix joined with an item's `image_file` to build its display URL.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Users allowed to read the history log.
    #[serde(default = "default_admin_users")]
    pub admin_users: Vec<String>,
    /// Expose `upload_dir` under `/uploads`.
    #[serde(default)]
    pub serve_uploads: bool,
    #[serde(default)]
    pub remote_upload: RemoteUploadConfig,
}

impl ServerConfig {
    /// Whether `user_id` is on the admin allow-list.
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_users.iter().any(|admin| admin == user_id)
    }
}

/// Settings for offloading uploaded images to the remote object store.
#[derive(Clone, Debug, Deserialize)]
pub struct RemoteUploadConfig {
    /// When false, reconciliation never contacts the remote store.
    #[serde(default)]
    pub enabled: bool,
    /// Authorized-user OAuth token file for the remote store.
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
    /// Destination folder id; uploads are skipped when unset.
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl RemoteUploadConfig {
    /// Destination folder id, treating blank values as unset.
    pub fn folder_id(&self) -> Option<&str> {
        self.folder_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

impl Default for RemoteUploadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            credentials_path: default_credentials_path(),
            folder_id: None,
            queue_capacity: default_queue_capacity(),
            workers: default_workers(),
        }
    }
}

fn default_image_base_url() -> String {
    "https://drive.google.com/uc?export=view&id=".to_string()
}

fn default_admin_users() -> Vec<String> {
    vec!["admin".to_string()]
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("environment/token.json")
}

fn default_queue_capacity() -> usize {
    100
}

fn default_workers() -> usize {
    1
}
