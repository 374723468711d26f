//! Google Drive implementation of [`RemoteObjectStore`].
//!
//! Authenticates with an authorized-user token file (`client_id`,
//! `client_secret`, `refresh_token`) and exchanges the refresh token for a
//! short-lived access token, cached until shortly before it expires.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use crate::domain::types::RemoteObjectId;
use crate::uploads::store::{LocalFile, RemoteObjectStore, RemoteStoreError};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const UPLOAD_URL: &str =
    "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart&supportsAllDrives=true&fields=id";
const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const MULTIPART_BOUNDARY: &str = "inventory-api-upload-boundary";
/// Tokens are refreshed this long before their reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

impl From<reqwest::Error> for RemoteStoreError {
    fn from(value: reqwest::Error) -> Self {
        RemoteStoreError::Transport(value.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct AuthorizedUser {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    #[serde(default)]
    token_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    #[serde(default)]
    id: Option<String>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

pub struct DriveStore {
    client: Client,
    credentials_path: PathBuf,
    token: Mutex<Option<CachedToken>>,
}

impl DriveStore {
    pub fn new(credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            credentials_path: credentials_path.into(),
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> Result<String, RemoteStoreError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let credentials = read_credentials(&self.credentials_path).await?;
        let token_uri = credentials
            .token_uri
            .as_deref()
            .unwrap_or(DEFAULT_TOKEN_URI);
        let response = self
            .client
            .post(token_uri)
            .form(&[
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("refresh_token", credentials.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;
        let token: TokenResponse = ensure_success(response).await?.json().await?;

        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(3600));
        let expires_at = Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN);
        log::debug!("Refreshed remote store access token");
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at,
        });
        Ok(token.access_token)
    }
}

#[async_trait]
impl RemoteObjectStore for DriveStore {
    async fn upload(
        &self,
        file: &LocalFile,
        folder_id: &str,
    ) -> Result<RemoteObjectId, RemoteStoreError> {
        let contents = tokio::fs::read(&file.path).await?;
        let token = self.access_token().await?;
        let metadata = json!({ "name": file.file_name, "parents": [folder_id] });
        let content_type = file
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream");
        let body = multipart_related_body(&metadata.to_string(), content_type, &contents);

        let response = self
            .client
            .post(UPLOAD_URL)
            .bearer_auth(&token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(body)
            .send()
            .await?;
        let uploaded: UploadedFile = ensure_success(response).await?.json().await?;

        let id = uploaded.id.ok_or(RemoteStoreError::MissingObjectId)?;
        RemoteObjectId::new(id)
            .map_err(|e| RemoteStoreError::InvalidObjectId(e.to_string()))
    }

    async fn set_publicly_readable(
        &self,
        object_id: &RemoteObjectId,
    ) -> Result<(), RemoteStoreError> {
        let token = self.access_token().await?;
        let url = format!("{FILES_URL}/{object_id}/permissions?supportsAllDrives=true");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&json!({ "role": "reader", "type": "anyone" }))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn read_credentials(path: &Path) -> Result<AuthorizedUser, RemoteStoreError> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RemoteStoreError::MissingCredentials(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_slice(&raw).map_err(|e| RemoteStoreError::InvalidCredentials(e.to_string()))
}

async fn ensure_success(response: Response) -> Result<Response, RemoteStoreError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(RemoteStoreError::Api { status, message })
}

fn multipart_related_body(metadata: &str, content_type: &str, contents: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(contents.len() + metadata.len() + 256);
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!("--{MULTIPART_BOUNDARY}\r\nContent-Type: {content_type}\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}
