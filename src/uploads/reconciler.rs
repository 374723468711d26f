use std::sync::Arc;

use crate::domain::types::{ImageReference, RemoteObjectId};
use crate::models::config::RemoteUploadConfig;
use crate::repository::ItemWriter;
use crate::uploads::store::{RemoteObjectStore, RemoteStoreError, UploadJob};

/// Result of a single reconciliation attempt.
///
/// Only used for logging and tests; nothing is persisted about failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Remote upload is switched off; the store was not contacted.
    Disabled,
    /// Required configuration (destination folder) is missing.
    Skipped,
    /// The upload failed; `image_file` keeps the local filename.
    UploadFailed,
    /// `image_file` now holds the remote object id.
    Resolved {
        object_id: RemoteObjectId,
        published: bool,
    },
    /// The item was deleted while the upload was in flight.
    RecordVanished { object_id: RemoteObjectId },
    /// The upload succeeded but the database write did not.
    WriteFailed { object_id: RemoteObjectId },
}

/// Replaces an item's local image filename with a remote object id once the
/// file has been copied to the remote store.
///
/// Each call makes exactly one upload attempt. Errors never propagate: they
/// are logged and reported through [`ReconcileOutcome`]. The database write
/// happens after the network calls have finished, as one single-column update.
pub struct Reconciler<R> {
    repo: R,
    store: Arc<dyn RemoteObjectStore>,
    settings: RemoteUploadConfig,
}

impl<R> Reconciler<R>
where
    R: ItemWriter + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, store: Arc<dyn RemoteObjectStore>, settings: &RemoteUploadConfig) -> Self {
        Self {
            repo,
            store,
            settings: settings.clone(),
        }
    }

    pub async fn reconcile(&self, job: UploadJob) -> ReconcileOutcome {
        if !self.settings.enabled {
            log::debug!(
                "Remote upload disabled; item={} keeps {}",
                job.item_id,
                job.file.file_name
            );
            return ReconcileOutcome::Disabled;
        }

        let Some(folder_id) = self.settings.folder_id() else {
            log::error!(
                "No destination folder configured; skipping upload for item={} path={}",
                job.item_id,
                job.file.path.display()
            );
            return ReconcileOutcome::Skipped;
        };

        log::info!(
            "Processing upload job for item={} path={} -> folder={folder_id}",
            job.item_id,
            job.file.path.display()
        );

        let object_id = match self.store.upload(&job.file, folder_id).await {
            Ok(object_id) => object_id,
            Err(e) => {
                log_upload_failure(&job, &e);
                return ReconcileOutcome::UploadFailed;
            }
        };

        let published = match self.store.set_publicly_readable(&object_id).await {
            Ok(()) => true,
            Err(e) => {
                log::warn!(
                    "Could not set public permission for file {object_id} (item={}): {e}",
                    job.item_id
                );
                false
            }
        };

        let repo = self.repo.clone();
        let item_id = job.item_id;
        let reference = ImageReference::from(object_id.clone());
        let written =
            tokio::task::spawn_blocking(move || repo.update_item_image_file(item_id, &reference))
                .await;

        match written {
            Ok(Ok(true)) => {
                log::info!("Updated item={item_id} image_file={object_id}");
                remove_local_copy(&job).await;
                ReconcileOutcome::Resolved {
                    object_id,
                    published,
                }
            }
            Ok(Ok(false)) => {
                log::warn!(
                    "Item {item_id} no longer exists; uploaded file {object_id} is unreferenced"
                );
                remove_local_copy(&job).await;
                ReconcileOutcome::RecordVanished { object_id }
            }
            Ok(Err(e)) => {
                log::error!("Failed to record upload of item={item_id} as {object_id}: {e}");
                ReconcileOutcome::WriteFailed { object_id }
            }
            Err(e) => {
                log::error!("Image update task for item={item_id} did not complete: {e}");
                ReconcileOutcome::WriteFailed { object_id }
            }
        }
    }
}

fn log_upload_failure(job: &UploadJob, error: &RemoteStoreError) {
    log::error!(
        "Upload failed for item={} path={}: {error}",
        job.item_id,
        job.file.path.display()
    );
    if let RemoteStoreError::Api { status: 403, .. } = error {
        log::error!(
            "Remote store returned 403. Service accounts have no personal storage quota; \
             point the folder id at a shared drive folder or use user OAuth credentials."
        );
    }
}

/// The remote copy is authoritative from here on; a leftover local file is
/// only wasted space.
async fn remove_local_copy(job: &UploadJob) {
    match tokio::fs::remove_file(&job.file.path).await {
        Ok(()) => log::info!(
            "Removed local file {} after successful upload",
            job.file.path.display()
        ),
        Err(e) => log::warn!(
            "Failed to remove local file {} after upload: {e}",
            job.file.path.display()
        ),
    }
}
