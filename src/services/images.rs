use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::domain::item::Item;
use crate::domain::types::{HistoryOperation, ImageReference, TableName, UserId};
use crate::dto::images::ImageLinkDto;
use crate::repository::{HistoryWriter, ItemReader, ItemWriter};
use crate::services::items::{ITEM_NOT_FOUND, get_item};
use crate::services::record_history;
use crate::uploads::{ImageUrlResolver, LocalFile, UploadJob, UploadScheduler};

use super::{ServiceError, ServiceResult};

pub const NO_IMAGE: &str = "No image for item";

/// An uploaded file waiting to be stored for an item.
#[derive(Debug, Clone)]
pub struct StagedImage {
    /// Temporary location of the received bytes.
    pub source: PathBuf,
    /// Extension of the client filename including the dot, possibly empty.
    pub extension: String,
    pub content_type: Option<String>,
}

/// Where uploads are kept and how their URLs are built.
pub struct ImageStorage<'a> {
    pub upload_dir: &'a Path,
    pub resolver: &'a ImageUrlResolver,
}

/// `<category_id or 0>-<item_id>-<UTC timestamp><ext>`.
fn image_filename(item: &Item, extension: &str) -> String {
    let category_id = item.category_id.map_or(0, |id| id.get());
    let timestamp = Utc::now().format("%Y%m%dT%H%M%S%6f");
    format!("{category_id}-{}-{timestamp}{extension}", item.id)
}

/// Remove a stored upload that no item references.
fn discard_upload(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        log::warn!("Failed to remove unreferenced upload {}: {e}", path.display());
    }
}

/// Store an uploaded image for an existing item.
///
/// The file is copied into the upload directory and its name written to the
/// item before the response is built; the remote upload is only scheduled.
/// A rejected job leaves the local filename in place.
pub fn upload_item_image<R, Q>(
    item_id_raw: i32,
    image: StagedImage,
    user: &UserId,
    repo: &R,
    scheduler: &Q,
    storage: &ImageStorage<'_>,
) -> ServiceResult<ImageLinkDto>
where
    R: ItemReader + ItemWriter + HistoryWriter,
    Q: UploadScheduler + ?Sized,
{
    let item = get_item(item_id_raw, repo)?;

    let filename = image_filename(&item, &image.extension);
    let destination = storage.upload_dir.join(&filename);
    if let Err(e) = std::fs::copy(&image.source, &destination) {
        log::error!(
            "Failed to store upload for item={} at {}: {e}",
            item.id,
            destination.display()
        );
        return Err(ServiceError::Internal);
    }

    let reference = ImageReference::new(filename.as_str())?;
    match repo.update_item_image_file(item.id, &reference) {
        Ok(true) => {}
        Ok(false) => {
            discard_upload(&destination);
            return Err(ServiceError::NotFound(ITEM_NOT_FOUND));
        }
        Err(e) => {
            log::error!("Failed to set image for item={}: {e}", item.id);
            discard_upload(&destination);
            return Err(ServiceError::Internal);
        }
    }

    let job = UploadJob {
        item_id: item.id,
        file: LocalFile {
            path: destination,
            file_name: filename,
            content_type: image.content_type,
        },
    };
    match scheduler.schedule(job) {
        Ok(()) => log::info!("Enqueued upload job for item={}", item.id),
        Err(e) => log::error!("Failed to enqueue upload job for item={}: {e}", item.id),
    }

    record_history(repo, HistoryOperation::Update, TableName::Item, user, item.id.get());
    Ok(ImageLinkDto::new(&reference, storage.resolver))
}

pub fn get_item_image<R>(
    item_id_raw: i32,
    repo: &R,
    resolver: &ImageUrlResolver,
) -> ServiceResult<ImageLinkDto>
where
    R: ItemReader,
{
    let item = get_item(item_id_raw, repo)?;
    match item.image_file {
        Some(image_file) => Ok(ImageLinkDto::new(&image_file, resolver)),
        None => Err(ServiceError::NotFound(NO_IMAGE)),
    }
}
