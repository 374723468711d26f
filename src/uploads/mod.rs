//! Image upload handling.
//!
//! Uploaded images are written to the local upload directory and recorded on
//! the item straight away. A background worker then tries, once, to copy the
//! file to the remote object store and swap the item's `image_file` for the
//! remote object id. The local filename stays authoritative whenever that
//! attempt does not succeed.

pub mod drive;
pub mod queue;
pub mod reconciler;
pub mod resolver;
pub mod store;
#[cfg(test)]
pub mod test;

pub use queue::{ScheduleError, UploadQueue, UploadScheduler, UploadWorkers};
pub use reconciler::{ReconcileOutcome, Reconciler};
pub use resolver::{ImageUrlResolver, resolve};
pub use store::{LocalFile, RemoteObjectStore, RemoteStoreError, UploadJob};
