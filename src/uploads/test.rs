use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::types::RemoteObjectId;
use crate::uploads::store::{LocalFile, RemoteObjectStore, RemoteStoreError};

/// Scripted failure modes for [`FakeStore`].
#[derive(Debug, Clone, Copy)]
pub enum FakeFailure {
    QuotaExceeded,
    Network,
}

impl FakeFailure {
    fn into_error(self) -> RemoteStoreError {
        match self {
            Self::QuotaExceeded => RemoteStoreError::Api {
                status: 403,
                message: "storageQuotaExceeded".to_string(),
            },
            Self::Network => RemoteStoreError::Transport("connection reset".to_string()),
        }
    }
}

/// Remote store double that replays scripted upload results in order.
pub struct FakeStore {
    uploads: Mutex<VecDeque<Result<&'static str, FakeFailure>>>,
    publish_fails: bool,
    upload_calls: AtomicUsize,
    publish_calls: AtomicUsize,
}

impl FakeStore {
    pub fn returning(ids: &[&'static str]) -> Self {
        Self::scripted(ids.iter().map(|id| Ok(*id)).collect())
    }

    pub fn failing(failure: FakeFailure) -> Self {
        Self::scripted(vec![Err(failure)])
    }

    pub fn scripted(results: Vec<Result<&'static str, FakeFailure>>) -> Self {
        Self {
            uploads: Mutex::new(results.into()),
            publish_fails: false,
            upload_calls: AtomicUsize::new(0),
            publish_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_publish_failure(mut self) -> Self {
        self.publish_fails = true;
        self
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn publish_calls(&self) -> usize {
        self.publish_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteObjectStore for FakeStore {
    async fn upload(
        &self,
        _file: &LocalFile,
        _folder_id: &str,
    ) -> Result<RemoteObjectId, RemoteStoreError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.uploads.lock().unwrap().pop_front();
        match next {
            Some(Ok(id)) => Ok(RemoteObjectId::new(id).unwrap()),
            Some(Err(failure)) => Err(failure.into_error()),
            None => Err(RemoteStoreError::Transport(
                "no scripted response".to_string(),
            )),
        }
    }

    async fn set_publicly_readable(
        &self,
        _object_id: &RemoteObjectId,
    ) -> Result<(), RemoteStoreError> {
        self.publish_calls.fetch_add(1, Ordering::SeqCst);
        if self.publish_fails {
            Err(RemoteStoreError::Api {
                status: 403,
                message: "insufficientFilePermissions".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
