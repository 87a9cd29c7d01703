//! Star/flag/note storage
//!
//! Annotations are per-browser in spirit: they live next to the server
//! process, not in the shared document store. One JSON file per form.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::value_objects::{EntityId, ResponseAnnotations};
use crate::ports::outbound::{AnnotationChange, AnnotationStore, RepositoryError};

/// Process-local annotation store
#[derive(Default)]
pub struct InMemoryAnnotationStore {
    entries: DashMap<EntityId, ResponseAnnotations>,
}

impl InMemoryAnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnnotationStore for InMemoryAnnotationStore {
    async fn load(&self, form_id: &EntityId) -> Result<ResponseAnnotations, RepositoryError> {
        Ok(self
            .entries
            .get(form_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn update(&self, form_id: &EntityId, change: AnnotationChange) -> Result<ResponseAnnotations, RepositoryError> {
        let mut entry = self.entries.entry(form_id.clone()).or_default();
        change(entry.value_mut());
        Ok(entry.value().clone())
    }

    async fn remove(&self, form_id: &EntityId) -> Result<(), RepositoryError> {
        self.entries.remove(form_id);
        Ok(())
    }
}

/// Annotation store writing `<dir>/<form_id>.json`
///
/// Updates to one form are serialized in-process; each write goes to its own
/// temp file and is renamed over the target.
pub struct JsonFileAnnotationStore {
    dir: PathBuf,
    locks: DashMap<EntityId, Arc<Mutex<()>>>,
}

impl JsonFileAnnotationStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            locks: DashMap::new(),
        }
    }

    fn path_for(&self, form_id: &EntityId) -> Result<PathBuf, RepositoryError> {
        let key = form_id.as_str();
        let safe = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(RepositoryError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn lock_for(&self, form_id: &EntityId) -> Arc<Mutex<()>> {
        self.locks.entry(form_id.clone()).or_default().value().clone()
    }

    async fn read(path: &Path) -> Result<ResponseAnnotations, RepositoryError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ResponseAnnotations::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, path: &Path, annotations: &ResponseAnnotations) -> Result<(), RepositoryError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let temp_path = path.with_extension(format!("{}.tmp", uuid::Uuid::new_v4().simple()));
        let bytes = serde_json::to_vec_pretty(annotations)?;
        tokio::fs::write(&temp_path, bytes).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl AnnotationStore for JsonFileAnnotationStore {
    async fn load(&self, form_id: &EntityId) -> Result<ResponseAnnotations, RepositoryError> {
        let path = self.path_for(form_id)?;
        Self::read(&path).await
    }

    async fn update(&self, form_id: &EntityId, change: AnnotationChange) -> Result<ResponseAnnotations, RepositoryError> {
        let path = self.path_for(form_id)?;
        let lock = self.lock_for(form_id);
        let _guard = lock.lock().await;

        let mut annotations = Self::read(&path).await?;
        change(&mut annotations);
        self.write(&path, &annotations).await?;

        tracing::debug!(form_id = %form_id, path = %path.display(), "annotations saved");
        Ok(annotations)
    }

    async fn remove(&self, form_id: &EntityId) -> Result<(), RepositoryError> {
        let path = self.path_for(form_id)?;
        let lock = self.lock_for(form_id);
        let _guard = lock.lock().await;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
