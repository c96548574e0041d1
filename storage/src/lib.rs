// storage keeps generated terrain as JSON documents on disk

pub mod models;
pub mod obj;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

use crate::models::TerrainDoc;

pub use obj::{save_obj, write_obj};

const DOC_EXTENSION: &str = "json";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid terrain name {0:?}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub struct TerrainStore {
    root: PathBuf,
}

impl TerrainStore {
    // Open (and create if needed) the store directory
    pub async fn init(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        debug!(root = %root.display(), "terrain store ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn list_names(&self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(DOC_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub async fn read_by_name(&self, name: &str) -> Result<Option<TerrainDoc>> {
        let path = self.doc_path(name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // Insert a terrain document, replacing any document with the same name
    pub async fn create(&self, doc: &TerrainDoc) -> Result<()> {
        let path = self.doc_path(&doc.name)?;
        let bytes = serde_json::to_vec(doc)?;
        // Write then rename so readers never see a half-written document
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &path).await?;
        debug!(name = %doc.name, seed = doc.seed, "terrain saved");
        Ok(())
    }

    // First document generated from `seed`, in name order
    pub async fn read_by_seed(&self, seed: u64) -> Result<Option<TerrainDoc>> {
        for name in self.list_names().await? {
            match self.read_by_name(&name).await {
                Ok(Some(doc)) if doc.seed == seed => return Ok(Some(doc)),
                Ok(_) => {}
                Err(e) => warn!(name = %name, error = %e, "skipping unreadable terrain"),
            }
        }
        Ok(None)
    }

    // Returns whether a document was removed
    pub async fn delete_by_name(&self, name: &str) -> Result<bool> {
        let path = self.doc_path(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn doc_path(&self, name: &str) -> Result<PathBuf> {
        if !is_valid_name(name) {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.{DOC_EXTENSION}")))
    }
}

// Names become file stems: ASCII alphanumerics, '-' and '_' only
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
