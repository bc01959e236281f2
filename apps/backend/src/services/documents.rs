//! In-memory store of parsed study material.
//!
//! Documents are parsed once when loaded and never modified afterwards, so
//! handlers share them through `Arc` and only hold the lock long enough to
//! look them up.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use recitation_core::parse;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{Document, DocumentSummary};

/// Calculate SHA256 hash of content.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Outcome of loading a document.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub document: Arc<Document>,
    /// False when identical content was already loaded.
    pub created: bool,
}

/// Parsed documents in load order.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: RwLock<Vec<Arc<Document>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Arc<Document>>>> {
        self.documents
            .read()
            .map_err(|_| ApiError::Internal("document store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Arc<Document>>>> {
        self.documents
            .write()
            .map_err(|_| ApiError::Internal("document store lock poisoned".to_string()))
    }

    /// Parse and store `content`, or return the document already holding it.
    pub fn load(&self, name: &str, content: &str) -> Result<Loaded> {
        let content_hash = hash_content(content);
        if let Some(document) = self.find_by_hash(&content_hash)? {
            return Ok(Loaded {
                document,
                created: false,
            });
        }

        let items = parse(content);
        let document = Arc::new(Document {
            id: Uuid::new_v4(),
            name: name.to_string(),
            content_hash,
            loaded_at: Utc::now(),
            items,
        });

        let mut documents = self.write()?;
        // Another request may have loaded the same content while parsing
        if let Some(existing) = documents
            .iter()
            .find(|d| d.content_hash == document.content_hash)
        {
            return Ok(Loaded {
                document: existing.clone(),
                created: false,
            });
        }
        documents.push(document.clone());

        tracing::info!(
            "Loaded document {} ({}): {} items",
            document.id,
            document.name,
            document.items.len()
        );

        Ok(Loaded {
            document,
            created: true,
        })
    }

    fn find_by_hash(&self, content_hash: &str) -> Result<Option<Arc<Document>>> {
        Ok(self
            .read()?
            .iter()
            .find(|d| d.content_hash == content_hash)
            .cloned())
    }

    /// Get a document by ID.
    pub fn get(&self, id: Uuid) -> Result<Arc<Document>> {
        self.read()?
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Document {} not found", id)))
    }

    /// Summaries of all documents in load order.
    pub fn list(&self) -> Result<Vec<DocumentSummary>> {
        Ok(self.read()?.iter().map(|d| d.summary()).collect())
    }
}
