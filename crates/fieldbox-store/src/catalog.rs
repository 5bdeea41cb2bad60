//! The authoritative in-memory document catalog.

use std::sync::RwLock;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use fieldbox_core::{Document, DocumentDraft, DocumentUpdate};

/// Process-wide document catalog.
///
/// Holds documents in insertion order with the most recently added item
/// first. Mutations are synchronous and atomic with respect to each other;
/// the deployment model has a single interactive writer, the lock exists so
/// the store is safely shareable across the async HTTP surface.
///
/// There is no delete operation.
pub struct CatalogStore {
    documents: RwLock<Vec<Document>>,
}

impl CatalogStore {
    /// Create a catalog holding `seed`, most-recent-first order preserved
    /// as given.
    pub fn new(seed: Vec<Document>) -> Self {
        info!(
            subsystem = "store",
            component = "catalog",
            document_count = seed.len(),
            "Catalog initialized from seed"
        );
        Self {
            documents: RwLock::new(seed),
        }
    }

    /// Snapshot of all documents in visible order.
    pub fn list_all(&self) -> Vec<Document> {
        self.documents.read().expect("catalog lock poisoned").clone()
    }

    /// Look up one document by id.
    pub fn get(&self, id: &str) -> Option<Document> {
        self.documents
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .find(|d| d.id == id)
            .cloned()
    }

    /// Number of documents in the catalog.
    pub fn len(&self) -> usize {
        self.documents.read().expect("catalog lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create a document from `draft` and prepend it to the catalog.
    ///
    /// Assigns a fresh unique id, sets `last_updated` to the current date
    /// and `is_favorite` to false.
    pub fn add(&self, draft: DocumentDraft) -> Document {
        let document = Document {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            category: draft.category,
            manufacturer: draft.manufacturer,
            model_series: draft.model_series,
            box_link: draft.box_link,
            last_updated: today(),
            is_favorite: false,
            tags: draft.tags,
            description: draft.description,
        };

        info!(
            subsystem = "store",
            component = "catalog",
            op = "add",
            document_id = %document.id,
            "Document added"
        );

        self.documents
            .write()
            .expect("catalog lock poisoned")
            .insert(0, document.clone());
        document
    }

    /// Replace all mutable content fields on the document matching `id` and
    /// bump `last_updated` to the current date.
    ///
    /// Returns `None` without touching store state when `id` is unknown; the
    /// id itself is never changed.
    pub fn update(&self, id: &str, fields: DocumentUpdate) -> Option<Document> {
        let mut documents = self.documents.write().expect("catalog lock poisoned");
        let document = documents.iter_mut().find(|d| d.id == id)?;

        document.title = fields.title;
        document.category = fields.category;
        document.manufacturer = fields.manufacturer;
        document.model_series = fields.model_series;
        document.box_link = fields.box_link;
        document.tags = fields.tags;
        document.description = fields.description;
        document.last_updated = today();

        info!(
            subsystem = "store",
            component = "catalog",
            op = "update",
            document_id = %document.id,
            "Document content updated"
        );
        Some(document.clone())
    }

    /// Flip `is_favorite` on the document matching `id`.
    ///
    /// Favoriting is metadata, not content: `last_updated` is left untouched.
    /// Returns `None` when `id` is unknown.
    pub fn toggle_favorite(&self, id: &str) -> Option<Document> {
        let mut documents = self.documents.write().expect("catalog lock poisoned");
        let document = documents.iter_mut().find(|d| d.id == id)?;

        document.is_favorite = !document.is_favorite;
        debug!(
            subsystem = "store",
            component = "catalog",
            op = "toggle_favorite",
            document_id = %document.id,
            is_favorite = document.is_favorite,
            "Favorite flag toggled"
        );
        Some(document.clone())
    }
}

/// Current UTC calendar date.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}
