//! Chat sessions.
//!
//! A session is established by a successful document upload and scopes all
//! subsequent chat requests to the uploaded collection. Sessions live in
//! memory only; a new upload replaces the current session outright.

use uuid::Uuid;

/// An active chat session over one document collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Random v4 identifier, generated at upload time.
    pub id: String,
    /// Collection the documents were indexed into.
    pub collection_name: String,
    /// File names accepted by the upload that created this session.
    pub documents: Vec<String>,
}

impl Session {
    /// Creates a fresh session holding the given documents.
    pub fn establish(collection_name: impl Into<String>, documents: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            collection_name: collection_name.into(),
            documents,
        }
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// First block of the session id, enough to tell sessions apart on screen.
    pub fn short_id(&self) -> &str {
        self.id.split('-').next().unwrap_or(&self.id)
    }
}
