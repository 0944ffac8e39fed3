//! Abstraction over the document-oriented backend the marketplace persists
//! into. Services receive a store handle at construction and address data by
//! collection name; the database binding is owned by the implementation.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

mod memory;

pub use memory::MemoryStore;

/// Collection names used by the marketplace services.
pub mod collections {
    pub const WORKER_PROFILES: &str = "worker_profiles";
    pub const LOWONGAN: &str = "lowongan";
    pub const APPLICATIONS: &str = "applications";
}

/// A stored document is a flat JSON object. The store owns the `id`,
/// `created_at`, and `updated_at` system fields.
pub type Document = Map<String, Value>;

/// One predicate of a list query. Filters narrow the match set, `Limit` and
/// `Offset` window it, and the order variants sort it; `total` in the result
/// always counts the full match set before windowing.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equal { attribute: String, value: Value },
    ContainsAny { attribute: String, values: Vec<Value> },
    GreaterThan { attribute: String, value: Value },
    GreaterThanEqual { attribute: String, value: Value },
    LessThan { attribute: String, value: Value },
    LessThanEqual { attribute: String, value: Value },
    Search { attribute: String, term: String },
    Limit(usize),
    Offset(usize),
    OrderAsc(String),
    OrderDesc(String),
}

impl Predicate {
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self::Equal {
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }

    /// Matches when the document field (scalar or array) intersects `values`.
    pub fn contains_any(attribute: &str, values: Vec<Value>) -> Self {
        Self::ContainsAny {
            attribute: attribute.to_string(),
            values,
        }
    }

    pub fn greater_than(attribute: &str, value: impl Into<Value>) -> Self {
        Self::GreaterThan {
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }

    pub fn greater_than_equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self::GreaterThanEqual {
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }

    pub fn less_than(attribute: &str, value: impl Into<Value>) -> Self {
        Self::LessThan {
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }

    pub fn less_than_equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self::LessThanEqual {
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }

    /// Full-text match on a single attribute.
    pub fn search(attribute: &str, term: &str) -> Self {
        Self::Search {
            attribute: attribute.to_string(),
            term: term.to_string(),
        }
    }

    pub fn limit(count: usize) -> Self {
        Self::Limit(count)
    }

    pub fn offset(count: usize) -> Self {
        Self::Offset(count)
    }

    pub fn order_asc(attribute: &str) -> Self {
        Self::OrderAsc(attribute.to_string())
    }

    pub fn order_desc(attribute: &str) -> Self {
        Self::OrderDesc(attribute.to_string())
    }
}

/// Result of a list query. `total` counts every filter match, ignoring the
/// limit/offset window, so callers can derive pagination metadata.
#[derive(Debug, Clone, Default)]
pub struct ListResult {
    pub documents: Vec<Document>,
    pub total: usize,
}

/// Failure categories reported by the store. Each category carries a fixed
/// user-facing message in Bahasa Indonesia; raw detail stays in the `Display`
/// output for logs.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("network unreachable: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("caller is not authenticated")]
    Unauthorized,
    #[error("caller lacks permission for this operation")]
    Forbidden,
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },
    #[error("document already exists")]
    Conflict,
    #[error("invalid document payload: {0}")]
    Validation(String),
    #[error("store failure: {0}")]
    Server(String),
}

impl StoreError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::Network(_) => "Koneksi bermasalah. Periksa jaringan internet Anda.",
            StoreError::Timeout => "Permintaan memakan waktu terlalu lama. Silakan coba lagi.",
            StoreError::Unauthorized => "Sesi Anda telah berakhir. Silakan masuk kembali.",
            StoreError::Forbidden => "Anda tidak memiliki akses untuk tindakan ini.",
            StoreError::NotFound { .. } => "Data yang diminta tidak ditemukan.",
            StoreError::Conflict => "Data sudah ada.",
            StoreError::Validation(_) => "Data yang dikirim tidak valid.",
            StoreError::Server(_) => {
                "Terjadi kesalahan pada server. Silakan coba beberapa saat lagi."
            }
        }
    }
}

/// Storage seam between the marketplace services and the backing database.
pub trait DocumentStore: Send + Sync {
    fn list(&self, collection: &str, queries: &[Predicate]) -> Result<ListResult, StoreError>;
    fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError>;
    fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        data: Document,
    ) -> Result<Document, StoreError>;
    fn update(&self, collection: &str, id: &str, data: Document) -> Result<Document, StoreError>;
    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Build a [`Document`] from a `json!` object literal. Non-object input
/// yields an empty document.
pub fn fields(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

/// Deserialize a document into a typed entity, filling absent fields with
/// their serde defaults.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(document))
}

/// System id of a document, or an empty string when it has none yet.
pub fn document_id(document: &Document) -> String {
    document
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
