//! Resource catalogue: uploads, folders, reviews and search.
//!
//! [`Library`] is the in-memory aggregate. It holds no file bytes (see
//! [`crate::storage::BlobStore`]) and knows nothing about sessions: callers
//! pass the acting [`UserId`] to every operation.

mod folder;
mod library;
mod resource;
mod review;
mod search;
mod upload;

pub use folder::Folder;
pub use library::{Library, Listing};
pub use resource::{NewResource, Resource};
pub use review::Review;
pub use search::{SearchQuery, SortOrder};
pub use upload::{allowed_file, secure_filename, stored_filename, ALLOWED_EXTENSIONS};

use thiserror::Error;
use uuid::Uuid;

/// Opaque account identifier.
pub type UserId = Uuid;
/// Unique identifier for a resource.
pub type ResourceId = Uuid;
/// Unique identifier for a folder.
pub type FolderId = Uuid;
/// Unique identifier for a review.
pub type ReviewId = Uuid;

/// Catalogue errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(ResourceId),
    #[error("Folder not found: {0}")]
    FolderNotFound(FolderId),
    #[error("Not allowed")]
    Forbidden,
    #[error("Folder name is required")]
    EmptyFolderName,
    #[error("Folder is not empty")]
    FolderNotEmpty,
    #[error("No file selected")]
    NoFile,
    #[error("File type not allowed: {0}")]
    FileTypeNotAllowed(String),
}

/// Result type for catalogue operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
