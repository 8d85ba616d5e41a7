//! EduShare Core Library
//!
//! Platform-agnostic core data structures and logic for EduShare: the star-rating
//! input widget, the resource catalogue and its persistence.

pub mod catalog;
pub mod rating;
pub mod storage;
pub mod widget;

pub use catalog::{
    CatalogError, CatalogResult, Folder, FolderId, Library, Listing, NewResource, Resource,
    ResourceId, Review, ReviewId, SearchQuery, SortOrder, UserId,
};
pub use rating::{Rating, RatingError, RATING_SCALE};
pub use storage::{BlobStore, Storage, StorageError, StorageResult};
pub use widget::{HeadlessDocument, RatingDocument, RatingWidget, SymbolState, WidgetConfig};
