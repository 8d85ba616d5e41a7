//! In-memory catalogue aggregate.

use super::{
    allowed_file, stored_filename, CatalogError, CatalogResult, Folder, FolderId, NewResource,
    Resource, ResourceId, Review, ReviewId, SearchQuery, SortOrder, UserId,
};
use crate::rating::{self, Rating};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an account sees at one level of its folder tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<'a> {
    /// The folder being viewed, `None` at the root.
    pub current: Option<&'a Folder>,
    /// Chain from the root down to `current`, inclusive.
    pub breadcrumbs: Vec<&'a Folder>,
    pub folders: Vec<&'a Folder>,
    pub resources: Vec<&'a Resource>,
}

/// Resources, folders and reviews of one EduShare instance.
///
/// Serializes as a whole; see [`crate::storage::Storage`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    /// In upload order.
    resources: Vec<Resource>,
    folders: Vec<Folder>,
    reviews: Vec<Review>,
}

impl Library {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a library from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the library to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    // ---------------------------------------------------------------- folders

    /// Create a folder for `owner`, at the root or under one of their folders.
    pub fn create_folder(
        &mut self,
        owner: UserId,
        name: &str,
        parent: Option<FolderId>,
    ) -> CatalogResult<FolderId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyFolderName);
        }
        if let Some(parent) = parent {
            self.folder(owner, parent)?;
        }
        let folder = Folder::new(name.to_string(), parent, owner);
        let id = folder.id;
        log::info!("Created folder '{}' ({})", folder.name, id);
        self.folders.push(folder);
        Ok(id)
    }

    /// Look up one of `owner`'s folders. Other accounts' folders are reported as missing.
    pub fn folder(&self, owner: UserId, id: FolderId) -> CatalogResult<&Folder> {
        self.folders
            .iter()
            .find(|f| f.id == id && f.owner == owner)
            .ok_or(CatalogError::FolderNotFound(id))
    }

    /// Delete an empty folder.
    pub fn delete_folder(&mut self, owner: UserId, id: FolderId) -> CatalogResult<Folder> {
        self.folder(owner, id)?;
        let has_children = self.folders.iter().any(|f| f.parent == Some(id));
        let has_resources = self.resources.iter().any(|r| r.folder == Some(id));
        if has_children || has_resources {
            return Err(CatalogError::FolderNotEmpty);
        }
        let index = self
            .folders
            .iter()
            .position(|f| f.id == id)
            .ok_or(CatalogError::FolderNotFound(id))?;
        let folder = self.folders.remove(index);
        log::info!("Deleted folder '{}' ({})", folder.name, id);
        Ok(folder)
    }

    /// Folders from the root down to `id`, inclusive.
    pub fn breadcrumbs(&self, owner: UserId, id: FolderId) -> CatalogResult<Vec<&Folder>> {
        let mut crumbs = Vec::new();
        let mut next = Some(id);
        while let Some(id) = next {
            // A parent cycle cannot be created through this API, but a
            // hand-edited snapshot could contain one.
            if crumbs.len() > self.folders.len() {
                break;
            }
            let folder = self.folder(owner, id)?;
            crumbs.push(folder);
            next = folder.parent;
        }
        crumbs.reverse();
        Ok(crumbs)
    }

    /// Contents of the owner's root (`None`) or of one of their folders.
    ///
    /// At the root only the owner's own loose uploads are listed; inside a
    /// folder every resource filed there is.
    pub fn listing(&self, owner: UserId, folder: Option<FolderId>) -> CatalogResult<Listing<'_>> {
        let current = folder.map(|id| self.folder(owner, id)).transpose()?;
        let breadcrumbs = match folder {
            Some(id) => self.breadcrumbs(owner, id)?,
            None => Vec::new(),
        };
        let folders = self
            .folders
            .iter()
            .filter(|f| f.owner == owner && f.parent == folder)
            .collect();
        let resources = self
            .resources
            .iter()
            .filter(|r| r.folder == folder && (folder.is_some() || r.uploader == owner))
            .collect();
        Ok(Listing {
            current,
            breadcrumbs,
            folders,
            resources,
        })
    }

    // -------------------------------------------------------------- resources

    /// Register an upload made now. See [`Library::add_resource_at`].
    pub fn add_resource(&mut self, uploader: UserId, upload: NewResource) -> CatalogResult<&Resource> {
        self.add_resource_at(uploader, upload, Utc::now())
    }

    /// Register an upload, validating its filename and target folder.
    ///
    /// The returned resource carries the name its bytes should be stored under.
    pub fn add_resource_at(
        &mut self,
        uploader: UserId,
        upload: NewResource,
        at: DateTime<Utc>,
    ) -> CatalogResult<&Resource> {
        if upload.filename.trim().is_empty() {
            return Err(CatalogError::NoFile);
        }
        if !allowed_file(&upload.filename) {
            log::warn!("Rejected upload '{}': file type not allowed", upload.filename);
            return Err(CatalogError::FileTypeNotAllowed(upload.filename));
        }
        if let Some(folder) = upload.folder {
            self.folder(uploader, folder)?;
        }

        let filename = stored_filename(at, &upload.filename);
        let resource = Resource::from_upload(Uuid::new_v4(), upload, filename, uploader, at);
        log::info!("Uploaded '{}' as {}", resource.title, resource.filename);
        self.resources.push(resource);
        // Just pushed.
        Ok(&self.resources[self.resources.len() - 1])
    }

    /// Look up a resource. Resources are visible to every account.
    pub fn resource(&self, id: ResourceId) -> CatalogResult<&Resource> {
        self.resources
            .iter()
            .find(|r| r.id == id)
            .ok_or(CatalogError::ResourceNotFound(id))
    }

    /// All resources in upload order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Delete a resource and its reviews. Only the uploader may do this.
    ///
    /// Returns the removed resource so the caller can drop its stored file.
    pub fn delete_resource(&mut self, user: UserId, id: ResourceId) -> CatalogResult<Resource> {
        let index = self
            .resources
            .iter()
            .position(|r| r.id == id)
            .ok_or(CatalogError::ResourceNotFound(id))?;
        if self.resources[index].uploader != user {
            return Err(CatalogError::Forbidden);
        }
        let resource = self.resources.remove(index);
        self.reviews.retain(|r| r.resource != id);
        log::info!("Deleted resource '{}' ({})", resource.title, id);
        Ok(resource)
    }

    // ---------------------------------------------------------------- reviews

    /// Record `user`'s review of a resource, replacing any earlier one.
    pub fn submit_review(
        &mut self,
        user: UserId,
        resource: ResourceId,
        rating: Rating,
        comment: &str,
    ) -> CatalogResult<ReviewId> {
        self.resource(resource)?;
        let comment = comment.trim().to_string();

        if let Some(existing) = self
            .reviews
            .iter_mut()
            .find(|r| r.user == user && r.resource == resource)
        {
            existing.rating = rating;
            existing.comment = comment;
            log::info!("Updated review {} to {}", existing.id, rating);
            return Ok(existing.id);
        }

        let review = Review {
            id: Uuid::new_v4(),
            rating,
            comment,
            created_at: Utc::now(),
            user,
            resource,
        };
        let id = review.id;
        log::info!("Added review {} ({}) for {}", id, rating, resource);
        self.reviews.push(review);
        Ok(id)
    }

    /// Reviews of a resource, oldest first.
    pub fn reviews_for(&self, resource: ResourceId) -> impl Iterator<Item = &Review> {
        self.reviews.iter().filter(move |r| r.resource == resource)
    }

    /// Average rating of a resource, rounded to two decimals.
    pub fn average_rating(&self, resource: ResourceId) -> Option<f64> {
        rating::average(self.reviews_for(resource).map(|r| r.rating))
    }

    // ----------------------------------------------------------------- search

    /// Resources matching `query`, in the order it asks for.
    pub fn search(&self, query: &SearchQuery) -> Vec<&Resource> {
        let mut results: Vec<&Resource> =
            self.resources.iter().filter(|r| query.matches(r)).collect();
        if query.sort == SortOrder::Rating {
            let mut scored: Vec<(f64, &Resource)> = results
                .into_iter()
                .map(|r| (self.average_rating(r.id).unwrap_or(0.0), r))
                .collect();
            // Stable, so equal averages keep upload order.
            scored.sort_by(|a, b| b.0.total_cmp(&a.0));
            results = scored.into_iter().map(|(_, r)| r).collect();
        }
        results
    }
}
