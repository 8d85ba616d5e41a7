//! Uploaded resources and their metadata.

use super::{FolderId, ResourceId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to uploads submitted without one.
pub const UNTITLED: &str = "Untitled";

/// Metadata submitted alongside an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewResource {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub description: String,
    /// Target folder, `None` for the uploader's root.
    pub folder: Option<FolderId>,
    /// Filename as sent by the client.
    pub filename: String,
    pub mimetype: Option<String>,
}

impl NewResource {
    /// Start an upload form for a client file.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn folder(mut self, folder: FolderId) -> Self {
        self.folder = Some(folder);
        self
    }

    pub fn mimetype(mut self, mimetype: impl Into<String>) -> Self {
        self.mimetype = Some(mimetype.into());
        self
    }
}

/// A stored resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    pub author: String,
    pub subject: String,
    pub description: String,
    /// Name of the stored file (see [`super::stored_filename`]).
    pub filename: String,
    pub mimetype: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub uploader: UserId,
    pub folder: Option<FolderId>,
}

impl Resource {
    pub(crate) fn from_upload(
        id: ResourceId,
        upload: NewResource,
        filename: String,
        uploader: UserId,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        let title = upload.title.trim();
        Self {
            id,
            title: if title.is_empty() { UNTITLED.to_string() } else { title.to_string() },
            author: upload.author.trim().to_string(),
            subject: upload.subject.trim().to_string(),
            description: upload.description.trim().to_string(),
            filename,
            mimetype: upload.mimetype,
            uploaded_at,
            uploader,
            folder: upload.folder,
        }
    }
}
