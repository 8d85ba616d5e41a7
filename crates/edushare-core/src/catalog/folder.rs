//! Per-account folders.

use super::{FolderId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A folder in an account's tree. `parent == None` means it sits at the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    pub parent: Option<FolderId>,
    pub owner: UserId,
}

impl Folder {
    pub(crate) fn new(name: String, parent: Option<FolderId>, owner: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            parent,
            owner,
        }
    }

    /// Check if this folder is at the root of its owner's tree.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
