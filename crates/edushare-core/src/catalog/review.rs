//! Reviews: one rating and comment per user and resource.

use super::{ResourceId, ReviewId, UserId};
use crate::rating::Rating;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub rating: Rating,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub user: UserId,
    pub resource: ResourceId,
}
