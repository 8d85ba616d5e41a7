//! Metadata search over resources.

use super::Resource;
use serde::{Deserialize, Serialize};

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Upload order.
    #[default]
    Relevance,
    /// Highest average rating first; unrated resources count as 0.
    Rating,
}

impl SortOrder {
    /// Read the `sort` query parameter. Anything but `"rating"` keeps upload order.
    pub fn from_param(param: &str) -> Self {
        match param.trim() {
            "rating" => Self::Rating,
            _ => Self::Relevance,
        }
    }
}

/// Search filters. Empty filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    /// Matched against titles.
    pub q: String,
    pub author: String,
    pub subject: String,
    pub sort: SortOrder,
}

impl SearchQuery {
    /// A title search.
    pub fn title(q: &str) -> Self {
        Self {
            q: q.trim().to_string(),
            ..Self::default()
        }
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = author.trim().to_string();
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = subject.trim().to_string();
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Check a resource against every non-empty filter.
    pub fn matches(&self, resource: &Resource) -> bool {
        contains_ignore_case(&resource.title, &self.q)
            && contains_ignore_case(&resource.author, &self.author)
            && contains_ignore_case(&resource.subject, &self.subject)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NewResource;
    use chrono::Utc;
    use uuid::Uuid;

    fn resource(title: &str, author: &str, subject: &str) -> Resource {
        Resource::from_upload(
            Uuid::new_v4(),
            NewResource::new("x.pdf").title(title).author(author).subject(subject),
            "x.pdf".to_string(),
            Uuid::new_v4(),
            Utc::now(),
        )
    }

    #[test]
    fn test_empty_query_matches_all() {
        assert!(SearchQuery::default().matches(&resource("Algebra", "", "")));
    }

    #[test]
    fn test_case_insensitive_substring() {
        let r = resource("Linear Algebra Notes", "Gilbert Strang", "Mathematics");
        assert!(SearchQuery::title("algebra").matches(&r));
        assert!(SearchQuery::title("").author("STRANG").matches(&r));
        assert!(SearchQuery::title("").subject("math").matches(&r));
        assert!(!SearchQuery::title("calculus").matches(&r));
    }

    #[test]
    fn test_all_filters_must_match() {
        let r = resource("Linear Algebra Notes", "Gilbert Strang", "Mathematics");
        assert!(SearchQuery::title("notes").author("strang").matches(&r));
        assert!(!SearchQuery::title("notes").author("knuth").matches(&r));
    }

    #[test]
    fn test_sort_param() {
        assert_eq!(SortOrder::from_param("rating"), SortOrder::Rating);
        assert_eq!(SortOrder::from_param(""), SortOrder::Relevance);
        assert_eq!(SortOrder::from_param("newest"), SortOrder::Relevance);
    }
}
