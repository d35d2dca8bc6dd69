//! Album model

use serde::{Deserialize, Serialize};

/// An album entry on an artist page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRecord {
    /// Upstream album id
    pub id: String,
    pub title: String,
    /// Canonical cover URL (never empty)
    pub image: String,
    #[serde(default)]
    pub url: String,
    /// Release date as reported upstream (YYYY-MM-DD)
    #[serde(default)]
    pub release_date: String,
}
