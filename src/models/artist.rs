//! Artist model

use serde::{Deserialize, Serialize};

use super::AlbumRecord;

/// Categories assigned to every artist coming from the Deezer API
pub const DEFAULT_CATEGORIES: [&str; 2] = ["Music", "Artist"];

/// Short and long biography text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biography {
    pub summary: String,
    pub content: String,
}

impl Biography {
    pub fn new(summary: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            content: content.into(),
        }
    }
}

/// An artist as handed to consumers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRecord {
    /// Upstream artist id
    pub id: String,
    /// Display name
    pub name: String,
    /// Canonical image URL (never empty)
    pub image: String,
    /// Fan/listener count
    #[serde(default)]
    pub listeners: u64,
    /// External link to the artist page
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Genre tags, de-duplicated
    #[serde(default)]
    pub tags: Vec<String>,
    /// Cosmetic 1..=5 score, display only
    #[serde(default)]
    pub rating: u8,
    /// Cosmetic 0..=99 score, display only
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub albums: Vec<AlbumRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<Biography>,
}

impl ArtistRecord {
    /// Create an artist with default categories and nothing else filled in
    pub fn new(id: String, name: String, image: String) -> Self {
        Self {
            id,
            name,
            image,
            listeners: 0,
            url: String::new(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            tags: Vec::new(),
            rating: 0,
            progress: 0,
            albums: Vec::new(),
            bio: None,
        }
    }

    pub fn has_albums(&self) -> bool {
        !self.albums.is_empty()
    }

    /// Replace tags, dropping duplicates while keeping first-seen order
    pub fn set_tags<I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.tags.clear();
        for tag in tags {
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
    }

    /// Carry over data that a fresh fetch does not include
    pub fn absorb(&mut self, previous: &ArtistRecord) {
        if self.tags.is_empty() {
            self.tags = previous.tags.clone();
        }
        if self.albums.is_empty() {
            self.albums = previous.albums.clone();
        }
        if self.bio.is_none() {
            self.bio = previous.bio.clone();
        }
    }
}

impl PartialEq for ArtistRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ArtistRecord {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_tags_dedups() {
        let mut artist = ArtistRecord::new("1".into(), "Test".into(), "a.jpg".into());
        artist.set_tags(vec!["Pop".into(), "Rock".into(), "Pop".into()]);
        assert_eq!(artist.tags, vec!["Pop", "Rock"]);
        assert_eq!(artist.categories, vec!["Music", "Artist"]);
    }

    #[test]
    fn test_absorb_keeps_fresh_fields() {
        let mut previous = ArtistRecord::new("1".into(), "Old".into(), "a.jpg".into());
        previous.tags = vec!["Jazz".into()];
        previous.bio = Some(Biography::new("old", "old"));

        let mut fresh = ArtistRecord::new("1".into(), "New".into(), "b.jpg".into());
        fresh.bio = Some(Biography::new("new", "new"));
        fresh.absorb(&previous);

        assert_eq!(fresh.name, "New");
        assert_eq!(fresh.tags, vec!["Jazz"]);
        assert_eq!(fresh.bio.unwrap().summary, "new");
    }

    #[test]
    fn test_serialization_skips_missing_bio() {
        let artist = ArtistRecord::new("1".into(), "Test".into(), "a.jpg".into());
        let json = serde_json::to_value(&artist).unwrap();
        assert!(json.get("bio").is_none());
        assert_eq!(json["albums"], serde_json::json!([]));
    }
}
