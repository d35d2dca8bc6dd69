//! Genre tags and biography text derived from an artist's top tracks

use crate::models::deezer::{DeezerArtist, DeezerTrack};
use crate::models::{ArtistRecord, Biography};

/// Tags used when no genre can be extracted
pub const DEFAULT_TAGS: [&str; 2] = ["Pop", "Rock"];

const GENERIC_SUMMARY: &str = "Artist on Deezer.";
const GENERIC_CONTENT: &str = "No information available for this artist.";

/// Data merged into a base artist record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub tags: Vec<String>,
    pub bio: Biography,
}

impl Enrichment {
    /// Default tags and the generic biography
    pub fn fallback() -> Self {
        Self {
            tags: default_tags(),
            bio: Biography::new(GENERIC_SUMMARY, GENERIC_CONTENT),
        }
    }

    /// Build from a top-tracks response; no genre at all means the fallback
    pub fn from_top_tracks(tracks: &[DeezerTrack]) -> Self {
        let mut tags: Vec<String> = Vec::new();
        for name in tracks
            .iter()
            .filter_map(|track| track.album.as_ref())
            .flat_map(|album| album.genre_names())
        {
            let name = name.trim();
            if !tags.iter().any(|t| t == name) {
                tags.push(name.to_string());
            }
        }
        if tags.is_empty() {
            return Self::fallback();
        }

        let titles: Vec<&str> = tracks
            .iter()
            .map(|t| t.title.trim())
            .filter(|t| !t.is_empty())
            .collect();

        let summary = format!("Popular artist on Deezer with {} top tracks.", tracks.len());
        let content = if titles.is_empty() {
            "Popular artist on Deezer.".to_string()
        } else {
            format!(
                "Popular artist on Deezer. Standout tracks include {}.",
                titles.join(", ")
            )
        };

        Self {
            tags,
            bio: Biography::new(summary, content),
        }
    }

    /// Merge into a record, overwriting tags and biography
    pub fn apply_to(&self, artist: &mut ArtistRecord) {
        artist.set_tags(self.tags.iter().cloned());
        artist.bio = Some(self.bio.clone());
    }
}

/// Biography for the detail view, built from the artist object itself
pub fn detail_biography(artist: &DeezerArtist) -> Biography {
    let fans = artist.nb_fan.unwrap_or(0);
    let summary = format!("{} is an artist with {} fans on Deezer.", artist.name, fans);
    let content = match artist.link.as_deref().filter(|l| !l.is_empty()) {
        Some(link) => format!("{} More information at {}", summary, link),
        None => summary.clone(),
    };
    Biography::new(summary, content)
}

fn default_tags() -> Vec<String> {
    DEFAULT_TAGS.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tracks(value: serde_json::Value) -> Vec<DeezerTrack> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_genres_deduplicated_in_order() {
        let tracks = tracks(json!([
            {"id": 1, "title": "One", "album": {"genres": {"data": [{"name": "Dance"}, {"name": "Pop"}]}}},
            {"id": 2, "title": "Two", "album": {"genres": {"data": [{"name": "Pop"}, {"name": "Electro"}]}}},
            {"id": 3, "title": "Three"}
        ]));

        let enrichment = Enrichment::from_top_tracks(&tracks);
        assert_eq!(enrichment.tags, vec!["Dance", "Pop", "Electro"]);
        assert_eq!(
            enrichment.bio.summary,
            "Popular artist on Deezer with 3 top tracks."
        );
        assert_eq!(
            enrichment.bio.content,
            "Popular artist on Deezer. Standout tracks include One, Two, Three."
        );
    }

    #[test]
    fn test_no_genres_uses_default_pair() {
        let tracks = tracks(json!([
            {"id": 1, "title": "Solo", "album": {"id": 5, "title": "Album"}},
            {"id": 2, "title": "Duo", "album": {"genres": {"data": [null, {"id": 3}]}}}
        ]));

        let enrichment = Enrichment::from_top_tracks(&tracks);
        assert_eq!(enrichment, Enrichment::fallback());
        assert_eq!(enrichment.tags, vec!["Pop", "Rock"]);
        assert_eq!(enrichment.bio.summary, "Artist on Deezer.");
    }

    #[test]
    fn test_no_tracks_is_fallback() {
        let enrichment = Enrichment::from_top_tracks(&[]);
        assert_eq!(enrichment, Enrichment::fallback());
        assert_eq!(enrichment.bio.summary, "Artist on Deezer.");
        assert_eq!(
            enrichment.bio.content,
            "No information available for this artist."
        );
    }

    #[test]
    fn test_detail_biography() {
        let artist = DeezerArtist {
            id: 27,
            name: "Daft Punk".into(),
            nb_fan: Some(4_000_000),
            link: Some("https://www.deezer.com/artist/27".into()),
            ..Default::default()
        };
        let bio = detail_biography(&artist);
        assert_eq!(bio.summary, "Daft Punk is an artist with 4000000 fans on Deezer.");
        assert!(bio.content.ends_with("https://www.deezer.com/artist/27"));
    }
}
