//! Wire types for the Deezer public API
//!
//! Every field the API may omit is optional or defaulted; list endpoints wrap
//! their payload in `{"data": [...]}` which the client unwraps item by item.

use serde::Deserialize;

/// Artist object as returned by `/chart`, `/artist/{id}` and `/search/artist`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeezerArtist {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub picture_small: Option<String>,
    #[serde(default)]
    pub picture_medium: Option<String>,
    #[serde(default)]
    pub picture_big: Option<String>,
    #[serde(default)]
    pub nb_fan: Option<u64>,
}

impl DeezerArtist {
    /// Picture variants, largest first
    pub fn picture_candidates(&self) -> [Option<&str>; 4] {
        [
            self.picture_big.as_deref(),
            self.picture_medium.as_deref(),
            self.picture_small.as_deref(),
            self.picture.as_deref(),
        ]
    }
}

/// Album object from `/artist/{id}/albums` or nested in a track
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeezerAlbum {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub cover_small: Option<String>,
    #[serde(default)]
    pub cover_medium: Option<String>,
    #[serde(default)]
    pub cover_big: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Option<DeezerGenreList>,
}

impl DeezerAlbum {
    /// Cover variants in preference order
    pub fn cover_candidates(&self) -> [Option<&str>; 4] {
        [
            self.cover_medium.as_deref(),
            self.cover_big.as_deref(),
            self.cover_small.as_deref(),
            self.cover.as_deref(),
        ]
    }

    /// Genre names, skipping null entries and entries without a name
    pub fn genre_names(&self) -> impl Iterator<Item = &str> {
        self.genres
            .iter()
            .flat_map(|list| list.data.iter())
            .filter_map(|genre| genre.as_ref())
            .filter_map(|genre| genre.name.as_deref())
            .filter(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeezerGenreList {
    #[serde(default)]
    pub data: Vec<Option<DeezerGenre>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeezerGenre {
    #[serde(default)]
    pub name: Option<String>,
}

/// Track object from `/artist/{id}/top`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeezerTrack {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub album: Option<DeezerAlbum>,
}

/// Error object Deezer embeds in a `200 OK` body
#[derive(Debug, Clone, Deserialize)]
pub struct DeezerErrorBody {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
}
