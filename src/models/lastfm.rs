//! Last.fm related models

use serde::{Deserialize, Serialize};

/// Last.fm chart artist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LastfmArtist {
    pub name: String,
    pub mbid: Option<String>,
    pub url: String,
    pub listeners: i64,
    pub playcount: i64,
    /// Largest image the chart entry carries, if any
    pub image: Option<String>,
}

/// `chart.gettopartists` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ChartResponse {
    pub artists: Option<ChartArtists>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartArtists {
    #[serde(default)]
    pub artist: Vec<RawLastfmArtist>,
}

/// Numbers arrive as strings on this endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct RawLastfmArtist {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mbid: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub listeners: String,
    #[serde(default)]
    pub playcount: String,
    #[serde(default)]
    pub image: Vec<RawLastfmImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLastfmImage {
    #[serde(rename = "#text", default)]
    pub url: String,
    #[serde(default)]
    pub size: String,
}

impl From<RawLastfmArtist> for LastfmArtist {
    fn from(raw: RawLastfmArtist) -> Self {
        const SIZES: [&str; 5] = ["mega", "extralarge", "large", "medium", "small"];

        let image = SIZES.iter().find_map(|size| {
            raw.image
                .iter()
                .find(|img| img.size == *size && !img.url.is_empty())
                .map(|img| img.url.clone())
        });

        Self {
            name: raw.name,
            mbid: if raw.mbid.is_empty() {
                None
            } else {
                Some(raw.mbid)
            },
            url: raw.url,
            listeners: raw.listeners.parse().unwrap_or(0),
            playcount: raw.playcount.parse().unwrap_or(0),
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_picks_largest_image() {
        let raw: RawLastfmArtist = serde_json::from_value(serde_json::json!({
            "name": "Bad Bunny",
            "mbid": "",
            "url": "https://www.last.fm/music/Bad+Bunny",
            "listeners": "1234",
            "playcount": "not-a-number",
            "image": [
                {"#text": "https://lastfm.example/s.png", "size": "small"},
                {"#text": "https://lastfm.example/xl.png", "size": "extralarge"},
                {"#text": "", "size": "mega"}
            ]
        }))
        .unwrap();

        let artist = LastfmArtist::from(raw);
        assert_eq!(artist.listeners, 1234);
        assert_eq!(artist.playcount, 0);
        assert!(artist.mbid.is_none());
        assert_eq!(artist.image.as_deref(), Some("https://lastfm.example/xl.png"));
    }
}
