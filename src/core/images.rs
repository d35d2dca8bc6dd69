//! Canonical image URL selection
//!
//! Deezer returns several resolution variants per artist/album, some of which
//! are redirect endpoints rather than image files. The first candidate whose
//! URL path ends in an image extension wins; otherwise the placeholder.

use reqwest::Url;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// Whether `url` is an absolute http(s) URL pointing at an image file
pub fn is_image_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return false;
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .and_then(|last| last.rsplit_once('.'))
        .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Pick the first candidate that validates as an image URL
pub fn pick_image<'a, I>(candidates: I, placeholder: &str) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| is_image_url(url))
        .map(str::to_string)
        .unwrap_or_else(|| placeholder.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::deezer::DeezerArtist;

    const PLACEHOLDER: &str = "/assets/default-artist.jpg";

    #[test]
    fn test_is_image_url() {
        assert!(is_image_url(
            "https://e-cdns-images.dzcdn.net/images/artist/abc/500x500-000000-80-0-0.jpg"
        ));
        assert!(is_image_url("https://cdn.example.com/a/cover.PNG?size=large"));
        assert!(!is_image_url("https://api.deezer.com/artist/27/image"));
        assert!(!is_image_url("ftp://cdn.example.com/a.jpg"));
        assert!(!is_image_url("/assets/a.jpg"));
        assert!(!is_image_url(""));
    }

    #[test]
    fn test_prefers_big_picture() {
        let artist = DeezerArtist {
            id: 1,
            picture_small: Some("https://cdn.example.com/56x56.jpg".into()),
            picture_medium: Some("https://cdn.example.com/250x250.jpg".into()),
            picture_big: Some("https://cdn.example.com/500x500.jpg".into()),
            ..Default::default()
        };
        assert_eq!(
            pick_image(artist.picture_candidates(), PLACEHOLDER),
            "https://cdn.example.com/500x500.jpg"
        );
    }

    #[test]
    fn test_skips_non_image_candidates() {
        let artist = DeezerArtist {
            id: 1,
            picture_big: Some("https://api.deezer.com/artist/1/image?size=big".into()),
            picture_medium: Some("".into()),
            picture_small: Some("https://cdn.example.com/56x56.webp".into()),
            ..Default::default()
        };
        assert_eq!(
            pick_image(artist.picture_candidates(), PLACEHOLDER),
            "https://cdn.example.com/56x56.webp"
        );
    }

    #[test]
    fn test_falls_back_to_placeholder() {
        let none = DeezerArtist::default();
        assert_eq!(pick_image(none.picture_candidates(), PLACEHOLDER), PLACEHOLDER);

        let invalid = DeezerArtist {
            picture: Some("https://api.deezer.com/artist/1/image".into()),
            ..Default::default()
        };
        assert_eq!(pick_image(invalid.picture_candidates(), PLACEHOLDER), PLACEHOLDER);
    }
}
