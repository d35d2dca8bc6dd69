//! Demo artists served when the upstream API is unreachable

use anyhow::{bail, Context, Result};
use std::path::Path;

use super::images::is_image_url;
use crate::models::ArtistRecord;

const EMBEDDED_DEMO_ARTISTS: &str = include_str!("../../assets/demo_artists.json");

/// Fixed fallback artist set
#[derive(Debug, Clone)]
pub struct DemoCatalog {
    artists: Vec<ArtistRecord>,
}

impl DemoCatalog {
    /// The set bundled with the binary
    pub fn embedded(placeholder: &str) -> Result<Self> {
        Self::parse(EMBEDDED_DEMO_ARTISTS, placeholder).context("Embedded demo artists are invalid")
    }

    /// Load a replacement set from a JSON file
    pub fn from_file(path: &Path, placeholder: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read demo artists file {:?}", path))?;
        Self::parse(&content, placeholder)
            .with_context(|| format!("Failed to parse demo artists file {:?}", path))
    }

    /// File from config when given, embedded set otherwise
    pub fn load(path: Option<&Path>, placeholder: &str) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path, placeholder),
            None => Self::embedded(placeholder),
        }
    }

    fn parse(content: &str, placeholder: &str) -> Result<Self> {
        let mut artists: Vec<ArtistRecord> = serde_json::from_str(content)?;
        if artists.is_empty() {
            bail!("demo artist set is empty");
        }

        for artist in &mut artists {
            if !is_image_url(&artist.image) {
                artist.image = placeholder.to_string();
            }
        }

        Ok(Self { artists })
    }

    pub fn artists(&self) -> Vec<ArtistRecord> {
        self.artists.clone()
    }

    pub fn find(&self, id: &str) -> Option<ArtistRecord> {
        self.artists.iter().find(|a| a.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }
}
