//! Artist repository
//!
//! Fetches artists from Deezer, normalizes them into [`ArtistRecord`]s, merges
//! enrichment and album data, and keeps them in an owned [`ArtistCache`].
//!
//! None of the public operations return errors: upstream failures are logged
//! and replaced by cached data, the demo catalog, or an empty list.
//!
//! In [`EnrichmentMode::Combined`] every operation resolves only after its
//! secondary requests have been merged. In [`EnrichmentMode::Progressive`] the
//! primary record is returned at once and a spawned task patches the cache
//! later; subscribers of [`ArtistCache::subscribe`] are told when that lands.

use anyhow::Result;
use futures::future::join_all;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::demo::DemoCatalog;
use super::enrichment::{detail_biography, Enrichment};
use super::images::pick_image;
use crate::clients::{DeezerApi, DeezerClient};
use crate::config::{AppConfig, EnrichmentMode};
use crate::models::deezer::{DeezerAlbum, DeezerArtist};
use crate::models::{AlbumRecord, ArtistRecord};
use crate::stores::{ArtistCache, CacheEvent};

/// Knobs the repository needs from the app config
#[derive(Debug, Clone)]
pub struct RepositorySettings {
    pub mode: EnrichmentMode,
    pub placeholder: String,
    pub album_limit: usize,
    pub top_tracks_limit: usize,
    pub search_limit: usize,
}

impl From<&AppConfig> for RepositorySettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            mode: config.enrichment_mode,
            placeholder: config.default_image.clone(),
            album_limit: config.album_limit,
            top_tracks_limit: config.top_tracks_limit,
            search_limit: config.search_limit,
        }
    }
}

/// Cloning is cheap; clones share the cache and upstream client
#[derive(Clone)]
pub struct ArtistRepository {
    api: Arc<dyn DeezerApi>,
    cache: Arc<ArtistCache>,
    demo: Arc<DemoCatalog>,
    scores: Arc<Mutex<StdRng>>,
    settings: RepositorySettings,
}

impl ArtistRepository {
    pub fn new(
        api: Arc<dyn DeezerApi>,
        demo: DemoCatalog,
        settings: RepositorySettings,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            api,
            cache: Arc::new(ArtistCache::new()),
            demo: Arc::new(demo),
            scores: Arc::new(Mutex::new(rng)),
            settings,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = DeezerClient::from_config(config)?;
        let demo = DemoCatalog::load(config.demo_data_path.as_deref(), &config.default_image)?;
        info!(
            "Artist repository using {} ({:?} enrichment, {} demo artists)",
            client.base_url(),
            config.enrichment_mode,
            demo.len()
        );

        Ok(Self::new(
            Arc::new(client),
            demo,
            RepositorySettings::from(config),
            config.cosmetic_seed,
        ))
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<CacheEvent> {
        self.cache.subscribe()
    }

    /// Up to `count` chart artists
    pub async fn get_top_artists(&self, count: usize) -> Vec<ArtistRecord> {
        if self.cache.count() >= count {
            debug!("Serving {} top artists from cache", count);
            return self.cache.first(count);
        }

        let raw = match self.api.chart_artists(count).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to fetch top artists, using demo data: {}", e);
                return self.demo.artists();
            }
        };

        let mut artists: Vec<ArtistRecord> = raw.iter().map(|a| self.to_record(a)).collect();
        if artists.is_empty() {
            info!("Deezer chart returned no artists");
            return artists;
        }

        let ids: Vec<String> = artists.iter().map(|a| a.id.clone()).collect();

        match self.settings.mode {
            EnrichmentMode::Combined => {
                let enrichments =
                    join_all(artists.iter().map(|a| self.enrich_artist_data(&a.id))).await;
                for (artist, enrichment) in artists.iter_mut().zip(enrichments) {
                    enrichment.apply_to(artist);
                }
                self.cache.load(artists);
            }
            EnrichmentMode::Progressive => {
                self.cache.load(artists);
                let repo = self.clone();
                let pending = ids.clone();
                tokio::spawn(async move { repo.enrich_cached(pending).await });
            }
        }

        ids.iter().filter_map(|id| self.cache.get(id)).collect()
    }

    /// Detail view of one artist, with albums
    pub async fn get_artist_by_id(&self, id: &str) -> Option<ArtistRecord> {
        if let Some(cached) = self.cache.get(id).filter(ArtistRecord::has_albums) {
            debug!("Serving artist {} from cache", id);
            return Some(cached);
        }

        let raw = match self.api.artist(id).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to fetch artist {}: {}", id, e);
                return self.demo.find(id);
            }
        };

        let mut artist = self.to_record(&raw);
        artist.bio = Some(detail_biography(&raw));
        if let Some(previous) = self.cache.get(&artist.id) {
            artist.absorb(&previous);
        }

        match self.settings.mode {
            EnrichmentMode::Combined => {
                artist.albums = self.get_artist_albums(&artist.id).await;
                self.cache.upsert(artist.clone());
            }
            EnrichmentMode::Progressive => {
                self.cache.upsert(artist.clone());
                let repo = self.clone();
                let artist_id = artist.id.clone();
                tokio::spawn(async move {
                    let albums = repo.get_artist_albums(&artist_id).await;
                    if !albums.is_empty() {
                        repo.cache.update(&artist_id, |a| a.albums = albums);
                    }
                });
            }
        }

        Some(artist)
    }

    /// Albums of an artist; empty on any failure
    pub async fn get_artist_albums(&self, id: &str) -> Vec<AlbumRecord> {
        match self.api.artist_albums(id, self.settings.album_limit).await {
            Ok(albums) => albums.iter().map(|a| self.to_album(a)).collect(),
            Err(e) => {
                warn!("Failed to fetch albums for artist {}: {}", id, e);
                Vec::new()
            }
        }
    }

    /// Artists matching `query`; empty for a blank query or on failure
    pub async fn search_artists(&self, query: &str) -> Vec<ArtistRecord> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match self.api.search_artists(query, self.settings.search_limit).await {
            Ok(raw) => raw.iter().map(|a| self.to_record(a)).collect(),
            Err(e) => {
                warn!("Artist search for '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Tags and biography from the artist's top tracks
    async fn enrich_artist_data(&self, id: &str) -> Enrichment {
        match self.api.artist_top(id, self.settings.top_tracks_limit).await {
            Ok(tracks) => Enrichment::from_top_tracks(&tracks),
            Err(e) => {
                debug!("Enrichment for artist {} failed: {}", id, e);
                Enrichment::fallback()
            }
        }
    }

    async fn enrich_cached(&self, ids: Vec<String>) {
        let enrichments = join_all(ids.iter().map(|id| self.enrich_artist_data(id))).await;
        for (id, enrichment) in ids.iter().zip(enrichments) {
            self.cache.update(id, |artist| enrichment.apply_to(artist));
        }
        debug!("Enriched {} cached artists", ids.len());
    }

    fn to_record(&self, raw: &DeezerArtist) -> ArtistRecord {
        let image = pick_image(raw.picture_candidates(), &self.settings.placeholder);
        let mut artist = ArtistRecord::new(raw.id.to_string(), raw.name.clone(), image);
        artist.listeners = raw.nb_fan.unwrap_or(0);
        artist.url = raw.link.clone().unwrap_or_default();

        let mut rng = self.scores.lock();
        artist.rating = rng.gen_range(1..=5);
        artist.progress = rng.gen_range(0..100);

        artist
    }

    fn to_album(&self, raw: &DeezerAlbum) -> AlbumRecord {
        AlbumRecord {
            id: raw.id.to_string(),
            title: raw.title.clone(),
            image: pick_image(raw.cover_candidates(), &self.settings.placeholder),
            url: raw.link.clone().unwrap_or_default(),
            release_date: raw.release_date.clone().unwrap_or_default(),
        }
    }
}
