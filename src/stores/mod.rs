//! In-memory stores

mod artist_store;

pub use artist_store::{ArtistCache, CacheEvent};
