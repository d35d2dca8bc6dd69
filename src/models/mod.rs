//! Data models
//!
//! Records handed to consumers (`ArtistRecord`, `AlbumRecord`) and the wire
//! types of the upstream APIs they are built from.

mod album;
mod artist;
pub mod deezer;
mod lastfm;

pub use album::AlbumRecord;
pub use artist::{ArtistRecord, Biography};
pub use lastfm::LastfmArtist;

pub(crate) use lastfm::ChartResponse as LastfmChartResponse;
