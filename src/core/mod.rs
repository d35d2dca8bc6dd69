//! Core artist logic: normalization, enrichment and the cached repository

pub mod demo;
pub mod enrichment;
pub mod images;
pub mod repository;

pub use demo::DemoCatalog;
pub use repository::{ArtistRepository, RepositorySettings};
