//! Artist API routes

use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;

use super::AppState;

const MAX_TOP_ARTISTS: usize = 100;

/// Query parameters for the top artists endpoint
#[derive(Debug, Deserialize)]
pub struct TopArtistsQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Chart artists, enriched
#[get("/top")]
pub async fn get_top_artists(
    state: web::Data<AppState>,
    query: web::Query<TopArtistsQuery>,
) -> impl Responder {
    let count = query
        .count
        .unwrap_or(state.top_artists_count)
        .clamp(1, MAX_TOP_ARTISTS);

    HttpResponse::Ok().json(state.repo.get_top_artists(count).await)
}

/// Search artists by name
#[get("/search")]
pub async fn search_artists(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    HttpResponse::Ok().json(state.repo.search_artists(&query.q).await)
}

/// Artist detail with albums
#[get("/{id}")]
pub async fn get_artist(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.repo.get_artist_by_id(&path.into_inner()).await {
        Some(artist) => HttpResponse::Ok().json(artist),
        None => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Artist not found"
        })),
    }
}

#[get("/{id}/albums")]
pub async fn get_artist_albums(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    HttpResponse::Ok().json(state.repo.get_artist_albums(&path.into_inner()).await)
}

/// Configure artist routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_top_artists)
        .service(search_artists)
        .service(get_artist)
        .service(get_artist_albums);
}
