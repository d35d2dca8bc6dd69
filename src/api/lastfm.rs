//! Last.fm chart route

use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;

use super::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LastfmTopQuery {
    pub limit: Option<usize>,
}

fn default_limit() -> usize {
    5
}

/// Top artists straight from Last.fm, not cached
#[get("/top")]
pub async fn get_top_artists(
    state: web::Data<AppState>,
    query: web::Query<LastfmTopQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or_else(default_limit).clamp(1, 50);

    match state.lastfm.top_artists(limit).await {
        Ok(artists) => HttpResponse::Ok().json(artists),
        Err(ApiError::Disabled(reason)) => HttpResponse::ServiceUnavailable().json(
            serde_json::json!({
                "error": reason
            }),
        ),
        Err(e) => {
            tracing::warn!("Last.fm chart request failed: {}", e);
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": format!("Error accessing Last.fm API: {}", e)
            }))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_top_artists);
}
