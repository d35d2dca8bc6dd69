//! Static build output with a client-side router fallback

use actix_files::NamedFile;
use actix_web::{HttpRequest, HttpResponse};
use std::path::{Component, Path, PathBuf};

const INDEX_FILE: &str = "index.html";

/// File under `dist` for a request path, if it stays inside `dist`
pub fn resolve(dist: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }

    let mut resolved = dist.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            _ => return None,
        }
    }
    Some(resolved)
}

/// Serve the file at the request path, or the entry document
pub fn serve(dist: &Path, req: &HttpRequest) -> HttpResponse {
    if let Some(path) = resolve(dist, req.path()).filter(|p| p.is_file()) {
        return serve_named(&path, req);
    }
    serve_index(dist, req)
}

/// Serve `index.html` for routes the client router owns
pub fn serve_index(dist: &Path, req: &HttpRequest) -> HttpResponse {
    let index = dist.join(INDEX_FILE);
    if !index.is_file() {
        tracing::warn!("No {} in {:?}", INDEX_FILE, dist);
        return HttpResponse::NotFound().body("Application entry document not found");
    }
    serve_named(&index, req)
}

fn serve_named(path: &Path, req: &HttpRequest) -> HttpResponse {
    match NamedFile::open(path) {
        Ok(file) => file.into_response(req),
        Err(_) => HttpResponse::NotFound().body("File not found"),
    }
}
