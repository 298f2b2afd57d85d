//! Embedded static files module
//!
//! Serves the page shell and the WASM client bundle out of the binary,
//! so the viewer deploys as a single executable next to a data
//! directory.

use axum::{
    body::Body,
    extract::Path,
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use rust_embed::Embed;

/// Embedded static files from the `server/static` directory
#[derive(Embed)]
#[folder = "static"]
pub struct StaticAssets;

/// Serve an embedded static file
pub async fn serve_static(Path(path): Path<String>) -> impl IntoResponse {
    serve_embedded_file(&path)
}

/// Serve the root index.html
pub async fn serve_index() -> impl IntoResponse {
    serve_embedded_file("index.html")
}

fn serve_embedded_file(path: &str) -> Response<Body> {
    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime.as_ref())
                .body(Body::from(content.data.into_owned()))
                .unwrap()
        }
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Not Found"))
            .unwrap(),
    }
}
