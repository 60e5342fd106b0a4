//! HTTP glue: stream files resolved by `core::map_static_path`.

use std::path::Path;

use hyper::{Body, Response, StatusCode, header::CONTENT_TYPE};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Serve one file from disk with a guessed content type.
pub async fn handler_file(path: &Path) -> Response<Body> {
    match File::open(path).await {
        Ok(file) => {
            let stream = ReaderStream::new(file);
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Response::builder()
                .header(CONTENT_TYPE, mime.as_ref())
                .body(Body::wrap_stream(stream))
                .unwrap()
        }
        Err(_) => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Not found"))
            .unwrap(),
    }
}

/// Try to serve a static route. `None` means "not a static path".
pub async fn handler_static(static_dir: &Path, uri: &str) -> Option<Response<Body>> {
    match crate::sys_statichost::core::map_static_path(static_dir, uri) {
        Some(path) => Some(handler_file(&path).await),
        None => None,
    }
}
