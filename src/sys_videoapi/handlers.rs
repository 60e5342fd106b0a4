//! HTTP glue: turn library results into hyper::Response<Body>.

use hyper::{Body, Request, Response, StatusCode, header::CONTENT_TYPE};
use multer::Multipart;
use serde_json::json;
use tracing::error;

use crate::error::ApiError;
use crate::sys_videoapi::core::VideoLibrary;

fn json_response(status: StatusCode, value: serde_json::Value) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(value.to_string()))
        .unwrap()
}

fn fail(context: &str, err: ApiError) -> Response<Body> {
    if err.status().is_server_error() {
        error!(error = %err, "{context} failed");
    }
    err.to_response()
}

/// `POST /api/videos`: multipart/form-data with a file in the `video` field.
pub async fn handler_upload(req: Request<Body>, library: &VideoLibrary) -> Response<Body> {
    let ct = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    let boundary = match multer::parse_boundary(ct) {
        Ok(b) => b,
        Err(_) => {
            return fail(
                "upload",
                ApiError::BadRequest("expected multipart/form-data".to_string()),
            );
        }
    };

    let mut multipart = Multipart::new(req.into_body(), boundary);
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("video") => {
                return match library.add(field).await {
                    Ok(record) => {
                        json_response(StatusCode::OK, json!({ "success": true, "url": record.url }))
                    }
                    Err(e) => fail("upload", e),
                };
            }
            // Unrelated form field; keep scanning.
            Ok(Some(_)) => continue,
            Ok(None) => {
                return fail(
                    "upload",
                    ApiError::BadRequest("no 'video' field found".to_string()),
                );
            }
            Err(e) => return fail("upload", ApiError::from(e)),
        }
    }
}

/// `GET /api/videos`: the full record list, store order.
pub async fn handler_list(library: &VideoLibrary) -> Response<Body> {
    match library.list().await {
        Ok(records) => {
            let body = serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_string());
            Response::builder()
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap()
        }
        Err(e) => fail("list", e),
    }
}

/// `DELETE /api/videos/{filename}`: remove the record, then the file.
pub async fn handler_delete(filename: &str, library: &VideoLibrary) -> Response<Body> {
    match library.remove(filename).await {
        Ok(()) => json_response(StatusCode::OK, json!({ "success": true })),
        Err(e) => fail("delete", e),
    }
}
