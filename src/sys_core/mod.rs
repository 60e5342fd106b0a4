//! Server loop and request dispatch: method + path to exactly one handler,
//! permissive CORS on every response.

use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use hyper::{
    Body, Method, Request, Response, Server, StatusCode,
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue,
    },
    service::{make_service_fn, service_fn},
};
use tracing::{error, info};

use crate::config::Config;
use crate::sys_statichost;
use crate::sys_videoapi::{core::VideoLibrary, handlers};

const API_VIDEOS: &str = "/api/videos";
const API_VIDEOS_PREFIX: &str = "/api/videos/";

/// Per-process state handed to every request.
pub struct AppState {
    pub config: Config,
    pub library: VideoLibrary,
}

/// Dispatch one request to exactly one handler.
pub async fn route(req: Request<Body>, state: Arc<AppState>) -> Response<Body> {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let resp = match (&method, path.as_str()) {
        // CORS preflight: empty 200.
        (&Method::OPTIONS, _) => Response::builder().body(Body::empty()).unwrap(),
        (&Method::GET, API_VIDEOS) => handlers::handler_list(&state.library).await,
        (&Method::POST, API_VIDEOS) => handlers::handler_upload(req, &state.library).await,
        (&Method::DELETE, p) if p.starts_with(API_VIDEOS_PREFIX) => {
            let filename = &p[API_VIDEOS_PREFIX.len()..];
            handlers::handler_delete(filename, &state.library).await
        }
        (_, p) if p.starts_with("/api/") => not_found(),
        (&Method::GET, p) => serve_files(p, &state).await,
        _ => not_found(),
    };

    with_cors(resp)
}

/// Uploaded bytes under the library's route prefix, everything else from
/// the static dir.
async fn serve_files(path: &str, state: &AppState) -> Response<Body> {
    let uploads_prefix = format!("{}/", state.library.route_prefix());
    if let Some(name) = path.strip_prefix(uploads_prefix.as_str()) {
        if sys_statichost::core::is_clean(name) {
            return sys_statichost::handlers::handler_file(&state.library.upload_dir().join(name))
                .await;
        }
        return not_found();
    }

    match sys_statichost::handlers::handler_static(&state.config.static_dir, path).await {
        Some(resp) => resp,
        None => not_found(),
    }
}

fn not_found() -> Response<Body> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Body::from("Not found"))
        .unwrap()
}

fn with_cors(mut resp: Response<Body>) -> Response<Body> {
    let headers = resp.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    resp
}

/// Bind and serve until the process is killed.
pub async fn run_server(port: u16, state: Arc<AppState>) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let make_svc = make_service_fn(move |_conn| {
        let state = state.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                let state = state.clone();
                async move { Ok::<_, Infallible>(route(req, state).await) }
            }))
        }
    });

    info!(%addr, "serving");
    if let Err(e) = Server::bind(&addr).serve(make_svc).await {
        error!(error = %e, "server error");
    }
}
