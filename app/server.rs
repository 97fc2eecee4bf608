//! HTTP front end for dir2md (feature = "server").
//!
//! Exposes `POST /api/generate` accepting the generation configuration as a
//! JSON body (`directory` names the root) and responding with
//! `{"ok":true,"filename":…,"markdown":…}` or `{"error":…}` plus an
//! appropriate status. The endpoint is a thin shim; it takes no part in the
//! generation algorithm itself.

use dir2md::{GenerateError, GenerateOptions, default_text_extensions, generate, validate_root};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::exit;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(default)]
    directory: String,
    #[serde(default)]
    include_contents: bool,
    #[serde(default)]
    max_depth: Option<usize>,
    #[serde(default = "default_max_file_size")]
    max_file_size_bytes: u64,
    #[serde(default = "default_max_lines")]
    max_lines_per_file: usize,
    #[serde(default = "default_max_bytes")]
    max_bytes_per_file: usize,
    #[serde(default = "default_max_total")]
    max_total_bytes: usize,
    #[serde(default)]
    ext_whitelist: Option<Vec<String>>,
    #[serde(default)]
    exclude_globs: Vec<String>,
    #[serde(default)]
    analyze: bool,
}

fn default_max_file_size() -> u64 {
    500_000
}
fn default_max_lines() -> usize {
    1200
}
fn default_max_bytes() -> usize {
    200_000
}
fn default_max_total() -> usize {
    5_000_000
}

fn json_response(status: StatusCode, body: &serde_json::Value) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid HTTP response")
}

fn error_response(status: StatusCode, message: &str) -> Response<Body> {
    json_response(status, &json!({ "error": message }))
}

async fn handle(req: Request<Body>) -> Result<Response<Body>, Infallible> {
    match (req.method(), req.uri().path()) {
        (&Method::POST, "/api/generate") => Ok(handle_generate(req).await),
        _ => Ok(error_response(StatusCode::NOT_FOUND, "Not found.")),
    }
}

async fn handle_generate(req: Request<Body>) -> Response<Body> {
    let bytes = match hyper::body::to_bytes(req.into_body()).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, &format!("Bad request body: {e}"));
        }
    };
    let request: GenerateRequest = match serde_json::from_slice(&bytes) {
        Ok(request) => request,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, &format!("Invalid JSON body: {e}"));
        }
    };
    if request.directory.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing 'directory'.");
    }

    let root = match validate_root(&PathBuf::from(&request.directory)) {
        Ok(root) => root,
        Err(GenerateError::NotFound(_)) => {
            return error_response(StatusCode::NOT_FOUND, "Directory not found.");
        }
        Err(GenerateError::NotADirectory(_)) => {
            return error_response(StatusCode::BAD_REQUEST, "Path is not a directory.");
        }
        Err(e) => {
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
        }
    };

    let filename = format!(
        "snapshot-{}.md",
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string())
    );
    let options = GenerateOptions {
        root,
        include_contents: request.include_contents,
        max_depth: request.max_depth,
        max_file_size_bytes: request.max_file_size_bytes,
        max_lines_per_file: request.max_lines_per_file,
        max_bytes_per_file: request.max_bytes_per_file,
        max_total_bytes: request.max_total_bytes,
        ext_whitelist: request
            .ext_whitelist
            .unwrap_or_else(default_text_extensions),
        exclude_globs: request.exclude_globs,
        analyze: request.analyze,
    };

    // Generation is synchronous filesystem work; keep it off the async core.
    let result = tokio::task::spawn_blocking(move || generate(&options)).await;
    match result {
        Ok(Ok(markdown)) => json_response(
            StatusCode::OK,
            &json!({ "ok": true, "filename": filename, "markdown": markdown }),
        ),
        Ok(Err(e)) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Generation task failed: {e}"),
        ),
    }
}

#[tokio::main]
async fn main() {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000u16);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let make_service =
        make_service_fn(|_| async { Ok::<_, Infallible>(service_fn(handle)) });
    let server = match Server::try_bind(&addr) {
        Ok(builder) => builder.serve(make_service),
        Err(e) => {
            eprintln!("Error: failed to bind {addr}: {e}");
            exit(1);
        }
    };

    println!("dir2md server listening on http://{addr}");
    if let Err(e) = server.await {
        eprintln!("Server error: {e}");
        exit(1);
    }
}
