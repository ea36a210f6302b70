//! # HTTP Layer
//!
//! A small synchronous server over [`tiny_http`]: a fixed pool of worker
//! threads pulls requests off the shared listener, each handling one request
//! end to end. There is no shared in-memory dataset: every handler goes
//! through the store, so two overlapping writes race only at the file level
//! (last save wins).
//!
//! Routing, CORS, and static file serving are deliberately mechanical; the
//! interesting behavior lives behind [`BookstockApi`].

use crate::api::BookstockApi;
use crate::error::{BookstockError, Result};
use crate::model::Dataset;
use crate::store::DataStore;
use serde_json::json;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use tiny_http::{Header, Method, Request, Response, Server};

type BoxedResponse = Response<Box<dyn Read + Send>>;

/// Bind `addr` and serve requests until the process is stopped. Blocks the
/// calling thread; `workers` request handlers run concurrently.
pub fn serve<S>(api: BookstockApi<S>, static_dir: PathBuf, addr: &str, workers: usize) -> Result<()>
where
    S: DataStore + Send + Sync + 'static,
{
    let server =
        Arc::new(Server::http(addr).map_err(|e| BookstockError::Server(e.to_string()))?);
    let api = Arc::new(api);
    let static_dir = Arc::new(static_dir);

    let mut handles = Vec::new();
    for _ in 0..workers.max(1) {
        let server = Arc::clone(&server);
        let api = Arc::clone(&api);
        let static_dir = Arc::clone(&static_dir);
        handles.push(thread::spawn(move || {
            for request in server.incoming_requests() {
                handle(request, &api, &static_dir);
            }
        }));
    }
    for handle in handles {
        let _ = handle.join();
    }
    Ok(())
}

fn handle<S: DataStore>(mut request: Request, api: &BookstockApi<S>, static_dir: &Path) {
    let response = with_cors(route(&mut request, api, static_dir));
    if let Err(e) = request.respond(response) {
        eprintln!("Error: failed to send response: {}", e);
    }
}

fn route<S: DataStore>(
    request: &mut Request,
    api: &BookstockApi<S>,
    static_dir: &Path,
) -> BoxedResponse {
    // CORS preflight, any path.
    if request.method() == &Method::Options {
        return Response::empty(200).boxed();
    }

    let path = request.url().split('?').next().unwrap_or("/").to_string();
    match path.as_str() {
        "/api/data" => match request.method() {
            Method::Get => get_data(api),
            Method::Post => run_write(request, api, WriteOp::Replace),
            _ => method_not_allowed(),
        },
        "/api/data/row" => match request.method() {
            Method::Post => run_write(request, api, WriteOp::Row),
            _ => method_not_allowed(),
        },
        "/api/data/import" => match request.method() {
            Method::Post => run_write(request, api, WriteOp::Import),
            _ => method_not_allowed(),
        },
        _ => serve_static(static_dir, &path),
    }
}

enum WriteOp {
    Replace,
    Row,
    Import,
}

fn get_data<S: DataStore>(api: &BookstockApi<S>) -> BoxedResponse {
    let data = match api.data() {
        Ok(data) => data,
        Err(e) => return error_response(&e),
    };
    match serde_json::to_string(&data) {
        Ok(body) => json_response(200, body),
        Err(e) => error_response(&BookstockError::Server(e.to_string())),
    }
}

fn run_write<S: DataStore>(
    request: &mut Request,
    api: &BookstockApi<S>,
    op: WriteOp,
) -> BoxedResponse {
    let incoming = match read_dataset(request) {
        Ok(data) => data,
        Err(e) => return error_response(&e),
    };

    let result = match op {
        WriteOp::Replace => api.replace(incoming).map(|_| "Data saved".to_string()),
        WriteOp::Row => api.save_row(incoming).map(|_| "Row saved".to_string()),
        WriteOp::Import => api
            .import_books(incoming)
            .map(|outcome| format!("Imported {} books", outcome.appended)),
    };

    match result {
        Ok(message) => json_response(200, envelope(true, &message)),
        Err(e) => error_response(&e),
    }
}

fn read_dataset(request: &mut Request) -> Result<Dataset> {
    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .map_err(|e| BookstockError::Decode(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| BookstockError::Decode(e.to_string()))
}

fn serve_static(static_dir: &Path, path: &str) -> BoxedResponse {
    if path.split('/').any(|segment| segment == "..") {
        return not_found();
    }

    let relative = path.trim_start_matches('/');
    let target = if relative.is_empty() {
        static_dir.join("index.html")
    } else {
        static_dir.join(relative)
    };

    if !target.is_file() {
        return not_found();
    }
    match File::open(&target) {
        Ok(file) => Response::from_file(file)
            .with_header(content_type(mime_for(&target)))
            .boxed(),
        Err(_) => not_found(),
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "html" => "text/html; charset=utf-8",
        "js" => "application/javascript",
        "css" => "text/css",
        "json" => "application/json",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

fn envelope(success: bool, message: &str) -> String {
    json!({ "success": success, "message": message }).to_string()
}

fn error_response(error: &BookstockError) -> BoxedResponse {
    let status = match error {
        BookstockError::Decode(_) => 400,
        _ => 500,
    };
    json_response(status, envelope(false, &error.to_string()))
}

fn json_response(status: u16, body: String) -> BoxedResponse {
    Response::from_string(body)
        .with_status_code(status)
        .with_header(content_type("application/json"))
        .boxed()
}

fn method_not_allowed() -> BoxedResponse {
    Response::from_string("Method not allowed")
        .with_status_code(405)
        .boxed()
}

fn not_found() -> BoxedResponse {
    Response::from_string("Not found").with_status_code(404).boxed()
}

fn content_type(value: &str) -> Header {
    header("Content-Type", value)
}

fn with_cors(response: BoxedResponse) -> BoxedResponse {
    response
        .with_header(header("Access-Control-Allow-Origin", "*"))
        .with_header(header("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS"))
        .with_header(header("Access-Control-Allow-Headers", "Content-Type, Authorization"))
}

fn header(name: &str, value: &str) -> Header {
    // Both inputs are static, known-valid header text.
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("valid header")
}
