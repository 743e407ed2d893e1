//! HTTP backend: auth routes plus the catalog token/search broker
//!
//! Requests are handled one at a time on the accept loop; the routes
//! themselves live in [`routes`] so they can be exercised without a socket.

pub mod routes;

pub use routes::{ApiResponse, ServerContext};

use std::io::Read as _;
use tiny_http::{Header, Request, Response, Server};

const RESPONSE_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
];

pub type ServerError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub fn bind(addr: &str) -> Result<Server, ServerError> {
    let server = Server::http(addr)?;
    match server.server_addr().to_ip() {
        Some(ip) => log::info!("[Server] Server running on http://{}", ip),
        None => log::info!("[Server] Server running on {}", addr),
    }
    Ok(server)
}

/// Accept loop; returns only when the listener shuts down
pub fn serve(ctx: &ServerContext, server: &Server) {
    for request in server.incoming_requests() {
        handle_request(ctx, request);
    }
    log::info!("[Server] Listener closed");
}

fn handle_request(ctx: &ServerContext, mut request: Request) {
    let method = request.method().clone();
    let url = request.url().to_string();

    let mut body = String::new();
    let reply = match request.as_reader().read_to_string(&mut body) {
        Ok(_) => ctx.handle(&method, &url, &body),
        Err(e) => {
            log::warn!("[Server] Unreadable body for {} {}: {}", method, url, e);
            ApiResponse {
                status: 400,
                body: r#"{"message":"Malformed request body"}"#.to_string(),
            }
        }
    };

    // Query strings carry search keywords only; keep the log to the path
    let path = url.split('?').next().unwrap_or_default();
    log::info!("[Server] {} {} -> {}", method, path, reply.status);

    let mut response = Response::from_string(reply.body).with_status_code(reply.status);
    for (name, value) in RESPONSE_HEADERS {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => response.add_header(header),
            Err(()) => log::warn!("[Server] Invalid header {}", name),
        }
    }

    if let Err(e) = request.respond(response) {
        log::warn!("[Server] Failed to send response: {}", e);
    }
}
