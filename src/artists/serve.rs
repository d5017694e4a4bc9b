//! HTTP front for the top-artists handler, built on `tiny_http`.
//!
//! Requests are handled one at a time on the calling thread; nothing is
//! shared between them. Ctrl+C unblocks the accept loop and returns.

use anyhow::{anyhow, Context, Result};
use std::{io::Cursor, net::SocketAddr, sync::Arc};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use super::{handle, Reply, TopArtistsSource};

pub const TOP_ARTISTS_ROUTE: &str = "/api/top-artists";

/// Run the request loop until Ctrl+C.
pub fn serve(addr: SocketAddr, source: &dyn TopArtistsSource) -> Result<()> {
    let server = Server::http(addr).map_err(|e| anyhow!("Failed to bind {}: {}", addr, e))?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log::info!("Shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log::info!("Listening on http://{}{}", addr, TOP_ARTISTS_ROUTE);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, source) {
            log::warn!("Request error: {e}");
        }
    }

    Ok(())
}

/// Pick a reply for a method and raw request URL. The query string is ignored.
pub fn route(method: &Method, url: &str, source: &dyn TopArtistsSource) -> Reply {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path.trim_end_matches('/')) {
        (Method::Get, TOP_ARTISTS_ROUTE) => handle(source),
        (_, TOP_ARTISTS_ROUTE) => Reply::error(405, "method not allowed"),
        _ => Reply::error(404, "not found"),
    }
}

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow!("Invalid header {}: {}", name, value))
}

/// Put a reply on the wire: JSON body, cache directive when set, `Allow` on 405.
fn to_response(reply: Reply) -> Result<Response<Cursor<Vec<u8>>>> {
    let mut response = Response::from_string(reply.body)
        .with_status_code(StatusCode(reply.status))
        .with_header(header("Content-Type", "application/json")?);
    if let Some(cache_control) = reply.cache_control {
        response.add_header(header("Cache-Control", cache_control)?);
    }
    if reply.status == 405 {
        response.add_header(header("Allow", "GET")?);
    }

    Ok(response)
}

fn handle_request(request: Request, source: &dyn TopArtistsSource) -> Result<()> {
    let reply = route(request.method(), request.url(), source);
    log::info!("{} {} -> {}", request.method(), request.url(), reply.status);

    let response = to_response(reply)?;
    request
        .respond(response)
        .context("Failed to send response")
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use tiny_http::{Method, Response};

    use super::{route, to_response};
    use crate::artists::{
        test::{artist, Down, Fixed},
        CACHE_CONTROL,
    };

    #[test]
    fn top_artists() {
        let reply = route(
            &Method::Get,
            "/api/top-artists?time_range=short_term",
            &Fixed(vec![artist(0)]),
        );

        assert_eq!(reply.status, 200);
        assert_eq!(reply.cache_control, Some(CACHE_CONTROL));
    }

    #[test]
    fn upstream_down() {
        assert_eq!(route(&Method::Get, "/api/top-artists", &Down).status, 502);
    }

    #[test]
    fn wrong_method() {
        let reply = route(&Method::Post, "/api/top-artists", &Fixed(vec![]));
        assert_eq!(reply.status, 405);
    }

    fn header_value<'a>(
        response: &'a Response<Cursor<Vec<u8>>>,
        name: &'static str,
    ) -> Option<&'a str> {
        response
            .headers()
            .iter()
            .find(|header| header.field.equiv(name))
            .map(|header| header.value.as_str())
    }

    #[test]
    fn response_headers() {
        let source = Fixed(vec![artist(0)]);
        let ok = to_response(route(&Method::Get, "/api/top-artists", &source)).unwrap();
        assert_eq!(ok.status_code().0, 200);
        assert_eq!(header_value(&ok, "Content-Type"), Some("application/json"));
        assert_eq!(header_value(&ok, "Cache-Control"), Some(CACHE_CONTROL));
        assert_eq!(header_value(&ok, "Allow"), None);

        let down = to_response(route(&Method::Get, "/api/top-artists", &Down)).unwrap();
        assert_eq!(down.status_code().0, 502);
        assert_eq!(header_value(&down, "Content-Type"), Some("application/json"));
        assert_eq!(header_value(&down, "Cache-Control"), None);

        let post = to_response(route(&Method::Post, "/api/top-artists", &Fixed(vec![]))).unwrap();
        assert_eq!(post.status_code().0, 405);
        assert_eq!(header_value(&post, "Allow"), Some("GET"));
        assert_eq!(header_value(&post, "Cache-Control"), None);

        let missing = to_response(route(&Method::Get, "/", &Fixed(vec![]))).unwrap();
        assert_eq!(missing.status_code().0, 404);
        assert_eq!(header_value(&missing, "Content-Type"), Some("application/json"));
        assert_eq!(header_value(&missing, "Allow"), None);
    }

    #[test]
    fn unknown_path() {
        let reply = route(&Method::Get, "/api/top-tracks", &Fixed(vec![]));
        assert_eq!(reply.status, 404);
        assert_eq!(reply.body, r#"{"error":"not found"}"#);
    }
}
