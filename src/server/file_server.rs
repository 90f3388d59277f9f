use std::fs::File;
use std::io::Write;
use std::net::TcpListener;

use tiny_http::{Method, Request, Response, StatusCode};

use super::{Result, ServerError, SubprocessMessage};
use crate::comms::{FILE_ROUTE, FILENAME_QUERY_KEY};

/// Runs the file-serving subprocess: binds an OS-assigned port on the
/// loopback interface, announces it to the supervisor over stdout, then
/// answers file requests until the process is terminated.
pub fn serve() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(ServerError::Bind)?;
    let port = listener.local_addr().map_err(ServerError::Bind)?.port();
    announce(port)?;

    let server = tiny_http::Server::from_listener(listener, None)
        .map_err(|error| ServerError::Http(error.to_string()))?;
    for request in server.incoming_requests() {
        handle_request(request);
    }
    Ok(())
}

/// Writes the one-shot port announcement line the supervisor waits for.
fn announce(port: u16) -> Result<()> {
    let message = serde_json::to_string(&SubprocessMessage::file_server_port(port))
        .map_err(|error| ServerError::Http(error.to_string()))?;
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{message}")?;
    stdout.flush()?;
    Ok(())
}

fn handle_request(request: Request) {
    if request.method() != &Method::Get {
        respond_status(request, 405);
        return;
    }

    let url = request.url().to_string();
    let (route, query) = match url.split_once('?') {
        Some((route, query)) => (route, Some(query)),
        None => (url.as_str(), None),
    };
    if route.trim_start_matches('/') != FILE_ROUTE {
        respond_status(request, 404);
        return;
    }

    let Some(path) = query.and_then(parse_filename) else {
        respond_status(request, 400);
        return;
    };

    match File::open(&path) {
        Ok(file) => {
            let response = Response::from_file(file).with_header(
                tiny_http::Header::from_bytes(
                    &b"Content-Type"[..],
                    &b"application/octet-stream"[..],
                )
                .expect("content-type header"),
            );
            let _ = request.respond(response);
        }
        Err(error) => {
            tracing::debug!(%path, %error, "file request failed");
            respond_status(request, 404);
        }
    }
}

fn respond_status(request: Request, status: u16) {
    let _ = request.respond(Response::empty(StatusCode(status)));
}

/// Extracts the requested file path from the query string. The value is
/// percent-decoded; hosts that built the URL without encoding pass through
/// unchanged.
pub(crate) fn parse_filename(query: &str) -> Option<String> {
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if key == FILENAME_QUERY_KEY {
            return Some(
                urlencoding::decode(value)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| value.to_string()),
            );
        }
    }
    None
}
