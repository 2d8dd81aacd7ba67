use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};

use tracing::{info, warn};

use crate::parser::ParseOptions;

pub mod api;
pub mod routes;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

pub fn run_server(bind_addr: &str, options: ParseOptions) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    info!("battlelog server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                if let Err(err) = handle_connection(&stream, &options) {
                    warn!(error = %err, "request error");
                }
            }
            Err(err) => warn!(error = %err, "connection failed"),
        }
    }

    Ok(())
}

fn handle_connection(stream: &TcpStream, options: &ParseOptions) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line)? == 0 {
        return Ok(());
    }
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET").to_string();
    let path = request_parts.next().unwrap_or("/").to_string();

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let response = if content_length > MAX_BODY_BYTES {
        routes::error_response(413, "Payload Too Large", "Battle report is too large")
    } else {
        let mut body = vec![0_u8; content_length];
        reader.read_exact(&mut body)?;
        let body = String::from_utf8_lossy(&body);
        info!(%method, %path, bytes = content_length, "request");
        routes::route_request(&method, &path, &body, options)
    };

    let mut writer = stream;
    writer.write_all(response.to_http_string().as_bytes())?;
    writer.flush()?;
    Ok(())
}
