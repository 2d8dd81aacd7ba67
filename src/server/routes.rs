use tracing::warn;

use crate::parser::ParseOptions;
use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }

    fn json(body: String) -> Self {
        Self {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        }
    }
}

pub fn route_request(method: &str, path: &str, body: &str, options: &ParseOptions) -> HttpResponse {
    let path = path.split('?').next().unwrap_or(path);
    match (method, path) {
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => HttpResponse::json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/parse") => match api::parse_payload(body, options) {
            Ok(payload) => HttpResponse::json(payload),
            Err(api::ParsePayloadError::EmptyBody) => {
                error_response(400, "Bad Request", "Request body must contain the battle report HTML")
            }
            Err(api::ParsePayloadError::Parse(err)) => {
                warn!(error = %err, "rejected battle report");
                parse_error_response(&err)
            }
            Err(api::ParsePayloadError::Encode(err)) => {
                error_response(500, "Internal Server Error", &err.to_string())
            }
        },
        (_, "/api/health") | (_, "/api/parse") => {
            error_response(405, "Method Not Allowed", "Method not allowed")
        }
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn parse_error_response(err: &crate::error::ParseError) -> HttpResponse {
    let payload = api::ParseErrorResponse::from(err);
    match serde_json::to_string_pretty(&payload) {
        Ok(body) => HttpResponse {
            status_code: 400,
            status_text: "Bad Request",
            content_type: "application/json",
            body,
        },
        Err(_) => error_response(400, "Bad Request", &err.to_string()),
    }
}

pub fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
